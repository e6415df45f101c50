//! 1-D and 2-D pooling drivers
//!
//! Pooling windows are non-overlapping: the pool extent is both the kernel
//! extent and the stride along each pooled axis. Trailing input that does
//! not fill a whole window is never visited.

use crate::element::Element;
use crate::engine::{self, MaxReduce, MeanReduce, Strategy};
use crate::error::Result;
use crate::geometry::WindowGeometry;
use crate::source::TensorSource;

/// Configuration shared by [`MaxPool1d`] and [`AvgPool1d`]
#[derive(Debug, Clone, Copy)]
pub struct Pool1dConfig {
    /// Input steps
    pub len: usize,
    /// Channels per step (pooled independently)
    pub channels: usize,
    /// Pool extent along the step axis (also the stride)
    pub pool_len: usize,
    /// Cache strategy
    pub strategy: Strategy,
}

impl Default for Pool1dConfig {
    fn default() -> Self {
        Self {
            len: 0,
            channels: 1,
            pool_len: 0,
            strategy: Strategy::Direct,
        }
    }
}

/// Configuration shared by [`MaxPool2d`] and [`AvgPool2d`]
#[derive(Debug, Clone, Copy)]
pub struct Pool2dConfig {
    /// Input rows
    pub rows: usize,
    /// Input columns
    pub cols: usize,
    /// Channels per position (pooled independently)
    pub channels: usize,
    /// Pool extents `(rows, cols)` (also the strides)
    pub pool: (usize, usize),
    /// Cache strategy
    pub strategy: Strategy,
}

impl Default for Pool2dConfig {
    fn default() -> Self {
        Self {
            rows: 0,
            cols: 0,
            channels: 1,
            pool: (2, 2),
            strategy: Strategy::Block,
        }
    }
}

fn pool_geometry_1d(config: &Pool1dConfig, layer: &'static str) -> Result<WindowGeometry> {
    let geom =
        WindowGeometry::validate_1d(config.len, config.channels, config.pool_len, config.pool_len)?;
    tracing::debug!(
        len = config.len,
        channels = config.channels,
        pool_len = config.pool_len,
        out_len = geom.out_rows,
        strategy = ?config.strategy,
        "{layer} configured"
    );
    Ok(geom)
}

fn pool_geometry_2d(config: &Pool2dConfig, layer: &'static str) -> Result<WindowGeometry> {
    let geom = WindowGeometry::validate(
        config.rows,
        config.cols,
        config.channels,
        config.pool,
        config.pool,
    )?;
    tracing::debug!(
        rows = config.rows,
        cols = config.cols,
        channels = config.channels,
        pool = ?config.pool,
        out_rows = geom.out_rows,
        out_cols = geom.out_cols,
        strategy = ?config.strategy,
        "{layer} configured"
    );
    Ok(geom)
}

macro_rules! pool_layer {
    ($(#[$doc:meta])* $name:ident, $config:ty, $geometry:ident, $reduce:ident) => {
        $(#[$doc])*
        pub struct $name {
            geom: WindowGeometry,
            strategy: Strategy,
        }

        impl $name {
            /// Validate the configuration.
            pub fn new(config: $config) -> Result<Self> {
                let geom = $geometry(&config, stringify!($name))?;
                Ok(Self {
                    geom,
                    strategy: config.strategy,
                })
            }

            /// Flat output length: pooled positions × channels.
            pub fn output_len(&self) -> usize {
                self.geom.out_positions() * self.geom.channels
            }

            /// Output extents `(rows, cols, channels)`; 1-D layers always
            /// report one column.
            pub fn output_shape(&self) -> (usize, usize, usize) {
                (self.geom.out_rows, self.geom.out_cols, self.geom.channels)
            }

            /// Run one forward pass, writing one pooled value per channel
            /// per output position, row-major.
            pub fn feedforward<T, S>(&self, source: &S, output: &mut [T]) -> Result<()>
            where
                T: Element,
                S: TensorSource<T> + ?Sized,
            {
                let reduce = $reduce::new(&self.geom);
                engine::run(&self.geom, self.strategy, &reduce, source, output)
            }

            /// Forward pass with output rows split across rayon workers.
            #[cfg(feature = "rayon")]
            pub fn feedforward_par<T, S>(&self, source: &S, output: &mut [T]) -> Result<()>
            where
                T: Element,
                S: TensorSource<T> + Sync + ?Sized,
            {
                let reduce = $reduce::new(&self.geom);
                engine::run_parallel(&self.geom, self.strategy, &reduce, source, output)
            }
        }
    };
}

pool_layer!(
    /// 1-D max pooling: largest value in each pool window, per channel
    MaxPool1d,
    Pool1dConfig,
    pool_geometry_1d,
    MaxReduce
);

pool_layer!(
    /// 1-D average pooling: unrounded mean of each pool window, per channel
    AvgPool1d,
    Pool1dConfig,
    pool_geometry_1d,
    MeanReduce
);

pool_layer!(
    /// 2-D max pooling: largest value in each pool window, per channel
    MaxPool2d,
    Pool2dConfig,
    pool_geometry_2d,
    MaxReduce
);

pool_layer!(
    /// 2-D average pooling: unrounded mean of each pool window, per channel
    AvgPool2d,
    Pool2dConfig,
    pool_geometry_2d,
    MeanReduce
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avg_pool1d_reference_scenario() {
        let pool = AvgPool1d::new(Pool1dConfig {
            len: 4,
            pool_len: 2,
            ..Pool1dConfig::default()
        })
        .unwrap();
        let input = [1.0f32, 2.0, 3.0, 4.0];
        let mut out = [0.0f32; 2];
        pool.feedforward(&input[..], &mut out).unwrap();
        assert_eq!(out, [1.5, 3.5]);
    }

    #[test]
    fn test_max_pool1d_per_channel() {
        // channels pool independently: channel 1 is the negated mirror
        let pool = MaxPool1d::new(Pool1dConfig {
            len: 6,
            channels: 2,
            pool_len: 3,
            ..Pool1dConfig::default()
        })
        .unwrap();
        #[rustfmt::skip]
        let input = [
            1.0f32, -1.0,
            5.0, -5.0,
            3.0, -3.0,
            2.0, -2.0,
            4.0, -9.0,
            6.0, -4.0,
        ];
        let mut out = [0.0f32; 4];
        pool.feedforward(&input[..], &mut out).unwrap();
        assert_eq!(out, [5.0, -1.0, 6.0, -2.0]);
    }

    #[test]
    fn test_max_pool2d_known_values() {
        let pool = MaxPool2d::new(Pool2dConfig {
            rows: 4,
            cols: 4,
            pool: (2, 2),
            ..Pool2dConfig::default()
        })
        .unwrap();
        #[rustfmt::skip]
        let input = [
            1.0f32,  2.0,  3.0,  4.0,
            5.0,  6.0,  7.0,  8.0,
            9.0, 10.0, 11.0, 12.0,
           13.0, 14.0, 15.0, 16.0,
        ];
        let mut out = [0.0f32; 4];
        pool.feedforward(&input[..], &mut out).unwrap();
        assert_eq!(out, [6.0, 8.0, 14.0, 16.0]);
    }

    #[test]
    fn test_pool_trailing_input_dropped() {
        // len 5, pool 2: output 2 positions, the fifth step never pooled
        let pool = MaxPool1d::new(Pool1dConfig {
            len: 5,
            pool_len: 2,
            ..Pool1dConfig::default()
        })
        .unwrap();
        assert_eq!(pool.output_len(), 2);
        let input = [1.0f32, 2.0, 3.0, 4.0, 99.0];
        let mut out = [0.0f32; 2];
        pool.feedforward(&input[..], &mut out).unwrap();
        assert_eq!(out, [2.0, 4.0]);
    }

    #[test]
    fn test_pool_equal_extent_rejected() {
        assert!(MaxPool1d::new(Pool1dConfig {
            len: 4,
            pool_len: 4,
            ..Pool1dConfig::default()
        })
        .is_err());
    }
}
