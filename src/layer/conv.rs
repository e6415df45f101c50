//! 1-D and 2-D convolution drivers

use crate::activation::Activation;
use crate::element::Element;
use crate::engine::{self, Strategy, WeightedSum};
use crate::error::{Error, Result};
use crate::geometry::WindowGeometry;
use crate::source::TensorSource;

/// Configuration for [`Conv1d`]
///
/// The input is `steps × channels`; each output step sees `kernel_len`
/// consecutive input steps across every channel.
#[derive(Debug, Clone, Copy)]
pub struct Conv1dConfig {
    /// Number of filters (output width per step)
    pub filters: usize,
    /// Kernel extent along the step axis
    pub kernel_len: usize,
    /// Input steps
    pub steps: usize,
    /// Input channels per step
    pub channels: usize,
    /// Stride along the step axis
    pub stride: usize,
    /// Pointwise activation applied to each weighted sum
    pub activation: Activation,
    /// Cache strategy
    pub strategy: Strategy,
}

impl Default for Conv1dConfig {
    fn default() -> Self {
        Self {
            filters: 0,
            kernel_len: 0,
            steps: 0,
            channels: 1,
            stride: 1,
            activation: Activation::Identity,
            strategy: Strategy::Block,
        }
    }
}

/// 1-D convolution layer
///
/// Weight layout is `[kernel][input_channel][filter]`, flattened
/// row-major; bias has one entry per filter. Output is
/// `out_len × filters`, row-major, pre-activation sums passed through the
/// configured activation.
pub struct Conv1d<T> {
    geom: WindowGeometry,
    weight: Vec<T>,
    bias: Vec<T>,
    filters: usize,
    activation: Activation,
    strategy: Strategy,
}

impl<T: Element> Conv1d<T> {
    /// Validate the configuration and copy the parameters.
    pub fn new(config: Conv1dConfig, weight: &[T], bias: &[T]) -> Result<Self> {
        let geom =
            WindowGeometry::validate_1d(config.steps, config.channels, config.kernel_len, config.stride)?;
        validate_conv(
            &geom,
            config.strategy,
            config.filters,
            weight.len(),
            bias.len(),
        )?;
        tracing::debug!(
            filters = config.filters,
            kernel_len = config.kernel_len,
            steps = config.steps,
            channels = config.channels,
            stride = config.stride,
            out_len = geom.out_rows,
            strategy = ?config.strategy,
            "conv1d configured"
        );
        Ok(Self {
            geom,
            weight: weight.to_vec(),
            bias: bias.to_vec(),
            filters: config.filters,
            activation: config.activation,
            strategy: config.strategy,
        })
    }

    /// Output steps produced per pass.
    pub fn out_len(&self) -> usize {
        self.geom.out_rows
    }

    /// Flat output length: `out_len × filters`.
    pub fn output_len(&self) -> usize {
        self.geom.out_positions() * self.filters
    }

    /// Run one forward pass, writing `out_len × filters` elements.
    pub fn feedforward<S: TensorSource<T> + ?Sized>(
        &self,
        source: &S,
        output: &mut [T],
    ) -> Result<()> {
        let reduce = WeightedSum::new(
            &self.geom,
            &self.weight,
            &self.bias,
            self.filters,
            self.activation,
        );
        engine::run(&self.geom, self.strategy, &reduce, source, output)
    }

    /// Forward pass with output steps split across rayon workers.
    #[cfg(feature = "rayon")]
    pub fn feedforward_par<S: TensorSource<T> + Sync + ?Sized>(
        &self,
        source: &S,
        output: &mut [T],
    ) -> Result<()> {
        let reduce = WeightedSum::new(
            &self.geom,
            &self.weight,
            &self.bias,
            self.filters,
            self.activation,
        );
        engine::run_parallel(&self.geom, self.strategy, &reduce, source, output)
    }
}

/// Configuration for [`Conv2d`]
#[derive(Debug, Clone, Copy)]
pub struct Conv2dConfig {
    /// Number of filters (output depth per position)
    pub filters: usize,
    /// Kernel extents `(rows, cols)`
    pub kernel: (usize, usize),
    /// Input rows
    pub rows: usize,
    /// Input columns
    pub cols: usize,
    /// Input channels
    pub channels: usize,
    /// Strides `(rows, cols)`
    pub stride: (usize, usize),
    /// Pointwise activation applied to each weighted sum
    pub activation: Activation,
    /// Cache strategy
    pub strategy: Strategy,
}

impl Default for Conv2dConfig {
    fn default() -> Self {
        Self {
            filters: 0,
            kernel: (0, 0),
            rows: 0,
            cols: 0,
            channels: 1,
            stride: (1, 1),
            activation: Activation::Identity,
            strategy: Strategy::Block,
        }
    }
}

/// 2-D convolution layer
///
/// Weight layout is `[kernel_row][kernel_col][input_channel][filter]`,
/// flattened row-major; bias has one entry per filter. Output is
/// `out_rows × out_cols × filters`, row-major.
pub struct Conv2d<T> {
    geom: WindowGeometry,
    weight: Vec<T>,
    bias: Vec<T>,
    filters: usize,
    activation: Activation,
    strategy: Strategy,
}

impl<T: Element> Conv2d<T> {
    /// Validate the configuration and copy the parameters.
    pub fn new(config: Conv2dConfig, weight: &[T], bias: &[T]) -> Result<Self> {
        let geom = WindowGeometry::validate(
            config.rows,
            config.cols,
            config.channels,
            config.kernel,
            config.stride,
        )?;
        validate_conv(
            &geom,
            config.strategy,
            config.filters,
            weight.len(),
            bias.len(),
        )?;
        tracing::debug!(
            filters = config.filters,
            kernel = ?config.kernel,
            rows = config.rows,
            cols = config.cols,
            channels = config.channels,
            stride = ?config.stride,
            out_rows = geom.out_rows,
            out_cols = geom.out_cols,
            strategy = ?config.strategy,
            "conv2d configured"
        );
        Ok(Self {
            geom,
            weight: weight.to_vec(),
            bias: bias.to_vec(),
            filters: config.filters,
            activation: config.activation,
            strategy: config.strategy,
        })
    }

    /// Output extents `(rows, cols, filters)`.
    pub fn output_shape(&self) -> (usize, usize, usize) {
        (self.geom.out_rows, self.geom.out_cols, self.filters)
    }

    /// Flat output length: `out_rows × out_cols × filters`.
    pub fn output_len(&self) -> usize {
        self.geom.out_positions() * self.filters
    }

    /// Run one forward pass, writing `out_rows × out_cols × filters`
    /// elements row-major.
    pub fn feedforward<S: TensorSource<T> + ?Sized>(
        &self,
        source: &S,
        output: &mut [T],
    ) -> Result<()> {
        let reduce = WeightedSum::new(
            &self.geom,
            &self.weight,
            &self.bias,
            self.filters,
            self.activation,
        );
        engine::run(&self.geom, self.strategy, &reduce, source, output)
    }

    /// Forward pass with output rows split across rayon workers.
    #[cfg(feature = "rayon")]
    pub fn feedforward_par<S: TensorSource<T> + Sync + ?Sized>(
        &self,
        source: &S,
        output: &mut [T],
    ) -> Result<()> {
        let reduce = WeightedSum::new(
            &self.geom,
            &self.weight,
            &self.bias,
            self.filters,
            self.activation,
        );
        engine::run_parallel(&self.geom, self.strategy, &reduce, source, output)
    }
}

/// Shared construction checks for both convolution drivers.
fn validate_conv(
    geom: &WindowGeometry,
    strategy: Strategy,
    filters: usize,
    weight_len: usize,
    bias_len: usize,
) -> Result<()> {
    if filters == 0 {
        return Err(Error::invalid_argument("filters", "must be > 0"));
    }
    if strategy == Strategy::LineWindow {
        geom.validate_shift_capacity()?;
    }
    let expected_weight = geom.window_len() * filters;
    if weight_len != expected_weight {
        return Err(Error::parameter_length("weight", expected_weight, weight_len));
    }
    if bias_len != filters {
        return Err(Error::parameter_length("bias", filters, bias_len));
    }
    Ok(())
}
