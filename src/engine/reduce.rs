//! Reduction policies applied to each receptive field

use crate::activation::Activation;
use crate::element::Element;
use crate::engine::Window;
use crate::geometry::WindowGeometry;

/// A reduction from one receptive field to `lanes()` output values
///
/// Implementations read only the window and their own parameters and write
/// only the `out` slice they are handed, which is what keeps output
/// positions independent of one another.
pub trait WindowReduce<T: Element> {
    /// Values produced per output position (filters for convolution,
    /// channels for pooling).
    fn lanes(&self) -> usize;

    /// Reduce the current window into `out`, whose length is `lanes()`.
    fn reduce<W: Window<T>>(&self, window: &W, out: &mut [T]);
}

/// Convolution reduction: bias plus the full weighted sum, then a
/// pointwise activation
///
/// Weight layout is `[kernel_row][kernel_col][input_channel][filter]`,
/// flattened row-major; bias has one entry per filter. Accumulation runs
/// in the fixed filter → kernel_row → kernel_col → channel order so
/// single-threaded results are reproducible.
pub struct WeightedSum<'a, T> {
    weight: &'a [T],
    bias: &'a [T],
    filters: usize,
    kernel_rows: usize,
    kernel_cols: usize,
    channels: usize,
    activation: Activation,
}

impl<'a, T: Element> WeightedSum<'a, T> {
    /// Borrow the parameters for one pass.
    ///
    /// Lengths are validated by layer construction; they are only
    /// re-asserted here.
    pub fn new(
        geom: &WindowGeometry,
        weight: &'a [T],
        bias: &'a [T],
        filters: usize,
        activation: Activation,
    ) -> Self {
        debug_assert_eq!(weight.len(), geom.window_len() * filters);
        debug_assert_eq!(bias.len(), filters);
        Self {
            weight,
            bias,
            filters,
            kernel_rows: geom.kernel_rows,
            kernel_cols: geom.kernel_cols,
            channels: geom.channels,
            activation,
        }
    }
}

impl<T: Element> WindowReduce<T> for WeightedSum<'_, T> {
    fn lanes(&self) -> usize {
        self.filters
    }

    fn reduce<W: Window<T>>(&self, window: &W, out: &mut [T]) {
        for (k, slot) in out.iter_mut().enumerate() {
            let mut t = self.bias[k];
            for m in 0..self.kernel_rows {
                for n in 0..self.kernel_cols {
                    for v in 0..self.channels {
                        let w_idx =
                            ((m * self.kernel_cols + n) * self.channels + v) * self.filters + k;
                        t = t + window.get(m, n, v) * self.weight[w_idx];
                    }
                }
            }
            *slot = self.activation.apply(t);
        }
    }
}

/// Max-pooling reduction, one lane per channel
///
/// Comparison is strict `>` in fixed kernel_row → kernel_col order, so
/// ties resolve to the first-encountered maximal value.
pub struct MaxReduce {
    kernel_rows: usize,
    kernel_cols: usize,
    channels: usize,
}

impl MaxReduce {
    /// Build the reduction for `geom`'s kernel extents.
    pub fn new(geom: &WindowGeometry) -> Self {
        Self {
            kernel_rows: geom.kernel_rows,
            kernel_cols: geom.kernel_cols,
            channels: geom.channels,
        }
    }
}

impl<T: Element> WindowReduce<T> for MaxReduce {
    fn lanes(&self) -> usize {
        self.channels
    }

    fn reduce<W: Window<T>>(&self, window: &W, out: &mut [T]) {
        for (ch, slot) in out.iter_mut().enumerate() {
            let mut max = window.get(0, 0, ch);
            for i in 0..self.kernel_rows {
                for j in 0..self.kernel_cols {
                    let v = window.get(i, j, ch);
                    if v > max {
                        max = v;
                    }
                }
            }
            *slot = max;
        }
    }
}

/// Mean-pooling reduction, one lane per channel
///
/// The divisor is the pool size `kernel_rows * kernel_cols`; the result is
/// the unrounded ratio.
pub struct MeanReduce<T> {
    kernel_rows: usize,
    kernel_cols: usize,
    channels: usize,
    size: T,
}

impl<T: Element> MeanReduce<T> {
    /// Build the reduction for `geom`'s kernel extents.
    pub fn new(geom: &WindowGeometry) -> Self {
        Self {
            kernel_rows: geom.kernel_rows,
            kernel_cols: geom.kernel_cols,
            channels: geom.channels,
            size: T::from_f64((geom.kernel_rows * geom.kernel_cols) as f64),
        }
    }
}

impl<T: Element> WindowReduce<T> for MeanReduce<T> {
    fn lanes(&self) -> usize {
        self.channels
    }

    fn reduce<W: Window<T>>(&self, window: &W, out: &mut [T]) {
        for (ch, slot) in out.iter_mut().enumerate() {
            let mut sum = T::zero();
            for i in 0..self.kernel_rows {
                for j in 0..self.kernel_cols {
                    sum = sum + window.get(i, j, ch);
                }
            }
            *slot = sum / self.size;
        }
    }
}
