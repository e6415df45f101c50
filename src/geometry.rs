//! Validated window geometry shared by every cache, supplier, and layer
//!
//! All extents are fixed at construction. Validation happens exactly once,
//! here; everything downstream indexes with plain stride arithmetic and no
//! further checks.

use crate::error::{Error, Result};

/// Input extents, kernel extents, and strides for one sliding-window pass,
/// with the derived output extents.
///
/// 1-D layers use the degenerate column encoding `cols == kernel_cols ==
/// stride_cols == 1`, with the per-position vector living on the channel
/// axis. Input elements are addressed row-major as
/// `row * cols * channels + col * channels + channel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowGeometry {
    /// Input rows (1-D: sequence length)
    pub rows: usize,
    /// Input columns (1-D: 1)
    pub cols: usize,
    /// Channels per position (1-D: the per-step vector width)
    pub channels: usize,
    /// Kernel extent along the row axis
    pub kernel_rows: usize,
    /// Kernel extent along the column axis
    pub kernel_cols: usize,
    /// Stride along the row axis
    pub stride_rows: usize,
    /// Stride along the column axis
    pub stride_cols: usize,
    /// Output rows: `(rows - kernel_rows) / stride_rows + 1`
    pub out_rows: usize,
    /// Output columns, analogously (1-D: 1)
    pub out_cols: usize,
}

impl WindowGeometry {
    /// Validate a 2-D geometry and derive the output extents.
    ///
    /// Rejections (all at construction, per the error-handling contract):
    /// zero extents or strides, and a kernel extent that does not fit
    /// strictly inside the input extent along a windowed axis. The
    /// degenerate column encoding used by 1-D layers is the one exemption
    /// from the column-axis check.
    pub fn validate(
        rows: usize,
        cols: usize,
        channels: usize,
        kernel: (usize, usize),
        stride: (usize, usize),
    ) -> Result<Self> {
        let (kernel_rows, kernel_cols) = kernel;
        let (stride_rows, stride_cols) = stride;

        for (value, name) in [
            (rows, "rows"),
            (cols, "cols"),
            (channels, "channels"),
            (kernel_rows, "kernel_rows"),
            (kernel_cols, "kernel_cols"),
            (stride_rows, "stride_rows"),
            (stride_cols, "stride_cols"),
        ] {
            if value == 0 {
                return Err(Error::invalid_argument(name, "must be > 0"));
            }
        }

        if kernel_rows >= rows {
            return Err(Error::KernelExceedsInput {
                axis: "rows",
                kernel: kernel_rows,
                input: rows,
            });
        }
        let degenerate_cols = cols == 1 && kernel_cols == 1 && stride_cols == 1;
        if !degenerate_cols && kernel_cols >= cols {
            return Err(Error::KernelExceedsInput {
                axis: "cols",
                kernel: kernel_cols,
                input: cols,
            });
        }

        Ok(Self {
            rows,
            cols,
            channels,
            kernel_rows,
            kernel_cols,
            stride_rows,
            stride_cols,
            out_rows: (rows - kernel_rows) / stride_rows + 1,
            out_cols: (cols - kernel_cols) / stride_cols + 1,
        })
    }

    /// Validate a 1-D geometry (length × channels) via the degenerate
    /// column encoding.
    pub fn validate_1d(len: usize, channels: usize, kernel_len: usize, stride: usize) -> Result<Self> {
        Self::validate(len, 1, channels, (kernel_len, 1), (stride, 1))
    }

    /// Check the Line+Window precondition: the caches can only retire as
    /// many rows/columns per advance as they hold.
    pub fn validate_shift_capacity(&self) -> Result<()> {
        if self.stride_rows > self.kernel_rows {
            return Err(Error::StrideExceedsCapacity {
                axis: "rows",
                stride: self.stride_rows,
                capacity: self.kernel_rows,
            });
        }
        if self.stride_cols > self.kernel_cols {
            return Err(Error::StrideExceedsCapacity {
                axis: "cols",
                stride: self.stride_cols,
                capacity: self.kernel_cols,
            });
        }
        Ok(())
    }

    /// Elements per input row.
    #[inline]
    pub fn row_len(&self) -> usize {
        self.cols * self.channels
    }

    /// Total input elements.
    #[inline]
    pub fn input_len(&self) -> usize {
        self.rows * self.row_len()
    }

    /// Elements in one receptive field.
    #[inline]
    pub fn window_len(&self) -> usize {
        self.kernel_rows * self.kernel_cols * self.channels
    }

    /// Output positions over a full pass.
    #[inline]
    pub fn out_positions(&self) -> usize {
        self.out_rows * self.out_cols
    }

    /// Stream offset of input position `(row, col)`.
    #[inline]
    pub fn offset_of(&self, row: usize, col: usize) -> usize {
        (row * self.cols + col) * self.channels
    }

    /// First input row of the receptive field for output row `out_row`.
    #[inline]
    pub fn base_row(&self, out_row: usize) -> usize {
        out_row * self.stride_rows
    }

    /// First input column of the receptive field for output column `out_col`.
    #[inline]
    pub fn base_col(&self, out_col: usize) -> usize {
        out_col * self.stride_cols
    }
}
