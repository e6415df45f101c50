//! Receptive-field cache refreshed from a line cache

use crate::cache::LineCache;
use crate::element::Element;

/// Fixed-capacity cache holding exactly the current receptive field
///
/// `kernel_rows × kernel_cols × channels` elements, copied column-wise out
/// of a [`LineCache`]. Advancing the output column costs `stride_cols`
/// column copies from the already-resident line cache and no source reads;
/// advancing the output row means the line cache was refreshed, after
/// which the window is refilled from column 0.
///
/// Invariant: while output position `(r, c)` is being produced, window
/// element `(i, j, v)` equals input element
/// `(r * stride_rows + i, c * stride_cols + j, v)`.
pub struct WindowCache<T> {
    buf: Vec<T>,
    rows: usize,
    cols: usize,
    channels: usize,
}

impl<T: Element> WindowCache<T> {
    /// Allocate a `rows × cols × channels` window.
    pub fn new(rows: usize, cols: usize, channels: usize) -> Self {
        debug_assert!(rows > 0 && cols > 0 && channels > 0);
        Self {
            buf: vec![T::zero(); rows * cols * channels],
            rows,
            cols,
            channels,
        }
    }

    /// Populate every column from `line`, selecting `cols` contiguous line
    /// columns starting at `start_col`.
    pub fn fill(&mut self, line: &LineCache<T>, start_col: usize) {
        let ch = self.channels;
        let width = self.cols * ch;
        for r in 0..self.rows {
            let src = &line.row(r)[start_col * ch..start_col * ch + width];
            self.buf[r * width..(r + 1) * width].copy_from_slice(src);
        }
    }

    /// Retire the leftmost `amount` columns, moving the survivors left.
    pub fn shift_left(&mut self, amount: usize) {
        debug_assert!(amount <= self.cols);
        let ch = self.channels;
        let width = self.cols * ch;
        for r in 0..self.rows {
            let row = &mut self.buf[r * width..(r + 1) * width];
            row.copy_within(amount * ch.., 0);
        }
    }

    /// Admit `amount` fresh columns from `line` into the vacated
    /// right-hand slots, oldest first.
    ///
    /// `start_col` is the line-cache column of the first admitted column.
    pub fn insert_right(&mut self, line: &LineCache<T>, start_col: usize, amount: usize) {
        debug_assert!(amount <= self.cols);
        let ch = self.channels;
        let width = self.cols * ch;
        let dst_start = (self.cols - amount) * ch;
        for r in 0..self.rows {
            let src = &line.row(r)[start_col * ch..(start_col + amount) * ch];
            self.buf[r * width + dst_start..(r + 1) * width].copy_from_slice(src);
        }
    }

    /// Element at window-local `(row, col, channel)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize, channel: usize) -> T {
        self.buf[(row * self.cols + col) * self.channels + channel]
    }
}
