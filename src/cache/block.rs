//! Wholesale per-output-row staging buffer

use crate::element::Element;
use crate::source::TensorSource;

/// Fixed-capacity buffer refilled in full for each output row
///
/// Holds the complete `kernel_rows × cols × channels` footprint an output
/// row needs. Unlike [`LineCache`](crate::cache::LineCache) there is no
/// incremental shift: every [`stage`](BlockStage::stage) re-reads the whole
/// footprint, re-reading rows that overlap the previous output row.
/// Column-axis reuse within the row still falls out naturally because the
/// staged block spans the full input width.
pub struct BlockStage<T> {
    buf: Vec<T>,
    rows: usize,
    cols: usize,
    channels: usize,
}

impl<T: Element> BlockStage<T> {
    /// Allocate a `rows × cols × channels` staging buffer.
    pub fn new(rows: usize, cols: usize, channels: usize) -> Self {
        debug_assert!(rows > 0 && cols > 0 && channels > 0);
        Self {
            buf: vec![T::zero(); rows * cols * channels],
            rows,
            cols,
            channels,
        }
    }

    /// Refill the whole buffer from the source, starting at `offset`,
    /// discarding the previous row's contents.
    pub fn stage<S: TensorSource<T> + ?Sized>(&mut self, source: &S, offset: usize) {
        source.read_into(offset, &mut self.buf);
    }

    /// Element at buffer-local `(row, col, channel)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize, channel: usize) -> T {
        debug_assert!(row < self.rows);
        self.buf[(row * self.cols + col) * self.channels + channel]
    }
}
