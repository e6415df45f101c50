//! Row-window cache over the stream source

use crate::element::Element;
use crate::source::TensorSource;

/// Fixed-capacity cache of the most recently admitted input rows
///
/// Capacity is the kernel extent along the row axis. After the initial
/// [`fill`](LineCache::fill), the cache is kept current with
/// `shift_up(stride)` followed by `fill_line(..., stride)`, which together
/// read exactly `stride` fresh rows from the source per output-row advance
/// regardless of the kernel height. Invariant: while output row `r` is
/// being produced, cache row `i` holds stream row `r * stride + i`.
///
/// 1-D layers use `cols == 1` with the per-position vector on the channel
/// axis; rows are then single stream positions.
pub struct LineCache<T> {
    buf: Vec<T>,
    rows: usize,
    cols: usize,
    channels: usize,
}

impl<T: Element> LineCache<T> {
    /// Allocate a cache of `rows` rows, each `cols * channels` elements.
    pub fn new(rows: usize, cols: usize, channels: usize) -> Self {
        debug_assert!(rows > 0 && cols > 0 && channels > 0);
        Self {
            buf: vec![T::zero(); rows * cols * channels],
            rows,
            cols,
            channels,
        }
    }

    /// Elements per cached row.
    #[inline]
    pub fn row_len(&self) -> usize {
        self.cols * self.channels
    }

    /// Populate every row from the source, starting at `offset`.
    ///
    /// Rows are full input rows, so the whole footprint is one contiguous
    /// read of `rows * row_len` elements.
    pub fn fill<S: TensorSource<T> + ?Sized>(&mut self, source: &S, offset: usize) {
        source.read_into(offset, &mut self.buf);
    }

    /// Retire the oldest `amount` rows, moving the survivors up.
    ///
    /// The vacated bottom `amount` slots hold stale data until the next
    /// [`fill_line`](LineCache::fill_line).
    pub fn shift_up(&mut self, amount: usize) {
        debug_assert!(amount <= self.rows);
        let row_len = self.row_len();
        self.buf.copy_within(amount * row_len.., 0);
    }

    /// Admit `amount` fresh rows from the source into the vacated bottom
    /// slots, oldest first.
    pub fn fill_line<S: TensorSource<T> + ?Sized>(
        &mut self,
        source: &S,
        offset: usize,
        amount: usize,
    ) {
        debug_assert!(amount <= self.rows);
        let start = (self.rows - amount) * self.row_len();
        source.read_into(offset, &mut self.buf[start..]);
    }

    /// Element at cache-local `(row, col, channel)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize, channel: usize) -> T {
        self.buf[(row * self.cols + col) * self.channels + channel]
    }

    /// Cached row `row` as a flat `cols * channels` slice.
    #[inline]
    pub fn row(&self, row: usize) -> &[T] {
        let row_len = self.row_len();
        &self.buf[row * row_len..(row + 1) * row_len]
    }
}
