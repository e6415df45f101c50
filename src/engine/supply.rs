//! The three window suppliers, one per strategy

use crate::cache::{BlockStage, LineCache, WindowCache};
use crate::element::Element;
use crate::engine::{Window, WindowSupplier};
use crate::geometry::WindowGeometry;
use crate::source::TensorSource;

/// Direct strategy: no cache, every window re-read from the source
///
/// Holds one window-sized scratch buffer and refills it completely at
/// every output position, one bulk read per kernel row. Over a full pass
/// the source is read `out_positions × window_len` elements.
pub struct DirectWindow<T> {
    geom: WindowGeometry,
    buf: Vec<T>,
}

impl<T: Element> DirectWindow<T> {
    /// Allocate the scratch window for `geom`.
    pub fn new(geom: &WindowGeometry) -> Self {
        Self {
            geom: *geom,
            buf: vec![T::zero(); geom.window_len()],
        }
    }

    fn load<S: TensorSource<T> + ?Sized>(&mut self, source: &S, row: usize, col: usize) {
        let g = &self.geom;
        let width = g.kernel_cols * g.channels;
        for kr in 0..g.kernel_rows {
            let offset = g.offset_of(g.base_row(row) + kr, g.base_col(col));
            source.read_into(offset, &mut self.buf[kr * width..(kr + 1) * width]);
        }
    }
}

impl<T: Element> Window<T> for DirectWindow<T> {
    #[inline]
    fn get(&self, kernel_row: usize, kernel_col: usize, channel: usize) -> T {
        let g = &self.geom;
        self.buf[(kernel_row * g.kernel_cols + kernel_col) * g.channels + channel]
    }
}

impl<T: Element, S: TensorSource<T> + ?Sized> WindowSupplier<T, S> for DirectWindow<T> {
    fn start_row(&mut self, source: &S, row: usize) {
        self.load(source, row, 0);
    }

    fn next_col(&mut self, source: &S, row: usize, col: usize) {
        self.load(source, row, col);
    }
}

/// Block strategy: wholesale per-output-row staging
///
/// One [`BlockStage`] holding the full-width footprint; the source is
/// re-read `kernel_rows × row_len` elements at every output row, and
/// column advances only move an index.
pub struct StagedWindow<T> {
    geom: WindowGeometry,
    stage: BlockStage<T>,
    col: usize,
}

impl<T: Element> StagedWindow<T> {
    /// Allocate the staging buffer for `geom`.
    pub fn new(geom: &WindowGeometry) -> Self {
        Self {
            geom: *geom,
            stage: BlockStage::new(geom.kernel_rows, geom.cols, geom.channels),
            col: 0,
        }
    }
}

impl<T: Element> Window<T> for StagedWindow<T> {
    #[inline]
    fn get(&self, kernel_row: usize, kernel_col: usize, channel: usize) -> T {
        self.stage
            .get(kernel_row, self.geom.base_col(self.col) + kernel_col, channel)
    }
}

impl<T: Element, S: TensorSource<T> + ?Sized> WindowSupplier<T, S> for StagedWindow<T> {
    fn start_row(&mut self, source: &S, row: usize) {
        let offset = self.geom.offset_of(self.geom.base_row(row), 0);
        self.stage.stage(source, offset);
        self.col = 0;
    }

    fn next_col(&mut self, _source: &S, _row: usize, col: usize) {
        self.col = col;
    }
}

/// Line+Window strategy: incremental row and column reuse
///
/// A [`LineCache`] keeps the kernel-height rows current at `stride_rows`
/// fresh rows per output-row advance; a [`WindowCache`] tracks the
/// receptive field at `stride_cols` column copies per output-column
/// advance, reading nothing from the source. When strides do not exceed
/// the kernel extents, no source element is read twice over a pass.
pub struct StreamedWindow<T> {
    geom: WindowGeometry,
    line: LineCache<T>,
    window: WindowCache<T>,
    /// Output row for which an incremental advance is valid.
    expected_row: Option<usize>,
}

impl<T: Element> StreamedWindow<T> {
    /// Allocate the line and window caches for `geom`.
    ///
    /// Callers must have checked
    /// [`validate_shift_capacity`](WindowGeometry::validate_shift_capacity).
    pub fn new(geom: &WindowGeometry) -> Self {
        Self {
            geom: *geom,
            line: LineCache::new(geom.kernel_rows, geom.cols, geom.channels),
            window: WindowCache::new(geom.kernel_rows, geom.kernel_cols, geom.channels),
            expected_row: None,
        }
    }
}

impl<T: Element> Window<T> for StreamedWindow<T> {
    #[inline]
    fn get(&self, kernel_row: usize, kernel_col: usize, channel: usize) -> T {
        self.window.get(kernel_row, kernel_col, channel)
    }
}

impl<T: Element, S: TensorSource<T> + ?Sized> WindowSupplier<T, S> for StreamedWindow<T> {
    fn start_row(&mut self, source: &S, row: usize) {
        let g = self.geom;
        if self.expected_row == Some(row) {
            // retire stride_rows rows, admit the rows the new receptive
            // field gained at the bottom
            self.line.shift_up(g.stride_rows);
            let fresh = g.base_row(row) + g.kernel_rows - g.stride_rows;
            self.line
                .fill_line(source, g.offset_of(fresh, 0), g.stride_rows);
        } else {
            self.line.fill(source, g.offset_of(g.base_row(row), 0));
        }
        self.expected_row = Some(row + 1);
        self.window.fill(&self.line, 0);
    }

    fn next_col(&mut self, _source: &S, _row: usize, col: usize) {
        let g = self.geom;
        self.window.shift_left(g.stride_cols);
        let fresh = g.base_col(col) + g.kernel_cols - g.stride_cols;
        self.window.insert_right(&self.line, fresh, g.stride_cols);
    }
}
