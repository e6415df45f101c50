//! Sliding-window reduction engine
//!
//! This module defines the "supply next window" seam between the cache
//! strategies and the reductions, and the row-major sweep that drives them.
//!
//! # Design
//!
//! ```text
//! TensorSource (offset-addressed bulk reads)
//!     │
//!     ▼
//! WindowSupplier (Direct | Staged | Streamed — one per strategy)
//!     │  get(kernel_row, kernel_col, channel)
//!     ▼
//! WindowReduce (weighted sum + activation, max, mean)
//!     │  lanes() values per output position
//!     ▼
//! flat output buffer, row-major (row, col, lane)
//! ```
//!
//! The three strategies are a pure bandwidth/storage trade-off and produce
//! numerically identical outputs; [`run`] dispatches on [`Strategy`] once
//! per pass. Each output element depends only on caches, parameters, and
//! its own output slot, so disjoint output rows can be computed by
//! independent workers as long as every worker owns its own supplier —
//! [`run_parallel`] does exactly that with one supplier per row band.

mod reduce;
mod supply;

pub use reduce::{MaxReduce, MeanReduce, WeightedSum, WindowReduce};
pub use supply::{DirectWindow, StagedWindow, StreamedWindow};

use crate::element::Element;
use crate::error::{Error, Result};
use crate::geometry::WindowGeometry;
use crate::source::TensorSource;

/// Read access to the receptive field currently held by a supplier
pub trait Window<T: Element> {
    /// Element at window-local `(kernel_row, kernel_col, channel)`.
    fn get(&self, kernel_row: usize, kernel_col: usize, channel: usize) -> T;
}

/// A cache/staging strategy behind the common "supply next window" seam
///
/// The sweep calls `start_row` for each output row and `next_col` for each
/// subsequent column within the row, in row-major order. `start_row` must
/// accept non-consecutive rows (a supplier falls back to a full refill),
/// which is what allows disjoint row bands to be swept independently.
pub trait WindowSupplier<T: Element, S: TensorSource<T> + ?Sized>: Window<T> {
    /// Make the receptive field for output position `(row, 0)` current.
    fn start_row(&mut self, source: &S, row: usize);

    /// Advance the receptive field from output column `col - 1` to `col`
    /// within the current row.
    fn next_col(&mut self, source: &S, row: usize, col: usize);
}

/// Input-read reuse strategy, selected once at configuration time
///
/// All three produce identical results; they differ only in how many
/// source elements are read over a pass and how much local storage is
/// held. For a full pass over an `R × W × C` input with kernel `K_r × K_c`:
///
/// | strategy     | source elements read                   | local storage     |
/// |--------------|----------------------------------------|-------------------|
/// | `Direct`     | `out_positions × K_r × K_c × C`        | one window        |
/// | `Block`      | `out_rows × K_r × W × C`               | `K_r` input rows  |
/// | `LineWindow` | `≤ R × W × C` (each element once when stride ≤ kernel) | `K_r` rows + one window |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// No cache; every receptive field is re-read from the source in full.
    Direct,
    /// Per-output-row wholesale staging of the full-width footprint.
    Block,
    /// Incremental line cache plus window cache; no element is read twice
    /// when strides do not exceed the kernel extents.
    LineWindow,
}

fn validate_output_len(geom: &WindowGeometry, lanes: usize, got: usize) -> Result<()> {
    let expected = geom.out_positions() * lanes;
    if got != expected {
        return Err(Error::OutputLength { expected, got });
    }
    Ok(())
}

/// Sweep output rows `first_row ..` into `out`, whose length determines how
/// many rows are produced. Callers have already validated lengths.
fn sweep_rows<T, S, W, R>(
    geom: &WindowGeometry,
    supplier: &mut W,
    reduce: &R,
    source: &S,
    first_row: usize,
    out: &mut [T],
) where
    T: Element,
    S: TensorSource<T> + ?Sized,
    W: WindowSupplier<T, S>,
    R: WindowReduce<T>,
{
    let lanes = reduce.lanes();
    let out_row_len = geom.out_cols * lanes;
    debug_assert_eq!(out.len() % out_row_len, 0);
    for (band_row, out_row) in out.chunks_exact_mut(out_row_len).enumerate() {
        let row = first_row + band_row;
        supplier.start_row(source, row);
        for (col, slot) in out_row.chunks_exact_mut(lanes).enumerate() {
            if col > 0 {
                supplier.next_col(source, row, col);
            }
            reduce.reduce(supplier, slot);
        }
    }
}

/// Run one full forward pass with the given strategy.
///
/// Writes `out_positions × lanes` elements into `output` in row-major
/// (row, col, lane) order, each exactly once. The only failure modes are a
/// mis-sized output buffer and, for [`Strategy::LineWindow`], strides that
/// exceed the cache capacity; both are rejected before any element is
/// processed.
pub fn run<T, S, R>(
    geom: &WindowGeometry,
    strategy: Strategy,
    reduce: &R,
    source: &S,
    output: &mut [T],
) -> Result<()>
where
    T: Element,
    S: TensorSource<T> + ?Sized,
    R: WindowReduce<T>,
{
    validate_output_len(geom, reduce.lanes(), output.len())?;
    match strategy {
        Strategy::Direct => {
            let mut supplier = DirectWindow::new(geom);
            sweep_rows(geom, &mut supplier, reduce, source, 0, output);
        }
        Strategy::Block => {
            let mut supplier = StagedWindow::new(geom);
            sweep_rows(geom, &mut supplier, reduce, source, 0, output);
        }
        Strategy::LineWindow => {
            geom.validate_shift_capacity()?;
            let mut supplier = StreamedWindow::new(geom);
            sweep_rows(geom, &mut supplier, reduce, source, 0, output);
        }
    }
    Ok(())
}

/// Run one forward pass with output rows split into bands, one band per
/// rayon worker, each with its own private supplier.
///
/// Numerically identical to [`run`]: within a band the sweep is the same
/// sequential row-major loop, and no cache or output slot is shared across
/// bands.
#[cfg(feature = "rayon")]
pub fn run_parallel<T, S, R>(
    geom: &WindowGeometry,
    strategy: Strategy,
    reduce: &R,
    source: &S,
    output: &mut [T],
) -> Result<()>
where
    T: Element,
    S: TensorSource<T> + Sync + ?Sized,
    R: WindowReduce<T> + Sync,
{
    use rayon::prelude::*;

    validate_output_len(geom, reduce.lanes(), output.len())?;
    if strategy == Strategy::LineWindow {
        geom.validate_shift_capacity()?;
    }

    let out_row_len = geom.out_cols * reduce.lanes();
    let band_rows = geom.out_rows.div_ceil(rayon::current_num_threads().max(1));
    output
        .par_chunks_mut(band_rows * out_row_len)
        .enumerate()
        .for_each(|(band, chunk)| {
            let first_row = band * band_rows;
            match strategy {
                Strategy::Direct => {
                    let mut supplier = DirectWindow::new(geom);
                    sweep_rows(geom, &mut supplier, reduce, source, first_row, chunk);
                }
                Strategy::Block => {
                    let mut supplier = StagedWindow::new(geom);
                    sweep_rows(geom, &mut supplier, reduce, source, first_row, chunk);
                }
                Strategy::LineWindow => {
                    let mut supplier = StreamedWindow::new(geom);
                    sweep_rows(geom, &mut supplier, reduce, source, first_row, chunk);
                }
            }
        });
    Ok(())
}
