//! Tensor stream source: the external data supplier the caches draw from
//!
//! The source contract is deliberately narrow: forward-progressing,
//! offset-addressed bulk reads with cost proportional to the read length.
//! It performs no caching of its own; minimizing how often the same offsets
//! are re-read is exactly the job of the cache strategies in this crate.

use std::cell::Cell;

use crate::element::Element;

/// A read-only, offset-addressed supplier of tensor elements
///
/// Reads are assumed to succeed for any range inside the extents declared
/// at layer construction; there is no end-of-stream signal because callers
/// always know the full extent in advance.
pub trait TensorSource<T: Element> {
    /// Copy `dst.len()` contiguous elements starting at `offset` into `dst`.
    fn read_into(&self, offset: usize, dst: &mut [T]);
}

impl<T: Element> TensorSource<T> for [T] {
    #[inline]
    fn read_into(&self, offset: usize, dst: &mut [T]) {
        dst.copy_from_slice(&self[offset..offset + dst.len()]);
    }
}

impl<T: Element, S: TensorSource<T> + ?Sized> TensorSource<T> for &S {
    #[inline]
    fn read_into(&self, offset: usize, dst: &mut [T]) {
        (**self).read_into(offset, dst);
    }
}

/// Wrapper that tallies how much a source is read
///
/// Each strategy trades local storage against how many elements it pulls
/// from the source over a pass; wrapping the input in a `ReadCounter`
/// measures that directly. Counting uses interior mutability so the wrapper
/// satisfies the same `&self` read contract as the source it wraps.
pub struct ReadCounter<'a, T: Element, S: TensorSource<T> + ?Sized> {
    inner: &'a S,
    elements: Cell<usize>,
    calls: Cell<usize>,
    _marker: std::marker::PhantomData<T>,
}

impl<'a, T: Element, S: TensorSource<T> + ?Sized> ReadCounter<'a, T, S> {
    /// Wrap `inner`, starting both tallies at zero.
    pub fn new(inner: &'a S) -> Self {
        Self {
            inner,
            elements: Cell::new(0),
            calls: Cell::new(0),
            _marker: std::marker::PhantomData,
        }
    }

    /// Total elements read so far.
    pub fn elements(&self) -> usize {
        self.elements.get()
    }

    /// Total `read_into` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    /// Reset both tallies to zero.
    pub fn reset(&self) {
        self.elements.set(0);
        self.calls.set(0);
    }
}

impl<T: Element, S: TensorSource<T> + ?Sized> TensorSource<T> for ReadCounter<'_, T, S> {
    #[inline]
    fn read_into(&self, offset: usize, dst: &mut [T]) {
        self.elements.set(self.elements.get() + dst.len());
        self.calls.set(self.calls.get() + 1);
        self.inner.read_into(offset, dst);
    }
}
