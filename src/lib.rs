//! # strider
//!
//! **Streaming sliding-window reduction kernels for Rust.**
//!
//! strider computes windowed reductions — weighted sums with an activation
//! (convolution) and max/mean pooling — over tensors delivered by a
//! sequential, re-read-expensive source, while keeping local storage to a
//! small fixed footprint.
//!
//! The arithmetic is deliberately boring; the point of the crate is the
//! window-buffer subsystem between the source and the reduction:
//!
//! - **Line cache**: the kernel-height rows currently in play, kept
//!   current at exactly `stride` fresh rows per output-row advance
//! - **Window cache**: exactly the current receptive field, refreshed
//!   column-wise from the line cache with zero source reads
//! - **Block stager**: a wholesale per-output-row refill that trades
//!   bandwidth for bookkeeping simplicity
//!
//! Every layer selects one of three read-reuse strategies at construction
//! — `Direct`, `Block`, or `LineWindow` — all numerically identical.
//!
//! ## Quick Start
//!
//! ```rust
//! use strider::prelude::*;
//!
//! // 1-D convolution: one filter [1, -1], kernel 2, over 4 steps
//! let conv = Conv1d::new(
//!     Conv1dConfig {
//!         filters: 1,
//!         kernel_len: 2,
//!         steps: 4,
//!         strategy: Strategy::LineWindow,
//!         ..Conv1dConfig::default()
//!     },
//!     &[1.0f32, -1.0],
//!     &[0.0],
//! )?;
//!
//! let input = [1.0f32, 2.0, 3.0, 4.0];
//! let mut output = [0.0f32; 3];
//! conv.feedforward(&input[..], &mut output)?;
//! assert_eq!(output, [-1.0, -1.0, -1.0]);
//! # Ok::<(), strider::error::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `rayon` (default): band-parallel `feedforward_par` on every layer
//!
//! ## Error Handling
//!
//! Every failure is a configuration error surfaced at construction (or a
//! mis-sized output buffer at invocation entry). The per-element loops
//! cannot fail: a forward pass either never starts or fully populates its
//! output.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod activation;
pub mod cache;
pub mod element;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod layer;
pub mod source;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::activation::{argmax, softmax, Activation};
    pub use crate::element::Element;
    pub use crate::engine::Strategy;
    pub use crate::error::{Error, Result};
    pub use crate::geometry::WindowGeometry;
    pub use crate::layer::{
        AvgPool1d, AvgPool2d, Conv1d, Conv1dConfig, Conv2d, Conv2dConfig, MaxPool1d, MaxPool2d,
        Pool1dConfig, Pool2dConfig,
    };
    pub use crate::source::{ReadCounter, TensorSource};
}
