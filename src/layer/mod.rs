//! Layer drivers: convolution and pooling over a stream source
//!
//! Each driver fixes a reduction policy, owns whatever parameters that
//! policy needs, validates its whole configuration up front, and drives
//! the engine through one forward pass per `feedforward` call. The cache
//! strategy is an explicit per-layer configuration value; every strategy
//! produces the same numbers.

mod conv;
mod pool;

pub use conv::{Conv1d, Conv1dConfig, Conv2d, Conv2dConfig};
pub use pool::{AvgPool1d, AvgPool2d, MaxPool1d, MaxPool2d, Pool1dConfig, Pool2dConfig};
