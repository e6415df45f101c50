//! Error types for strider
//!
//! Every failure is a configuration error, detected while a layer or
//! geometry is being constructed (or when an output buffer of the wrong
//! length is handed to `feedforward`). The per-element reduction loops
//! never produce errors.

use thiserror::Error;

/// Result type alias using strider's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring a layer or invoking it
#[derive(Error, Debug)]
pub enum Error {
    /// Kernel extent does not fit strictly inside the input extent
    #[error("Kernel extent {kernel} must be smaller than input extent {input} along {axis}")]
    KernelExceedsInput {
        /// The windowed axis ("rows" or "cols")
        axis: &'static str,
        /// Kernel extent along the axis
        kernel: usize,
        /// Input extent along the axis
        input: usize,
    },

    /// Stride larger than the cache capacity along the same axis
    #[error(
        "Stride {stride} exceeds cache capacity {capacity} along {axis}: \
         cannot shift out more rows than are cached"
    )]
    StrideExceedsCapacity {
        /// The cached axis ("rows" or "cols")
        axis: &'static str,
        /// Configured stride along the axis
        stride: usize,
        /// Cache capacity (the kernel extent) along the axis
        capacity: usize,
    },

    /// Invalid argument provided to a constructor
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// Parameter buffer (weight or bias) has the wrong length
    #[error("Parameter '{param}' should have length {expected}, got {got}")]
    ParameterLength {
        /// The parameter name
        param: &'static str,
        /// Expected flat length
        expected: usize,
        /// Actual flat length
        got: usize,
    },

    /// Output buffer has the wrong length for the configured output extent
    #[error("Output buffer should have length {expected}, got {got}")]
    OutputLength {
        /// Expected flat length
        expected: usize,
        /// Actual flat length
        got: usize,
    },

    /// Activation selector not in the supported set
    #[error("Unknown activation '{name}'")]
    UnknownActivation {
        /// The offending selector
        name: String,
    },
}

impl Error {
    /// Create an invalid-argument error
    pub fn invalid_argument(arg: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            arg,
            reason: reason.into(),
        }
    }

    /// Create a parameter-length error
    pub fn parameter_length(param: &'static str, expected: usize, got: usize) -> Self {
        Self::ParameterLength {
            param,
            expected,
            got,
        }
    }
}
