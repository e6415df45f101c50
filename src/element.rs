//! Element trait for the numeric types kernels are generic over

use num_traits::Float;

/// Trait for types that can flow through the window caches and reductions
///
/// Kernels only need floating-point arithmetic, ordering, and the
/// transcendental functions the activation set uses, all of which
/// [`num_traits::Float`] provides. The explicit `from_f64`/`to_f64`
/// conversions exist so constants (activation coefficients, pool-size
/// divisors) can be materialized without fallible casts in kernel code.
pub trait Element: Float + Send + Sync + std::fmt::Debug + 'static {
    /// Convert from f64 to this type
    fn from_f64(v: f64) -> Self;

    /// Convert to f64 for generic numeric operations
    fn to_f64(self) -> f64;
}

impl Element for f64 {
    #[inline]
    fn from_f64(v: f64) -> Self {
        v
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }
}

impl Element for f32 {
    #[inline]
    fn from_f64(v: f64) -> Self {
        v as f32
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }
}
