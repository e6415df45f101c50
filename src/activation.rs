//! Scalar activation functions and output-vector helpers
//!
//! Activations are pure `T -> T` functions applied to each completed
//! weighted sum. Softmax is the one vector-valued normalizer: it is
//! applied once to a finished output vector, never pointwise, so it lives
//! here as a free function rather than an [`Activation`] variant.

use crate::element::Element;
use crate::error::{Error, Result};

/// Pointwise activation function kind
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Activation {
    /// Identity: x
    #[default]
    Identity,
    /// Sigmoid: 1 / (1 + exp(-x))
    Sigmoid,
    /// Hard sigmoid: clamp(0.2 * x + 0.5, 0, 1)
    HardSigmoid,
    /// Tanh: 1 - 2 / (exp(2x) + 1)
    Tanh,
    /// ReLU: max(0, x)
    Relu,
    /// LeakyReLU with slope 0.3 below zero
    LeakyRelu,
    /// Thresholded ReLU: x if x > 1, else 0
    ThresholdedRelu,
    /// Softsign: x / (1 + |x|)
    Softsign,
    /// Softplus: ln(1 + exp(x))
    Softplus,
}

impl Activation {
    /// Apply the activation to one value.
    #[inline]
    pub fn apply<T: Element>(self, x: T) -> T {
        let zero = T::zero();
        let one = T::one();
        match self {
            Activation::Identity => x,
            Activation::Sigmoid => one / (one + (-x).exp()),
            Activation::HardSigmoid => {
                let v = x * T::from_f64(0.2) + T::from_f64(0.5);
                if v >= one {
                    one
                } else if v <= zero {
                    zero
                } else {
                    v
                }
            }
            Activation::Tanh => {
                let two = T::from_f64(2.0);
                one - two / ((two * x).exp() + one)
            }
            Activation::Relu => {
                if x >= zero {
                    x
                } else {
                    zero
                }
            }
            Activation::LeakyRelu => {
                if x < zero {
                    T::from_f64(0.3) * x
                } else {
                    x
                }
            }
            Activation::ThresholdedRelu => {
                if x > one {
                    x
                } else {
                    zero
                }
            }
            Activation::Softsign => {
                if x > zero {
                    x / (one + x)
                } else {
                    x / (one - x)
                }
            }
            Activation::Softplus => (one + x.exp()).ln(),
        }
    }

    /// Resolve a selector name, failing fast on anything outside the
    /// supported set.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "identity" | "linear" => Ok(Activation::Identity),
            "sigmoid" => Ok(Activation::Sigmoid),
            "hard_sigmoid" | "hardsigmoid" => Ok(Activation::HardSigmoid),
            "tanh" => Ok(Activation::Tanh),
            "relu" => Ok(Activation::Relu),
            "leaky_relu" | "leakyrelu" => Ok(Activation::LeakyRelu),
            "thresholded_relu" | "thresholdedrelu" => Ok(Activation::ThresholdedRelu),
            "softsign" => Ok(Activation::Softsign),
            "softplus" => Ok(Activation::Softplus),
            _ => Err(Error::UnknownActivation {
                name: name.to_string(),
            }),
        }
    }
}

/// Normalize a completed output vector in place: subtract the maximum,
/// exponentiate, divide by the sum.
pub fn softmax<T: Element>(values: &mut [T]) {
    if values.is_empty() {
        return;
    }
    let mut max = values[0];
    for &v in &values[1..] {
        if v > max {
            max = v;
        }
    }
    let mut sum = T::zero();
    for v in values.iter_mut() {
        *v = (*v - max).exp();
        sum = sum + *v;
    }
    for v in values.iter_mut() {
        *v = *v / sum;
    }
}

/// Index of the largest element, first occurrence on ties.
///
/// # Panics
///
/// Panics if `values` is empty.
pub fn argmax<T: Element>(values: &[T]) -> usize {
    let mut max = values[0];
    let mut index = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > max {
            max = v;
            index = i;
        }
    }
    index
}
