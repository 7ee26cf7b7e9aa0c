//! Serializable kernel selection
//!
//! `KernelType` names one of the built-in kernels together with its parameters.
//! It is what the command line builds and what saved models record, and it is a
//! [`Kernel`] itself, dispatching to the matching implementation.

use crate::core::{Result, SVMError};
use crate::kernel::linear::dot_product;
use crate::kernel::{GaussianKernel, Kernel, PolynomialKernel, SigmoidKernel};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum KernelType {
    /// `<x, y>`
    Linear,
    /// `(gamma * <x, y> + coef0)^degree`
    Polynomial { degree: u32, gamma: f64, coef0: f64 },
    /// `exp(-gamma * ||x - y||^2)`
    Gaussian { gamma: f64 },
    /// `1 / (1 + exp(-(v * <x, y> - c)))`
    Sigmoid { v: f64, c: f64 },
}

impl KernelType {
    /// Check the parameters before the kernel is used
    pub fn validate(&self) -> Result<()> {
        match *self {
            KernelType::Linear => Ok(()),
            KernelType::Polynomial {
                degree,
                gamma,
                coef0,
            } => {
                if degree == 0 {
                    return Err(SVMError::InvalidParameter(
                        "Polynomial degree must be positive".to_string(),
                    ));
                }
                if !(gamma.is_finite() && gamma > 0.0) || !coef0.is_finite() {
                    return Err(SVMError::InvalidParameter(format!(
                        "Invalid polynomial parameters: gamma={gamma}, coef0={coef0}"
                    )));
                }
                Ok(())
            }
            KernelType::Gaussian { gamma } => {
                if gamma.is_finite() && gamma > 0.0 {
                    Ok(())
                } else {
                    Err(SVMError::InvalidParameter(format!(
                        "Gaussian gamma must be positive, got: {gamma}"
                    )))
                }
            }
            KernelType::Sigmoid { v, c } => {
                if v.is_finite() && c.is_finite() {
                    Ok(())
                } else {
                    Err(SVMError::InvalidParameter(format!(
                        "Sigmoid parameters must be finite: v={v}, c={c}"
                    )))
                }
            }
        }
    }

    /// Short lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            KernelType::Linear => "linear",
            KernelType::Polynomial { .. } => "polynomial",
            KernelType::Gaussian { .. } => "gaussian",
            KernelType::Sigmoid { .. } => "sigmoid",
        }
    }
}

impl Default for KernelType {
    fn default() -> Self {
        KernelType::Linear
    }
}

impl fmt::Display for KernelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelType::Linear => write!(f, "linear"),
            KernelType::Polynomial {
                degree,
                gamma,
                coef0,
            } => write!(f, "polynomial(degree={degree}, gamma={gamma}, coef0={coef0})"),
            KernelType::Gaussian { gamma } => write!(f, "gaussian(gamma={gamma})"),
            KernelType::Sigmoid { v, c } => write!(f, "sigmoid(v={v}, c={c})"),
        }
    }
}

impl Kernel for KernelType {
    fn compute(&self, x: &[f64], y: &[f64]) -> f64 {
        match *self {
            KernelType::Linear => dot_product(x, y),
            KernelType::Polynomial {
                degree,
                gamma,
                coef0,
            } => PolynomialKernel {
                gamma,
                coef0,
                degree,
            }
            .compute(x, y),
            KernelType::Gaussian { gamma } => GaussianKernel { gamma }.compute(x, y),
            KernelType::Sigmoid { v, c } => SigmoidKernel { v, c }.compute(x, y),
        }
    }

    fn is_linear(&self) -> bool {
        matches!(self, KernelType::Linear)
    }

    fn descriptor(&self) -> Option<KernelType> {
        Some(*self)
    }
}
