//! Sigmoid kernel implementation
//!
//! K(x, y) = S(v * <x, y> - c), where S(t) = 1 / (1 + e^(-t)) is the logistic
//! function.
//!
//! Unlike the linear, polynomial and Gaussian kernels, the sigmoid kernel is not
//! positive semi-definite for every choice of `v` and `c`, so the dual problem
//! may lose strict convexity. The solver copes with this (the `eta <= 0`
//! branch of the pair update), but the resulting classifier is only as good as
//! the parameter choice.

use crate::kernel::linear::dot_product;
use crate::kernel::{Kernel, KernelType};

/// Default slope `v`
pub const DEFAULT_SIGMOID_V: f64 = 1.0;
/// Default offset `c`
pub const DEFAULT_SIGMOID_C: f64 = 0.0;

/// Logistic sigmoid kernel
#[derive(Debug, Clone, PartialEq)]
pub struct SigmoidKernel {
    /// Slope applied to the dot product
    pub v: f64,
    /// Offset subtracted after scaling
    pub c: f64,
}

impl SigmoidKernel {
    /// Creates a new sigmoid kernel
    ///
    /// # Examples
    /// ```
    /// use smo_svm::kernel::{Kernel, SigmoidKernel};
    ///
    /// let kernel = SigmoidKernel::new(1.0, 0.0);
    /// // Orthogonal points sit in the middle of the logistic curve
    /// assert_eq!(kernel.compute(&[1.0, 0.0], &[0.0, 1.0]), 0.5);
    /// ```
    pub fn new(v: f64, c: f64) -> Self {
        assert!(
            v.is_finite() && c.is_finite(),
            "Sigmoid parameters must be finite"
        );
        Self { v, c }
    }
}

impl Default for SigmoidKernel {
    fn default() -> Self {
        Self::new(DEFAULT_SIGMOID_V, DEFAULT_SIGMOID_C)
    }
}

impl Kernel for SigmoidKernel {
    fn compute(&self, x: &[f64], y: &[f64]) -> f64 {
        let t = self.v * dot_product(x, y) - self.c;
        1.0 / (1.0 + (-t).exp())
    }

    fn descriptor(&self) -> Option<KernelType> {
        Some(KernelType::Sigmoid {
            v: self.v,
            c: self.c,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sigmoid_defaults() {
        let kernel = SigmoidKernel::default();
        assert_eq!(kernel.v, 1.0);
        assert_eq!(kernel.c, 0.0);
    }

    #[test]
    fn test_sigmoid_known_values() {
        let kernel = SigmoidKernel::new(2.0, 1.0);
        // t = 2 * 1 - 1 = 1
        let expected = 1.0 / (1.0 + (-1.0_f64).exp());
        assert_relative_eq!(kernel.compute(&[1.0], &[1.0]), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_sigmoid_bounded() {
        let kernel = SigmoidKernel::new(10.0, 0.0);
        let high = kernel.compute(&[100.0], &[100.0]);
        let low = kernel.compute(&[100.0], &[-100.0]);
        assert!(high <= 1.0 && high > 0.99);
        assert!(low >= 0.0 && low < 0.01);
    }

    #[test]
    fn test_sigmoid_symmetry() {
        let kernel = SigmoidKernel::new(0.3, -0.2);
        let x = [0.5, 1.5];
        let y = [-1.0, 2.0];
        assert_eq!(kernel.compute(&x, &y), kernel.compute(&y, &x));
    }

    #[test]
    #[should_panic(expected = "Sigmoid parameters must be finite")]
    fn test_sigmoid_non_finite_panics() {
        SigmoidKernel::new(f64::NAN, 0.0);
    }
}
