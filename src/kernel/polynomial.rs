//! Polynomial Kernel Implementation
//!
//! The polynomial kernel is defined as:
//! K(x, y) = (γ * <x, y> + r)^d
//!
//! Where:
//! - γ (gamma): scaling factor for the dot product
//! - r (coef0): independent term in the polynomial
//! - d (degree): degree of the polynomial
//!
//! The default configuration, `(<x, y> + 1)^2`, is the classic inhomogeneous
//! quadratic kernel.

use crate::kernel::linear::dot_product;
use crate::kernel::{Kernel, KernelType};

/// Default polynomial degree
pub const DEFAULT_POLYNOMIAL_DEGREE: u32 = 2;

/// Polynomial kernel with configurable degree, gamma, and coefficient
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialKernel {
    /// Scaling factor for the dot product (default: 1.0)
    pub gamma: f64,
    /// Independent term in the polynomial (default: 1.0)
    pub coef0: f64,
    /// Degree of the polynomial (default: 2)
    pub degree: u32,
}

impl PolynomialKernel {
    /// Creates a new polynomial kernel with the specified parameters
    ///
    /// # Arguments
    /// * `degree` - Degree of the polynomial (must be > 0)
    /// * `gamma` - Scaling factor for the dot product (must be > 0)
    /// * `coef0` - Independent term in the polynomial
    ///
    /// # Examples
    /// ```
    /// use smo_svm::kernel::PolynomialKernel;
    ///
    /// // Quadratic kernel: (x·y + 1)²
    /// let quad_kernel = PolynomialKernel::new(2, 1.0, 1.0);
    /// assert_eq!(quad_kernel.degree, 2);
    /// ```
    pub fn new(degree: u32, gamma: f64, coef0: f64) -> Self {
        assert!(degree > 0, "Polynomial degree must be positive");
        assert!(gamma > 0.0, "Gamma must be positive");

        Self {
            gamma,
            coef0,
            degree,
        }
    }

    /// Creates the inhomogeneous kernel `(<x,y> + 1)^degree`
    ///
    /// # Examples
    /// ```
    /// use smo_svm::kernel::PolynomialKernel;
    ///
    /// let kernel = PolynomialKernel::with_degree(3);
    /// assert_eq!(kernel.gamma, 1.0);
    /// assert_eq!(kernel.coef0, 1.0);
    /// ```
    pub fn with_degree(degree: u32) -> Self {
        Self::new(degree, 1.0, 1.0)
    }

    /// Creates a quadratic kernel: (γ * <x,y> + 1)²
    pub fn quadratic(gamma: f64) -> Self {
        Self::new(2, gamma, 1.0)
    }

    /// Creates a cubic kernel: (γ * <x,y> + 1)³
    pub fn cubic(gamma: f64) -> Self {
        Self::new(3, gamma, 1.0)
    }
}

impl Default for PolynomialKernel {
    fn default() -> Self {
        Self::with_degree(DEFAULT_POLYNOMIAL_DEGREE)
    }
}

impl Kernel for PolynomialKernel {
    fn compute(&self, x: &[f64], y: &[f64]) -> f64 {
        let base = self.gamma * dot_product(x, y) + self.coef0;
        // Integer degree, so a negative base is fine
        base.powi(self.degree as i32)
    }

    fn descriptor(&self) -> Option<KernelType> {
        Some(KernelType::Polynomial {
            degree: self.degree,
            gamma: self.gamma,
            coef0: self.coef0,
        })
    }
}
