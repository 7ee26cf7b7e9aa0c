//! Gaussian (RBF) kernel implementation
//!
//! The Gaussian kernel is defined as: K(x, y) = exp(-γ * ||x - y||²)
//! where γ (gamma) controls the kernel width. No normalizing constant is applied,
//! so K(x, x) = 1 for every x.

use crate::kernel::linear::squared_distance;
use crate::kernel::{Kernel, KernelType};

/// Default width parameter
pub const DEFAULT_GAUSSIAN_GAMMA: f64 = 0.5;

/// Gaussian kernel: K(x, y) = exp(-γ * ||x - y||²)
///
/// The gamma parameter controls the "reach" of each training example:
/// - High gamma: close points have high influence (potential overfitting)
/// - Low gamma: distant points have influence (potential underfitting)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianKernel {
    pub(crate) gamma: f64,
}

impl GaussianKernel {
    /// Create a new Gaussian kernel with specified gamma parameter
    ///
    /// # Panics
    /// Panics if gamma is not positive
    pub fn new(gamma: f64) -> Self {
        assert!(gamma > 0.0, "Gamma must be positive, got: {}", gamma);
        Self { gamma }
    }

    /// Create a Gaussian kernel with gamma = 1.0 / n_features
    pub fn with_auto_gamma(n_features: usize) -> Self {
        assert!(n_features > 0, "Number of features must be positive");
        Self::new(1.0 / n_features as f64)
    }

    /// Get the gamma parameter
    pub fn gamma(&self) -> f64 {
        self.gamma
    }
}

impl Default for GaussianKernel {
    fn default() -> Self {
        Self::new(DEFAULT_GAUSSIAN_GAMMA)
    }
}

impl Kernel for GaussianKernel {
    fn compute(&self, x: &[f64], y: &[f64]) -> f64 {
        (-self.gamma * squared_distance(x, y)).exp()
    }

    fn descriptor(&self) -> Option<KernelType> {
        Some(KernelType::Gaussian { gamma: self.gamma })
    }
}
