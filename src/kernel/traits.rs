//! Kernel trait definition

use crate::kernel::KernelType;

/// Kernel function trait
///
/// A kernel function K(x, y) must satisfy Mercer's condition to be valid for SVM.
/// Implementations are pure: the same pair of points always yields the same
/// value, and K(x, y) == K(y, x). Both slices always have the same length.
pub trait Kernel: Send + Sync {
    /// Compute kernel value K(x, y)
    fn compute(&self, x: &[f64], y: &[f64]) -> f64;

    /// Whether K(x, y) is the plain dot product
    ///
    /// When true, the solver maintains the primal weight vector incrementally
    /// and trained models evaluate `w . x - b` directly.
    fn is_linear(&self) -> bool {
        false
    }

    /// Serializable description of this kernel, if it has one
    fn descriptor(&self) -> Option<KernelType> {
        None
    }
}

impl<K: Kernel + ?Sized> Kernel for &K {
    fn compute(&self, x: &[f64], y: &[f64]) -> f64 {
        (**self).compute(x, y)
    }

    fn is_linear(&self) -> bool {
        (**self).is_linear()
    }

    fn descriptor(&self) -> Option<KernelType> {
        (**self).descriptor()
    }
}
