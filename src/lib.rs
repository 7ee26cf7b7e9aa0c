//! Binary Support Vector Machine trained by Sequential Minimal Optimization
//!
//! Based on "Fast Training of Support Vector Machines using Sequential Minimal
//! Optimization" by John C. Platt

pub mod api;
pub mod cache;
pub mod core;
pub mod data;
pub mod kernel;
pub mod optimizer;
pub mod persistence;
pub mod solver;

// Re-export main types for convenience
pub use crate::api::{EvaluationMetrics, ModelInfo, TrainedModel, SVM};
pub use crate::cache::{CacheStats, KernelCache};
pub use crate::core::error::*;
pub use crate::core::traits::*;
pub use crate::core::types::*;
pub use crate::data::{load_dataset, DataFormat, DenseDataset, LibSVMDataset};
pub use crate::kernel::{
    GaussianKernel, Kernel, KernelType, LinearKernel, PolynomialKernel, SigmoidKernel,
};
pub use crate::optimizer::{SVMOptimizer, SupportVector, TrainedSVM};
pub use crate::persistence::SerializableModel;
pub use crate::solver::{ModelState, SMOSolver};

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
