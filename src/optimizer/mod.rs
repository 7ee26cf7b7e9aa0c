//! Optimization algorithms for SVM
//!
//! `SVMOptimizer` ties a kernel to the SMO solver; `TrainedSVM` is the frozen
//! model it produces and evaluates the decision function.

use crate::core::{
    Dataset, OptimizationResult, OptimizerConfig, Prediction, Result, SVMError, SVMModel,
    SolverStats, TrainingSet,
};
use crate::kernel::linear::dot_product;
use crate::kernel::Kernel;
use crate::solver::{PermutationSource, SMOSolver};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// High-level SVM optimizer that integrates kernel functions and solving algorithms
pub struct SVMOptimizer<K: Kernel> {
    kernel: Arc<K>,
    config: OptimizerConfig,
}

impl<K: Kernel> SVMOptimizer<K> {
    /// Create a new SVM optimizer with the given kernel and configuration
    pub fn new(kernel: K, config: OptimizerConfig) -> Self {
        Self {
            kernel: Arc::new(kernel),
            config,
        }
    }

    /// Create a new SVM optimizer with default configuration
    pub fn with_kernel(kernel: K) -> Self {
        Self::new(kernel, OptimizerConfig::default())
    }

    /// Train an SVM model on the given training set
    pub fn train(&self, data: &TrainingSet) -> Result<TrainedSVM<K>> {
        let solver = SMOSolver::new(Arc::clone(&self.kernel), self.config.clone());
        let result = solver.solve(data)?;
        Ok(TrainedSVM::new(Arc::clone(&self.kernel), data, result))
    }

    /// Train with an explicit source of partner-search orders
    pub fn train_with_permutation<P: PermutationSource>(
        &self,
        data: &TrainingSet,
        permutation: P,
    ) -> Result<TrainedSVM<K>> {
        let solver = SMOSolver::new(Arc::clone(&self.kernel), self.config.clone());
        let result = solver.solve_with_permutation(data, permutation)?;
        Ok(TrainedSVM::new(Arc::clone(&self.kernel), data, result))
    }

    /// Get the optimizer configuration
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Get the kernel
    pub fn kernel(&self) -> &K {
        &self.kernel
    }
}

/// Training example with a non-zero multiplier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportVector {
    pub alpha: f64,
    pub label: f64,
    pub features: Vec<f64>,
}

/// A trained SVM model that can make predictions
pub struct TrainedSVM<K: Kernel> {
    kernel: Arc<K>,
    dim: usize,
    support_vectors: Vec<SupportVector>,
    support_indices: Vec<usize>,
    alphas: Vec<f64>,
    bias: f64,
    weights: Option<Vec<f64>>,
    iterations: usize,
    objective_value: f64,
    stats: SolverStats,
}

impl<K: Kernel> TrainedSVM<K> {
    pub(crate) fn new(kernel: Arc<K>, data: &TrainingSet, result: OptimizationResult) -> Self {
        let support_vectors = result
            .support_vectors
            .iter()
            .map(|&i| SupportVector {
                alpha: result.alpha[i],
                label: data.label(i),
                features: data.point(i).to_vec(),
            })
            .collect();

        Self {
            kernel,
            dim: data.dim(),
            support_vectors,
            support_indices: result.support_vectors,
            alphas: result.alpha,
            bias: result.b,
            weights: result.weights,
            iterations: result.iterations,
            objective_value: result.objective_value,
            stats: result.stats,
        }
    }

    /// Rebuild a model from its stored parts
    ///
    /// For a linear kernel without stored weights the weight vector is
    /// recomputed from the support vectors.
    pub(crate) fn from_parts(
        kernel: Arc<K>,
        dim: usize,
        support_vectors: Vec<SupportVector>,
        bias: f64,
        weights: Option<Vec<f64>>,
        iterations: usize,
    ) -> Self {
        let weights = match weights {
            Some(w) => Some(w),
            None if kernel.is_linear() => {
                let mut w = vec![0.0; dim];
                for sv in &support_vectors {
                    for (w_j, &x_j) in w.iter_mut().zip(&sv.features) {
                        *w_j += sv.alpha * sv.label * x_j;
                    }
                }
                Some(w)
            }
            None => None,
        };

        Self {
            kernel,
            dim,
            support_indices: (0..support_vectors.len()).collect(),
            alphas: support_vectors.iter().map(|sv| sv.alpha).collect(),
            support_vectors,
            bias,
            weights,
            iterations,
            objective_value: 0.0,
            stats: SolverStats::default(),
        }
    }

    /// Decision value `sum(alpha_i y_i K(x_i, x)) - b`, or `w . x - b` for a
    /// linear model
    pub fn decision_function(&self, point: &[f64]) -> Result<f64> {
        if point.len() != self.dim {
            return Err(SVMError::DimensionMismatch {
                expected: self.dim,
                actual: point.len(),
            });
        }

        if let Some(w) = &self.weights {
            return Ok(dot_product(w, point) - self.bias);
        }

        let expansion: f64 = self
            .support_vectors
            .iter()
            .map(|sv| sv.alpha * sv.label * self.kernel.compute(&sv.features, point))
            .sum();
        Ok(expansion - self.bias)
    }

    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// Number of features the model was trained on
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn support_vectors(&self) -> &[SupportVector] {
        &self.support_vectors
    }

    /// Indices of the support vectors in the training set
    pub fn support_vector_indices(&self) -> &[usize] {
        &self.support_indices
    }

    /// Multiplier of every training example, zeros included
    pub fn alphas(&self) -> &[f64] {
        &self.alphas
    }

    pub fn weights(&self) -> Option<&[f64]> {
        self.weights.as_deref()
    }

    /// Outer-loop passes used in training
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Final dual objective, 0 for a model loaded from disk
    pub fn objective_value(&self) -> f64 {
        self.objective_value
    }

    pub fn stats(&self) -> &SolverStats {
        &self.stats
    }
}

impl<K: Kernel> SVMModel for TrainedSVM<K> {
    fn predict(&self, point: &[f64]) -> Result<Prediction> {
        self.decision_function(point)
            .map(Prediction::from_decision_value)
    }

    fn n_support_vectors(&self) -> usize {
        self.support_vectors.len()
    }

    fn bias(&self) -> f64 {
        self.bias
    }
}
