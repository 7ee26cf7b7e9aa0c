//! High-level API for Support Vector Machine operations
//!
//! This module provides a user-friendly interface for common SVM tasks,
//! including training, prediction, and model evaluation.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use smo_svm::api::SVM;
//! use smo_svm::data::DataFormat;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Train a model on data
//! let svm = SVM::new()
//!     .with_c(1.0)
//!     .with_epsilon(0.001)
//!     .train_from_file("data.libsvm", DataFormat::Auto)?;
//!
//! // Make predictions
//! let predictions = svm.predict_from_file("test.libsvm", DataFormat::Auto)?;
//! println!("{} predictions", predictions.len());
//! println!(
//!     "Accuracy: {:.2}%",
//!     svm.evaluate_from_file("test.libsvm", DataFormat::Auto)? * 100.0
//! );
//! # Ok(())
//! # }
//! ```

use crate::core::{
    Dataset, OptimizerConfig, Prediction, Result, SVMModel, SolverStats, TrainingSet,
};
use crate::data::{load_dataset, load_dataset_for_model, DataFormat};
use crate::kernel::{Kernel, KernelType, LinearKernel};
use crate::optimizer::{SVMOptimizer, TrainedSVM};
use log::info;
use std::path::Path;

/// High-level SVM interface with builder pattern
pub struct SVM<K: Kernel = LinearKernel> {
    kernel: K,
    config: OptimizerConfig,
}

impl SVM<LinearKernel> {
    /// Create a new SVM with linear kernel and default parameters
    pub fn new() -> Self {
        Self::with_kernel(LinearKernel::new())
    }
}

impl Default for SVM<LinearKernel> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Kernel> SVM<K> {
    /// Create SVM with custom kernel
    pub fn with_kernel(kernel: K) -> Self {
        Self {
            kernel,
            config: OptimizerConfig::default(),
        }
    }

    /// Set regularization parameter C
    pub fn with_c(mut self, c: f64) -> Self {
        self.config.c = c;
        self
    }

    /// Set KKT tolerance
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.config.epsilon = epsilon;
        self
    }

    /// Set the distance under which a multiplier is snapped onto 0 or C
    pub fn with_bound_epsilon(mut self, bound_epsilon: f64) -> Self {
        self.config.bound_epsilon = bound_epsilon;
        self
    }

    /// Set maximum number of outer-loop passes
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.config.max_iterations = max_iterations;
        self
    }

    /// Set kernel cache size in bytes
    pub fn with_cache_size(mut self, cache_size: usize) -> Self {
        self.config.cache_size = cache_size;
        self
    }

    /// Seed the partner-search permutations
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Train on a dataset
    pub fn train(self, data: &TrainingSet) -> Result<TrainedModel<K>> {
        let config = self.config.clone();
        let optimizer = SVMOptimizer::new(self.kernel, self.config);
        let model = optimizer.train(data)?;
        info!(
            "Trained on {} examples: {} support vectors, b={:.6}",
            data.len(),
            model.n_support_vectors(),
            model.bias()
        );
        Ok(TrainedModel { model, config })
    }

    /// Train from a LibSVM or dense file
    pub fn train_from_file<P: AsRef<Path>>(
        self,
        path: P,
        format: DataFormat,
    ) -> Result<TrainedModel<K>> {
        let data = load_dataset(path, format)?;
        self.train(&data)
    }
}

/// Trained SVM model with high-level prediction interface
pub struct TrainedModel<K: Kernel> {
    model: TrainedSVM<K>,
    config: OptimizerConfig,
}

impl<K: Kernel> TrainedModel<K> {
    pub(crate) fn from_parts(model: TrainedSVM<K>, config: OptimizerConfig) -> Self {
        Self { model, config }
    }

    /// Predict a single point
    pub fn predict(&self, point: &[f64]) -> Result<Prediction> {
        self.model.predict(point)
    }

    /// Raw decision value for a single point
    pub fn decision_value(&self, point: &[f64]) -> Result<f64> {
        self.model.decision_function(point)
    }

    /// Predict every point of a dataset
    pub fn predict_dataset<D: Dataset>(&self, dataset: &D) -> Result<Vec<Prediction>> {
        self.model.predict_batch(dataset)
    }

    /// Predict from a file, padding sparse rows to the model's dimension
    pub fn predict_from_file<P: AsRef<Path>>(
        &self,
        path: P,
        format: DataFormat,
    ) -> Result<Vec<Prediction>> {
        let data = load_dataset_for_model(path, format, self.model.dim())?;
        self.predict_dataset(&data)
    }

    /// Fraction of correctly classified examples
    pub fn evaluate<D: Dataset>(&self, dataset: &D) -> Result<f64> {
        Ok(self.evaluate_detailed(dataset)?.accuracy())
    }

    /// Evaluate accuracy on a file
    pub fn evaluate_from_file<P: AsRef<Path>>(&self, path: P, format: DataFormat) -> Result<f64> {
        let data = load_dataset_for_model(path, format, self.model.dim())?;
        self.evaluate(&data)
    }

    /// Get detailed evaluation metrics
    pub fn evaluate_detailed<D: Dataset>(&self, dataset: &D) -> Result<EvaluationMetrics> {
        let predictions = self.predict_dataset(dataset)?;
        let labels = dataset.labels();

        let mut metrics = EvaluationMetrics::default();
        for (pred, &actual) in predictions.iter().zip(labels.iter()) {
            match (pred.label > 0.0, actual > 0.0) {
                (true, true) => metrics.true_positives += 1,
                (false, false) => metrics.true_negatives += 1,
                (true, false) => metrics.false_positives += 1,
                (false, true) => metrics.false_negatives += 1,
            }
        }

        Ok(metrics)
    }

    /// Get model information
    pub fn info(&self) -> ModelInfo {
        ModelInfo {
            kernel: self.model.kernel().descriptor(),
            dim: self.model.dim(),
            n_support_vectors: self.model.n_support_vectors(),
            bias: self.model.bias(),
            iterations: self.model.iterations(),
            objective_value: self.model.objective_value(),
            support_vector_indices: self.model.support_vector_indices().to_vec(),
        }
    }

    /// Solver counters from training
    pub fn stats(&self) -> &SolverStats {
        self.model.stats()
    }

    /// Parameters the model was trained with
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Get the underlying trained model
    pub fn inner(&self) -> &TrainedSVM<K> {
        &self.model
    }
}

/// Confusion counts with the usual derived scores
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvaluationMetrics {
    pub true_positives: usize,
    pub true_negatives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
}

impl EvaluationMetrics {
    pub fn total(&self) -> usize {
        self.true_positives + self.true_negatives + self.false_positives + self.false_negatives
    }

    /// Calculate accuracy: (TP + TN) / (TP + TN + FP + FN)
    pub fn accuracy(&self) -> f64 {
        ratio(self.true_positives + self.true_negatives, self.total())
    }

    /// Calculate precision: TP / (TP + FP)
    pub fn precision(&self) -> f64 {
        ratio(
            self.true_positives,
            self.true_positives + self.false_positives,
        )
    }

    /// Calculate recall (sensitivity): TP / (TP + FN)
    pub fn recall(&self) -> f64 {
        ratio(
            self.true_positives,
            self.true_positives + self.false_negatives,
        )
    }

    /// Calculate F1 score: 2 * (precision * recall) / (precision + recall)
    pub fn f1_score(&self) -> f64 {
        let p = self.precision();
        let r = self.recall();
        if p + r == 0.0 {
            0.0
        } else {
            2.0 * (p * r) / (p + r)
        }
    }

    /// Calculate specificity: TN / (TN + FP)
    pub fn specificity(&self) -> f64 {
        ratio(
            self.true_negatives,
            self.true_negatives + self.false_positives,
        )
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Model information
#[derive(Debug, Clone)]
pub struct ModelInfo {
    /// Kernel description, if the kernel has one
    pub kernel: Option<KernelType>,
    pub dim: usize,
    pub n_support_vectors: usize,
    pub bias: f64,
    /// Outer-loop passes used in training
    pub iterations: usize,
    pub objective_value: f64,
    pub support_vector_indices: Vec<usize>,
}
