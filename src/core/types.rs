//! Core type definitions for SVM

use crate::core::{Dataset, Result, SVMError};

/// Prediction result containing label and decision value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// Predicted class label (+1 or -1)
    pub label: f64,
    /// Raw decision function value
    pub decision_value: f64,
}

impl Prediction {
    /// Create a new prediction
    pub fn new(label: f64, decision_value: f64) -> Self {
        Self {
            label,
            decision_value,
        }
    }

    /// Build a prediction from a decision value, mapping `>= 0` to +1
    pub fn from_decision_value(decision_value: f64) -> Self {
        let label = if decision_value >= 0.0 { 1.0 } else { -1.0 };
        Self::new(label, decision_value)
    }

    /// Get confidence as absolute value of decision value
    pub fn confidence(&self) -> f64 {
        self.decision_value.abs()
    }
}

/// Dense, immutable set of labelled examples
///
/// Features are stored row-major, so `point(i)` is a contiguous slice of
/// length `dim()`. Every label is exactly +1.0 or -1.0.
#[derive(Clone, Debug, PartialEq)]
pub struct TrainingSet {
    dim: usize,
    features: Vec<f64>,
    labels: Vec<f64>,
}

impl TrainingSet {
    /// Build a training set from feature rows and labels
    ///
    /// Rejects empty input, ragged rows, zero-width rows, non-finite
    /// features and labels other than +1/-1.
    pub fn new(rows: Vec<Vec<f64>>, labels: Vec<f64>) -> Result<Self> {
        if rows.is_empty() {
            return Err(SVMError::EmptyDataset);
        }
        if rows.len() != labels.len() {
            return Err(SVMError::InvalidDataset(format!(
                "{} feature rows but {} labels",
                rows.len(),
                labels.len()
            )));
        }

        let dim = rows[0].len();
        if dim == 0 {
            return Err(SVMError::InvalidDataset(
                "Feature vectors must have at least one dimension".to_string(),
            ));
        }

        let mut features = Vec::with_capacity(rows.len() * dim);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != dim {
                return Err(SVMError::DimensionMismatch {
                    expected: dim,
                    actual: row.len(),
                });
            }
            if let Some(value) = row.iter().find(|v| !v.is_finite()) {
                return Err(SVMError::InvalidDataset(format!(
                    "Example {i} has non-finite feature value {value}"
                )));
            }
            features.extend(row);
        }

        for &label in &labels {
            if label != 1.0 && label != -1.0 {
                return Err(SVMError::InvalidLabel(label));
            }
        }

        Ok(Self {
            dim,
            features,
            labels,
        })
    }

    /// Build a training set from `(features, label)` pairs
    pub fn from_pairs(pairs: Vec<(Vec<f64>, f64)>) -> Result<Self> {
        let (rows, labels) = pairs.into_iter().unzip();
        Self::new(rows, labels)
    }

    /// Labels as a slice
    pub fn label_slice(&self) -> &[f64] {
        &self.labels
    }

    /// Iterate over `(point, label)` pairs in index order
    pub fn iter(&self) -> impl Iterator<Item = (&[f64], f64)> + '_ {
        self.features
            .chunks_exact(self.dim)
            .zip(self.labels.iter().copied())
    }

    /// Number of positive and negative examples
    pub fn class_counts(&self) -> (usize, usize) {
        let positive = self.labels.iter().filter(|&&y| y > 0.0).count();
        (positive, self.labels.len() - positive)
    }
}

impl Dataset for TrainingSet {
    fn len(&self) -> usize {
        self.labels.len()
    }

    fn dim(&self) -> usize {
        self.dim
    }

    fn point(&self, i: usize) -> &[f64] {
        &self.features[i * self.dim..(i + 1) * self.dim]
    }

    fn label(&self, i: usize) -> f64 {
        self.labels[i]
    }

    fn labels(&self) -> Vec<f64> {
        self.labels.clone()
    }
}

/// Counters collected while the solver runs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolverStats {
    /// Outer-loop passes (full or non-bound sweeps)
    pub passes: usize,
    /// Pair updates that were attempted past the `i1 == i2` check
    pub attempted_steps: usize,
    /// Pair updates that changed the model
    pub successful_steps: usize,
    /// Pair updates that had to compare endpoint objectives (eta <= 0)
    pub degenerate_steps: usize,
    /// Kernel cache hits
    pub cache_hits: u64,
    /// Kernel cache misses
    pub cache_misses: u64,
}

/// Result of optimization process
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// Lagrange multipliers (alpha values), one per training example
    pub alpha: Vec<f64>,
    /// Threshold b; the decision function is `sum(alpha_i y_i K(x_i, x)) - b`
    pub b: f64,
    /// Weight vector `sum(alpha_i y_i x_i)`, only kept for linear kernels
    pub weights: Option<Vec<f64>>,
    /// Indices of support vectors (where alpha > 0)
    pub support_vectors: Vec<usize>,
    /// Number of outer-loop passes performed
    pub iterations: usize,
    /// Final dual objective value
    pub objective_value: f64,
    /// Solver counters
    pub stats: SolverStats,
}

/// Configuration for optimizer
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizerConfig {
    /// Regularization parameter (upper bound for alpha)
    pub c: f64,
    /// Tolerance for KKT conditions
    pub epsilon: f64,
    /// Distance from 0 or C under which a multiplier is snapped onto the bound
    pub bound_epsilon: f64,
    /// Maximum number of outer-loop passes
    pub max_iterations: usize,
    /// Kernel cache size in bytes, 0 disables caching
    pub cache_size: usize,
    /// Seed for the working-set permutations, `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            c: 1.0,
            epsilon: 0.001,
            bound_epsilon: 1e-8,
            max_iterations: 10_000,
            cache_size: 0,
            seed: None,
        }
    }
}

impl OptimizerConfig {
    /// Check that the parameters describe a solvable problem
    pub fn validate(&self) -> Result<()> {
        if !(self.c.is_finite() && self.c > 0.0) {
            return Err(SVMError::InvalidParameter(format!(
                "C must be positive and finite, got: {}",
                self.c
            )));
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(SVMError::InvalidParameter(format!(
                "Tolerance must be positive, got: {}",
                self.epsilon
            )));
        }
        if !(self.bound_epsilon >= 0.0 && self.bound_epsilon < self.c / 2.0) {
            return Err(SVMError::InvalidParameter(format!(
                "Bound epsilon must lie in [0, C/2), got: {}",
                self.bound_epsilon
            )));
        }
        if self.max_iterations == 0 {
            return Err(SVMError::InvalidParameter(
                "Maximum iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy_set() -> TrainingSet {
        TrainingSet::new(
            vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![4.0, 4.0]],
            vec![-1.0, -1.0, 1.0],
        )
        .unwrap()
    }

    #[test]
    fn test_training_set_layout() {
        let set = toy_set();
        assert_eq!(set.len(), 3);
        assert_eq!(set.dim(), 2);
        assert_eq!(set.point(1), &[1.0, 0.0]);
        assert_eq!(set.point(2), &[4.0, 4.0]);
        assert_eq!(set.label(2), 1.0);
        assert_eq!(set.labels(), vec![-1.0, -1.0, 1.0]);
        assert_eq!(set.class_counts(), (1, 2));
    }

    #[test]
    fn test_training_set_iter() {
        let set = toy_set();
        let collected: Vec<_> = set.iter().collect();
        assert_eq!(collected.len(), 3);
        assert_eq!(collected[0], (&[0.0, 0.0][..], -1.0));
    }

    #[test]
    fn test_training_set_rejects_ragged_rows() {
        let result = TrainingSet::new(vec![vec![1.0, 2.0], vec![1.0]], vec![1.0, -1.0]);
        assert!(matches!(
            result,
            Err(SVMError::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_training_set_rejects_bad_labels() {
        let result = TrainingSet::new(vec![vec![1.0], vec![2.0]], vec![1.0, 0.5]);
        assert!(matches!(result, Err(SVMError::InvalidLabel(l)) if l == 0.5));
    }

    #[test]
    fn test_training_set_rejects_empty_and_zero_width() {
        assert!(matches!(
            TrainingSet::new(vec![], vec![]),
            Err(SVMError::EmptyDataset)
        ));
        assert!(matches!(
            TrainingSet::new(vec![vec![], vec![]], vec![1.0, -1.0]),
            Err(SVMError::InvalidDataset(_))
        ));
    }

    #[test]
    fn test_training_set_rejects_non_finite() {
        let result = TrainingSet::new(vec![vec![f64::NAN], vec![1.0]], vec![1.0, -1.0]);
        assert!(matches!(result, Err(SVMError::InvalidDataset(_))));
    }

    #[test]
    fn test_training_set_from_pairs() {
        let set = TrainingSet::from_pairs(vec![(vec![1.0], 1.0), (vec![-1.0], -1.0)]).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.label_slice(), &[1.0, -1.0]);
    }

    #[test]
    fn test_prediction() {
        let pred = Prediction::new(1.0, 2.5);
        assert_eq!(pred.label, 1.0);
        assert_eq!(pred.decision_value, 2.5);
        assert_eq!(pred.confidence(), 2.5);

        let neg_pred = Prediction::from_decision_value(-1.8);
        assert_eq!(neg_pred.label, -1.0);
        assert_eq!(neg_pred.confidence(), 1.8);

        assert_eq!(Prediction::from_decision_value(0.0).label, 1.0);
    }

    #[test]
    fn test_optimizer_config_default() {
        let config = OptimizerConfig::default();
        assert_eq!(config.c, 1.0);
        assert_eq!(config.epsilon, 0.001);
        assert_eq!(config.bound_epsilon, 1e-8);
        assert_eq!(config.max_iterations, 10_000);
        assert_eq!(config.cache_size, 0);
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_optimizer_config_validation() {
        let mut config = OptimizerConfig::default();
        config.c = 0.0;
        assert!(matches!(config.validate(), Err(SVMError::InvalidParameter(_))));

        let mut config = OptimizerConfig::default();
        config.epsilon = -1.0;
        assert!(config.validate().is_err());

        let mut config = OptimizerConfig::default();
        config.bound_epsilon = 0.6;
        assert!(config.validate().is_err());

        let mut config = OptimizerConfig::default();
        config.max_iterations = 0;
        assert!(config.validate().is_err());
    }
}
