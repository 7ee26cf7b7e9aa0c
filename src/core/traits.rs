//! Core traits for SVM implementation

use crate::core::{Prediction, Result};

/// Read-only, index-addressable view of labelled dense points
pub trait Dataset: Send + Sync {
    /// Number of examples in the dataset
    fn len(&self) -> usize;

    /// Number of features (dimensionality)
    fn dim(&self) -> usize;

    /// Feature vector of example `i`
    ///
    /// # Panics
    /// Panics if i >= len()
    fn point(&self, i: usize) -> &[f64];

    /// Label of example `i`, either +1.0 or -1.0
    ///
    /// # Panics
    /// Panics if i >= len()
    fn label(&self, i: usize) -> f64;

    /// All labels as a vector
    fn labels(&self) -> Vec<f64> {
        (0..self.len()).map(|i| self.label(i)).collect()
    }

    /// Check if the dataset is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Trained SVM model
pub trait SVMModel: Send + Sync {
    /// Predict a single point
    fn predict(&self, point: &[f64]) -> Result<Prediction>;

    /// Predict every point of a dataset
    fn predict_batch<D: Dataset>(&self, dataset: &D) -> Result<Vec<Prediction>>
    where
        Self: Sized,
    {
        (0..dataset.len())
            .map(|i| self.predict(dataset.point(i)))
            .collect()
    }

    /// Get the number of support vectors
    fn n_support_vectors(&self) -> usize;

    /// Get the threshold subtracted from the kernel expansion
    fn bias(&self) -> f64;
}
