//! Mutable optimization state of one SMO run

use crate::core::Dataset;
use crate::kernel::Kernel;
use crate::kernel::linear::dot_product;

/// Multipliers, threshold and the caches derived from them
///
/// `error[i]` always holds `f(x_i) - y_i` for the current multipliers, where
/// `f(x) = sum(alpha_j y_j K(x_j, x)) - b`. `bound[i]` is true exactly when
/// `alpha[i]` sits on 0 or C.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelState {
    alpha: Vec<f64>,
    b: f64,
    error: Vec<f64>,
    bound: Vec<bool>,
    non_bound_count: usize,
    weights: Option<Vec<f64>>,
}

impl ModelState {
    /// Initial state: every multiplier at zero, `b = 0`, `error[i] = -y_i`
    pub fn new(labels: &[f64], dim: usize, track_weights: bool) -> Self {
        Self {
            alpha: vec![0.0; labels.len()],
            b: 0.0,
            error: labels.iter().map(|&y| -y).collect(),
            bound: vec![true; labels.len()],
            non_bound_count: 0,
            weights: track_weights.then(|| vec![0.0; dim]),
        }
    }

    pub fn len(&self) -> usize {
        self.alpha.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alpha.is_empty()
    }

    pub fn alpha(&self, i: usize) -> f64 {
        self.alpha[i]
    }

    pub fn alphas(&self) -> &[f64] {
        &self.alpha
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    pub fn error(&self, i: usize) -> f64 {
        self.error[i]
    }

    pub fn errors(&self) -> &[f64] {
        &self.error
    }

    pub fn is_bound(&self, i: usize) -> bool {
        self.bound[i]
    }

    pub fn non_bound_count(&self) -> usize {
        self.non_bound_count
    }

    /// Primal weight vector, present only for linear kernels
    pub fn weights(&self) -> Option<&[f64]> {
        self.weights.as_deref()
    }

    /// Store a multiplier that has already been clipped and snapped to `[0, c]`
    pub(crate) fn set_alpha(&mut self, i: usize, value: f64, c: f64) {
        debug_assert!((0.0..=c).contains(&value));
        self.alpha[i] = value;

        let now_bound = value <= 0.0 || value >= c;
        match (self.bound[i], now_bound) {
            (true, false) => self.non_bound_count += 1,
            (false, true) => self.non_bound_count -= 1,
            _ => {}
        }
        self.bound[i] = now_bound;
    }

    pub(crate) fn set_b(&mut self, b: f64) {
        self.b = b;
    }

    pub(crate) fn shift_error(&mut self, i: usize, delta: f64) {
        self.error[i] += delta;
    }

    pub(crate) fn weights_mut(&mut self) -> Option<&mut [f64]> {
        self.weights.as_deref_mut()
    }

    /// Evaluate the current decision function at `point`
    ///
    /// Uses the weight vector when one is maintained, the kernel expansion
    /// otherwise.
    pub fn decision_value<K, D>(&self, kernel: &K, data: &D, point: &[f64]) -> f64
    where
        K: Kernel + ?Sized,
        D: Dataset,
    {
        if let Some(w) = &self.weights {
            return dot_product(w, point) - self.b;
        }

        let expansion: f64 = self
            .alpha
            .iter()
            .enumerate()
            .filter(|(_, &a)| a > 0.0)
            .map(|(i, &a)| a * data.label(i) * kernel.compute(data.point(i), point))
            .sum();
        expansion - self.b
    }

    /// Indices whose multiplier violates the KKT conditions by more than `tol`
    pub fn kkt_violations(&self, labels: &[f64], c: f64, tol: f64) -> Vec<usize> {
        (0..self.len())
            .filter(|&i| {
                let r = self.error[i] * labels[i];
                let a = self.alpha[i];
                (r < -tol && a < c) || (r > tol && a > 0.0)
            })
            .collect()
    }
}
