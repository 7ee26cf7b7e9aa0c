//! Sequential Minimal Optimization (SMO) solver implementation
//!
//! Platt's SMO for the binary soft-margin SVM dual. Each step picks a pair of
//! Lagrange multipliers, solves the two-variable subproblem analytically and
//! refreshes the error cache and threshold incrementally.

use crate::cache::KernelCache;
use crate::core::{
    Dataset, OptimizationResult, OptimizerConfig, Result, SVMError, SolverStats, TrainingSet,
};
use crate::kernel::Kernel;
use crate::solver::permutation::{PermutationSource, RandomPermutation};
use crate::solver::state::ModelState;
use log::{debug, info, warn};
use std::sync::Arc;

/// Passes between progress log lines
const PROGRESS_INTERVAL: usize = 10;

/// SMO solver for SVM optimization
///
/// Holds the kernel and configuration. Each call to [`SMOSolver::solve`]
/// creates a fresh [`SmoRun`] over a borrowed training set.
pub struct SMOSolver<K: Kernel> {
    kernel: Arc<K>,
    config: OptimizerConfig,
}

impl<K: Kernel> SMOSolver<K> {
    /// Create a new SMO solver with the given kernel and configuration
    pub fn new(kernel: Arc<K>, config: OptimizerConfig) -> Self {
        Self { kernel, config }
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// Train on `data`, drawing partner-search orders from a `StdRng` seeded
    /// with `config.seed`
    pub fn solve(&self, data: &TrainingSet) -> Result<OptimizationResult> {
        self.solve_with_permutation(data, RandomPermutation::new(self.config.seed))
    }

    /// Train on `data` with an explicit permutation source
    pub fn solve_with_permutation<P: PermutationSource>(
        &self,
        data: &TrainingSet,
        permutation: P,
    ) -> Result<OptimizationResult> {
        let mut run = self.start(data, permutation)?;
        run.run()?;
        Ok(run.into_result())
    }

    /// Validate the inputs and set up the initial state without optimizing
    pub fn start<'a, P: PermutationSource>(
        &'a self,
        data: &'a TrainingSet,
        permutation: P,
    ) -> Result<SmoRun<'a, K, P>> {
        self.config.validate()?;

        if data.len() < 2 {
            return Err(SVMError::InvalidDataset(format!(
                "SMO needs at least two examples, got {}",
                data.len()
            )));
        }

        let (positive, negative) = data.class_counts();
        if positive == 0 || negative == 0 {
            warn!(
                "Training set contains a single class ({positive} positive, {negative} negative)"
            );
        }

        let cache = KernelCache::for_problem(self.config.cache_size, data.len());
        if let Some(cache) = &cache {
            debug!("Kernel cache enabled with {} entries", cache.capacity());
        }

        debug!(
            "Starting SMO: {} examples, dimension {}, C={}, tol={}",
            data.len(),
            data.dim(),
            self.config.c,
            self.config.epsilon
        );

        Ok(SmoRun {
            kernel: &*self.kernel,
            data,
            config: &self.config,
            state: ModelState::new(data.label_slice(), data.dim(), self.kernel.is_linear()),
            permutation,
            cache,
            stats: SolverStats::default(),
        })
    }
}

/// One optimization run over a borrowed training set
///
/// The run owns the [`ModelState`] and is its only writer. `take_step` and
/// `examine_example` are public so the individual steps can be driven and
/// inspected directly.
pub struct SmoRun<'a, K: Kernel, P: PermutationSource> {
    kernel: &'a K,
    data: &'a TrainingSet,
    config: &'a OptimizerConfig,
    state: ModelState,
    permutation: P,
    cache: Option<KernelCache>,
    stats: SolverStats,
}

impl<'a, K: Kernel, P: PermutationSource> SmoRun<'a, K, P> {
    pub fn state(&self) -> &ModelState {
        &self.state
    }

    pub fn stats(&self) -> &SolverStats {
        &self.stats
    }

    /// K(x_i, x_j), through the cache when one is configured
    fn kernel_value(&mut self, i: usize, j: usize) -> f64 {
        let kernel = self.kernel;
        let data = self.data;
        match self.cache.as_mut() {
            Some(cache) => {
                cache.get_or_insert_with(i, j, || kernel.compute(data.point(i), data.point(j)))
            }
            None => kernel.compute(data.point(i), data.point(j)),
        }
    }

    fn snap(&self, value: f64) -> f64 {
        let c = self.config.c;
        let eps = self.config.bound_epsilon;
        if value <= eps {
            0.0
        } else if value >= c - eps {
            c
        } else {
            value
        }
    }

    /// Jointly optimize the multipliers of `i1` and `i2`
    ///
    /// Returns false, leaving the state untouched, when the pair cannot make
    /// progress: identical indices, an empty feasible segment, or a change
    /// below the noise floor.
    pub fn take_step(&mut self, i1: usize, i2: usize) -> bool {
        if i1 == i2 {
            return false;
        }
        self.stats.attempted_steps += 1;

        let c = self.config.c;
        let eps = self.config.bound_epsilon;

        let alpha1 = self.state.alpha(i1);
        let alpha2 = self.state.alpha(i2);
        let y1 = self.data.label(i1);
        let y2 = self.data.label(i2);
        let e1 = self.state.error(i1);
        let e2 = self.state.error(i2);
        let s = y1 * y2;

        // Feasible segment for the new alpha2
        let (low, high) = if s < 0.0 {
            ((alpha2 - alpha1).max(0.0), c.min(c + alpha2 - alpha1))
        } else {
            ((alpha2 + alpha1 - c).max(0.0), c.min(alpha2 + alpha1))
        };
        if low >= high {
            return false;
        }

        let k11 = self.kernel_value(i1, i1);
        let k12 = self.kernel_value(i1, i2);
        let k22 = self.kernel_value(i2, i2);
        let eta = k11 + k22 - 2.0 * k12;

        let a2 = if eta > 0.0 {
            let unclipped = alpha2 + y2 * (e1 - e2) / eta;
            if unclipped < low {
                low
            } else if unclipped > high {
                high
            } else {
                unclipped
            }
        } else {
            // Objective is not strictly convex along the segment: compare ends
            self.stats.degenerate_steps += 1;
            let b = self.state.b();
            let f1 = y1 * (e1 + b) - alpha1 * k11 - s * alpha2 * k12;
            let f2 = y2 * (e2 + b) - s * alpha1 * k12 - alpha2 * k22;
            let l1 = alpha1 + s * (alpha2 - low);
            let h1 = alpha1 + s * (alpha2 - high);
            let l_obj = l1 * f1
                + low * f2
                + 0.5 * l1 * l1 * k11
                + 0.5 * low * low * k22
                + s * low * l1 * k12;
            let h_obj = h1 * f1
                + high * f2
                + 0.5 * h1 * h1 * k11
                + 0.5 * high * high * k22
                + s * high * h1 * k12;

            if l_obj < h_obj - eps {
                low
            } else if l_obj > h_obj + eps {
                high
            } else {
                alpha2
            }
        };
        let a2 = self.snap(a2);

        // Relative noise floor; a zero bound_epsilon still rejects a no-op
        if a2 == alpha2 || (a2 - alpha2).abs() < eps * (a2 + alpha2 + eps) {
            return false;
        }

        let a1 = self.snap((alpha1 + s * (alpha2 - a2)).clamp(0.0, c));

        self.state.set_alpha(i1, a1, c);
        self.state.set_alpha(i2, a2, c);

        // Threshold
        let d1 = y1 * (a1 - alpha1);
        let d2 = y2 * (a2 - alpha2);
        let b_old = self.state.b();
        let b1 = e1 + d1 * k11 + d2 * k12 + b_old;
        let b2 = e2 + d1 * k12 + d2 * k22 + b_old;
        let b_new = if !self.state.is_bound(i1) {
            b1
        } else if !self.state.is_bound(i2) {
            b2
        } else {
            (b1 + b2) / 2.0
        };
        self.state.set_b(b_new);

        // Error cache
        let delta_b = b_new - b_old;
        for k in 0..self.data.len() {
            let k1 = self.kernel_value(k, i1);
            let k2 = self.kernel_value(k, i2);
            self.state.shift_error(k, d1 * k1 + d2 * k2 - delta_b);
        }

        // Weight vector
        let data = self.data;
        let x1 = data.point(i1);
        let x2 = data.point(i2);
        if let Some(w) = self.state.weights_mut() {
            for ((w_j, &x1_j), &x2_j) in w.iter_mut().zip(x1).zip(x2) {
                *w_j += d1 * x1_j + d2 * x2_j;
            }
        }

        self.stats.successful_steps += 1;
        true
    }

    /// Check `i2` against the KKT conditions and, if it violates them, search
    /// for a partner that makes progress
    pub fn examine_example(&mut self, i2: usize) -> bool {
        let c = self.config.c;
        let tol = self.config.epsilon;
        let alpha2 = self.state.alpha(i2);
        let e2 = self.state.error(i2);
        let r2 = e2 * self.data.label(i2);

        if !((r2 < -tol && alpha2 < c) || (r2 > tol && alpha2 > 0.0)) {
            return false;
        }

        // Largest expected step among the non-bound examples
        if self.state.non_bound_count() > 1 {
            if let Some(i1) = self.best_partner(e2) {
                if self.take_step(i1, i2) {
                    return true;
                }
            }
        }

        let n = self.data.len();

        let order = self.permutation.permutation(n);
        for i1 in order {
            if !self.state.is_bound(i1) && self.take_step(i1, i2) {
                return true;
            }
        }

        let order = self.permutation.permutation(n);
        for i1 in order {
            if self.take_step(i1, i2) {
                return true;
            }
        }

        false
    }

    /// Non-bound index with the smallest error when `e2 > 0`, the largest otherwise
    fn best_partner(&self, e2: f64) -> Option<usize> {
        let errors = self.state.errors();
        let candidates = (0..errors.len()).filter(|&i| !self.state.is_bound(i));
        if e2 > 0.0 {
            candidates.min_by(|&a, &b| errors[a].total_cmp(&errors[b]))
        } else {
            candidates.max_by(|&a, &b| errors[a].total_cmp(&errors[b]))
        }
    }

    /// Alternate full and non-bound sweeps until a full sweep changes nothing
    ///
    /// Fails with [`SVMError::NotConverged`] once `max_iterations` passes have
    /// run and the loop would still continue.
    pub fn run(&mut self) -> Result<()> {
        let n = self.data.len();
        let mut num_changed = 0usize;
        let mut examine_all = true;

        while num_changed > 0 || examine_all {
            if self.stats.passes >= self.config.max_iterations {
                self.sync_cache_stats();
                warn!(
                    "SMO stopped after {} passes without converging ({} non-bound multipliers)",
                    self.stats.passes,
                    self.state.non_bound_count()
                );
                return Err(SVMError::NotConverged {
                    iterations: self.stats.passes,
                });
            }

            num_changed = 0;
            for i in 0..n {
                if (examine_all || !self.state.is_bound(i)) && self.examine_example(i) {
                    num_changed += 1;
                }
            }
            self.stats.passes += 1;

            if examine_all {
                examine_all = false;
            } else if num_changed == 0 {
                examine_all = true;
            }

            if self.stats.passes % PROGRESS_INTERVAL == 0 {
                debug!(
                    "pass {}: b={:.6}, non-bound={}, changed={}",
                    self.stats.passes,
                    self.state.b(),
                    self.state.non_bound_count(),
                    num_changed
                );
            }
        }

        self.sync_cache_stats();
        info!(
            "SMO converged after {} passes ({} successful steps, {} non-bound multipliers)",
            self.stats.passes,
            self.stats.successful_steps,
            self.state.non_bound_count()
        );
        Ok(())
    }

    fn sync_cache_stats(&mut self) {
        if let Some(cache) = &self.cache {
            let cache_stats = cache.stats();
            self.stats.cache_hits = cache_stats.hits;
            self.stats.cache_misses = cache_stats.misses;
        }
    }

    /// Dual objective `sum(alpha) - 1/2 sum_ij alpha_i alpha_j y_i y_j K_ij`
    fn objective_value(&self, support_vectors: &[usize]) -> f64 {
        let alpha = self.state.alphas();
        let linear_term: f64 = support_vectors.iter().map(|&i| alpha[i]).sum();

        let mut quadratic_term = 0.0;
        for &i in support_vectors {
            for &j in support_vectors {
                quadratic_term += alpha[i]
                    * alpha[j]
                    * self.data.label(i)
                    * self.data.label(j)
                    * self.kernel.compute(self.data.point(i), self.data.point(j));
            }
        }

        linear_term - 0.5 * quadratic_term
    }

    /// Freeze the run into its exported result
    pub fn into_result(mut self) -> OptimizationResult {
        self.sync_cache_stats();

        let support_vectors: Vec<usize> = self
            .state
            .alphas()
            .iter()
            .enumerate()
            .filter_map(|(i, &a)| if a > 0.0 { Some(i) } else { None })
            .collect();
        let objective_value = self.objective_value(&support_vectors);

        OptimizationResult {
            alpha: self.state.alphas().to_vec(),
            b: self.state.b(),
            weights: self.state.weights().map(<[f64]>::to_vec),
            support_vectors,
            iterations: self.stats.passes,
            objective_value,
            stats: self.stats,
        }
    }
}
