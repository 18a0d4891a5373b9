//! Downhill simplex (Nelder–Mead) local optimizer.
//!
//! Maintains a simplex of N+1 vertices in N-dimensional space and walks it
//! downhill through reflection, expansion, contraction, and shrink moves.
//! Converges quickly once inside a basin of attraction; started in a poor
//! basin it can stagnate, which is why it usually runs as the refinement
//! stage of a [`Composite`](super::Composite) pipeline.
//!
//! # Configuration
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `convergence_diff` | `1e-3` | Stop once the best/worst cost spread falls below this |
//! | `convergence_absolute` | `f64::INFINITY` | …and the best cost is below this |
//! | `max_iterations` | `100` | Iteration budget |
//! | `spread` | `1.0` | Half-width of the uniform perturbation seeding the initial simplex |
//! | `alpha` | `1.0` | Reflection coefficient; larger is more aggressive |
//! | `gamma` | `2.0` | Expansion coefficient; larger is more aggressive |
//! | `rho` | `0.5` | Contraction coefficient; should stay below 1 |
//! | `sigma` | `0.5` | Shrink coefficient |
//! | `seed` | `0` | RNG seed for the initial simplex |
//! | `track_best` | `false` | Return the best point ever evaluated instead of the final simplex's first slot |
//!
//! # Example
//!
//! ```
//! use downhill::{NelderMead, Optimizer};
//!
//! let bowl = |x: &[f64]| (x[0] - 1.0).powi(2) + (x[1] - 2.0).powi(2);
//!
//! let solver = NelderMead::new()
//!     .spread(5.0)
//!     .convergence_diff(1e-4)
//!     .max_iterations(1000)
//!     .seed(7);
//!
//! let mut objective = bowl;
//! let result = solver.optimize(&mut objective, &[20.0, 10.0]).unwrap();
//! assert!(bowl(&result) < 1e-2);
//! ```

use core::sync::atomic::{AtomicU64, Ordering};

use super::Optimizer;
use crate::error::{Error, Result};
use crate::rng_util::f64_range;

/// Downhill simplex minimizer.
///
/// Deterministic given its seed: each [`optimize`](Optimizer::optimize)
/// call derives a fresh RNG from the configured seed, so identical calls
/// return bit-identical results.
///
/// By default the returned point is the final simplex's first slot, which
/// matches the classical formulation's loop exit but is not guaranteed to
/// be the best point ever evaluated (a shrink step can reorder relative
/// quality). Enable [`track_best`](Self::track_best) to return the best
/// point observed across the whole run instead.
///
/// # Examples
///
/// ```
/// use downhill::{NelderMead, Optimizer};
///
/// let solver = NelderMead::new().spread(0.5).seed(3);
/// let mut objective = |x: &[f64]| x[0] * x[0];
/// let result = solver.optimize(&mut objective, &[4.0]).unwrap();
/// assert!(result[0].abs() < 1.0);
/// ```
#[derive(Debug)]
pub struct NelderMead {
    /// Stop once `|best - worst| < convergence_diff`…
    convergence_diff: f64,
    /// …and the best cost is below this.
    convergence_absolute: f64,
    max_iterations: usize,
    /// Half-width of the uniform perturbation around the guess used to
    /// seed the initial simplex.
    spread: f64,
    alpha: f64,
    gamma: f64,
    rho: f64,
    sigma: f64,
    seed: u64,
    track_best: bool,
    /// Objective evaluations performed by the most recent run.
    evaluations: AtomicU64,
}

impl NelderMead {
    /// Creates a simplex optimizer with the conventional coefficients
    /// (α=1, γ=2, ρ=0.5, σ=0.5) and the defaults listed in the
    /// [module documentation](self).
    #[must_use]
    pub fn new() -> Self {
        Self {
            convergence_diff: 1e-3,
            convergence_absolute: f64::INFINITY,
            max_iterations: 100,
            spread: 1.0,
            alpha: 1.0,
            gamma: 2.0,
            rho: 0.5,
            sigma: 0.5,
            seed: 0,
            track_best: false,
            evaluations: AtomicU64::new(0),
        }
    }

    /// Sets the cost-spread convergence threshold.
    ///
    /// # Panics
    ///
    /// Panics if `diff` is negative or not finite.
    #[must_use]
    pub fn convergence_diff(mut self, diff: f64) -> Self {
        assert!(diff >= 0.0 && diff.is_finite(), "convergence_diff must be finite and >= 0");
        self.convergence_diff = diff;
        self
    }

    /// Sets the absolute cost below which convergence is accepted. The
    /// spread test and this test must both pass for the search to stop
    /// early.
    #[must_use]
    pub fn convergence_absolute(mut self, cost: f64) -> Self {
        self.convergence_absolute = cost;
        self
    }

    /// Sets the iteration budget.
    #[must_use]
    pub fn max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Sets the half-width of the uniform perturbation that seeds the
    /// initial simplex around the guess.
    ///
    /// # Panics
    ///
    /// Panics if `spread` is not strictly positive.
    #[must_use]
    pub fn spread(mut self, spread: f64) -> Self {
        assert!(spread > 0.0, "spread must be > 0, got {spread}");
        self.spread = spread;
        self
    }

    /// Sets the reflection coefficient.
    ///
    /// # Panics
    ///
    /// Panics if `alpha` is not strictly positive.
    #[must_use]
    pub fn alpha(mut self, alpha: f64) -> Self {
        assert!(alpha > 0.0, "alpha must be > 0, got {alpha}");
        self.alpha = alpha;
        self
    }

    /// Sets the expansion coefficient.
    ///
    /// # Panics
    ///
    /// Panics if `gamma` is not strictly positive.
    #[must_use]
    pub fn gamma(mut self, gamma: f64) -> Self {
        assert!(gamma > 0.0, "gamma must be > 0, got {gamma}");
        self.gamma = gamma;
        self
    }

    /// Sets the contraction coefficient.
    ///
    /// # Panics
    ///
    /// Panics if `rho` is not strictly positive.
    #[must_use]
    pub fn rho(mut self, rho: f64) -> Self {
        assert!(rho > 0.0, "rho must be > 0, got {rho}");
        self.rho = rho;
        self
    }

    /// Sets the shrink coefficient.
    ///
    /// # Panics
    ///
    /// Panics if `sigma` is not strictly positive.
    #[must_use]
    pub fn sigma(mut self, sigma: f64) -> Self {
        assert!(sigma > 0.0, "sigma must be > 0, got {sigma}");
        self.sigma = sigma;
        self
    }

    /// Sets the RNG seed used to place the initial simplex.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// When enabled, returns the best point ever evaluated instead of the
    /// final simplex's first slot.
    #[must_use]
    pub fn track_best(mut self, track: bool) -> Self {
        self.track_best = track;
        self
    }

    /// The number of objective evaluations performed by the most recent
    /// [`optimize`](Optimizer::optimize) call.
    #[must_use]
    pub fn evaluations(&self) -> u64 {
        self.evaluations.load(Ordering::Relaxed)
    }
}

impl Default for NelderMead {
    fn default() -> Self {
        Self::new()
    }
}

impl Optimizer for NelderMead {
    #[allow(clippy::cast_precision_loss, clippy::too_many_lines)]
    fn optimize(
        &self,
        objective: &mut dyn FnMut(&[f64]) -> f64,
        guess: &[f64],
    ) -> Result<Vec<f64>> {
        if guess.is_empty() {
            return Err(Error::EmptyGuess);
        }
        let n = guess.len();
        let mut rng = fastrand::Rng::with_seed(self.seed);

        let mut evals: u64 = 0;
        let mut best_seen_cost = f64::INFINITY;
        let mut best_seen: Vec<f64> = Vec::new();
        let track = self.track_best;
        let mut eval = |point: &[f64]| -> f64 {
            evals += 1;
            let raw = objective(point);
            // Non-finite costs rank as worst so they can never win a
            // comparison or satisfy a convergence check.
            let cost = if raw.is_finite() { raw } else { f64::INFINITY };
            if track && cost < best_seen_cost {
                best_seen_cost = cost;
                best_seen = point.to_vec();
            }
            cost
        };

        // N+1 vertices, each coordinate perturbed uniformly within
        // ±spread of the guess.
        let mut simplex: Vec<Vec<f64>> = (0..=n)
            .map(|_| {
                guess
                    .iter()
                    .map(|&center| f64_range(&mut rng, center - self.spread, center + self.spread))
                    .collect()
            })
            .collect();
        let mut costs: Vec<f64> = simplex.iter().map(|vertex| eval(vertex)).collect();

        for _ in 0..self.max_iterations {
            // Worst and best vertex; first found wins ties.
            let mut worst = 0;
            let mut best = 0;
            for (vertex, &cost) in costs.iter().enumerate().skip(1) {
                if cost > costs[worst] {
                    worst = vertex;
                }
                if cost < costs[best] {
                    best = vertex;
                }
            }

            // Centroid of every vertex except the worst.
            let mut centroid = vec![0.0; n];
            for (vertex, point) in simplex.iter().enumerate() {
                if vertex == worst {
                    continue;
                }
                for (acc, x) in centroid.iter_mut().zip(point) {
                    *acc += x / n as f64;
                }
            }

            if (costs[best] - costs[worst]).abs() < self.convergence_diff
                && costs[best] < self.convergence_absolute
            {
                trace_debug!(evaluations = evals, "simplex converged");
                break;
            }

            // Reflect the worst vertex through the centroid.
            let reflected: Vec<f64> = centroid
                .iter()
                .zip(&simplex[worst])
                .map(|(c, w)| c + self.alpha * (c - w))
                .collect();
            let reflected_cost = eval(&reflected);

            if reflected_cost >= costs[best] && reflected_cost < costs[worst] {
                simplex[worst] = reflected;
                costs[worst] = reflected_cost;
                continue;
            }

            // Reflection beat the best vertex: try expanding past it.
            if reflected_cost < costs[best] {
                let expanded: Vec<f64> = centroid
                    .iter()
                    .zip(&reflected)
                    .map(|(c, r)| c + self.gamma * (r - c))
                    .collect();
                let expanded_cost = eval(&expanded);
                if expanded_cost < reflected_cost {
                    simplex[worst] = expanded;
                    costs[worst] = expanded_cost;
                } else {
                    simplex[worst] = reflected;
                    costs[worst] = reflected_cost;
                }
                continue;
            }

            // Reflection was no better than the worst: contract inward.
            let contracted: Vec<f64> = centroid
                .iter()
                .zip(&simplex[worst])
                .map(|(c, w)| c + self.rho * (w - c))
                .collect();
            let contracted_cost = eval(&contracted);
            if contracted_cost < costs[worst] {
                simplex[worst] = contracted;
                costs[worst] = contracted_cost;
                continue;
            }

            // Last resort: shrink every non-best vertex toward the best.
            let best_vertex = simplex[best].clone();
            for vertex in 0..=n {
                if vertex == best {
                    continue;
                }
                for (x, b) in simplex[vertex].iter_mut().zip(&best_vertex) {
                    *x = b + self.sigma * (*x - b);
                }
                costs[vertex] = eval(&simplex[vertex]);
            }
        }

        self.evaluations.store(evals, Ordering::Relaxed);

        let (result, result_cost) = if self.track_best {
            (best_seen, best_seen_cost)
        } else {
            let cost = costs[0];
            (simplex.swap_remove(0), cost)
        };
        if !result_cost.is_finite() {
            return Err(Error::NonFiniteCost);
        }
        Ok(result)
    }
}
