//! Stochastic population optimizer with a geometrically cooling step size.
//!
//! A pseudo simulated annealing: every generation, each surviving candidate
//! spawns Gaussian-perturbed children, the combined population is trimmed
//! worst-first back to its size cap, and the perturbation step size is
//! multiplied by a contraction factor. Broad early steps escape poor basins
//! of attraction; the cooled late steps settle into the best basin found.
//! High-precision convergence is slow, so this usually runs as the first
//! stage of a [`Composite`](super::Composite) pipeline with a
//! [`NelderMead`](super::NelderMead) refinement stage behind it.
//!
//! # Configuration
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `population_size` | `3` | Survivors kept per generation |
//! | `candidates_per_iteration` | `1` | Children spawned per surviving parent per generation |
//! | `sigma` | `1.0` | Initial Gaussian step size |
//! | `contraction` | `0.9` | Step-size multiplier applied each generation |
//! | `iterations` | `100` | Generation count |
//! | `convergence_absolute` | `f64::NEG_INFINITY` | Early-exit cost threshold |
//! | `seed` | `0` | RNG seed |
//!
//! Rather than picking `contraction` directly,
//! [`min_step_size`](PopulationAnnealing::min_step_size) derives it from
//! the step size the final generation should use.
//!
//! # Example
//!
//! ```
//! use downhill::{Optimizer, PopulationAnnealing};
//!
//! let bowl = |x: &[f64]| (x[0] - 1.0).powi(2) + (x[1] - 2.0).powi(2);
//!
//! let solver = PopulationAnnealing::new()
//!     .population_size(5)
//!     .candidates_per_iteration(2)
//!     .min_step_size(100, 20.0, 0.005)
//!     .seed(17);
//!
//! let mut objective = bowl;
//! let result = solver.optimize(&mut objective, &[20.0, 10.0]).unwrap();
//! assert!(bowl(&result) < 0.5);
//! ```

use super::Optimizer;
use crate::candidate::Candidate;
use crate::error::{Error, Result};
use crate::queue::PriorityQueue;
use crate::rng_util::gaussian;

/// Population-based random-perturbation minimizer with geometric cooling.
///
/// Deterministic given its seed: each [`optimize`](Optimizer::optimize)
/// call derives a fresh RNG from the configured seed.
///
/// # Examples
///
/// ```
/// use downhill::{Optimizer, PopulationAnnealing};
///
/// let solver = PopulationAnnealing::new().sigma(5.0).iterations(50).seed(2);
/// let mut objective = |x: &[f64]| x[0] * x[0];
/// let result = solver.optimize(&mut objective, &[30.0]).unwrap();
/// assert!(result[0].abs() < 30.0);
/// ```
#[derive(Clone, Debug)]
pub struct PopulationAnnealing {
    population_size: usize,
    candidates_per_iteration: usize,
    /// Initial Gaussian step size.
    sigma: f64,
    /// Step-size multiplier applied after every generation.
    contraction: f64,
    iterations: usize,
    /// Any child scored at or below this ends the search immediately.
    convergence_absolute: f64,
    seed: u64,
}

impl PopulationAnnealing {
    /// Creates an annealing optimizer with the defaults listed in the
    /// [module documentation](self).
    #[must_use]
    pub fn new() -> Self {
        Self {
            population_size: 3,
            candidates_per_iteration: 1,
            sigma: 1.0,
            contraction: 0.9,
            iterations: 100,
            convergence_absolute: f64::NEG_INFINITY,
            seed: 0,
        }
    }

    /// Sets how many survivors each generation keeps.
    ///
    /// # Panics
    ///
    /// Panics if `size` is 0.
    #[must_use]
    pub fn population_size(mut self, size: usize) -> Self {
        assert!(size > 0, "population_size must be > 0");
        self.population_size = size;
        self
    }

    /// Sets how many children each surviving parent spawns per generation.
    ///
    /// Until the population has grown to `population_size`, spawning
    /// continues past this count regardless.
    ///
    /// # Panics
    ///
    /// Panics if `count` is 0.
    #[must_use]
    pub fn candidates_per_iteration(mut self, count: usize) -> Self {
        assert!(count > 0, "candidates_per_iteration must be > 0");
        self.candidates_per_iteration = count;
        self
    }

    /// Sets the initial Gaussian step size.
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

    /// Sets the geometric cooling factor applied to the step size after
    /// every generation.
    ///
    /// # Panics
    ///
    /// Panics if `contraction` is outside `(0, 1]`.
    #[must_use]
    pub fn contraction(mut self, contraction: f64) -> Self {
        assert!(
            contraction > 0.0 && contraction <= 1.0,
            "contraction must be in (0, 1], got {contraction}"
        );
        self.contraction = contraction;
        self
    }

    /// Sets the generation count.
    #[must_use]
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the early-exit threshold: any child scored at or below this
    /// cost is returned immediately.
    #[must_use]
    pub fn convergence_absolute(mut self, cost: f64) -> Self {
        self.convergence_absolute = cost;
        self
    }

    /// Sets the RNG seed.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Configures the cooling schedule from its endpoints: runs for
    /// `iterations` generations, starting at step size `sigma_start` and
    /// decaying geometrically to approximately `min_step` by the end.
    ///
    /// A derived contraction below 0.5 cools so aggressively that the
    /// search is likely to freeze long before it has explored anything;
    /// this is reported through a `tracing` warning when the `tracing`
    /// feature is enabled.
    ///
    /// # Panics
    ///
    /// Panics if `iterations` is 0 or either step size is not strictly
    /// positive.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn min_step_size(mut self, iterations: usize, sigma_start: f64, min_step: f64) -> Self {
        assert!(iterations > 0, "iterations must be > 0");
        assert!(sigma_start > 0.0, "sigma_start must be > 0, got {sigma_start}");
        assert!(min_step > 0.0, "min_step must be > 0, got {min_step}");
        self.iterations = iterations;
        self.sigma = sigma_start;
        self.contraction = (min_step / sigma_start).powf(1.0 / iterations as f64);
        if self.contraction < 0.5 {
            trace_warn!(
                contraction = self.contraction,
                "contraction below 0.5 cools very aggressively"
            );
        }
        self
    }
}

impl Default for PopulationAnnealing {
    fn default() -> Self {
        Self::new()
    }
}

impl Optimizer for PopulationAnnealing {
    fn optimize(
        &self,
        objective: &mut dyn FnMut(&[f64]) -> f64,
        guess: &[f64],
    ) -> Result<Vec<f64>> {
        if guess.is_empty() {
            return Err(Error::EmptyGuess);
        }
        let mut rng = fastrand::Rng::with_seed(self.seed);

        let mut eval = |point: &[f64]| -> f64 {
            let raw = objective(point);
            // Non-finite costs rank as worst and can never early-exit.
            if raw.is_finite() { raw } else { f64::INFINITY }
        };

        let mut survivors: PriorityQueue<Candidate> = PriorityQueue::new();
        let start_cost = eval(guess);
        survivors.push(Candidate::new(guess.to_vec(), start_cost));

        let mut step = self.sigma;
        for _ in 0..self.iterations {
            // Snapshot the survivors as this generation's parent set; the
            // queue keeps growing while children are pushed.
            let parents: Vec<Candidate> = survivors.iter().cloned().collect();
            for parent in &parents {
                let mut spawned = 0;
                while spawned < self.candidates_per_iteration
                    || survivors.len() < self.population_size
                {
                    spawned += 1;
                    let point: Vec<f64> = parent
                        .point
                        .iter()
                        .map(|&x| gaussian(&mut rng, x, step))
                        .collect();
                    let cost = eval(&point);
                    if cost <= self.convergence_absolute {
                        trace_info!(cost, "annealing reached the early-exit threshold");
                        return Ok(point);
                    }
                    survivors.push(Candidate::new(point, cost));
                }
            }

            // Evict worst-first back down to the population cap.
            while survivors.len() > self.population_size {
                survivors.pop()?;
            }

            step *= self.contraction;
        }

        // Pop everything but the single best survivor.
        while survivors.len() > 1 {
            survivors.pop()?;
        }
        let winner = survivors.pop()?;
        if !winner.cost.is_finite() {
            return Err(Error::NonFiniteCost);
        }
        trace_debug!(cost = winner.cost, "annealing finished its generations");
        Ok(winner.point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bowl(x: &[f64]) -> f64 {
        (x[0] - 1.0).powi(2) + (x[1] - 2.0).powi(2)
    }

    #[test]
    fn rejects_empty_guess() {
        let solver = PopulationAnnealing::new();
        let mut objective = |_: &[f64]| 0.0;
        assert!(matches!(
            solver.optimize(&mut objective, &[]),
            Err(Error::EmptyGuess)
        ));
    }

    #[test]
    fn early_exit_returns_the_triggering_child() {
        let solver = PopulationAnnealing::new()
            .sigma(5.0)
            .convergence_absolute(50.0)
            .iterations(1000)
            .seed(6);
        let mut calls = 0u64;
        let mut objective = |x: &[f64]| {
            calls += 1;
            bowl(x)
        };
        let result = solver.optimize(&mut objective, &[20.0, 10.0]).unwrap();
        assert!(bowl(&result) <= 50.0);
        // A threshold this loose must be hit long before the full budget.
        assert!(calls < 200, "took {calls} evaluations");
    }

    #[test]
    fn evaluation_count_stays_within_budget() {
        let solver = PopulationAnnealing::new()
            .population_size(5)
            .candidates_per_iteration(2)
            .min_step_size(100, 20.0, 0.005)
            .seed(13);
        let mut calls = 0usize;
        let mut objective = |x: &[f64]| {
            calls += 1;
            bowl(x)
        };
        let result = solver.optimize(&mut objective, &[20.0, 10.0]).unwrap();
        // 1 seed evaluation, then at most population_size parents spawning
        // candidates_per_iteration children per generation (plus the fill
        // to population_size in the first generation).
        assert!(calls <= 100 * 5 * 2 + 5, "took {calls} evaluations");
        assert!(bowl(&result) < 0.5, "f(result) = {}", bowl(&result));
    }

    #[test]
    fn deterministic_given_seed() {
        let solver = PopulationAnnealing::new().sigma(5.0).iterations(30).seed(8);
        let mut objective = bowl;
        let first = solver.optimize(&mut objective, &[20.0, 10.0]).unwrap();
        let second = solver.optimize(&mut objective, &[20.0, 10.0]).unwrap();
        assert_eq!(
            first.iter().map(|v| v.to_bits()).collect::<Vec<_>>(),
            second.iter().map(|v| v.to_bits()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn min_step_size_derives_the_contraction() {
        let solver = PopulationAnnealing::new().min_step_size(100, 20.0, 0.005);
        // contraction^100 * 20 ≈ 0.005
        let final_step = solver.sigma * solver.contraction.powi(100);
        assert!(
            (final_step - 0.005).abs() < 1e-9,
            "final step {final_step} should approximate 0.005"
        );
    }

    #[test]
    fn all_non_finite_costs_is_an_error() {
        let solver = PopulationAnnealing::new().iterations(5);
        let mut objective = |_: &[f64]| f64::INFINITY;
        assert!(matches!(
            solver.optimize(&mut objective, &[0.0]),
            Err(Error::NonFiniteCost)
        ));
    }

    #[test]
    #[should_panic(expected = "population_size must be > 0")]
    fn rejects_zero_population() {
        let _ = PopulationAnnealing::new().population_size(0);
    }
}
