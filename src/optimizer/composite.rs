//! Staged pipeline over any sequence of optimizers.
//!
//! Each stage's result becomes the next stage's initial guess. The usual
//! pairing is a broad [`PopulationAnnealing`](super::PopulationAnnealing)
//! stage followed by a precise [`NelderMead`](super::NelderMead) stage, but
//! any number, order, and repetition of stages is valid — including zero
//! stages, which returns the guess unchanged.
//!
//! # Example
//!
//! ```
//! use downhill::{Composite, NelderMead, Optimizer, PopulationAnnealing};
//!
//! let bowl = |x: &[f64]| (x[0] - 1.0).powi(2) + (x[1] - 2.0).powi(2);
//!
//! let pipeline = Composite::new()
//!     .then(
//!         PopulationAnnealing::new()
//!             .population_size(5)
//!             .candidates_per_iteration(2)
//!             .convergence_absolute(10.0)
//!             .min_step_size(50, 20.0, 0.005)
//!             .seed(19),
//!     )
//!     .then(
//!         NelderMead::new()
//!             .spread(0.1)
//!             .convergence_absolute(0.005)
//!             .max_iterations(1000)
//!             .seed(23),
//!     );
//!
//! let mut objective = bowl;
//! let result = pipeline.optimize(&mut objective, &[20.0, 10.0]).unwrap();
//! assert!(bowl(&result) < 0.01);
//! ```

use super::Optimizer;
use crate::error::{Error, Result};

/// Runs a sequence of optimizers, threading each stage's output into the
/// next stage's input.
///
/// Stateless apart from its stage list; purely a sequencing adapter over
/// the [`Optimizer`] capability.
#[derive(Default)]
pub struct Composite {
    stages: Vec<Box<dyn Optimizer>>,
}

impl Composite {
    /// Creates an empty pipeline. With no stages, `optimize` returns the
    /// guess unchanged.
    #[must_use]
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Appends a stage to the end of the pipeline.
    #[must_use]
    pub fn then(mut self, stage: impl Optimizer + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// The number of stages in the pipeline.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Returns `true` when the pipeline has no stages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl Optimizer for Composite {
    fn optimize(
        &self,
        objective: &mut dyn FnMut(&[f64]) -> f64,
        guess: &[f64],
    ) -> Result<Vec<f64>> {
        if guess.is_empty() {
            return Err(Error::EmptyGuess);
        }
        let mut current = guess.to_vec();
        for stage in &self.stages {
            let refined = stage.optimize(objective, &current)?;
            if refined.len() != current.len() {
                return Err(Error::DimensionMismatch {
                    expected: current.len(),
                    got: refined.len(),
                });
            }
            current = refined;
        }
        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Offset(f64);

    impl Optimizer for Offset {
        fn optimize(
            &self,
            _objective: &mut dyn FnMut(&[f64]) -> f64,
            guess: &[f64],
        ) -> Result<Vec<f64>> {
            Ok(guess.iter().map(|&x| x + self.0).collect())
        }
    }

    struct Truncating;

    impl Optimizer for Truncating {
        fn optimize(
            &self,
            _objective: &mut dyn FnMut(&[f64]) -> f64,
            guess: &[f64],
        ) -> Result<Vec<f64>> {
            Ok(guess[..guess.len() - 1].to_vec())
        }
    }

    #[test]
    fn zero_stages_is_identity() {
        let pipeline = Composite::new();
        let mut objective = |_: &[f64]| 0.0;
        let result = pipeline.optimize(&mut objective, &[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(result, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn stages_run_in_order() {
        let pipeline = Composite::new().then(Offset(1.0)).then(Offset(10.0));
        let mut objective = |_: &[f64]| 0.0;
        let result = pipeline.optimize(&mut objective, &[0.0, 5.0]).unwrap();
        assert_eq!(result, vec![11.0, 16.0]);
    }

    #[test]
    fn repeated_stage_types_are_allowed() {
        let pipeline = Composite::new()
            .then(Offset(2.0))
            .then(Offset(2.0))
            .then(Offset(2.0));
        assert_eq!(pipeline.len(), 3);
        let mut objective = |_: &[f64]| 0.0;
        let result = pipeline.optimize(&mut objective, &[0.0]).unwrap();
        assert_eq!(result, vec![6.0]);
    }

    #[test]
    fn dimension_mismatch_is_detected() {
        let pipeline = Composite::new().then(Truncating).then(Offset(1.0));
        let mut objective = |_: &[f64]| 0.0;
        assert!(matches!(
            pipeline.optimize(&mut objective, &[1.0, 2.0]),
            Err(Error::DimensionMismatch {
                expected: 2,
                got: 1
            })
        ));
    }

    #[test]
    fn rejects_empty_guess() {
        let pipeline = Composite::new().then(Offset(1.0));
        let mut objective = |_: &[f64]| 0.0;
        assert!(matches!(
            pipeline.optimize(&mut objective, &[]),
            Err(Error::EmptyGuess)
        ));
    }
}
