//! Optimizer trait and implementations for derivative-free minimization.
//!
//! An optimizer takes an objective function and an initial guess and
//! produces a refined point of the same dimension. The objective is treated
//! as an opaque, possibly expensive, possibly noisy evaluator; no gradients
//! are ever requested.
//!
//! # Available optimizers
//!
//! | Optimizer | Algorithm | Best for |
//! |-----------|-----------|----------|
//! | [`NelderMead`] | Downhill simplex | Fast local refinement near a good basin |
//! | [`PopulationAnnealing`] | Cooled Gaussian population search | Escaping poor basins, broad search |
//! | [`Composite`] | Staged pipeline | Broad search followed by precise refinement |
//!
//! [`NelderMead`] converges quickly once the search is inside a basin of
//! attraction but can stagnate when started in a poor one.
//! [`PopulationAnnealing`] is the opposite trade: its random perturbations
//! escape poor basins, but it closes in on high precision slowly. The usual
//! pairing chains them with [`Composite`] — annealing first, simplex last.
//!
//! # Implementing a custom optimizer
//!
//! Implement the [`Optimizer`] trait with its single method:
//!
//! ```rust
//! use downhill::{Optimizer, Result};
//!
//! /// An optimizer that returns the guess untouched.
//! struct Identity;
//!
//! impl Optimizer for Identity {
//!     fn optimize(
//!         &self,
//!         _objective: &mut dyn FnMut(&[f64]) -> f64,
//!         guess: &[f64],
//!     ) -> Result<Vec<f64>> {
//!         Ok(guess.to_vec())
//!     }
//! }
//! ```
//!
//! The arguments to [`Optimizer::optimize`]:
//!
//! - **`objective`** — maps a point to a scalar cost; lower is better. It
//!   must produce a value for any point the search may visit. The engine
//!   places no bound on the domain; penalize out-of-range points inside the
//!   objective itself if the problem needs it. Non-finite return values are
//!   ranked as worst and never win a comparison.
//! - **`guess`** — the starting point. Its length fixes the search
//!   dimension for the whole call; an empty guess is an error.
//! - **Return value** — a point of the same dimension as `guess`.
//!
//! # Randomness and reproducibility
//!
//! Every stochastic optimizer owns a `u64` seed configured at construction
//! and derives a fresh RNG from it on each `optimize` call. Two calls with
//! identical configuration, objective, and guess return bit-identical
//! results. There is no global or implicit random source; concurrent
//! optimizations cannot race on shared RNG state.
//!
//! # Thread safety
//!
//! The trait requires `Send + Sync`. All per-run working state (simplex,
//! population, RNG) lives on the stack of `optimize`, so a single optimizer
//! instance may be shared across threads; each call owns its own state.
//!
//! # Blocking behavior
//!
//! `optimize` runs to completion on the calling thread — no suspension, no
//! cancellation hook. A caller with a time budget should enforce it inside
//! the objective by returning a very high cost once the deadline passes.

mod annealing;
mod composite;
mod nelder_mead;

pub use annealing::PopulationAnnealing;
pub use composite::Composite;
pub use nelder_mead::NelderMead;

use crate::error::Result;

/// Trait for pluggable derivative-free minimization strategies.
///
/// Implementations are interchangeable: each consumes an objective and an
/// initial guess and returns a refined point of the same dimension. The
/// trait requires `Send + Sync` so optimizers can be shared across threads
/// and boxed into a [`Composite`] pipeline.
///
/// See the [module-level documentation](self) for the full contract and a
/// custom-implementation walkthrough.
pub trait Optimizer: Send + Sync {
    /// Minimizes `objective` starting from `guess`.
    ///
    /// The objective is taken as `&mut dyn FnMut` so callers can count or
    /// log evaluations from the closure; the optimizer itself treats it as
    /// a pure cost function.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyGuess`](crate::Error::EmptyGuess) when `guess`
    /// has zero length, and
    /// [`Error::NonFiniteCost`](crate::Error::NonFiniteCost) when the
    /// search never observed a finite cost to return.
    fn optimize(
        &self,
        objective: &mut dyn FnMut(&[f64]) -> f64,
        guess: &[f64],
    ) -> Result<Vec<f64>>;
}
