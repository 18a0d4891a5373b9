#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![deny(clippy::style)]
#![deny(clippy::complexity)]
#![deny(clippy::perf)]
#![deny(clippy::pedantic)]
#![deny(clippy::std_instead_of_core)]

//! Derivative-free black-box minimization over fixed-dimension real
//! vectors. The objective is an opaque `&[f64] -> f64` evaluator — possibly
//! expensive, possibly noisy, never differentiated.
//!
//! # Getting Started
//!
//! Minimize a function in a few lines:
//!
//! ```
//! use downhill::prelude::*;
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
//!
//! # Core Concepts
//!
//! | Type | Role |
//! |------|------|
//! | [`Optimizer`] | The capability every strategy implements: objective + guess → refined point. |
//! | [`NelderMead`] | Downhill simplex — fast, deterministic local refinement. |
//! | [`PopulationAnnealing`] | Cooled Gaussian population search — slow but basin-escaping. |
//! | [`Composite`] | Staged pipeline threading each stage's result into the next. |
//! | [`PriorityQueue`] | Binary max-heap backing the bounded worst-first population. |
//! | [`Candidate`] | A scored point; ranks worst-first so populations evict by popping. |
//!
//! The classic pairing chains the two searches:
//!
//! ```
//! use downhill::prelude::*;
//!
//! let rosenbrock = |x: &[f64]| (1.0 - x[0]).powi(2) + 100.0 * (x[1] - x[0] * x[0]).powi(2);
//!
//! let pipeline = Composite::new()
//!     .then(
//!         PopulationAnnealing::new()
//!             .population_size(5)
//!             .candidates_per_iteration(2)
//!             .convergence_absolute(10.0)
//!             .min_step_size(50, 20.0, 0.005)
//!             .seed(41),
//!     )
//!     .then(
//!         NelderMead::new()
//!             .spread(0.1)
//!             .convergence_absolute(0.005)
//!             .max_iterations(2000)
//!             .seed(43),
//!     );
//!
//! let mut objective = rosenbrock;
//! let result = pipeline.optimize(&mut objective, &[-3.0, 4.0]).unwrap();
//! assert!(rosenbrock(&result) < 0.01);
//! ```
//!
//! # Reproducibility
//!
//! There is no implicit global randomness. Every stochastic optimizer
//! carries a `u64` seed and derives a fresh RNG from it on each call, so a
//! run is reproducible bit for bit given the same configuration, objective,
//! and guess. Concurrent optimizations never share RNG state.
//!
//! # Feature Flags
//!
//! | Flag | What it enables | Default |
//! |------|----------------|---------|
//! | `serde` | `Serialize`/`Deserialize` on [`Candidate`] | off |
//! | `tracing` | Structured log events via [`tracing`](https://docs.rs/tracing) at key search points | off |

/// Emit a `tracing::info!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_info {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::warn!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_warn {
    ($($arg:tt)*) => { tracing::warn!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_warn {
    ($($arg:tt)*) => {};
}

mod candidate;
mod error;
pub mod optimizer;
mod queue;
mod rng_util;

pub use candidate::Candidate;
pub use error::{Error, Result};
pub use optimizer::{Composite, NelderMead, Optimizer, PopulationAnnealing};
pub use queue::PriorityQueue;
pub use rng_util::gaussian;

/// Convenient wildcard import for the most common types.
///
/// ```
/// use downhill::prelude::*;
/// ```
pub mod prelude {
    pub use crate::candidate::Candidate;
    pub use crate::error::{Error, Result};
    pub use crate::optimizer::{Composite, NelderMead, Optimizer, PopulationAnnealing};
    pub use crate::queue::PriorityQueue;
    pub use crate::rng_util::gaussian;
}
