//! Error types for the downhill crate.
//!
//! All fallible operations in the crate return [`Result<T>`], which is an
//! alias for `core::result::Result<T, Error>`. The [`Error`] enum covers
//! guess validation, pipeline dimension checks, and ranked-queue access.

/// Errors returned by optimization operations.
///
/// Every failure is local to a single
/// [`Optimizer::optimize`](crate::Optimizer::optimize) call; the engine
/// performs no internal retries.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The initial guess passed to an optimizer had zero length. The search
    /// dimension is taken from the guess, so an empty guess leaves nothing
    /// to optimize.
    #[error("initial guess must contain at least one coordinate")]
    EmptyGuess,

    /// A [`Composite`](crate::Composite) stage produced a result whose
    /// dimension differs from the vector it was given.
    #[error("dimension mismatch: expected {expected} coordinates but got {got}")]
    DimensionMismatch {
        /// The dimension fed into the stage.
        expected: usize,
        /// The dimension the stage returned.
        got: usize,
    },

    /// [`PriorityQueue::pop`](crate::PriorityQueue::pop) or
    /// [`PriorityQueue::peek`](crate::PriorityQueue::peek) was called on an
    /// empty queue.
    #[error("cannot take from an empty queue")]
    EmptyQueue,

    /// The search did not settle on a point with a finite cost. Non-finite
    /// objective values are ranked as worst during the search so they can
    /// never win a comparison; this error surfaces instead of returning a
    /// point whose cost is meaningless.
    #[error("the search did not settle on a point with a finite cost")]
    NonFiniteCost,
}

/// A convenience alias for `core::result::Result<T, Error>`.
pub type Result<T> = core::result::Result<T, Error>;
