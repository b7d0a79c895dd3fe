//! Error types for parameter validation and fixed-point convergence.

use thiserror::Error;

/// Everything that can go wrong before or during a run.
///
/// Numerical degeneracies inside a peeling round (division by zero, log of
/// zero) never surface here — they are guarded branches that terminate the
/// recurrence instead. What remains is bad configuration and the iteration
/// cap.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// Arrival ratio must be finite and strictly positive.
    #[error("invalid arrival ratio {0}: must be finite and > 0")]
    InvalidArrivalRatio(f64),

    /// Filter probability must be a probability.
    #[error("invalid filter probability {0}: must be within [0, 1]")]
    InvalidFilterProbability(f64),

    /// The per-timeslot reference probability f·l exceeds 1, so no valid
    /// initial degree distribution exists.
    #[error("filter probability {filter} x arrival ratio {arrival} exceeds 1")]
    ReferenceProbabilityOutOfRange { filter: f64, arrival: f64 },

    /// The recurrence was still making progress when the iteration cap hit.
    #[error("did not converge within {iterations} iterations")]
    DidNotConverge { iterations: usize },
}
