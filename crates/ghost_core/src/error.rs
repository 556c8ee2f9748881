//! Scheduler errors

use thiserror::Error;

/// Failures of a single scheduler operation.
///
/// None of these are retried internally; the caller decides whether to skip
/// the operation or abort the run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchedulerError {
    /// `rotate` was called with nobody waiting in the rotation queue
    #[error("no team waiting in the rotation queue (step {step})")]
    EmptyRotation { step: u64 },

    /// `compute_rating_delta` was called before any team registered
    #[error("no team registered, baseline rating unavailable")]
    NoBaselineAvailable,

    /// Match outcome outside the closed interval [0, 1]
    #[error("match outcome {0} is outside [0, 1]")]
    OutcomeOutOfRange(f64),
}
