//! Schedule resolution error types.

use engine_core::DateError;
use thiserror::Error;

/// Errors that can occur while resolving a payment schedule.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// The leg's schedule text could not be resolved to a month interval.
    ///
    /// A missing schedule defaults to quarterly; a present but
    /// unrecognisable one is a hard failure, never a silent default.
    #[error("Invalid schedule format: {input}")]
    InvalidScheduleFormat {
        /// The rejected schedule text.
        input: String,
    },

    /// A schedule interval of zero months would never advance.
    #[error("Schedule interval must be at least one month: {input}")]
    ZeroInterval {
        /// The rejected schedule text.
        input: String,
    },

    /// Date arithmetic failed while rolling payment dates forward.
    #[error("Date arithmetic failed: {0}")]
    Date(#[from] DateError),
}
