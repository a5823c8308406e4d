//! Error type shared by every fallible operation in the crate.

use thiserror::Error as ThisError;

/// Failure modes of a run.
///
/// Both kinds are raised before the first annealing iteration. Once a run
/// has started it always produces a result.
#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum Error {
    /// A precondition on the inputs or the schedule is violated.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A tour is not a permutation of the point indices.
    #[error("invalid tour: {0}")]
    InvalidTour(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn invalid_tour(message: impl Into<String>) -> Self {
        Self::InvalidTour(message.into())
    }

    /// Returns `true` for [`Error::Configuration`].
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// Returns `true` for [`Error::InvalidTour`].
    pub fn is_invalid_tour(&self) -> bool {
        matches!(self, Self::InvalidTour(_))
    }
}
