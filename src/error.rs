//! Error types for k-opt local search.

use thiserror::Error;

use crate::models::CityId;

/// A fault reported by a [`DistanceOracle`](crate::distance::DistanceOracle).
///
/// The engine propagates it unchanged; it never retries or substitutes a
/// distance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("distance oracle failed for ({from}, {to}): {message}")]
pub struct OracleError {
    /// First city of the queried pair.
    pub from: CityId,
    /// Second city of the queried pair.
    pub to: CityId,
    /// Human-readable cause.
    pub message: String,
}

impl OracleError {
    /// Creates a new oracle error for the pair `(from, to)`.
    pub fn new(from: CityId, to: CityId, message: impl Into<String>) -> Self {
        Self {
            from,
            to,
            message: message.into(),
        }
    }
}

/// Main error type for k-opt operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KOptError {
    /// The tour cannot hold a window of `window_size` cities plus its two
    /// boundary cities.
    #[error(
        "tour of {tour_len} cities is too short for a {window_size}-opt window (needs at least {})",
        .window_size + 2
    )]
    Precondition {
        /// Number of cities in the tour.
        tour_len: usize,
        /// Window size k of the engine.
        window_size: usize,
    },

    /// The window size is above what a move tree can be built for.
    #[error("unsupported window size {window_size} (maximum is {max})")]
    Configuration {
        /// Requested window size.
        window_size: usize,
        /// Largest supported window size.
        max: usize,
    },

    /// The distance oracle faulted while the window was being cached.
    #[error(transparent)]
    Oracle(#[from] OracleError),

    /// A tour was constructed from an invalid city sequence.
    #[error("invalid tour: {0}")]
    InvalidTour(String),
}

/// Result type alias for k-opt operations.
pub type Result<T> = std::result::Result<T, KOptError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precondition_message() {
        let err = KOptError::Precondition {
            tour_len: 5,
            window_size: 6,
        };
        assert_eq!(
            err.to_string(),
            "tour of 5 cities is too short for a 6-opt window (needs at least 8)"
        );
    }

    #[test]
    fn test_oracle_error_converts() {
        let err: KOptError = OracleError::new(3, 7, "no route").into();
        assert_eq!(err.to_string(), "distance oracle failed for (3, 7): no route");
        assert!(matches!(err, KOptError::Oracle(ref e) if e.from == 3 && e.to == 7));
    }
}
