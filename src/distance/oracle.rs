//! Distance oracle contract.

use super::Distance;
use crate::error::OracleError;
use crate::models::CityId;

/// Supplies pairwise city distances to the k-opt engine.
///
/// Implementations are assumed symmetric (`distance(a, b) == distance(b, a)`)
/// and free of side effects. A fault is reported as an [`OracleError`] and
/// propagated to the caller of the engine unchanged.
///
/// # Examples
///
/// ```
/// use u_kopt::distance::{Distance, DistanceOracle};
/// use u_kopt::OracleError;
///
/// /// Cities on a line, one unit apart.
/// struct Line;
///
/// impl DistanceOracle for Line {
///     fn distance(&self, from: usize, to: usize) -> Result<Distance, OracleError> {
///         Ok((from as Distance - to as Distance).abs())
///     }
/// }
///
/// assert_eq!(Line.distance(2, 5), Ok(3));
/// ```
pub trait DistanceOracle {
    /// Distance between cities `from` and `to`.
    fn distance(&self, from: CityId, to: CityId) -> Result<Distance, OracleError>;
}

impl<T: DistanceOracle + ?Sized> DistanceOracle for &T {
    fn distance(&self, from: CityId, to: CityId) -> Result<Distance, OracleError> {
        (**self).distance(from, to)
    }
}
