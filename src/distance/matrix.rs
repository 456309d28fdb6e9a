//! Dense integer distance matrix.

use super::{Distance, DistanceOracle};
use crate::error::OracleError;
use crate::models::CityId;

/// A dense n×n integer distance matrix stored in row-major order.
///
/// Supports rounded Euclidean distances computed from planar coordinates
/// and explicit distance specification.
///
/// # Examples
///
/// ```
/// use u_kopt::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_coordinates(&[(0.0, 0.0), (3.0, 4.0), (6.0, 8.0)]);
/// assert_eq!(dm.get(0, 1), 5);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    data: Vec<Distance>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0; size * size],
            size,
        }
    }

    /// Computes a Euclidean distance matrix from `(x, y)` coordinates,
    /// rounding each distance to the nearest integer.
    pub fn from_coordinates(points: &[(f64, f64)]) -> Self {
        let n = points.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let (dx, dy) = (points[i].0 - points[j].0, points[i].1 - points[j].1);
                let d = (dx * dx + dy * dy).sqrt().round() as Distance;
                dm.set_symmetric(i, j, d);
            }
        }
        dm
    }

    /// Creates a distance matrix from an explicit n×n grid.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<Distance>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> Distance {
        self.data[from * self.size + to]
    }

    /// Sets the distance from location `from` to location `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: Distance) {
        self.data[from * self.size + to] = distance;
    }

    /// Sets both `from → to` and `to → from`.
    pub fn set_symmetric(&mut self, from: usize, to: usize, distance: Distance) {
        self.set(from, to, distance);
        self.set(to, from, distance);
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if `d(i, j) == d(j, i)` for every pair.
    pub fn is_symmetric(&self) -> bool {
        (0..self.size).all(|i| ((i + 1)..self.size).all(|j| self.get(i, j) == self.get(j, i)))
    }
}

impl DistanceOracle for DistanceMatrix {
    fn distance(&self, from: CityId, to: CityId) -> Result<Distance, OracleError> {
        if from >= self.size || to >= self.size {
            return Err(OracleError::new(
                from,
                to,
                format!("city outside a {}-city matrix", self.size),
            ));
        }
        Ok(self.get(from, to))
    }
}
