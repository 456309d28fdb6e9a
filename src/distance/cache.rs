//! Per-call distance cache over a window.

use super::{Distance, DistanceOracle};
use crate::error::OracleError;
use crate::models::Window;

/// Read-only table of the pairwise distances among the nodes of one
/// [`Window`], indexed by window position (0 = boundary before the span,
/// `k + 1` = boundary after it).
///
/// Built with exactly C(k+2, 2) oracle queries; never mutated afterwards.
///
/// # Examples
///
/// ```
/// use u_kopt::distance::{DistanceCache, DistanceMatrix};
/// use u_kopt::models::{extract_window, Tour};
///
/// let dm = DistanceMatrix::from_coordinates(&[(0.0, 0.0), (3.0, 4.0), (6.0, 8.0), (9.0, 12.0)]);
/// let tour = Tour::new(vec![0, 1, 2, 3]).unwrap();
/// let window = extract_window(&tour, 3, 2).unwrap();
/// let cache = DistanceCache::build(&window, &dm).unwrap();
/// assert_eq!(cache.get(0, 3), 15);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceCache {
    data: Vec<Distance>,
    size: usize,
}

impl DistanceCache {
    /// Queries `oracle` once per unordered pair of window nodes.
    ///
    /// The first oracle fault aborts construction and is returned as is.
    pub fn build<O>(window: &Window, oracle: &O) -> Result<Self, OracleError>
    where
        O: DistanceOracle + ?Sized,
    {
        let nodes = window.nodes();
        let size = nodes.len();
        let mut data = vec![0; size * size];
        for i in 0..size {
            for j in (i + 1)..size {
                let d = oracle.distance(nodes[i], nodes[j])?;
                data[i * size + j] = d;
                data[j * size + i] = d;
            }
        }
        Ok(Self { data, size })
    }

    /// Distance between the nodes at window positions `a` and `b`.
    ///
    /// # Panics
    ///
    /// Panics if either position is outside the window.
    pub fn get(&self, a: usize, b: usize) -> Distance {
        self.data[a * self.size + b]
    }

    /// Number of window positions covered (k + 2).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Length of the path visiting window positions in `order`.
    pub fn path_length(&self, order: &[usize]) -> Distance {
        order.windows(2).map(|w| self.get(w[0], w[1])).sum()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::models::{extract_window, CityId, Tour};

    struct CountingOracle {
        inner: DistanceMatrix,
        calls: Cell<usize>,
    }

    impl DistanceOracle for CountingOracle {
        fn distance(&self, from: CityId, to: CityId) -> Result<Distance, OracleError> {
            self.calls.set(self.calls.get() + 1);
            self.inner.distance(from, to)
        }
    }

    fn line_matrix(n: usize) -> DistanceMatrix {
        let points: Vec<(f64, f64)> = (0..n).map(|i| (i as f64, 0.0)).collect();
        DistanceMatrix::from_coordinates(&points)
    }

    #[test]
    fn test_build_queries_each_pair_once() {
        let oracle = CountingOracle {
            inner: line_matrix(10),
            calls: Cell::new(0),
        };
        let tour = Tour::new((0..10).collect()).expect("valid tour");
        let window = extract_window(&tour, 0, 6).expect("window fits");
        let cache = DistanceCache::build(&window, &oracle).expect("oracle succeeds");

        // C(8, 2)
        assert_eq!(oracle.calls.get(), 28);
        assert_eq!(cache.size(), 8);
    }

    #[test]
    fn test_cache_is_keyed_by_window_position() {
        let dm = line_matrix(10);
        let tour = Tour::new(vec![9, 3, 7, 1, 0, 2, 4, 5, 6, 8]).expect("valid tour");
        // anchor 0: window starts at tour index 1 -> [3, 7, 1, 0]
        let window = extract_window(&tour, 0, 2).expect("window fits");
        let cache = DistanceCache::build(&window, &dm).expect("oracle succeeds");

        assert_eq!(cache.get(0, 1), 4);
        assert_eq!(cache.get(1, 0), 4);
        assert_eq!(cache.get(1, 2), 6);
        assert_eq!(cache.get(2, 2), 0);
        assert_eq!(cache.path_length(&[0, 1, 2, 3]), 4 + 6 + 1);
    }

    #[test]
    fn test_build_propagates_oracle_fault() {
        let dm = line_matrix(4);
        let tour = Tour::new(vec![0, 1, 2, 3, 99]).expect("valid tour");
        let window = extract_window(&tour, 0, 2).expect("window fits");
        let err = DistanceCache::build(&window, &dm).unwrap_err();
        assert_eq!(err.to, 99);
    }
}
