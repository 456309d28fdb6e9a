//! Uniform interface over the k-opt family.

use super::KOpt;
use crate::distance::{Distance, DistanceOracle};
use crate::error::Result;
use crate::models::Tour;

/// A window-based local optimizer that an outer search loop can invoke
/// without knowing its window size.
///
/// Implementations rewrite at most the window after `anchor` and return
/// the tour-length change (≤ 0).
///
/// # Examples
///
/// ```
/// use u_kopt::distance::DistanceMatrix;
/// use u_kopt::local_search::{standard_family, LocalOptimizer};
/// use u_kopt::models::Tour;
///
/// let points: Vec<(f64, f64)> = (0..8).map(|i| (i as f64, 0.0)).collect();
/// let dm = DistanceMatrix::from_coordinates(&points);
/// let mut tour = Tour::new(vec![0, 1, 2, 6, 5, 4, 3, 7]).unwrap();
///
/// let family = standard_family();
/// assert_eq!(family.iter().map(|o| o.window_size()).collect::<Vec<_>>(), vec![2, 3, 4, 5, 6]);
///
/// let total: i64 = family
///     .iter()
///     .map(|o| o.apply(&mut tour, 7, &dm).unwrap())
///     .sum();
/// assert_eq!(total, -6);
/// ```
pub trait LocalOptimizer: Send + Sync {
    /// Number of cities the optimizer may rearrange per call.
    fn window_size(&self) -> usize;

    /// Improves the window after `anchor` in place, returning the change in
    /// tour length.
    fn apply(&self, tour: &mut Tour, anchor: usize, oracle: &dyn DistanceOracle) -> Result<Distance>;
}

impl LocalOptimizer for KOpt {
    fn window_size(&self) -> usize {
        KOpt::window_size(self)
    }

    fn apply(&self, tour: &mut Tour, anchor: usize, oracle: &dyn DistanceOracle) -> Result<Distance> {
        KOpt::apply(self, tour, anchor, oracle)
    }
}

/// The 2-opt through 6-opt engines, smallest window first.
pub fn standard_family() -> Vec<Box<dyn LocalOptimizer>> {
    vec![
        Box::new(KOpt::two_opt()),
        Box::new(KOpt::three_opt()),
        Box::new(KOpt::four_opt()),
        Box::new(KOpt::five_opt()),
        Box::new(KOpt::six_opt()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;

    #[test]
    fn test_trait_object_matches_engine() {
        let dm = DistanceMatrix::from_coordinates(&[
            (0.0, 0.0),
            (4.0, 0.0),
            (1.0, 0.0),
            (3.0, 0.0),
            (2.0, 0.0),
            (5.0, 0.0),
        ]);
        let original = Tour::new(vec![0, 1, 2, 3, 4, 5]).expect("valid tour");

        let engine = KOpt::four_opt();
        let boxed: Box<dyn LocalOptimizer> = Box::new(engine);
        assert_eq!(boxed.window_size(), 4);

        let mut direct = original.clone();
        let mut dynamic = original;
        let expected = engine.apply(&mut direct, 5, &dm).expect("apply succeeds");
        let actual = boxed.apply(&mut dynamic, 5, &dm).expect("apply succeeds");
        assert_eq!(actual, expected);
        assert_eq!(dynamic, direct);
        assert_eq!(direct.cities(), &[0, 2, 4, 3, 1, 5]);
    }
}
