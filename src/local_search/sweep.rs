//! Repeated passes of a window optimizer over every anchor of a tour.
//!
//! # Algorithm
//!
//! One pass calls [`LocalOptimizer::apply`] once per tour position. Passes
//! repeat until one of them applies no improving move (the tour is then
//! locally optimal for the optimizer's window size) or the pass limit is
//! reached. Anchors are visited in index order, or in a fresh random order
//! per pass when shuffling is enabled.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::LocalOptimizer;
use crate::distance::{Distance, DistanceOracle};
use crate::error::Result;
use crate::models::Tour;

/// Configuration for [`sweep`].
///
/// Missing fields fall back to [`SweepConfig::default`] when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Upper bound on the number of passes.
    pub max_passes: usize,
    /// Visit anchors in a random order each pass.
    pub shuffle_anchors: bool,
    /// Seed for the anchor shuffle; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            max_passes: 100,
            shuffle_anchors: false,
            seed: None,
        }
    }
}

/// Outcome of a [`sweep`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Passes run.
    pub passes: usize,
    /// Improving moves applied.
    pub improvements: usize,
    /// Sum of all applied deltas.
    pub total_delta: Distance,
    /// `true` if the last pass found nothing to improve.
    pub converged: bool,
}

/// Runs `optimizer` over every anchor of `tour` until no anchor improves.
///
/// The first error aborts the sweep; moves committed before it stay
/// applied.
///
/// # Examples
///
/// ```
/// use u_kopt::distance::DistanceMatrix;
/// use u_kopt::local_search::{sweep, KOpt, SweepConfig};
/// use u_kopt::models::Tour;
///
/// let points: Vec<(f64, f64)> = (0..10).map(|i| (i as f64, 0.0)).collect();
/// let dm = DistanceMatrix::from_coordinates(&points);
/// let mut tour = Tour::new(vec![0, 2, 1, 3, 6, 5, 4, 7, 9, 8]).unwrap();
///
/// let report = sweep(&mut tour, &KOpt::three_opt(), &dm, &SweepConfig::default()).unwrap();
/// assert!(report.converged);
/// assert_eq!(tour.length(&dm).unwrap(), 18);
/// ```
pub fn sweep<L>(
    tour: &mut Tour,
    optimizer: &L,
    oracle: &dyn DistanceOracle,
    config: &SweepConfig,
) -> Result<SweepReport>
where
    L: LocalOptimizer + ?Sized,
{
    let mut anchors: Vec<usize> = (0..tour.len()).collect();
    let mut rng = config.shuffle_anchors.then(|| match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    });

    let mut report = SweepReport::default();
    while report.passes < config.max_passes {
        report.passes += 1;
        if let Some(rng) = rng.as_mut() {
            anchors.shuffle(rng);
        }

        let mut pass_improvements = 0;
        let mut pass_delta = 0;
        for &anchor in &anchors {
            let delta = optimizer.apply(tour, anchor, oracle)?;
            if delta < 0 {
                pass_improvements += 1;
                pass_delta += delta;
            }
        }
        report.improvements += pass_improvements;
        report.total_delta += pass_delta;
        debug!(
            event = "sweep_pass",
            pass = report.passes,
            window_size = optimizer.window_size(),
            improvements = pass_improvements,
            delta = pass_delta,
        );

        if pass_improvements == 0 {
            report.converged = true;
            break;
        }
    }

    info!(
        event = "sweep_end",
        window_size = optimizer.window_size(),
        passes = report.passes,
        improvements = report.improvements,
        total_delta = report.total_delta,
        converged = report.converged,
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::error::KOptError;
    use crate::local_search::{standard_family, KOpt};

    fn ring(n: usize) -> DistanceMatrix {
        // Cities on a circle; the ring order is the optimal tour
        let points: Vec<(f64, f64)> = (0..n)
            .map(|i| {
                let angle = i as f64 * std::f64::consts::TAU / n as f64;
                (1000.0 * angle.cos(), 1000.0 * angle.sin())
            })
            .collect();
        DistanceMatrix::from_coordinates(&points)
    }

    fn scrambled(n: usize, stride: usize) -> Tour {
        Tour::new((0..n).map(|i| (i * stride) % n).collect()).expect("stride is coprime with n")
    }

    #[test]
    fn test_sweep_reports_exact_total() {
        let dm = ring(12);
        let mut tour = scrambled(12, 5);
        let before = tour.length(&dm).expect("oracle succeeds");

        let report = sweep(&mut tour, &KOpt::four_opt(), &dm, &SweepConfig::default())
            .expect("sweep succeeds");
        let after = tour.length(&dm).expect("oracle succeeds");

        assert!(report.converged);
        assert!(report.improvements > 0);
        assert!(after < before);
        assert_eq!(after, before + report.total_delta);
    }

    #[test]
    fn test_converged_tour_is_stable_at_every_anchor() {
        let dm = ring(11);
        let mut tour = scrambled(11, 4);
        let engine = KOpt::five_opt();
        sweep(&mut tour, &engine, &dm, &SweepConfig::default()).expect("sweep succeeds");

        for anchor in 0..tour.len() {
            assert_eq!(engine.find_improvement(&tour, anchor, &dm), Ok(None));
        }
    }

    #[test]
    fn test_zero_passes_does_nothing() {
        let dm = ring(10);
        let mut tour = scrambled(10, 3);
        let before = tour.clone();
        let config = SweepConfig {
            max_passes: 0,
            ..SweepConfig::default()
        };

        let report = sweep(&mut tour, &KOpt::three_opt(), &dm, &config).expect("sweep succeeds");
        assert_eq!(report, SweepReport::default());
        assert_eq!(tour, before);
    }

    #[test]
    fn test_seeded_shuffle_is_reproducible() {
        let dm = ring(13);
        let config = SweepConfig {
            shuffle_anchors: true,
            seed: Some(42),
            ..SweepConfig::default()
        };

        let mut first = scrambled(13, 5);
        let mut second = first.clone();
        let a = sweep(&mut first, &KOpt::three_opt(), &dm, &config).expect("sweep succeeds");
        let b = sweep(&mut second, &KOpt::three_opt(), &dm, &config).expect("sweep succeeds");
        assert_eq!(a, b);
        assert_eq!(first, second);
    }

    #[test]
    fn test_sweep_accepts_trait_objects() {
        let dm = ring(12);
        let mut tour = scrambled(12, 7);
        let before = tour.length(&dm).expect("oracle succeeds");

        let mut total = 0;
        for optimizer in standard_family() {
            let report = sweep(&mut tour, optimizer.as_ref(), &dm, &SweepConfig::default())
                .expect("sweep succeeds");
            assert!(report.converged);
            total += report.total_delta;
        }
        assert_eq!(tour.length(&dm), Ok(before + total));
    }

    #[test]
    fn test_sweep_propagates_precondition() {
        let dm = ring(5);
        let mut tour = scrambled(5, 2);
        let err = sweep(&mut tour, &KOpt::six_opt(), &dm, &SweepConfig::default()).unwrap_err();
        assert!(matches!(err, KOptError::Precondition { tour_len: 5, window_size: 6 }));
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: SweepConfig =
            serde_json::from_str(r#"{ "shuffle_anchors": true, "seed": 7 }"#).expect("valid json");
        assert_eq!(
            config,
            SweepConfig {
                max_passes: 100,
                shuffle_anchors: true,
                seed: Some(7),
            }
        );

        let round_trip: SweepConfig =
            serde_json::from_str(&serde_json::to_string(&config).expect("serializable")).expect("valid json");
        assert_eq!(round_trip, config);
    }
}
