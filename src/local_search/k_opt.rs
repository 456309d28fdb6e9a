//! Bounded-window k-opt improvement.
//!
//! # Algorithm
//!
//! For an anchor index, take the k cities after it plus their two boundary
//! neighbors, cache the C(k+2, 2) distances among them, and evaluate every
//! arrangement in the [`MoveTree`] for k. Each node's delta is its parent's
//! delta plus the delta of one 2-opt step:
//!
//! ```text
//! delta(node) = delta(parent) + d(added_1) + d(added_2) - d(removed_1) - d(removed_2)
//! ```
//!
//! The smallest strictly negative delta wins (first in BFS order on ties)
//! and only the slots whose city changes are written back to the tour.
//!
//! # Complexity
//!
//! O(k²) oracle calls plus O(k!) additions per call, independent of the
//! tour length.

use tracing::{trace, warn};

use super::move_tree::{MoveTree, SlotAssignment};
use crate::distance::{Distance, DistanceCache, DistanceOracle};
use crate::error::Result;
use crate::models::{extract_window, Tour};

/// The best arrangement found for one window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Improvement {
    /// Arena index of the winning node in the engine's [`MoveTree`].
    pub node: usize,
    /// Tour-length change of applying it; always negative.
    pub delta: Distance,
}

/// Exhaustive k-opt move engine over a window of k consecutive cities.
///
/// # Examples
///
/// ```
/// use u_kopt::distance::DistanceMatrix;
/// use u_kopt::local_search::KOpt;
/// use u_kopt::models::Tour;
///
/// // Cities on a line, with 1 and 3 swapped in the tour
/// let points: Vec<(f64, f64)> = (0..6).map(|i| (i as f64, 0.0)).collect();
/// let dm = DistanceMatrix::from_coordinates(&points);
/// let mut tour = Tour::new(vec![0, 3, 2, 1, 4, 5]).unwrap();
///
/// let engine = KOpt::three_opt();
/// let delta = engine.apply(&mut tour, 5, &dm).unwrap();
/// assert_eq!(delta, -4);
/// assert_eq!(tour.cities(), &[0, 1, 2, 3, 4, 5]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct KOpt {
    tree: &'static MoveTree,
}

impl KOpt {
    /// Creates an engine for windows of `window_size` cities.
    ///
    /// Window sizes below 2 give a valid engine with no moves; sizes above
    /// [`MAX_WINDOW_SIZE`](super::MAX_WINDOW_SIZE) are rejected with
    /// [`KOptError::Configuration`](crate::KOptError::Configuration).
    pub fn new(window_size: usize) -> Result<Self> {
        let tree = MoveTree::for_window_size(window_size)?;
        if tree.move_count() == 0 {
            warn!(
                event = "degenerate_window",
                window_size, "window has no 2-opt moves, engine is a no-op"
            );
        }
        Ok(Self { tree })
    }

    /// 2-opt over a window of two cities.
    pub fn two_opt() -> Self {
        Self::supported(2)
    }

    /// 3-opt over a window of three cities.
    pub fn three_opt() -> Self {
        Self::supported(3)
    }

    /// 4-opt over a window of four cities.
    pub fn four_opt() -> Self {
        Self::supported(4)
    }

    /// 5-opt over a window of five cities.
    pub fn five_opt() -> Self {
        Self::supported(5)
    }

    /// 6-opt over a window of six cities.
    pub fn six_opt() -> Self {
        Self::supported(6)
    }

    fn supported(window_size: usize) -> Self {
        Self {
            tree: MoveTree::shared(window_size),
        }
    }

    /// Number of rearrangeable cities k.
    pub fn window_size(&self) -> usize {
        self.tree.window_size()
    }

    /// The shared move tree this engine evaluates.
    pub fn tree(&self) -> &'static MoveTree {
        self.tree
    }

    /// Finds the best improving arrangement of the window after `anchor`
    /// without modifying the tour.
    ///
    /// Returns `Ok(None)` if no arrangement is strictly shorter.
    pub fn find_improvement<O>(&self, tour: &Tour, anchor: usize, oracle: &O) -> Result<Option<Improvement>>
    where
        O: DistanceOracle + ?Sized,
    {
        if self.tree.move_count() == 0 {
            return Ok(None);
        }
        let window = extract_window(tour, anchor, self.window_size())?;
        let cache = DistanceCache::build(&window, oracle)?;
        Ok(self.best_of(&cache))
    }

    /// Applies the best improving arrangement of the window after `anchor`.
    ///
    /// Returns the tour-length change: negative if the tour was rewritten,
    /// 0 if the window is already k-opt stable (the tour is then untouched).
    /// The tour is written only after every arrangement has been evaluated,
    /// so an error never leaves a partial rearrangement behind.
    pub fn apply<O>(&self, tour: &mut Tour, anchor: usize, oracle: &O) -> Result<Distance>
    where
        O: DistanceOracle + ?Sized,
    {
        if self.tree.move_count() == 0 {
            return Ok(0);
        }
        let window = extract_window(tour, anchor, self.window_size())?;
        let cache = DistanceCache::build(&window, oracle)?;
        let Some(best) = self.best_of(&cache) else {
            return Ok(0);
        };

        let node = &self.tree.nodes()[best.node];
        for (offset, slot) in node.slots().iter().enumerate() {
            if let SlotAssignment::TakeFrom(source) = *slot {
                tour.set(window.tour_index(offset + 1), window.node(source));
            }
        }
        trace!(
            event = "kopt_applied",
            window_size = self.window_size(),
            anchor = window.anchor(),
            delta = best.delta,
            depth = node.depth(),
        );
        Ok(best.delta)
    }

    fn best_of(&self, cache: &DistanceCache) -> Option<Improvement> {
        let mut best: Option<Improvement> = None;
        let mut best_delta = 0;
        for (node, delta) in self.tree.evaluate(cache).into_iter().enumerate().skip(1) {
            if delta < best_delta {
                best_delta = delta;
                best = Some(Improvement { node, delta });
            }
        }
        best
    }
}
