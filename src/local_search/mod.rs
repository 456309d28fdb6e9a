//! Window-based local search operators for TSP tours.
//!
//! - [`move_tree`] — Arrangements reachable by composed 2-opt moves, built once per window size
//! - [`KOpt`] — Exhaustive k-opt over a window of k consecutive cities
//! - [`LocalOptimizer`] — Uniform interface over the k-opt family
//! - [`sweep`] — Repeated passes over every anchor until convergence

mod k_opt;
pub mod move_tree;
mod optimizer;
mod sweep;

pub use k_opt::{Improvement, KOpt};
pub use move_tree::{MoveTree, SlotAssignment, MAX_WINDOW_SIZE};
pub use optimizer::{standard_family, LocalOptimizer};
pub use sweep::{sweep, SweepConfig, SweepReport};
