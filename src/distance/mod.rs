//! Distances between cities.
//!
//! - [`DistanceOracle`] — the pairwise distance contract the engine consumes
//! - [`DistanceMatrix`] — dense integer matrix implementing the oracle
//! - [`DistanceCache`] — per-call table of distances among window nodes

mod cache;
mod matrix;
mod oracle;

pub use cache::DistanceCache;
pub use matrix::DistanceMatrix;
pub use oracle::DistanceOracle;

/// Integer tour length or length change. Negative deltas are improvements.
pub type Distance = i64;
