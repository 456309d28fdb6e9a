//! # u-kopt
//!
//! Bounded-window k-opt local search for the Traveling Salesman Problem.
//! For a window of k consecutive cities, every arrangement reachable by
//! composed 2-opt moves is enumerated once per k into a move tree, then
//! evaluated against cached window distances to find and apply the best
//! strictly improving rearrangement in place.
//!
//! ## Modules
//!
//! - [`models`] — Tour (path representation) and window extraction
//! - [`distance`] — Distance oracle contract, dense matrix, per-window cache
//! - [`local_search`] — Move trees, the k-opt engine, and anchor sweeps
//! - [`error`] — Error taxonomy
//!
//! ## Example
//!
//! ```
//! use u_kopt::distance::DistanceMatrix;
//! use u_kopt::local_search::KOpt;
//! use u_kopt::models::Tour;
//!
//! let points: Vec<(f64, f64)> = (0..8).map(|i| (i as f64, 0.0)).collect();
//! let dm = DistanceMatrix::from_coordinates(&points);
//! let mut tour = Tour::new(vec![0, 6, 5, 4, 3, 2, 1, 7]).unwrap();
//!
//! let delta = KOpt::six_opt().apply(&mut tour, 7, &dm).unwrap();
//! assert_eq!(delta, -10);
//! assert_eq!(tour.cities(), &[0, 1, 2, 3, 4, 5, 6, 7]);
//! ```

pub mod distance;
pub mod error;
pub mod local_search;
pub mod models;

pub use error::{KOptError, OracleError, Result};
