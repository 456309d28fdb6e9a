//! Domain model types for k-opt local search.
//!
//! - [`Tour`] — Cyclic path representation of a TSP solution
//! - [`Window`] — k consecutive cities plus their two boundary cities

mod tour;
mod window;

pub use tour::Tour;
pub use window::{extract_window, Window};

/// City identifier as used by tours and distance oracles.
pub type CityId = usize;
