//! Cyclic tour in path representation.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::CityId;
use crate::distance::{Distance, DistanceOracle};
use crate::error::{KOptError, OracleError};

/// A TSP tour: a cyclic sequence of distinct cities.
///
/// Indices passed to [`get`](Tour::get) and [`set`](Tour::set) are taken
/// modulo the number of cities, so position `len()` is position 0 again.
///
/// # Examples
///
/// ```
/// use u_kopt::models::Tour;
///
/// let tour = Tour::new(vec![4, 2, 0, 1, 3]).unwrap();
/// assert_eq!(tour.len(), 5);
/// assert_eq!(tour.get(1), 2);
/// assert_eq!(tour.get(6), 2);
/// assert!(Tour::new(vec![1, 2, 1]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<CityId>", into = "Vec<CityId>")]
pub struct Tour {
    cities: Vec<CityId>,
}

impl Tour {
    /// Creates a tour from a city sequence.
    ///
    /// Fails with [`KOptError::InvalidTour`] if the sequence is empty or
    /// visits a city twice.
    pub fn new(cities: Vec<CityId>) -> Result<Self, KOptError> {
        if cities.is_empty() {
            return Err(KOptError::InvalidTour("tour has no cities".into()));
        }
        let mut seen = HashSet::with_capacity(cities.len());
        if let Some(dup) = cities.iter().find(|&&c| !seen.insert(c)) {
            return Err(KOptError::InvalidTour(format!("city {dup} appears twice")));
        }
        Ok(Self { cities })
    }

    /// Number of cities in the tour.
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Always `false`: a tour holds at least one city.
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// The cities in visiting order.
    pub fn cities(&self) -> &[CityId] {
        &self.cities
    }

    /// Consumes the tour, returning its city sequence.
    pub fn into_cities(self) -> Vec<CityId> {
        self.cities
    }

    /// Wraps an arbitrary index onto the tour.
    pub fn circular_index(&self, index: usize) -> usize {
        index % self.cities.len()
    }

    /// City at circular position `index`.
    pub fn get(&self, index: usize) -> CityId {
        self.cities[self.circular_index(index)]
    }

    /// Overwrites the city at circular position `index`.
    ///
    /// Callers must keep the tour a permutation; the k-opt engine only ever
    /// writes cities taken from the same window.
    pub(crate) fn set(&mut self, index: usize, city: CityId) {
        let i = self.circular_index(index);
        self.cities[i] = city;
    }

    /// Total length of the closed tour, including the edge back to the start.
    pub fn length<O>(&self, oracle: &O) -> Result<Distance, OracleError>
    where
        O: DistanceOracle + ?Sized,
    {
        let n = self.cities.len();
        let mut total = 0;
        for i in 0..n {
            total += oracle.distance(self.cities[i], self.cities[(i + 1) % n])?;
        }
        Ok(total)
    }
}

impl TryFrom<Vec<CityId>> for Tour {
    type Error = KOptError;

    fn try_from(cities: Vec<CityId>) -> Result<Self, Self::Error> {
        Self::new(cities)
    }
}

impl From<Tour> for Vec<CityId> {
    fn from(tour: Tour) -> Self {
        tour.cities
    }
}
