//! Window extraction.

use super::{CityId, Tour};
use crate::error::KOptError;

/// The cities `[before_start, w_1, .., w_k, after_end]` around an anchor.
///
/// Window position `p` (0 ..= k + 1) lives at tour index
/// `anchor + 1 + p` modulo the tour length. Positions 1 ..= k are the
/// *slots* the engine may rearrange; positions 0 and k + 1 are boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    anchor: usize,
    tour_len: usize,
    nodes: Vec<CityId>,
}

impl Window {
    /// All k + 2 cities, boundaries included.
    pub fn nodes(&self) -> &[CityId] {
        &self.nodes
    }

    /// Number of rearrangeable slots (k).
    pub fn window_size(&self) -> usize {
        self.nodes.len() - 2
    }

    /// The anchor, reduced modulo the tour length.
    pub fn anchor(&self) -> usize {
        self.anchor
    }

    /// City immediately before the first slot.
    pub fn before_start(&self) -> CityId {
        self.nodes[0]
    }

    /// City immediately after the last slot.
    pub fn after_end(&self) -> CityId {
        self.nodes[self.nodes.len() - 1]
    }

    /// City at window position `position`.
    pub fn node(&self, position: usize) -> CityId {
        self.nodes[position]
    }

    /// Tour index holding window position `position`.
    pub fn tour_index(&self, position: usize) -> usize {
        (self.anchor + 1 + position) % self.tour_len
    }
}

/// Extracts the window of `window_size` slots that follows `anchor`.
///
/// Fails with [`KOptError::Precondition`] if the tour has fewer than
/// `window_size + 2` cities, since the window positions would overlap.
///
/// # Examples
///
/// ```
/// use u_kopt::models::{extract_window, Tour};
///
/// let tour = Tour::new(vec![0, 1, 2, 3, 4, 5]).unwrap();
/// let window = extract_window(&tour, 4, 3).unwrap();
/// assert_eq!(window.nodes(), &[5, 0, 1, 2, 3]);
/// assert_eq!(window.before_start(), 5);
/// assert_eq!(window.after_end(), 3);
/// ```
pub fn extract_window(tour: &Tour, anchor: usize, window_size: usize) -> Result<Window, KOptError> {
    let tour_len = tour.len();
    if tour_len < window_size + 2 {
        return Err(KOptError::Precondition {
            tour_len,
            window_size,
        });
    }
    let anchor = tour.circular_index(anchor);
    let nodes = (1..=window_size + 2).map(|offset| tour.get(anchor + offset)).collect();
    Ok(Window {
        anchor,
        tour_len,
        nodes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_window_basic() {
        let tour = Tour::new((0..10).collect()).expect("valid tour");
        let window = extract_window(&tour, 2, 4).expect("window fits");
        assert_eq!(window.nodes(), &[3, 4, 5, 6, 7, 8]);
        assert_eq!(window.window_size(), 4);
        assert_eq!(window.node(1), 4);
        assert_eq!(window.tour_index(0), 3);
        assert_eq!(window.tour_index(5), 8);
    }

    #[test]
    fn test_extract_window_wraps_exact_fit() {
        // N = k + 2 still yields k + 2 distinct cities
        let tour = Tour::new(vec![10, 11, 12, 13, 14, 15, 16, 17]).expect("valid tour");
        let window = extract_window(&tour, 3, 6).expect("window fits");
        assert_eq!(window.nodes(), &[14, 15, 16, 17, 10, 11, 12, 13]);
        assert_eq!(window.tour_index(7), 3);
    }

    #[test]
    fn test_extract_window_large_anchor() {
        let tour = Tour::new((0..5).collect()).expect("valid tour");
        let window = extract_window(&tour, 12, 2).expect("window fits");
        assert_eq!(window.anchor(), 2);
        assert_eq!(window.nodes(), &[3, 4, 0, 1]);
    }

    #[test]
    fn test_extract_window_too_short() {
        let tour = Tour::new((0..7).collect()).expect("valid tour");
        let err = extract_window(&tour, 0, 6).unwrap_err();
        assert_eq!(
            err,
            KOptError::Precondition {
                tour_len: 7,
                window_size: 6
            }
        );
    }
}
