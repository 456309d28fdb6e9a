//! Move trees: every window rearrangement reachable by composed 2-opt moves.
//!
//! # Algorithm
//!
//! A window of k slots is framed by two fixed boundary nodes, giving k + 2
//! positions and k + 1 edges. Edge `i` joins positions `i` and `i + 1`.
//! Cutting edges `i < j` and reversing positions `i+1 ..= j` is a 2-opt move
//! whose length change is
//!
//! ```text
//! delta = d(a, c) + d(b, e) - d(a, b) - d(c, e)
//! ```
//!
//! where `a, b, c, e` are the nodes at positions `i, i+1, j, j+1`.
//!
//! Starting from the identity arrangement, arrangements are expanded
//! breadth-first. A child whose arrangement was already visited is dropped
//! without being recorded or expanded, so every arrangement is reached by
//! exactly one shortest sequence of moves: the first one found in
//! `(i, j)`-lexicographic, FIFO order. Nodes are stored in discovery order,
//! which makes the arena order the BFS order and guarantees that a parent
//! always precedes its children.
//!
//! Formulas are symbolic over window positions (the original label of each
//! node), so one tree serves every tour and is built at most once per k for
//! the lifetime of the process.
//!
//! # Complexity
//!
//! Contiguous reversals include adjacent swaps, so all k! arrangements are
//! reachable and the tree holds k! nodes. Building costs O(k! · k³);
//! evaluating costs O(k!) per call.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use std::collections::HashSet;
use std::sync::OnceLock;

use tracing::debug;

use crate::distance::{Distance, DistanceCache};
use crate::error::KOptError;

/// Largest window size a move tree can be built for.
///
/// Trees grow as k!, so anything above this is rejected.
pub const MAX_WINDOW_SIZE: usize = 8;

#[allow(clippy::declare_interior_mutable_const)]
const UNBUILT: OnceLock<MoveTree> = OnceLock::new();

static TREES: [OnceLock<MoveTree>; MAX_WINDOW_SIZE + 1] = [UNBUILT; MAX_WINDOW_SIZE + 1];

/// An undirected edge between two window positions, stored low end first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge(pub usize, pub usize);

impl Edge {
    /// Creates the edge `{a, b}` in normalized order.
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }

    /// Cached distance of this edge.
    pub fn distance(&self, cache: &DistanceCache) -> Distance {
        cache.get(self.0, self.1)
    }

    /// `true` if the edge joins two neighbors of the identity arrangement.
    fn is_identity(&self) -> bool {
        self.1 == self.0 + 1
    }
}

/// What a slot holds after a rearrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotAssignment {
    /// The slot keeps its own city.
    Unchanged,
    /// The slot receives the city originally at this window position.
    TakeFrom(usize),
}

/// The single 2-opt move leading from a node's parent to the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TwoOptStep {
    /// Lower cut edge index.
    pub first_cut: usize,
    /// Upper cut edge index.
    pub second_cut: usize,
    /// Edges created by the move.
    pub added: [Edge; 2],
    /// Edges broken by the move.
    pub removed: [Edge; 2],
}

impl TwoOptStep {
    /// Length change of this move alone.
    pub fn delta(&self, cache: &DistanceCache) -> Distance {
        self.added[0].distance(cache) + self.added[1].distance(cache)
            - self.removed[0].distance(cache)
            - self.removed[1].distance(cache)
    }
}

/// Cumulative length change of an arrangement relative to identity.
///
/// Edges common to both arrangements cancel out, so `added` and `removed`
/// are disjoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeltaFormula {
    added: Vec<Edge>,
    removed: Vec<Edge>,
}

impl DeltaFormula {
    /// Formula taking the identity path over `order.len()` positions to the
    /// path visiting positions in `order`.
    fn for_order(order: &[usize]) -> Self {
        let edges: Vec<Edge> = order.windows(2).map(|w| Edge::new(w[0], w[1])).collect();
        let added = edges.iter().copied().filter(|e| !e.is_identity()).collect();
        let removed = (1..order.len())
            .map(|p| Edge(p - 1, p))
            .filter(|e| !edges.contains(e))
            .collect();
        Self { added, removed }
    }

    /// Edges whose distances are added.
    pub fn added(&self) -> &[Edge] {
        &self.added
    }

    /// Edges whose distances are subtracted.
    pub fn removed(&self) -> &[Edge] {
        &self.removed
    }

    /// Evaluates the formula against real distances.
    pub fn evaluate(&self, cache: &DistanceCache) -> Distance {
        let plus: Distance = self.added.iter().map(|e| e.distance(cache)).sum();
        let minus: Distance = self.removed.iter().map(|e| e.distance(cache)).sum();
        plus - minus
    }
}

/// One reachable arrangement of the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveNode {
    order: Vec<usize>,
    slots: Vec<SlotAssignment>,
    step: Option<TwoOptStep>,
    formula: DeltaFormula,
    parent: Option<usize>,
    depth: usize,
    children: Vec<usize>,
}

impl MoveNode {
    fn new(order: Vec<usize>, step: Option<TwoOptStep>, parent: Option<usize>, depth: usize) -> Self {
        let last = order.len() - 1;
        let slots = (1..last)
            .map(|slot| match order[slot] {
                source if source == slot => SlotAssignment::Unchanged,
                source => SlotAssignment::TakeFrom(source),
            })
            .collect();
        let formula = DeltaFormula::for_order(&order);
        Self {
            order,
            slots,
            step,
            formula,
            parent,
            depth,
            children: Vec::new(),
        }
    }

    /// Original window position now visited at each position, boundaries
    /// included.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Original window position now held by slots 1 ..= k.
    pub fn arrangement(&self) -> &[usize] {
        &self.order[1..self.order.len() - 1]
    }

    /// Per-slot rewrite instructions for slots 1 ..= k.
    pub fn slots(&self) -> &[SlotAssignment] {
        &self.slots
    }

    /// The move from the parent; `None` for the root.
    pub fn step(&self) -> Option<&TwoOptStep> {
        self.step.as_ref()
    }

    /// Cumulative formula relative to identity.
    pub fn formula(&self) -> &DeltaFormula {
        &self.formula
    }

    /// Arena index of the parent; `None` for the root.
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    /// Number of 2-opt moves from identity.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Arena indices of the children.
    pub fn children(&self) -> &[usize] {
        &self.children
    }
}

/// The arena of all arrangements reachable for one window size.
///
/// # Examples
///
/// ```
/// use u_kopt::local_search::MoveTree;
///
/// let tree = MoveTree::for_window_size(3).unwrap();
/// assert_eq!(tree.len(), 6);
/// assert_eq!(tree.nodes()[1].arrangement(), &[2, 1, 3]);
/// assert_eq!(tree.max_depth(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveTree {
    window_size: usize,
    nodes: Vec<MoveNode>,
}

impl MoveTree {
    /// Builds the tree for `window_size` slots from scratch.
    ///
    /// Prefer [`MoveTree::for_window_size`], which builds each tree once.
    /// A window size below 2 yields only the root.
    pub fn build(window_size: usize) -> Self {
        let positions = window_size + 2;
        let identity: Vec<usize> = (0..positions).collect();
        let mut visited: HashSet<Vec<usize>> = HashSet::new();
        visited.insert(identity.clone());
        let mut nodes = vec![MoveNode::new(identity, None, None, 0)];

        let mut cursor = 0;
        while cursor < nodes.len() {
            let order = nodes[cursor].order.clone();
            let depth = nodes[cursor].depth + 1;
            for i in 0..window_size.saturating_sub(1) {
                for j in (i + 2)..=window_size {
                    let mut child = order.clone();
                    child[i + 1..=j].reverse();
                    if visited.contains(&child) {
                        continue;
                    }
                    visited.insert(child.clone());

                    let step = TwoOptStep {
                        first_cut: i,
                        second_cut: j,
                        added: [Edge::new(order[i], order[j]), Edge::new(order[i + 1], order[j + 1])],
                        removed: [Edge::new(order[i], order[i + 1]), Edge::new(order[j], order[j + 1])],
                    };
                    let id = nodes.len();
                    nodes[cursor].children.push(id);
                    nodes.push(MoveNode::new(child, Some(step), Some(cursor), depth));
                }
            }
            cursor += 1;
        }

        let tree = Self { window_size, nodes };
        debug!(
            event = "move_tree_built",
            window_size,
            nodes = tree.len(),
            max_depth = tree.max_depth(),
        );
        tree
    }

    /// Returns the shared tree for `window_size`, building it on first use.
    ///
    /// Construction happens at most once per window size; concurrent callers
    /// block until it completes and then share the same immutable tree.
    pub fn for_window_size(window_size: usize) -> Result<&'static MoveTree, KOptError> {
        if window_size > MAX_WINDOW_SIZE {
            return Err(KOptError::Configuration {
                window_size,
                max: MAX_WINDOW_SIZE,
            });
        }
        Ok(Self::shared(window_size))
    }

    /// Shared tree for a window size known to be at most [`MAX_WINDOW_SIZE`].
    pub(crate) fn shared(window_size: usize) -> &'static MoveTree {
        TREES[window_size].get_or_init(|| Self::build(window_size))
    }

    /// Number of slots k.
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// All nodes in BFS discovery order; index 0 is the identity.
    pub fn nodes(&self) -> &[MoveNode] {
        &self.nodes
    }

    /// The identity arrangement.
    pub fn root(&self) -> &MoveNode {
        &self.nodes[0]
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: the root is always present.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of non-identity arrangements.
    pub fn move_count(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Largest number of 2-opt moves needed to reach any arrangement.
    pub fn max_depth(&self) -> usize {
        self.nodes.iter().map(MoveNode::depth).max().unwrap_or(0)
    }

    /// Length change of every node against `cache`, in arena order.
    ///
    /// Each node adds its own step to its parent's already evaluated delta;
    /// the root is 0.
    pub fn evaluate(&self, cache: &DistanceCache) -> Vec<Distance> {
        let mut deltas: Vec<Distance> = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let delta = match (node.parent, &node.step) {
                (Some(parent), Some(step)) => deltas[parent] + step.delta(cache),
                _ => 0,
            };
            deltas.push(delta);
        }
        deltas
    }
}
