//! Frontier entry and ordering key types.

use ordered_float::OrderedFloat;

/// A candidate partial path waiting in the frontier.
///
/// Ordering for frontier extraction uses `(priority, depth, creation_order)`
/// where `priority = g_cost + h_cost`. Lower is better; ties broken by
/// shallower depth, then older creation order. Callers must not rely on the
/// tie order to pick between equal-cost paths.
#[derive(Debug, Clone)]
pub struct SearchNode<N> {
    /// The graph node this entry reaches.
    pub node: N,
    /// Accumulated true cost from the start.
    pub g_cost: f64,
    /// Heuristic estimate at `node` (0 in uniform-cost mode).
    pub h_cost: f64,
    /// Edges from the start (start = 0).
    pub depth: u32,
    /// Global push counter for deterministic tie-breaking.
    pub creation_order: u64,
    /// Start-to-`node` path, inclusive. Empty under parent-pointer tracking.
    pub path: Vec<N>,
}

impl<N> SearchNode<N> {
    /// Compute `priority = g_cost + h_cost` (the frontier ordering key).
    #[must_use]
    pub fn priority(&self) -> f64 {
        self.g_cost + self.h_cost
    }
}

/// The frontier ordering key: `(priority, depth, creation_order)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontierKey {
    pub priority: OrderedFloat<f64>,
    pub depth: u32,
    pub creation_order: u64,
}

impl PartialOrd for FrontierKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.priority
            .cmp(&other.priority)
            .then(self.depth.cmp(&other.depth))
            .then(self.creation_order.cmp(&other.creation_order))
    }
}

impl<N> From<&SearchNode<N>> for FrontierKey {
    fn from(node: &SearchNode<N>) -> Self {
        Self {
            priority: OrderedFloat(node.priority()),
            depth: node.depth,
            creation_order: node.creation_order,
        }
    }
}
