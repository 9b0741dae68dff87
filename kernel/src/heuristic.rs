//! Remaining-cost estimates for heuristic-guided search.
//!
//! The kernel assumes but never enforces admissibility and consistency.
//! [`admissibility_violations`] and [`consistency_violations`] exist so
//! callers and tests can check a table before trusting an optimality claim.

use std::collections::{BTreeMap, BTreeSet};

use crate::cost::format_cost;
use crate::graph::{Graph, NodeId};
use crate::proof::canon::{canonical_json_bytes, CanonError};
use crate::proof::hash::{canonical_hash, ContentHash, HashDomain};

/// Per-node estimate of the remaining cost to the goal.
///
/// `None` means the heuristic has no entry for the node. Searches treat that
/// as a configuration defect and fail fast instead of defaulting to zero.
/// `Some(f64::INFINITY)` is a valid estimate: the node is deprioritized.
pub trait Heuristic<N>: Send + Sync {
    /// Estimate the cost from `node` to the goal.
    fn estimate(&self, node: &N) -> Option<f64>;
}

/// Explicit lookup table of estimates.
#[derive(Debug, Clone, PartialEq)]
pub struct HeuristicTable<N: Ord> {
    estimates: BTreeMap<N, f64>,
}

impl<N: NodeId> HeuristicTable<N> {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            estimates: BTreeMap::new(),
        }
    }

    /// Set (or replace) the estimate for `node`.
    pub fn insert(&mut self, node: N, estimate: f64) {
        self.estimates.insert(node, estimate);
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.estimates.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.estimates.is_empty()
    }

    /// Known nodes of `graph` that have no entry, sorted.
    #[must_use]
    pub fn missing_for(&self, graph: &Graph<N>) -> Vec<N> {
        graph
            .nodes()
            .into_iter()
            .filter(|n| !self.estimates.contains_key(n))
            .collect()
    }

    /// JSON view: `{"<node>": "<estimate>"}`.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        let map = self
            .estimates
            .iter()
            .map(|(n, h)| (n.to_string(), serde_json::Value::String(format_cost(*h))))
            .collect();
        serde_json::Value::Object(map)
    }

    /// Content hash of the canonical JSON view.
    ///
    /// # Errors
    ///
    /// Propagates [`CanonError`].
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = canonical_json_bytes(&self.to_json_value())?;
        Ok(canonical_hash(HashDomain::Heuristic, &bytes))
    }
}

impl<N: NodeId> Default for HeuristicTable<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NodeId> FromIterator<(N, f64)> for HeuristicTable<N> {
    fn from_iter<I: IntoIterator<Item = (N, f64)>>(iter: I) -> Self {
        Self {
            estimates: iter.into_iter().collect(),
        }
    }
}

impl<N: NodeId + Send + Sync> Heuristic<N> for HeuristicTable<N> {
    fn estimate(&self, node: &N) -> Option<f64> {
        self.estimates.get(node).copied()
    }
}

/// Estimates zero everywhere. A* with this heuristic is uniform-cost search.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroHeuristic;

impl<N> Heuristic<N> for ZeroHeuristic {
    fn estimate(&self, _node: &N) -> Option<f64> {
        Some(0.0)
    }
}

/// Closure-backed heuristic, e.g. a distance metric on grid cells.
pub struct FnHeuristic<F>(pub F);

impl<N, F> Heuristic<N> for FnHeuristic<F>
where
    F: Fn(&N) -> f64 + Send + Sync,
{
    fn estimate(&self, node: &N) -> Option<f64> {
        Some((self.0)(node))
    }
}

/// Exact cheapest cost from every known node to `goal`.
///
/// Dijkstra over reversed edges with a linear minimum scan; intended for
/// diagnostics on small graphs. Unreachable nodes map to `f64::INFINITY`.
#[must_use]
pub fn exact_costs_to<N: NodeId>(graph: &Graph<N>, goal: &N) -> BTreeMap<N, f64> {
    let mut reverse: BTreeMap<N, Vec<(N, f64)>> = BTreeMap::new();
    for (from, edges) in graph.rows() {
        for edge in edges {
            reverse
                .entry(edge.to.clone())
                .or_default()
                .push((from.clone(), edge.weight));
        }
    }

    let mut dist: BTreeMap<N, f64> = graph
        .nodes()
        .into_iter()
        .map(|n| (n, f64::INFINITY))
        .collect();
    dist.insert(goal.clone(), 0.0);
    let mut settled: BTreeSet<N> = BTreeSet::new();

    loop {
        let next = dist
            .iter()
            .filter(|(n, d)| !settled.contains(*n) && d.is_finite())
            .min_by(|a, b| a.1.total_cmp(b.1))
            .map(|(n, d)| (n.clone(), *d));
        let Some((node, d)) = next else {
            break;
        };
        settled.insert(node.clone());
        for (pred, weight) in reverse.get(&node).map_or(&[][..], Vec::as_slice) {
            let candidate = d + weight;
            if let Some(best) = dist.get_mut(pred) {
                if candidate < *best {
                    *best = candidate;
                }
            }
        }
    }
    dist
}

/// Known nodes whose estimate exceeds the exact remaining cost to `goal`.
///
/// Nodes without an estimate are reported too. Nodes that cannot reach the
/// goal never violate admissibility.
#[must_use]
pub fn admissibility_violations<N, H>(heuristic: &H, graph: &Graph<N>, goal: &N) -> Vec<N>
where
    N: NodeId,
    H: Heuristic<N> + ?Sized,
{
    exact_costs_to(graph, goal)
        .into_iter()
        .filter(|(node, exact)| match heuristic.estimate(node) {
            Some(h) => exact.is_finite() && h > *exact,
            None => true,
        })
        .map(|(node, _)| node)
        .collect()
}

/// Edges `(u, v)` where `h(u) > w(u, v) + h(v)`, in graph order.
///
/// Edges touching a node without an estimate are reported too.
#[must_use]
pub fn consistency_violations<N, H>(heuristic: &H, graph: &Graph<N>) -> Vec<(N, N)>
where
    N: NodeId,
    H: Heuristic<N> + ?Sized,
{
    let mut violations = Vec::new();
    for (from, edges) in graph.rows() {
        for edge in edges {
            let ok = match (heuristic.estimate(from), heuristic.estimate(&edge.to)) {
                (Some(hu), Some(hv)) => hu <= edge.weight + hv,
                _ => false,
            };
            if !ok {
                violations.push((from.clone(), edge.to.clone()));
            }
        }
    }
    violations
}
