//! Weighted directed graph: node id → ordered outgoing edges.
//!
//! Uses `BTreeMap` (not `HashMap`) so node iteration, serialization and
//! digests are deterministic. Each node's edge list keeps insertion order;
//! that order is the expansion order every search kernel follows.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::cost::format_cost;
use crate::proof::canon::{canonical_json_bytes, CanonError};
use crate::proof::hash::{canonical_hash, ContentHash, HashDomain};

/// Bound satisfied by every usable node identifier.
///
/// `Ord` backs the deterministic visited sets and maps, `Display` renders
/// ids into reports and error messages.
pub trait NodeId: Ord + Clone + fmt::Debug + fmt::Display {}

impl<T: Ord + Clone + fmt::Debug + fmt::Display> NodeId for T {}

/// An outgoing edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge<N> {
    /// Target node.
    pub to: N,
    /// Non-negative traversal cost. `f64::INFINITY` marks an edge that is
    /// present but never worth taking.
    pub weight: f64,
}

/// Structural defects reported by [`Graph::validate`].
#[derive(Debug, Clone, PartialEq)]
pub enum GraphError {
    /// An edge carries a negative weight.
    NegativeWeight { from: String, to: String, weight: f64 },
    /// An edge weight is NaN.
    NanWeight { from: String, to: String },
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeWeight { from, to, weight } => {
                write!(f, "edge {from} -> {to} has negative weight {weight}")
            }
            Self::NanWeight { from, to } => write!(f, "edge {from} -> {to} has NaN weight"),
        }
    }
}

impl std::error::Error for GraphError {}

/// Immutable-during-search adjacency list.
///
/// A node absent from the key set has no outgoing edges; it is still a
/// *known* node when it appears as an edge target.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph<N> {
    adjacency: BTreeMap<N, Vec<Edge<N>>>,
}

impl<N: NodeId> Graph<N> {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self {
            adjacency: BTreeMap::new(),
        }
    }

    /// Build from `(node, [(neighbor, weight), ...])` rows.
    ///
    /// Rows for the same node append in order.
    pub fn from_adjacency<R, E>(rows: R) -> Self
    where
        R: IntoIterator<Item = (N, E)>,
        E: IntoIterator<Item = (N, f64)>,
    {
        let mut graph = Self::new();
        for (from, edges) in rows {
            graph.add_node(from.clone());
            for (to, weight) in edges {
                graph.add_edge(from.clone(), to, weight);
            }
        }
        graph
    }

    /// Register a node with no outgoing edges (no-op if present).
    pub fn add_node(&mut self, node: N) {
        self.adjacency.entry(node).or_default();
    }

    /// Append a directed edge `from -> to`.
    pub fn add_edge(&mut self, from: N, to: N, weight: f64) {
        self.adjacency
            .entry(from)
            .or_default()
            .push(Edge { to, weight });
    }

    /// Append `a -> b` and `b -> a` with the same weight.
    pub fn add_undirected_edge(&mut self, a: N, b: N, weight: f64) {
        self.add_edge(a.clone(), b.clone(), weight);
        self.add_edge(b, a, weight);
    }

    /// Outgoing edges of `node`, in insertion order. Empty for unknown nodes.
    #[must_use]
    pub fn neighbors(&self, node: &N) -> &[Edge<N>] {
        match self.adjacency.get(node) {
            Some(edges) => edges,
            None => &[],
        }
    }

    /// `true` if `node` has an adjacency entry.
    #[must_use]
    pub fn has_entry(&self, node: &N) -> bool {
        self.adjacency.contains_key(node)
    }

    /// `true` if `node` is a key or the target of any edge.
    #[must_use]
    pub fn contains(&self, node: &N) -> bool {
        self.has_entry(node)
            || self
                .adjacency
                .values()
                .any(|edges| edges.iter().any(|e| &e.to == node))
    }

    /// All known nodes (keys and edge targets), sorted.
    #[must_use]
    pub fn nodes(&self) -> BTreeSet<N> {
        let mut nodes: BTreeSet<N> = self.adjacency.keys().cloned().collect();
        for edges in self.adjacency.values() {
            nodes.extend(edges.iter().map(|e| e.to.clone()));
        }
        nodes
    }

    /// Number of known nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes().len()
    }

    /// Number of directed edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Iterate `(node, edges)` rows in node order.
    pub fn rows(&self) -> impl Iterator<Item = (&N, &[Edge<N>])> {
        self.adjacency.iter().map(|(n, e)| (n, e.as_slice()))
    }

    /// Weight of the first `from -> to` edge, if any.
    #[must_use]
    pub fn edge_weight(&self, from: &N, to: &N) -> Option<f64> {
        self.neighbors(from)
            .iter()
            .find(|e| &e.to == to)
            .map(|e| e.weight)
    }

    /// Nodes reachable from `start` (including `start`), ignoring weights.
    #[must_use]
    pub fn reachable_from(&self, start: &N) -> BTreeSet<N> {
        let mut seen = BTreeSet::new();
        let mut stack = vec![start.clone()];
        while let Some(node) = stack.pop() {
            if !seen.insert(node.clone()) {
                continue;
            }
            for edge in self.neighbors(&node) {
                if !seen.contains(&edge.to) {
                    stack.push(edge.to.clone());
                }
            }
        }
        seen
    }

    /// Check the weight preconditions the search kernels assume.
    ///
    /// Kernels never call this; negative weights are a precondition
    /// violation with undefined results, not a recoverable search error.
    ///
    /// # Errors
    ///
    /// Returns the first negative or NaN weight found, in node order.
    pub fn validate(&self) -> Result<(), GraphError> {
        for (from, edges) in &self.adjacency {
            for edge in edges {
                if edge.weight.is_nan() {
                    return Err(GraphError::NanWeight {
                        from: from.to_string(),
                        to: edge.to.to_string(),
                    });
                }
                if edge.weight < 0.0 {
                    return Err(GraphError::NegativeWeight {
                        from: from.to_string(),
                        to: edge.to.to_string(),
                        weight: edge.weight,
                    });
                }
            }
        }
        Ok(())
    }

    /// JSON view: `{"<node>": [["<to>", "<weight>"], ...]}`.
    ///
    /// Ids and weights are rendered as strings so integer and string ids
    /// share one shape and fractional weights stay canonical.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        for (from, edges) in &self.adjacency {
            let rows: Vec<serde_json::Value> = edges
                .iter()
                .map(|e| serde_json::json!([e.to.to_string(), format_cost(e.weight)]))
                .collect();
            map.insert(from.to_string(), serde_json::Value::Array(rows));
        }
        serde_json::Value::Object(map)
    }

    /// Content hash of the canonical JSON view.
    ///
    /// # Errors
    ///
    /// Propagates [`CanonError`]; unreachable in practice since every
    /// number is pre-rendered.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = canonical_json_bytes(&self.to_json_value())?;
        Ok(canonical_hash(HashDomain::Graph, &bytes))
    }
}

impl<N: NodeId> Default for Graph<N> {
    fn default() -> Self {
        Self::new()
    }
}
