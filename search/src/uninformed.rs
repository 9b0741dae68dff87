//! Breadth-first and depth-first baselines.
//!
//! Both ignore edge weights for ordering. They exist to produce comparable
//! "generated" counts next to the best-first kernel, so they share its
//! endpoint validation and counting convention (seed counts as one).

use std::collections::{BTreeSet, VecDeque};

use wayfind_kernel::graph::{Graph, NodeId};

use crate::error::SearchError;
use crate::search::check_endpoints;

/// Outcome of an uninformed traversal.
#[derive(Debug, Clone, PartialEq)]
pub struct TraversalResult<N> {
    /// Start-to-goal path, inclusive. Empty when the goal is unreachable.
    pub path: Vec<N>,
    /// Summed edge weights along `path`; `f64::INFINITY` when empty.
    pub total_cost: f64,
    /// Seed plus one per newly discovered neighbour.
    pub generated: u64,
    /// Nodes taken off the queue or stack and expanded, goal included.
    pub expanded: u64,
}

impl<N> TraversalResult<N> {
    fn not_found(generated: u64, expanded: u64) -> Self {
        Self {
            path: Vec::new(),
            total_cost: f64::INFINITY,
            generated,
            expanded,
        }
    }
}

struct Entry<N> {
    node: N,
    path: Vec<N>,
    cost: f64,
}

/// Breadth-first search.
///
/// Nodes are marked discovered when enqueued and tested against the goal
/// when dequeued. The returned path has the fewest edges, not the lowest
/// weight.
///
/// # Errors
///
/// [`SearchError::UnknownStart`] / [`SearchError::UnknownGoal`].
pub fn bfs<N: NodeId>(
    graph: &Graph<N>,
    start: &N,
    goal: &N,
) -> Result<TraversalResult<N>, SearchError> {
    check_endpoints(graph, start, goal)?;

    let mut discovered = BTreeSet::from([start.clone()]);
    let mut queue = VecDeque::from([Entry {
        node: start.clone(),
        path: vec![start.clone()],
        cost: 0.0,
    }]);
    let mut generated = 1u64;
    let mut expanded = 0u64;

    while let Some(current) = queue.pop_front() {
        expanded += 1;
        if &current.node == goal {
            tracing::info!(generated, expanded, "bfs reached goal");
            return Ok(TraversalResult {
                path: current.path,
                total_cost: current.cost,
                generated,
                expanded,
            });
        }
        for edge in graph.neighbors(&current.node) {
            if discovered.insert(edge.to.clone()) {
                let mut path = current.path.clone();
                path.push(edge.to.clone());
                queue.push_back(Entry {
                    node: edge.to.clone(),
                    path,
                    cost: current.cost + edge.weight,
                });
                generated += 1;
            }
        }
    }

    tracing::info!(generated, expanded, "bfs exhausted without reaching goal");
    Ok(TraversalResult::not_found(generated, expanded))
}

/// Depth-first search with an explicit stack.
///
/// Neighbours are pushed in reverse so they are explored in graph order,
/// the same pre-order a recursive traversal would follow. A node is marked
/// visited when popped; each stack entry owns its own path. A node may sit
/// on the stack more than once but counts toward `generated` only on first
/// discovery.
///
/// # Errors
///
/// [`SearchError::UnknownStart`] / [`SearchError::UnknownGoal`].
pub fn dfs<N: NodeId>(
    graph: &Graph<N>,
    start: &N,
    goal: &N,
) -> Result<TraversalResult<N>, SearchError> {
    check_endpoints(graph, start, goal)?;

    let mut visited = BTreeSet::new();
    let mut discovered = BTreeSet::from([start.clone()]);
    let mut stack = vec![Entry {
        node: start.clone(),
        path: vec![start.clone()],
        cost: 0.0,
    }];
    let mut generated = 1u64;
    let mut expanded = 0u64;

    while let Some(current) = stack.pop() {
        if !visited.insert(current.node.clone()) {
            continue;
        }
        expanded += 1;
        if &current.node == goal {
            tracing::info!(generated, expanded, "dfs reached goal");
            return Ok(TraversalResult {
                path: current.path,
                total_cost: current.cost,
                generated,
                expanded,
            });
        }
        for edge in graph.neighbors(&current.node).iter().rev() {
            if visited.contains(&edge.to) {
                continue;
            }
            let mut path = current.path.clone();
            path.push(edge.to.clone());
            stack.push(Entry {
                node: edge.to.clone(),
                path,
                cost: current.cost + edge.weight,
            });
            if discovered.insert(edge.to.clone()) {
                generated += 1;
            }
        }
    }

    tracing::info!(generated, expanded, "dfs exhausted without reaching goal");
    Ok(TraversalResult::not_found(generated, expanded))
}
