//! Search entry point and expansion loop.

use std::collections::BTreeMap;
use std::fmt;

use wayfind_kernel::graph::{Edge, Graph, NodeId};
use wayfind_kernel::heuristic::Heuristic;

use crate::error::SearchError;
use crate::frontier::BestFirstFrontier;
use crate::node::SearchNode;
use crate::policy::{PathTracking, Relaxation, SearchPolicy};
use crate::trace::{
    ChildOutcome, ChildRecord, ExpandEvent, PopKey, SearchTrace, Termination, TraceMetadata,
};

/// Expansion strategy.
pub enum Mode<'h, N> {
    /// Priority is the accumulated cost alone.
    UniformCost,
    /// Priority is accumulated cost plus the heuristic estimate.
    AStar(&'h dyn Heuristic<N>),
}

impl<N> Clone for Mode<'_, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N> Copy for Mode<'_, N> {}

impl<N> fmt::Debug for Mode<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::UniformCost => "UniformCost",
            Self::AStar(_) => "AStar(..)",
        })
    }
}

impl<N: NodeId> Mode<'_, N> {
    /// Snake-case tag used in traces and reports.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UniformCost => "uniform_cost",
            Self::AStar(_) => "astar",
        }
    }

    fn estimate(&self, node: &N) -> Result<f64, SearchError> {
        match self {
            Self::UniformCost => Ok(0.0),
            Self::AStar(h) => h
                .estimate(node)
                .ok_or_else(|| SearchError::MissingHeuristic {
                    node: node.to_string(),
                }),
        }
    }
}

/// Result of a search execution.
///
/// "No path" and "budget exhausted" are successful results. Check
/// [`SearchResult::is_goal_reached`] or inspect `termination`.
#[derive(Debug, Clone)]
pub struct SearchResult<N> {
    /// Start-to-goal path, inclusive. Empty when the goal was not reached.
    pub path: Vec<N>,
    /// Summed edge weights along `path`; `f64::INFINITY` when empty.
    pub total_cost: f64,
    /// Frontier insertions, seed included.
    pub generated: u64,
    /// Non-stale pops, goal pop included.
    pub expanded: u64,
    pub termination: Termination,
    pub trace: SearchTrace,
}

impl<N> SearchResult<N> {
    /// Returns `true` if the search terminated because the goal was popped.
    #[must_use]
    pub fn is_goal_reached(&self) -> bool {
        self.termination == Termination::GoalReached
    }
}

/// Uniform-cost search under the default policy.
///
/// # Errors
///
/// See [`search`].
pub fn uniform_cost_search<N: NodeId>(
    graph: &Graph<N>,
    start: &N,
    goal: &N,
) -> Result<SearchResult<N>, SearchError> {
    search(
        graph,
        start,
        goal,
        Mode::UniformCost,
        &SearchPolicy::default(),
    )
}

/// A* under the default policy.
///
/// # Errors
///
/// See [`search`].
pub fn astar_search<N: NodeId>(
    graph: &Graph<N>,
    start: &N,
    goal: &N,
    heuristic: &dyn Heuristic<N>,
) -> Result<SearchResult<N>, SearchError> {
    search(
        graph,
        start,
        goal,
        Mode::AStar(heuristic),
        &SearchPolicy::default(),
    )
}

#[derive(Default)]
struct Counters {
    generated: u64,
    expanded: u64,
    stale_pops: u64,
    next_creation_order: u64,
    frontier_high_water: u64,
}

/// Reject endpoints that are neither a graph key nor an edge target.
pub(crate) fn check_endpoints<N: NodeId>(
    graph: &Graph<N>,
    start: &N,
    goal: &N,
) -> Result<(), SearchError> {
    if !graph.contains(start) {
        return Err(SearchError::UnknownStart {
            node: start.to_string(),
        });
    }
    if !graph.contains(goal) {
        return Err(SearchError::UnknownGoal {
            node: goal.to_string(),
        });
    }
    Ok(())
}

/// Run best-first search from `start` to `goal`.
///
/// The frontier is seeded with `start` at cost 0 and priority `h(start)`.
/// Each pop discards stale entries, finalizes the node, and tests it against
/// the goal. Expansion relaxes every edge to an unexpanded neighbour
/// according to `policy.relaxation`.
///
/// # Errors
///
/// - [`SearchError::InvalidPolicy`] if `policy.validate()` fails.
/// - [`SearchError::UnknownStart`] / [`SearchError::UnknownGoal`] if either
///   endpoint is neither a graph key nor an edge target.
/// - [`SearchError::MissingHeuristic`] the first time A* must score a node
///   the heuristic has no entry for. No partial result is returned.
pub fn search<N: NodeId>(
    graph: &Graph<N>,
    start: &N,
    goal: &N,
    mode: Mode<'_, N>,
    policy: &SearchPolicy,
) -> Result<SearchResult<N>, SearchError> {
    policy.validate()?;
    check_endpoints(graph, start, goal)?;

    let inline = policy.path_tracking == PathTracking::Inline;
    let mut frontier = BestFirstFrontier::new();
    let mut parents: BTreeMap<N, N> = BTreeMap::new();
    let mut expansions: Vec<ExpandEvent> = Vec::new();
    let mut counters = Counters::default();

    let seed = SearchNode {
        node: start.clone(),
        g_cost: 0.0,
        h_cost: mode.estimate(start)?,
        depth: 0,
        creation_order: counters.next_creation_order,
        path: if inline { vec![start.clone()] } else { Vec::new() },
    };
    counters.next_creation_order += 1;
    counters.generated += 1;
    frontier.record_cost(start.clone(), 0.0);
    frontier.push(seed);

    let (termination, path, total_cost) = loop {
        let Some(current) = frontier.pop() else {
            break (Termination::FrontierExhausted, Vec::new(), f64::INFINITY);
        };
        if !frontier.mark_expanded(current.node.clone()) {
            counters.stale_pops += 1;
            continue;
        }
        let expansion_order = counters.expanded;
        counters.expanded += 1;

        let pop_key = PopKey {
            priority: current.priority(),
            depth: current.depth,
            creation_order: current.creation_order,
        };
        let is_goal = &current.node == goal;

        let mut children = Vec::new();
        let mut budget_hit = false;
        if !is_goal {
            tracing::debug!(node = %current.node, g = current.g_cost, "expanding");
            for edge in graph.neighbors(&current.node) {
                let record = relax_edge(
                    &current,
                    edge,
                    mode,
                    policy,
                    &mut frontier,
                    &mut parents,
                    &mut counters,
                )?;
                budget_hit = record.outcome == ChildOutcome::BudgetExhausted;
                children.push(record);
                if budget_hit {
                    break;
                }
            }
        }

        if policy.record_trace {
            expansions.push(ExpandEvent {
                expansion_order,
                node: current.node.to_string(),
                pop_key,
                g_cost: current.g_cost,
                is_goal,
                children,
            });
        }

        if is_goal {
            let path = if inline {
                current.path
            } else {
                reconstruct_path(&parents, start, goal)
            };
            break (Termination::GoalReached, path, current.g_cost);
        }
        if let (true, Some(limit)) = (budget_hit, policy.max_generated) {
            break (
                Termination::GenerationBudgetExceeded { limit },
                Vec::new(),
                f64::INFINITY,
            );
        }
    };

    counters.frontier_high_water = frontier.high_water();
    finish(
        mode,
        policy,
        start,
        goal,
        (termination, path, total_cost),
        &counters,
        expansions,
    )
}

/// Log the outcome and assemble the result with its trace.
fn finish<N: NodeId>(
    mode: Mode<'_, N>,
    policy: &SearchPolicy,
    start: &N,
    goal: &N,
    (termination, path, total_cost): (Termination, Vec<N>, f64),
    counters: &Counters,
    expansions: Vec<ExpandEvent>,
) -> Result<SearchResult<N>, SearchError> {
    tracing::info!(
        mode = mode.as_str(),
        start = %start,
        goal = %goal,
        termination = termination.as_str(),
        generated = counters.generated,
        expanded = counters.expanded,
        "search finished"
    );

    let metadata = TraceMetadata {
        mode: mode.as_str(),
        start: start.to_string(),
        goal: goal.to_string(),
        graph_digest: None,
        policy_digest: Some(policy.digest()?.to_string()),
        termination,
        path: path.iter().map(ToString::to_string).collect(),
        path_cost: total_cost,
        total_generated: counters.generated,
        total_expanded: counters.expanded,
        stale_pops: counters.stale_pops,
        frontier_high_water: counters.frontier_high_water,
    };

    Ok(SearchResult {
        path,
        total_cost,
        generated: counters.generated,
        expanded: counters.expanded,
        termination,
        trace: SearchTrace {
            expansions,
            metadata,
        },
    })
}

/// Relax the edge `current -> edge.to` and report what happened to it.
///
/// Pushes a child only when the target is unexpanded, the relaxation rule
/// admits it, and the generation budget has room. A `BudgetExhausted`
/// record means nothing was pushed and the expansion must stop.
fn relax_edge<N: NodeId>(
    current: &SearchNode<N>,
    edge: &Edge<N>,
    mode: Mode<'_, N>,
    policy: &SearchPolicy,
    frontier: &mut BestFirstFrontier<N>,
    parents: &mut BTreeMap<N, N>,
    counters: &mut Counters,
) -> Result<ChildRecord, SearchError> {
    let record = |outcome| ChildRecord {
        node: edge.to.to_string(),
        weight: edge.weight,
        outcome,
    };
    if frontier.is_expanded(&edge.to) {
        return Ok(record(ChildOutcome::AlreadyExpanded));
    }

    let tentative = current.g_cost + edge.weight;
    let improves = frontier.improves(&edge.to, tentative);
    if !improves && policy.relaxation == Relaxation::CostSoFar {
        return Ok(record(ChildOutcome::NotImproving {
            best_cost: frontier.best_cost(&edge.to).unwrap_or(f64::INFINITY),
        }));
    }
    if let Some(limit) = policy.max_generated {
        if counters.generated >= limit {
            tracing::warn!(
                limit,
                expanded = counters.expanded,
                "generation budget exhausted before reaching goal"
            );
            return Ok(record(ChildOutcome::BudgetExhausted));
        }
    }

    let h_cost = mode.estimate(&edge.to)?;
    let inline = policy.path_tracking == PathTracking::Inline;
    if improves {
        frontier.record_cost(edge.to.clone(), tentative);
        if !inline {
            parents.insert(edge.to.clone(), current.node.clone());
        }
    }

    let child = SearchNode {
        node: edge.to.clone(),
        g_cost: tentative,
        h_cost,
        depth: current.depth + 1,
        creation_order: counters.next_creation_order,
        path: if inline {
            let mut p = current.path.clone();
            p.push(edge.to.clone());
            p
        } else {
            Vec::new()
        },
    };
    let outcome = ChildOutcome::Pushed {
        g_cost: tentative,
        priority: child.priority(),
        creation_order: child.creation_order,
    };
    counters.next_creation_order += 1;
    counters.generated += 1;
    frontier.push(child);
    Ok(record(outcome))
}

/// Walk `parents` from `goal` back to `start`.
///
/// Returns `[start]` when `start == goal`, and an empty path if the chain
/// breaks before reaching `start`.
#[must_use]
pub fn reconstruct_path<N: NodeId>(parents: &BTreeMap<N, N>, start: &N, goal: &N) -> Vec<N> {
    let mut path = vec![goal.clone()];
    let mut cursor = goal;
    while cursor != start {
        // Each hop consumes one parent entry; a longer walk means a cycle.
        if path.len() > parents.len() + 1 {
            return Vec::new();
        }
        let Some(parent) = parents.get(cursor) else {
            return Vec::new();
        };
        path.push(parent.clone());
        cursor = parent;
    }
    path.reverse();
    path
}
