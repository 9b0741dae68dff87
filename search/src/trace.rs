//! `SearchTrace`: expansion-event audit log.
//!
//! The normative decision surface is the ordered list of [`ExpandEvent`]s:
//! one per non-stale frontier pop, with the fate of every outgoing edge.
//! Node ids are recorded in their `Display` form so a trace is independent
//! of the id type and serializes identically across processes.

use wayfind_kernel::cost::format_cost;
use wayfind_kernel::proof::canon::{canonical_json_bytes, CanonError};
use wayfind_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};

/// The complete search audit trail.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTrace {
    /// Ordered expansion events. Empty when the policy disables recording.
    pub expansions: Vec<ExpandEvent>,
    /// Aggregate counters and bindings.
    pub metadata: TraceMetadata,
}

/// A single frontier pop that finalized a node.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpandEvent {
    /// Total order of expansions (0-based).
    pub expansion_order: u64,
    /// The finalized node.
    pub node: String,
    /// The frontier key at time of pop.
    pub pop_key: PopKey,
    /// Accumulated true cost at pop.
    pub g_cost: f64,
    /// True if this pop terminated the search on the goal.
    pub is_goal: bool,
    /// Outgoing edges in graph order. Empty for the goal pop.
    pub children: Vec<ChildRecord>,
}

/// The frontier ordering key recorded at pop time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopKey {
    pub priority: f64,
    pub depth: u32,
    pub creation_order: u64,
}

/// What happened to one outgoing edge during an expansion.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildRecord {
    pub node: String,
    pub weight: f64,
    pub outcome: ChildOutcome,
}

/// Outcome of relaxing an edge.
#[derive(Debug, Clone, PartialEq)]
pub enum ChildOutcome {
    /// A new frontier entry was generated.
    Pushed {
        g_cost: f64,
        priority: f64,
        creation_order: u64,
    },
    /// The target was already finalized.
    AlreadyExpanded,
    /// The tentative cost did not beat the best cost already pushed.
    NotImproving { best_cost: f64 },
    /// The generation budget ran out before this edge was relaxed.
    BudgetExhausted,
}

/// Why the search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The goal was popped from the frontier.
    GoalReached,
    /// The frontier emptied without reaching the goal: no path exists.
    FrontierExhausted,
    /// `max_generated` insertions happened before the goal was popped.
    GenerationBudgetExceeded { limit: u64 },
}

impl Termination {
    /// Snake-case tag used in JSON artifacts.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GoalReached => "goal_reached",
            Self::FrontierExhausted => "frontier_exhausted",
            Self::GenerationBudgetExceeded { .. } => "generation_budget_exceeded",
        }
    }
}

/// Aggregate metadata with input bindings.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceMetadata {
    // Bindings
    pub mode: &'static str,
    pub start: String,
    pub goal: String,
    pub graph_digest: Option<String>,
    pub policy_digest: Option<String>,

    // Outcome
    pub termination: Termination,
    pub path: Vec<String>,
    pub path_cost: f64,

    // Counters
    pub total_generated: u64,
    pub total_expanded: u64,
    pub stale_pops: u64,
    pub frontier_high_water: u64,
}

// ---------------------------------------------------------------------------
// Canonical JSON serialization
// ---------------------------------------------------------------------------

impl SearchTrace {
    /// Serialize the trace to canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// Content hash of the canonical bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        Ok(canonical_hash(
            HashDomain::SearchTrace,
            &self.to_canonical_json_bytes()?,
        ))
    }

    /// Convert to a `serde_json::Value`. Costs are rendered as strings.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "expansions": self.expansions.iter().map(expand_event_to_json).collect::<Vec<_>>(),
            "metadata": metadata_to_json(&self.metadata),
        })
    }
}

fn expand_event_to_json(e: &ExpandEvent) -> serde_json::Value {
    serde_json::json!({
        "children": e.children.iter().map(child_to_json).collect::<Vec<_>>(),
        "expansion_order": e.expansion_order,
        "g_cost": format_cost(e.g_cost),
        "is_goal": e.is_goal,
        "node": e.node,
        "pop_key": {
            "creation_order": e.pop_key.creation_order,
            "depth": e.pop_key.depth,
            "priority": format_cost(e.pop_key.priority),
        },
    })
}

fn child_to_json(c: &ChildRecord) -> serde_json::Value {
    serde_json::json!({
        "node": c.node,
        "outcome": outcome_to_json(&c.outcome),
        "weight": format_cost(c.weight),
    })
}

fn outcome_to_json(o: &ChildOutcome) -> serde_json::Value {
    match o {
        ChildOutcome::Pushed {
            g_cost,
            priority,
            creation_order,
        } => serde_json::json!({
            "creation_order": creation_order,
            "g_cost": format_cost(*g_cost),
            "priority": format_cost(*priority),
            "type": "pushed",
        }),
        ChildOutcome::AlreadyExpanded => serde_json::json!({"type": "already_expanded"}),
        ChildOutcome::NotImproving { best_cost } => {
            serde_json::json!({"best_cost": format_cost(*best_cost), "type": "not_improving"})
        }
        ChildOutcome::BudgetExhausted => serde_json::json!({"type": "budget_exhausted"}),
    }
}

fn termination_to_json(t: Termination) -> serde_json::Value {
    match t {
        Termination::GenerationBudgetExceeded { limit } => {
            serde_json::json!({"limit": limit, "type": t.as_str()})
        }
        _ => serde_json::json!({"type": t.as_str()}),
    }
}

fn metadata_to_json(m: &TraceMetadata) -> serde_json::Value {
    serde_json::json!({
        "frontier_high_water": m.frontier_high_water,
        "goal": m.goal,
        "graph_digest": m.graph_digest,
        "mode": m.mode,
        "path": m.path,
        "path_cost": format_cost(m.path_cost),
        "policy_digest": m.policy_digest,
        "stale_pops": m.stale_pops,
        "start": m.start,
        "termination": termination_to_json(m.termination),
        "total_expanded": m.total_expanded,
        "total_generated": m.total_generated,
    })
}
