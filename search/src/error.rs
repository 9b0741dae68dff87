//! Typed search errors.
//!
//! `SearchError` represents configuration defects only. "No path exists" and
//! "generation budget exhausted" are normal outcomes, expressed through
//! [`crate::trace::Termination`] on a successful result.

/// A defect in the inputs handed to a search kernel.
///
/// Node ids are carried in their `Display` form so the error type stays
/// independent of the graph's id type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The start node is neither a graph key nor an edge target.
    UnknownStart { node: String },
    /// The goal node is neither a graph key nor an edge target.
    UnknownGoal { node: String },
    /// A* needed to score a node the heuristic has no entry for.
    MissingHeuristic { node: String },
    /// The policy combination cannot run.
    InvalidPolicy { detail: String },
    /// Canonical serialization of a digest input failed.
    Serialization { detail: String },
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownStart { node } => write!(f, "start node {node} is not in the graph"),
            Self::UnknownGoal { node } => write!(f, "goal node {node} is not in the graph"),
            Self::MissingHeuristic { node } => {
                write!(f, "heuristic has no estimate for node {node}")
            }
            Self::InvalidPolicy { detail } => write!(f, "invalid search policy: {detail}"),
            Self::Serialization { detail } => write!(f, "serialization failed: {detail}"),
        }
    }
}

impl std::error::Error for SearchError {}

impl From<wayfind_kernel::proof::canon::CanonError> for SearchError {
    fn from(e: wayfind_kernel::proof::canon::CanonError) -> Self {
        Self::Serialization {
            detail: e.to_string(),
        }
    }
}
