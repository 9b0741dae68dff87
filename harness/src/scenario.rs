//! Scenario contract: the minimal trait a world must implement.
//!
//! Scenarios provide a graph, a heuristic and two endpoints. They may NOT
//! implement search, hashing or report assembly; those are kernel and
//! runner concerns.

use wayfind_kernel::graph::{Graph, NodeId};
use wayfind_kernel::heuristic::Heuristic;

/// The contract a world must implement to be run by the harness runner.
///
/// A scenario provides:
/// - A unique identifier
/// - An immutable weighted graph
/// - A heuristic for A* (worlds without one return `ZeroHeuristic`)
/// - Start and goal nodes
pub trait Scenario {
    /// Node identifier type of the graph.
    type Node: NodeId + Send + Sync;

    /// Unique scenario identifier (e.g., `"textbook"`).
    fn scenario_id(&self) -> &str;

    /// The graph searched by every strategy.
    fn graph(&self) -> &Graph<Self::Node>;

    /// Remaining-cost estimates used by A*.
    fn heuristic(&self) -> &dyn Heuristic<Self::Node>;

    /// Search origin.
    fn start(&self) -> Self::Node;

    /// Search target.
    fn goal(&self) -> Self::Node;
}
