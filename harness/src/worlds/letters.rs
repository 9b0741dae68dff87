//! `Letters`: a lettered uniform-cost example with infinite-weight edges.
//!
//! Edges weighted `+inf` are present in the graph but can never improve a
//! tentative cost, so they are never pushed. The world carries no
//! heuristic; A* over it degenerates to uniform-cost search.

use wayfind_kernel::graph::Graph;
use wayfind_kernel::heuristic::{Heuristic, ZeroHeuristic};

use crate::scenario::Scenario;

const INF: f64 = f64::INFINITY;

/// Twelve lettered nodes, start `S`, goal `G`.
pub struct Letters {
    graph: Graph<&'static str>,
}

impl Letters {
    #[must_use]
    pub fn new() -> Self {
        Self {
            graph: Graph::from_adjacency([
                ("S", vec![("d", 3.0), ("e", 9.0), ("p", 1.0)]),
                ("b", vec![("a", 2.0)]),
                ("a", vec![]),
                ("d", vec![("b", 1.0), ("c", 8.0), ("e", 2.0)]),
                ("c", vec![("a", INF)]),
                ("e", vec![("h", 8.0), ("r", 2.0)]),
                ("h", vec![("p", INF), ("q", INF)]),
                ("f", vec![("G", 2.0), ("c", INF)]),
                ("r", vec![("f", 1.0)]),
                ("G", vec![]),
                ("p", vec![("q", 15.0)]),
                ("q", vec![]),
            ]),
        }
    }
}

impl Default for Letters {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario for Letters {
    type Node = &'static str;

    #[allow(clippy::unnecessary_literal_bound)]
    fn scenario_id(&self) -> &str {
        "letters"
    }

    fn graph(&self) -> &Graph<&'static str> {
        &self.graph
    }

    fn heuristic(&self) -> &dyn Heuristic<&'static str> {
        &ZeroHeuristic
    }

    fn start(&self) -> &'static str {
        "S"
    }

    fn goal(&self) -> &'static str {
        "G"
    }
}
