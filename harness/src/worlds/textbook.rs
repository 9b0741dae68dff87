//! `Textbook`: the 7-node weighted graph used to compare all strategies.
//!
//! The heuristic table is deliberately inadmissible (`h(2) = 15` overestimates
//! the true remaining cost of 4), so A* returns a valid but non-optimal path
//! here while uniform-cost search finds the cheapest one.

use wayfind_kernel::graph::Graph;
use wayfind_kernel::heuristic::{Heuristic, HeuristicTable};

use crate::scenario::Scenario;

/// Seven numbered nodes, start 0, goal 6.
pub struct Textbook {
    graph: Graph<u32>,
    heuristic: HeuristicTable<u32>,
}

impl Textbook {
    #[must_use]
    pub fn new() -> Self {
        Self {
            graph: textbook_graph(),
            heuristic: textbook_heuristic(),
        }
    }
}

impl Default for Textbook {
    fn default() -> Self {
        Self::new()
    }
}

/// The adjacency lists, edge order preserved.
#[must_use]
pub fn textbook_graph() -> Graph<u32> {
    Graph::from_adjacency([
        (0, vec![(1, 2.0), (2, 1.0)]),
        (1, vec![(0, 2.0), (2, 5.0), (3, 11.0), (4, 3.0)]),
        (2, vec![(0, 1.0), (1, 5.0), (4, 1.0), (5, 15.0)]),
        (3, vec![(1, 11.0), (4, 2.0), (6, 1.0)]),
        (4, vec![(1, 3.0), (2, 1.0), (3, 2.0), (5, 4.0), (6, 5.0)]),
        (5, vec![(2, 15.0), (4, 4.0), (6, 1.0)]),
        (6, vec![(3, 1.0), (4, 5.0), (5, 1.0)]),
    ])
}

/// Estimates toward node 6. Node 5 is marked unreachable with `+inf`.
#[must_use]
pub fn textbook_heuristic() -> HeuristicTable<u32> {
    [
        (0, 1.0),
        (1, 3.0),
        (2, 15.0),
        (3, 2.0),
        (4, 1.0),
        (5, f64::INFINITY),
        (6, 0.0),
    ]
    .into_iter()
    .collect()
}

impl Scenario for Textbook {
    type Node = u32;

    #[allow(clippy::unnecessary_literal_bound)]
    fn scenario_id(&self) -> &str {
        "textbook"
    }

    fn graph(&self) -> &Graph<u32> {
        &self.graph
    }

    fn heuristic(&self) -> &dyn Heuristic<u32> {
        &self.heuristic
    }

    fn start(&self) -> u32 {
        0
    }

    fn goal(&self) -> u32 {
        6
    }
}
