//! Shared workloads for wayfind benchmark suites.
//!
//! Every workload is a pure function of its size parameters, so numbers
//! from different runs and machines compare like for like.

use std::collections::BTreeMap;

use wayfind_harness::worlds::grid::{Cell, GridSpec, GridWorld, Metric};
use wayfind_kernel::graph::Graph;

/// An `n x n` grid with a fixed wall pattern and a guaranteed route.
///
/// Every third column is walled except for one gap, alternating between the
/// top and bottom row, so shortest paths snake across the grid.
///
/// # Panics
///
/// Panics if `n < 2`. Benchmark setup failures are fatal.
#[must_use]
pub fn serpentine_grid(n: usize, metric: Metric) -> GridWorld {
    assert!(n >= 2, "grid needs at least two rows");
    let mut matrix = vec![vec![0u8; n]; n];
    for col in (1..n - 1).filter(|c| c % 3 == 1) {
        let gap = if (col / 3) % 2 == 0 { n - 1 } else { 0 };
        for (row, cells) in matrix.iter_mut().enumerate() {
            if row != gap {
                cells[col] = 1;
            }
        }
    }
    GridWorld::build(&GridSpec {
        matrix,
        moves: BTreeMap::new(),
        start: Cell::new(0, 0),
        goal: Cell::new(n - 1, n - 1),
        metric,
    })
    .expect("serpentine grid builds")
}

/// A layered DAG: `layers` layers of `width` nodes, every node linked to
/// every node in the next layer with weights from a fixed formula.
///
/// Node 0 is the source and `layers * width + 1` the sink.
#[must_use]
pub fn layered_graph(layers: u32, width: u32) -> Graph<u32> {
    let sink = layers * width + 1;
    let id = |layer: u32, i: u32| 1 + layer * width + i;
    let weight = |a: u32, b: u32| f64::from((a * 7 + b * 13) % 10 + 1);

    let mut graph = Graph::new();
    for i in 0..width {
        graph.add_edge(0, id(0, i), weight(0, i));
    }
    for layer in 0..layers.saturating_sub(1) {
        for i in 0..width {
            for j in 0..width {
                let (from, to) = (id(layer, i), id(layer + 1, j));
                graph.add_edge(from, to, weight(from, to));
            }
        }
    }
    for i in 0..width {
        let from = id(layers - 1, i);
        graph.add_edge(from, sink, weight(from, sink));
    }
    graph
}
