//! Acceptance tests: pinned results for every built-in scenario.
//!
//! Proves:
//! 1. Textbook graph: UCS, A* (inadmissible table), BFS and DFS paths, costs
//!    and generated counts are locked
//! 2. Two-node and start == goal edge cases
//! 3. Lettered example with infinite-weight edges
//! 4. Grid world: both heuristics find the unique shortest route
//! 5. Graph documents load and run like built-in worlds

use std::path::Path;

use wayfind_harness::document::GraphDocument;
use wayfind_harness::policy::{CompareConfig, Strategy};
use wayfind_harness::runner::compare;
use wayfind_harness::scenario::Scenario;
use wayfind_harness::worlds::grid::{Cell, GridWorld, Metric};
use wayfind_harness::worlds::letters::Letters;
use wayfind_harness::worlds::textbook::{textbook_graph, textbook_heuristic, Textbook};
use wayfind_kernel::graph::Graph;
use wayfind_search::policy::{Relaxation, SearchPolicy};
use wayfind_search::search::{astar_search, search, uniform_cost_search, Mode};
use wayfind_search::trace::Termination;

// ---------------------------------------------------------------------------
// 1. Textbook graph
// ---------------------------------------------------------------------------

#[test]
fn textbook_uniform_cost() {
    let result = uniform_cost_search(&textbook_graph(), &0, &6).unwrap();
    assert_eq!(result.path, vec![0, 2, 4, 3, 6]);
    assert_eq!(result.total_cost, 5.0);
    assert_eq!(result.generated, 10);
    assert_eq!(result.termination, Termination::GoalReached);
}

#[test]
fn textbook_astar_with_inadmissible_table() {
    let h = textbook_heuristic();
    let result = astar_search(&textbook_graph(), &0, &6, &h).unwrap();
    assert_eq!(result.path, vec![0, 1, 4, 3, 6]);
    assert_eq!(result.total_cost, 8.0);
    assert_eq!(result.generated, 9);
}

#[test]
fn textbook_astar_unconditional_relaxation() {
    let h = textbook_heuristic();
    let policy = SearchPolicy {
        relaxation: Relaxation::Unconditional,
        ..SearchPolicy::default()
    };
    let result = search(&textbook_graph(), &0, &6, Mode::AStar(&h), &policy).unwrap();
    assert_eq!(result.path, vec![0, 1, 4, 3, 6]);
    assert_eq!(result.total_cost, 8.0);
    assert_eq!(result.generated, 11);
}

#[test]
fn textbook_comparison_report() {
    let report = compare(&Textbook::new(), &CompareConfig::default()).unwrap();
    let summary: Vec<(Strategy, String, f64, u64)> = report
        .outcomes
        .iter()
        .map(|o| (o.strategy, o.path.join(","), o.cost, o.generated))
        .collect();
    assert_eq!(
        summary,
        vec![
            (Strategy::AStar, "0,1,4,3,6".to_string(), 8.0, 9),
            (Strategy::UniformCost, "0,2,4,3,6".to_string(), 5.0, 10),
            (Strategy::BreadthFirst, "0,1,3,6".to_string(), 14.0, 7),
            (Strategy::DepthFirst, "0,1,2,4,3,6".to_string(), 11.0, 7),
        ]
    );
}

// ---------------------------------------------------------------------------
// 2. Edge cases
// ---------------------------------------------------------------------------

#[test]
fn single_edge_graph() {
    let graph = Graph::from_adjacency([("A", vec![("B", 5.0)]), ("B", vec![])]);
    let result = uniform_cost_search(&graph, &"A", &"B").unwrap();
    assert_eq!(result.path, vec!["A", "B"]);
    assert_eq!(result.total_cost, 5.0);
    assert_eq!(result.generated, 2);
}

#[test]
fn start_is_goal() {
    let h = textbook_heuristic();
    let result = astar_search(&textbook_graph(), &3, &3, &h).unwrap();
    assert_eq!(result.path, vec![3]);
    assert_eq!(result.total_cost, 0.0);
    assert_eq!(result.generated, 1);
}

// ---------------------------------------------------------------------------
// 3. Lettered example
// ---------------------------------------------------------------------------

#[test]
fn letters_uniform_cost_and_bfs() {
    let report = compare(&Letters::new(), &CompareConfig::default()).unwrap();

    let ucs = report.outcome(Strategy::UniformCost).unwrap();
    assert_eq!(ucs.path.join(","), "S,d,e,r,f,G");
    assert_eq!(ucs.cost, 10.0);
    assert_eq!(ucs.generated, 13);

    let bfs = report.outcome(Strategy::BreadthFirst).unwrap();
    assert_eq!(bfs.path.join(","), "S,e,r,f,G");
    assert_eq!(bfs.cost, 14.0);
    assert_eq!(bfs.generated, 12);

    let astar = report.outcome(Strategy::AStar).unwrap();
    assert_eq!(astar.path, ucs.path, "zero heuristic reduces A* to UCS");
    assert_eq!(astar.generated, ucs.generated);
}

// ---------------------------------------------------------------------------
// 4. Grid world
// ---------------------------------------------------------------------------

#[test]
fn grid_shortest_route_under_both_metrics() {
    let expected: Vec<Cell> = [(0, 0), (0, 1), (0, 2), (1, 2), (2, 2), (2, 3), (3, 3)]
        .into_iter()
        .map(|(r, c)| Cell::new(r, c))
        .collect();
    for metric in [Metric::Manhattan, Metric::Chebyshev] {
        let world = GridWorld::demo(metric).unwrap();
        let result =
            astar_search(world.graph(), &world.start(), &world.goal(), world.heuristic()).unwrap();
        assert_eq!(result.path, expected, "{metric:?}");
        assert_eq!(result.total_cost, 6.0);
    }
}

#[test]
fn grid_manhattan_astar_generates_fewer_than_ucs() {
    let report = compare(
        &GridWorld::demo(Metric::Manhattan).unwrap(),
        &CompareConfig::default(),
    )
    .unwrap();
    let astar = report.outcome(Strategy::AStar).unwrap();
    let ucs = report.outcome(Strategy::UniformCost).unwrap();
    assert_eq!(astar.cost, ucs.cost);
    assert!(
        astar.generated < ucs.generated,
        "A* generated {} vs UCS {}",
        astar.generated,
        ucs.generated
    );
    assert!(report.heuristic.is_admissible());
    assert!(report.heuristic.is_consistent());
}

// ---------------------------------------------------------------------------
// 5. Graph documents
// ---------------------------------------------------------------------------

fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../fixtures")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()))
}

#[test]
fn letters_document_matches_expected_route() {
    let doc = GraphDocument::from_json_str(&fixture("letters_document.json")).unwrap();
    let report = compare(&doc, &CompareConfig::default()).unwrap();
    assert_eq!(report.scenario_id, "letters_document");
    assert!(report.heuristic.is_admissible());
    for strategy in [Strategy::AStar, Strategy::UniformCost] {
        let outcome = report.outcome(strategy).unwrap();
        assert_eq!(outcome.path.join(","), "S,d,e,r,f,G", "{strategy}");
        assert_eq!(outcome.cost, 10.0);
    }
}
