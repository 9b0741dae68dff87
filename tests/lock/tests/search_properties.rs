//! Property lock tests for the search kernels.
//!
//! Proves:
//! 1. A* with a consistent admissible heuristic matches UCS cost
//! 2. Repeated searches are byte-identical (result and trace)
//! 3. Unreachable goals yield an empty path without over-generating
//! 4. Path tracking strategy never changes the answer
//! 5. Traces account for every generated node

use wayfind_harness::scenario::Scenario;
use wayfind_harness::worlds::grid::{Cell, GridSpec, GridWorld, Metric};
use wayfind_harness::worlds::textbook::{textbook_graph, textbook_heuristic};
use wayfind_kernel::graph::Graph;
use wayfind_kernel::heuristic::{consistency_violations, ZeroHeuristic};
use wayfind_search::policy::{PathTracking, Relaxation, SearchPolicy};
use wayfind_search::search::{search, Mode};
use wayfind_search::trace::{ChildOutcome, Termination};
use wayfind_search::uninformed::{bfs, dfs};

fn open_grid(rows: usize, cols: usize, walls: &[(usize, usize)], metric: Metric) -> GridWorld {
    let mut matrix = vec![vec![0u8; cols]; rows];
    for &(r, c) in walls {
        matrix[r][c] = 1;
    }
    GridWorld::build(&GridSpec {
        matrix,
        moves: std::collections::BTreeMap::new(),
        start: Cell::new(0, 0),
        goal: Cell::new(rows - 1, cols - 1),
        metric,
    })
    .unwrap()
}

// ---------------------------------------------------------------------------
// 1. Optimality
// ---------------------------------------------------------------------------

#[test]
fn astar_matches_ucs_with_consistent_heuristic() {
    let walls = [(1, 1), (1, 2), (1, 3), (3, 0), (3, 1), (3, 3), (3, 4)];
    let world = open_grid(5, 5, &walls, Metric::Manhattan);
    assert!(consistency_violations(world.heuristic(), world.graph()).is_empty());

    let policy = SearchPolicy::default();
    let (start, goal) = (world.start(), world.goal());
    let astar = search(world.graph(), &start, &goal, Mode::AStar(world.heuristic()), &policy)
        .unwrap();
    let ucs = search(world.graph(), &start, &goal, Mode::UniformCost, &policy).unwrap();

    assert_eq!(astar.total_cost, ucs.total_cost);
    assert_eq!(astar.total_cost, 8.0);
    assert!(astar.generated <= ucs.generated);
}

#[test]
fn zero_heuristic_reproduces_ucs_exactly() {
    let graph = textbook_graph();
    let policy = SearchPolicy::default();
    let astar = search(&graph, &0, &6, Mode::AStar(&ZeroHeuristic), &policy).unwrap();
    let ucs = search(&graph, &0, &6, Mode::UniformCost, &policy).unwrap();
    assert_eq!(astar.path, ucs.path);
    assert_eq!(astar.generated, ucs.generated);
    assert_eq!(astar.expanded, ucs.expanded);
}

// ---------------------------------------------------------------------------
// 2. Idempotence
// ---------------------------------------------------------------------------

#[test]
fn repeated_searches_are_byte_identical() {
    let graph = textbook_graph();
    let h = textbook_heuristic();
    let policy = SearchPolicy::default();
    let runs: Vec<Vec<u8>> = (0..5)
        .map(|_| {
            let r = search(&graph, &0, &6, Mode::AStar(&h), &policy).unwrap();
            r.trace.to_canonical_json_bytes().unwrap()
        })
        .collect();
    assert!(runs.windows(2).all(|w| w[0] == w[1]));
}

// ---------------------------------------------------------------------------
// 3. Unreachable goals
// ---------------------------------------------------------------------------

/// Re-pushes on cost improvement mean `generated` can exceed the reachable
/// node count; expansions cannot, and pushes are bounded by reachable edges.
#[test]
fn unreachable_goal_is_bounded_by_reachable_set() {
    let mut graph = textbook_graph();
    graph.add_edge(7, 8, 1.0);
    let reachable = graph.reachable_from(&0);
    let reachable_edges: u64 = reachable
        .iter()
        .map(|n| graph.neighbors(n).len() as u64)
        .sum();
    let nodes = reachable.len() as u64;

    for mode in [Mode::UniformCost, Mode::AStar(&ZeroHeuristic)] {
        let r = search(&graph, &0, &8, mode, &SearchPolicy::default()).unwrap();
        assert!(r.path.is_empty());
        assert!(r.total_cost.is_infinite());
        assert_eq!(r.termination, Termination::FrontierExhausted);
        assert_eq!(r.expanded, nodes);
        assert!(r.generated <= 1 + reachable_edges);
    }
    for r in [bfs(&graph, &0, &8).unwrap(), dfs(&graph, &0, &8).unwrap()] {
        assert!(r.path.is_empty());
        assert_eq!(r.expanded, nodes);
    }
    assert_eq!(bfs(&graph, &0, &8).unwrap().generated, nodes);
    assert_eq!(dfs(&graph, &0, &8).unwrap().generated, nodes);
}

#[test]
fn unreachable_goal_in_a_tree_generates_each_node_once() {
    let mut graph = Graph::from_adjacency([
        ("root", vec![("l", 2.0), ("r", 1.0)]),
        ("l", vec![("ll", 1.0), ("lr", 4.0)]),
        ("r", vec![("rl", 3.0)]),
    ]);
    graph.add_node("goal");
    let reachable = graph.reachable_from(&"root").len() as u64;
    let r = search(
        &graph,
        &"root",
        &"goal",
        Mode::UniformCost,
        &SearchPolicy::default(),
    )
    .unwrap();
    assert!(r.path.is_empty());
    assert_eq!(r.generated, reachable);
}

#[test]
fn isolated_goal_node() {
    let mut graph = Graph::from_adjacency([("a", vec![("b", 1.0)])]);
    graph.add_node("island");
    let r = search(
        &graph,
        &"a",
        &"island",
        Mode::UniformCost,
        &SearchPolicy::default(),
    )
    .unwrap();
    assert!(!r.is_goal_reached());
    assert_eq!(r.generated, 2);
}

// ---------------------------------------------------------------------------
// 4. Path tracking equivalence
// ---------------------------------------------------------------------------

#[test]
fn path_tracking_does_not_change_answers() {
    let graph = textbook_graph();
    let h = textbook_heuristic();
    for relaxation in [Relaxation::CostSoFar, Relaxation::Unconditional] {
        for mode in [Mode::UniformCost, Mode::AStar(&h)] {
            let run = |path_tracking| {
                let policy = SearchPolicy {
                    path_tracking,
                    relaxation,
                    ..SearchPolicy::default()
                };
                search(&graph, &0, &6, mode, &policy).unwrap()
            };
            let inline = run(PathTracking::Inline);
            let parents = run(PathTracking::ParentPointers);
            assert_eq!(inline.path, parents.path, "{relaxation:?} {mode:?}");
            assert_eq!(inline.total_cost, parents.total_cost);
            assert_eq!(inline.generated, parents.generated);
        }
    }
}

// ---------------------------------------------------------------------------
// 5. Trace accounting
// ---------------------------------------------------------------------------

#[test]
fn trace_pushes_account_for_generated_count() {
    let graph = textbook_graph();
    let h = textbook_heuristic();
    let r = search(&graph, &0, &6, Mode::AStar(&h), &SearchPolicy::default()).unwrap();

    let pushes = r
        .trace
        .expansions
        .iter()
        .flat_map(|e| &e.children)
        .filter(|c| matches!(c.outcome, ChildOutcome::Pushed { .. }))
        .count() as u64;
    assert_eq!(pushes + 1, r.generated, "seed plus one per push");
    assert_eq!(r.trace.expansions.len() as u64, r.expanded);
    assert_eq!(r.trace.metadata.total_generated, r.generated);
    assert!(r.trace.expansions.last().unwrap().is_goal);
}
