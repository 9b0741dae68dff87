//! Binary that runs the strategy comparison and prints deterministic
//! output lines for cross-process verification.
//!
//! Usage: `search_fixture [document.json]`
//!
//! Without an argument the built-in worlds run (textbook, letters,
//! grid_manhattan). With one, the graph document at that path runs alone.
//!
//! Output: `<scenario>.<key>=<value>` lines, one scenario after another.
//! Logs go to stderr, filtered by `RUST_LOG`.

use std::path::Path;

use tracing_subscriber::EnvFilter;
use wayfind_harness::document::GraphDocument;
use wayfind_harness::policy::CompareConfig;
use wayfind_harness::runner::{compare, report_bundle};
use wayfind_harness::scenario::Scenario;
use wayfind_harness::worlds::grid::{GridWorld, Metric};
use wayfind_harness::worlds::letters::Letters;
use wayfind_harness::worlds::textbook::Textbook;
use wayfind_kernel::cost::format_cost;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = CompareConfig::default();
    if let Some(path) = std::env::args().nth(1) {
        let text = std::fs::read_to_string(Path::new(&path))
            .unwrap_or_else(|e| panic!("cannot read {path}: {e}"));
        let doc = GraphDocument::from_json_str(&text).expect("invalid graph document");
        print_scenario(&doc, &config);
        return;
    }

    print_scenario(&Textbook::new(), &config);
    print_scenario(&Letters::new(), &config);
    print_scenario(
        &GridWorld::demo(Metric::Manhattan).expect("demo grid builds"),
        &config,
    );
}

fn print_scenario<S: Scenario>(scenario: &S, config: &CompareConfig) {
    let report = compare(scenario, config).expect("comparison failed");
    let bundle = report_bundle(&report).expect("bundle assembly failed");
    let id = &report.scenario_id;

    println!("{id}.graph_digest={}", report.graph_digest);
    println!("{id}.report_digest={}", report.digest().expect("report digest"));
    println!("{id}.bundle_digest={}", bundle.digest);
    for outcome in &report.outcomes {
        let name = outcome.strategy.as_str();
        println!("{id}.{name}.path={}", outcome.path.join(","));
        println!("{id}.{name}.cost={}", format_cost(outcome.cost));
        println!("{id}.{name}.generated={}", outcome.generated);
        if let Some(trace) = &outcome.trace {
            println!("{id}.{name}.trace_digest={}", trace.digest().expect("trace digest"));
        }
    }
}
