//! Harness runner: runs every configured strategy on one scenario and
//! assembles a comparison report.
//!
//! The runner uses ONLY kernel and search APIs. It does not implement any
//! search logic itself.
//!
//! # Pipeline
//!
//! ```text
//! config.validate() → graph.digest() → heuristic diagnostics
//!   → [search() | bfs() | dfs()] × strategies → bind graph digest into traces
//!   → ComparisonReport → report_bundle() (report.json + trace.json)
//! ```

use std::collections::BTreeMap;

use wayfind_kernel::cost::format_cost;
use wayfind_kernel::graph::NodeId;
use wayfind_kernel::heuristic::{admissibility_violations, consistency_violations};
use wayfind_kernel::proof::canon::{canonical_json_bytes, CanonError};
use wayfind_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};
use wayfind_search::error::SearchError;
use wayfind_search::search::{search, Mode};
use wayfind_search::trace::SearchTrace;
use wayfind_search::uninformed::{bfs, dfs};

use crate::bundle::ReportBundle;
use crate::policy::{CompareConfig, ConfigError, Strategy};
use crate::scenario::Scenario;

/// `schema_version` of `report.json`.
pub const REPORT_SCHEMA: &str = "wayfind.report.v1";
/// `schema_version` of `trace.json`.
pub const TRACES_SCHEMA: &str = "wayfind.traces.v1";

/// Error during a comparison run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    /// The comparison config failed validation.
    Config(ConfigError),
    /// A strategy rejected the scenario.
    Search {
        strategy: Strategy,
        error: SearchError,
    },
    /// Canonical JSON serialization failed.
    CanonFailed { detail: String },
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(e) => write!(f, "invalid comparison config: {e}"),
            Self::Search { strategy, error } => write!(f, "{strategy} failed: {error}"),
            Self::CanonFailed { detail } => write!(f, "canonical JSON error: {detail}"),
        }
    }
}

impl std::error::Error for RunError {}

impl From<ConfigError> for RunError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<CanonError> for RunError {
    fn from(e: CanonError) -> Self {
        Self::CanonFailed {
            detail: e.to_string(),
        }
    }
}

/// What one strategy produced.
#[derive(Debug, Clone)]
pub struct StrategyOutcome {
    pub strategy: Strategy,
    /// Node ids in `Display` form. Empty when the goal was not reached.
    pub path: Vec<String>,
    pub cost: f64,
    pub generated: u64,
    pub expanded: u64,
    pub goal_reached: bool,
    /// Expansion trace, for best-first strategies only.
    pub trace: Option<SearchTrace>,
}

/// Heuristic quality as measured against the scenario graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeuristicDiagnostics {
    /// Nodes whose estimate exceeds the exact remaining cost.
    pub admissibility_violations: Vec<String>,
    /// Edges `(u, v)` with `h(u) > w(u, v) + h(v)`.
    pub consistency_violations: Vec<(String, String)>,
}

impl HeuristicDiagnostics {
    #[must_use]
    pub fn is_admissible(&self) -> bool {
        self.admissibility_violations.is_empty()
    }

    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.consistency_violations.is_empty()
    }
}

/// Side-by-side results of every strategy on one scenario.
#[derive(Debug, Clone)]
pub struct ComparisonReport {
    pub scenario_id: String,
    pub start: String,
    pub goal: String,
    pub graph_digest: ContentHash,
    pub config: CompareConfig,
    pub heuristic: HeuristicDiagnostics,
    /// One entry per configured strategy, in config order.
    pub outcomes: Vec<StrategyOutcome>,
}

impl ComparisonReport {
    /// Outcome for `strategy`, if it was run.
    #[must_use]
    pub fn outcome(&self, strategy: Strategy) -> Option<&StrategyOutcome> {
        self.outcomes.iter().find(|o| o.strategy == strategy)
    }

    /// Report as JSON. Costs are strings; each best-first outcome carries
    /// the digest of its trace.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if a trace cannot be hashed.
    pub fn to_json_value(&self) -> Result<serde_json::Value, CanonError> {
        let mut outcomes = Vec::with_capacity(self.outcomes.len());
        for o in &self.outcomes {
            let mut entry = serde_json::json!({
                "cost": format_cost(o.cost),
                "expanded": o.expanded,
                "generated": o.generated,
                "goal_reached": o.goal_reached,
                "path": o.path,
                "strategy": o.strategy.as_str(),
            });
            if let Some(trace) = &o.trace {
                entry["trace_digest"] = serde_json::Value::String(trace.digest()?.to_string());
            }
            outcomes.push(entry);
        }
        let consistency: Vec<serde_json::Value> = self
            .heuristic
            .consistency_violations
            .iter()
            .map(|(u, v)| serde_json::json!([u, v]))
            .collect();

        Ok(serde_json::json!({
            "config": self.config.to_json_value(),
            "goal": self.goal,
            "graph_digest": self.graph_digest.as_str(),
            "heuristic": {
                "admissibility_violations": self.heuristic.admissibility_violations,
                "consistency_violations": consistency,
            },
            "outcomes": outcomes,
            "scenario_id": self.scenario_id,
            "schema_version": REPORT_SCHEMA,
            "start": self.start,
        }))
    }

    /// Canonical JSON bytes of [`Self::to_json_value`].
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value()?)
    }

    /// `canonical_hash(HashDomain::Report, canonical bytes)`.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        Ok(canonical_hash(
            HashDomain::Report,
            &self.to_canonical_json_bytes()?,
        ))
    }

    /// All recorded traces keyed by strategy name.
    #[must_use]
    pub fn traces_json_value(&self) -> serde_json::Value {
        let traces: BTreeMap<&str, serde_json::Value> = self
            .outcomes
            .iter()
            .filter_map(|o| Some((o.strategy.as_str(), o.trace.as_ref()?.to_json_value())))
            .collect();
        serde_json::json!({
            "schema_version": TRACES_SCHEMA,
            "traces": traces,
        })
    }
}

/// Run every strategy in `config` on `scenario`.
///
/// # Errors
///
/// - [`RunError::Config`] if `config.validate()` fails.
/// - [`RunError::Search`] for the first strategy that rejects the scenario
///   (unknown endpoint, missing heuristic entry).
/// - [`RunError::CanonFailed`] if the graph cannot be digested.
pub fn compare<S: Scenario>(
    scenario: &S,
    config: &CompareConfig,
) -> Result<ComparisonReport, RunError> {
    config.validate()?;

    let graph = scenario.graph();
    let start = scenario.start();
    let goal = scenario.goal();
    let graph_digest = graph.digest()?;

    let heuristic = HeuristicDiagnostics {
        admissibility_violations: admissibility_violations(scenario.heuristic(), graph, &goal)
            .iter()
            .map(ToString::to_string)
            .collect(),
        consistency_violations: consistency_violations(scenario.heuristic(), graph)
            .iter()
            .map(|(u, v)| (u.to_string(), v.to_string()))
            .collect(),
    };
    if !heuristic.is_admissible() {
        tracing::warn!(
            scenario = scenario.scenario_id(),
            violations = heuristic.admissibility_violations.len(),
            "heuristic is not admissible; A* may return a suboptimal path"
        );
    }

    let mut outcomes = Vec::with_capacity(config.strategies.len());
    for &strategy in &config.strategies {
        let outcome = run_strategy(scenario, config, strategy, &start, &goal, &graph_digest)
            .map_err(|error| RunError::Search { strategy, error })?;
        tracing::info!(
            scenario = scenario.scenario_id(),
            strategy = strategy.as_str(),
            cost = %format_cost(outcome.cost),
            generated = outcome.generated,
            expanded = outcome.expanded,
            "strategy finished"
        );
        outcomes.push(outcome);
    }

    Ok(ComparisonReport {
        scenario_id: scenario.scenario_id().to_string(),
        start: start.to_string(),
        goal: goal.to_string(),
        graph_digest,
        config: config.clone(),
        heuristic,
        outcomes,
    })
}

fn run_strategy<S: Scenario>(
    scenario: &S,
    config: &CompareConfig,
    strategy: Strategy,
    start: &S::Node,
    goal: &S::Node,
    graph_digest: &ContentHash,
) -> Result<StrategyOutcome, SearchError> {
    let graph = scenario.graph();
    let mode = match strategy {
        Strategy::AStar => Mode::AStar(scenario.heuristic()),
        Strategy::UniformCost => Mode::UniformCost,
        Strategy::BreadthFirst | Strategy::DepthFirst => {
            let result = if strategy == Strategy::BreadthFirst {
                bfs(graph, start, goal)?
            } else {
                dfs(graph, start, goal)?
            };
            return Ok(StrategyOutcome {
                strategy,
                goal_reached: !result.path.is_empty(),
                path: display_path(&result.path),
                cost: result.total_cost,
                generated: result.generated,
                expanded: result.expanded,
                trace: None,
            });
        }
    };

    let mut result = search(graph, start, goal, mode, &config.search_policy)?;
    result.trace.metadata.graph_digest = Some(graph_digest.to_string());
    Ok(StrategyOutcome {
        strategy,
        goal_reached: result.is_goal_reached(),
        path: display_path(&result.path),
        cost: result.total_cost,
        generated: result.generated,
        expanded: result.expanded,
        trace: Some(result.trace),
    })
}

fn display_path<N: NodeId>(path: &[N]) -> Vec<String> {
    path.iter().map(ToString::to_string).collect()
}

/// Package a report with its traces as a [`ReportBundle`].
///
/// # Errors
///
/// Returns [`RunError::CanonFailed`] if either document cannot be
/// serialized.
pub fn report_bundle(report: &ComparisonReport) -> Result<ReportBundle, RunError> {
    let bundle = ReportBundle::new(
        report.to_canonical_json_bytes()?,
        canonical_json_bytes(&report.traces_json_value())?,
    )?;
    tracing::debug!(
        scenario = %report.scenario_id,
        digest = %bundle.digest,
        "assembled report bundle"
    );
    Ok(bundle)
}
