//! Comparison configuration: which strategies run, and under which search
//! policy the best-first ones run.
//!
//! The config is echoed into every report, so the report digest commits to
//! the conditions the comparison ran under.

use std::collections::BTreeSet;

use wayfind_search::error::SearchError;
use wayfind_search::policy::SearchPolicy;

/// A search strategy the runner can execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Strategy {
    AStar,
    UniformCost,
    BreadthFirst,
    DepthFirst,
}

impl Strategy {
    /// Every strategy, in report order.
    pub const ALL: [Strategy; 4] = [
        Strategy::AStar,
        Strategy::UniformCost,
        Strategy::BreadthFirst,
        Strategy::DepthFirst,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AStar => "astar",
            Self::UniformCost => "uniform_cost",
            Self::BreadthFirst => "breadth_first",
            Self::DepthFirst => "depth_first",
        }
    }

    /// Whether this strategy runs on the best-first kernel and records a trace.
    #[must_use]
    pub fn is_best_first(self) -> bool {
        matches!(self, Self::AStar | Self::UniformCost)
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error validating a [`CompareConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No strategies were selected.
    NoStrategies,
    /// A strategy appears more than once.
    DuplicateStrategy { strategy: Strategy },
    /// The embedded search policy is invalid.
    Policy(SearchError),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoStrategies => write!(f, "at least one strategy must be selected"),
            Self::DuplicateStrategy { strategy } => {
                write!(f, "strategy {strategy} selected more than once")
            }
            Self::Policy(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Runner configuration for [`crate::runner::compare`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareConfig {
    /// Policy for A* and uniform-cost runs. BFS/DFS ignore it.
    pub search_policy: SearchPolicy,
    /// Strategies to run, in report order.
    pub strategies: Vec<Strategy>,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            search_policy: SearchPolicy::default(),
            strategies: Strategy::ALL.to_vec(),
        }
    }
}

impl CompareConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError`] for an empty or repeated strategy list, or
    /// a search policy that fails its own validation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.strategies.is_empty() {
            return Err(ConfigError::NoStrategies);
        }
        let mut seen = BTreeSet::new();
        for &strategy in &self.strategies {
            if !seen.insert(strategy) {
                return Err(ConfigError::DuplicateStrategy { strategy });
            }
        }
        self.search_policy.validate().map_err(ConfigError::Policy)
    }

    /// JSON echo embedded in reports.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        let strategies: Vec<&str> = self.strategies.iter().map(|s| s.as_str()).collect();
        serde_json::json!({
            "search_policy": self.search_policy.to_json_value(),
            "strategies": strategies,
        })
    }
}
