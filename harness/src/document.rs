//! Graph documents: JSON input for ad-hoc scenarios.
//!
//! ```json
//! {
//!   "edges": { "a": [["b", 1.5], ["c", "inf"]], "b": [] },
//!   "heuristic": { "a": 2, "b": 0, "c": "inf" },
//!   "start": "a",
//!   "goal": "b"
//! }
//! ```
//!
//! Weights and estimates are JSON numbers or the strings `"inf"`/`"-inf"`.
//! `heuristic` is optional; without it A* runs with a zero heuristic.
//! Parsing is fail-closed: unknown top-level keys, malformed rows and
//! negative or NaN weights are all rejected.

use wayfind_kernel::cost::{format_cost, parse_cost};
use wayfind_kernel::graph::{Graph, GraphError};
use wayfind_kernel::heuristic::{Heuristic, HeuristicTable, ZeroHeuristic};

use crate::scenario::Scenario;

const KNOWN_KEYS: &[&str] = &["edges", "goal", "heuristic", "id", "start"];

/// Error loading a graph document.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentError {
    /// The bytes are not valid JSON.
    Parse { detail: String },
    /// A required top-level field is missing or has the wrong JSON type.
    MissingField { field: &'static str },
    /// A top-level key is not part of the document format.
    UnknownField { field: String },
    /// An edge row is not a `[target, weight]` pair.
    InvalidEdge { from: String, detail: String },
    /// A weight or estimate is neither a number nor `"inf"`.
    InvalidNumber { context: String },
    /// The graph failed structural validation.
    InvalidGraph(GraphError),
}

impl std::fmt::Display for DocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse { detail } => write!(f, "document is not valid JSON: {detail}"),
            Self::MissingField { field } => write!(f, "missing or mistyped field \"{field}\""),
            Self::UnknownField { field } => write!(f, "unknown field \"{field}\""),
            Self::InvalidEdge { from, detail } => write!(f, "invalid edge from {from}: {detail}"),
            Self::InvalidNumber { context } => write!(f, "invalid number in {context}"),
            Self::InvalidGraph(e) => write!(f, "invalid graph: {e}"),
        }
    }
}

impl std::error::Error for DocumentError {}

impl From<GraphError> for DocumentError {
    fn from(e: GraphError) -> Self {
        Self::InvalidGraph(e)
    }
}

/// A scenario loaded from JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphDocument {
    pub id: String,
    pub graph: Graph<String>,
    pub heuristic: Option<HeuristicTable<String>>,
    pub start: String,
    pub goal: String,
}

impl GraphDocument {
    /// Parse a document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError`] for any malformed or invalid content.
    pub fn from_json_str(text: &str) -> Result<Self, DocumentError> {
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|e| DocumentError::Parse {
                detail: e.to_string(),
            })?;
        Self::from_json_value(&value)
    }

    /// Parse a document from an already-decoded JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError`] for any malformed or invalid content.
    pub fn from_json_value(value: &serde_json::Value) -> Result<Self, DocumentError> {
        let obj = value
            .as_object()
            .ok_or(DocumentError::MissingField { field: "edges" })?;
        if let Some(unknown) = obj.keys().find(|k| !KNOWN_KEYS.contains(&k.as_str())) {
            return Err(DocumentError::UnknownField {
                field: unknown.clone(),
            });
        }

        let rows = obj
            .get("edges")
            .and_then(serde_json::Value::as_object)
            .ok_or(DocumentError::MissingField { field: "edges" })?;
        let mut graph = Graph::new();
        for (from, row) in rows {
            graph.add_node(from.clone());
            let edges = row.as_array().ok_or_else(|| DocumentError::InvalidEdge {
                from: from.clone(),
                detail: "edge list is not an array".into(),
            })?;
            for edge in edges {
                let (to, weight) = parse_edge(from, edge)?;
                graph.add_edge(from.clone(), to, weight);
            }
        }
        graph.validate()?;

        let heuristic = match obj.get("heuristic") {
            None | Some(serde_json::Value::Null) => None,
            Some(serde_json::Value::Object(entries)) => {
                let mut table = HeuristicTable::new();
                for (node, estimate) in entries {
                    let h = parse_number(estimate).ok_or_else(|| DocumentError::InvalidNumber {
                        context: format!("heuristic for {node}"),
                    })?;
                    table.insert(node.clone(), h);
                }
                Some(table)
            }
            Some(_) => return Err(DocumentError::MissingField { field: "heuristic" }),
        };

        let text_field = |field: &'static str| {
            obj.get(field)
                .and_then(serde_json::Value::as_str)
                .map(str::to_string)
                .ok_or(DocumentError::MissingField { field })
        };
        let start = text_field("start")?;
        let goal = text_field("goal")?;
        let id = match obj.get("id") {
            None => "document".to_string(),
            Some(_) => text_field("id")?,
        };

        tracing::debug!(
            id = %id,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "loaded graph document"
        );

        Ok(Self {
            id,
            graph,
            heuristic,
            start,
            goal,
        })
    }

    /// JSON view in the same shape `from_json_value` accepts.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        let edges: serde_json::Map<String, serde_json::Value> = self
            .graph
            .rows()
            .map(|(from, edges)| {
                let row: Vec<serde_json::Value> = edges
                    .iter()
                    .map(|e| serde_json::json!([e.to, weight_to_json(e.weight)]))
                    .collect();
                (from.clone(), serde_json::Value::Array(row))
            })
            .collect();
        let mut doc = serde_json::json!({
            "edges": edges,
            "goal": self.goal,
            "id": self.id,
            "start": self.start,
        });
        if let Some(table) = &self.heuristic {
            doc["heuristic"] = table.to_json_value();
        }
        doc
    }
}

fn parse_edge(from: &str, edge: &serde_json::Value) -> Result<(String, f64), DocumentError> {
    let invalid = |detail: &str| DocumentError::InvalidEdge {
        from: from.to_string(),
        detail: detail.to_string(),
    };
    let pair = edge
        .as_array()
        .filter(|p| p.len() == 2)
        .ok_or_else(|| invalid("expected [target, weight]"))?;
    let to = pair[0]
        .as_str()
        .ok_or_else(|| invalid("target is not a string"))?;
    let weight = parse_number(&pair[1]).ok_or_else(|| DocumentError::InvalidNumber {
        context: format!("edge {from} -> {to}"),
    })?;
    Ok((to.to_string(), weight))
}

fn parse_number(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => parse_cost(s),
        _ => None,
    }
}

fn weight_to_json(weight: f64) -> serde_json::Value {
    if weight.is_finite() {
        serde_json::json!(weight)
    } else {
        serde_json::Value::String(format_cost(weight))
    }
}

impl Scenario for GraphDocument {
    type Node = String;

    fn scenario_id(&self) -> &str {
        &self.id
    }

    fn graph(&self) -> &Graph<String> {
        &self.graph
    }

    fn heuristic(&self) -> &dyn Heuristic<String> {
        if let Some(table) = &self.heuristic {
            return table;
        }
        &ZeroHeuristic
    }

    fn start(&self) -> String {
        self.start.clone()
    }

    fn goal(&self) -> String {
        self.goal.clone()
    }
}
