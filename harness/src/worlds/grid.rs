//! `GridWorld`: robot path finding on an obstacle matrix.
//!
//! Cells hold 0 (open) or 1 (obstacle). Each open cell lists the moves the
//! robot may take from it (`U`, `D`, `L`, `R`); a move is an edge of weight 1
//! when it stays in bounds and lands on an open cell. The heuristic is the
//! Manhattan or Chebyshev distance to the goal.

use std::collections::BTreeMap;
use std::fmt;

use wayfind_kernel::graph::Graph;
use wayfind_kernel::heuristic::{FnHeuristic, Heuristic};

use crate::scenario::Scenario;

/// A grid coordinate. Ordered row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One robot step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Parse `U`, `D`, `L` or `R` (case-insensitive).
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'U' => Some(Self::Up),
            'D' => Some(Self::Down),
            'L' => Some(Self::Left),
            'R' => Some(Self::Right),
            _ => None,
        }
    }

    /// Target of this move from `cell`, or `None` if it leaves the grid.
    #[must_use]
    pub fn apply(self, cell: Cell, rows: usize, cols: usize) -> Option<Cell> {
        let (row, col) = match self {
            Self::Up => (cell.row.checked_sub(1)?, cell.col),
            Self::Down => (cell.row + 1, cell.col),
            Self::Left => (cell.row, cell.col.checked_sub(1)?),
            Self::Right => (cell.row, cell.col + 1),
        };
        (row < rows && col < cols).then_some(Cell { row, col })
    }
}

/// Distance metric for the heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// `|dr| + |dc|`. Admissible for 4-way unit moves.
    Manhattan,
    /// `max(|dr|, |dc|)`. Admissible but weaker for 4-way moves.
    Chebyshev,
}

impl Metric {
    #[must_use]
    pub fn distance(self, a: Cell, b: Cell) -> f64 {
        let dr = a.row.abs_diff(b.row);
        let dc = a.col.abs_diff(b.col);
        let d = match self {
            Self::Manhattan => dr + dc,
            Self::Chebyshev => dr.max(dc),
        };
        #[allow(clippy::cast_precision_loss)]
        let d = d as f64;
        d
    }
}

/// Error building a grid world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The matrix is empty or its rows differ in length.
    RaggedMatrix,
    /// A matrix entry is neither 0 nor 1.
    InvalidCell { cell: Cell, value: u8 },
    /// A move string contains something other than `U`/`D`/`L`/`R`.
    InvalidMove { cell: Cell, token: String },
    /// A referenced cell lies outside the matrix.
    OutOfBounds { cell: Cell },
    /// Start or goal is an obstacle.
    BlockedEndpoint { cell: Cell },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RaggedMatrix => write!(f, "matrix must be non-empty and rectangular"),
            Self::InvalidCell { cell, value } => {
                write!(f, "cell {cell} holds {value}, expected 0 or 1")
            }
            Self::InvalidMove { cell, token } => {
                write!(f, "cell {cell} has invalid move {token:?}")
            }
            Self::OutOfBounds { cell } => write!(f, "cell {cell} is outside the grid"),
            Self::BlockedEndpoint { cell } => write!(f, "endpoint {cell} is an obstacle"),
        }
    }
}

impl std::error::Error for GridError {}

/// Inputs for [`GridWorld::build`].
#[derive(Debug, Clone)]
pub struct GridSpec {
    /// Row-major 0/1 matrix.
    pub matrix: Vec<Vec<u8>>,
    /// Allowed moves per cell, e.g. `"U R"`. Cells absent here allow all four.
    pub moves: BTreeMap<Cell, String>,
    pub start: Cell,
    pub goal: Cell,
    pub metric: Metric,
}

type CellHeuristic = FnHeuristic<Box<dyn Fn(&Cell) -> f64 + Send + Sync>>;

/// A grid compiled into a unit-weight graph.
pub struct GridWorld {
    graph: Graph<Cell>,
    heuristic: CellHeuristic,
    start: Cell,
    goal: Cell,
    metric: Metric,
}

impl GridWorld {
    /// Compile `spec` into a graph.
    ///
    /// Every open cell becomes a node. Moves that leave the grid or hit an
    /// obstacle are dropped silently, matching a robot that simply cannot
    /// take them.
    ///
    /// # Errors
    ///
    /// Returns [`GridError`] for malformed matrices, move strings or
    /// endpoints.
    pub fn build(spec: &GridSpec) -> Result<Self, GridError> {
        let rows = spec.matrix.len();
        let cols = spec.matrix.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 || spec.matrix.iter().any(|r| r.len() != cols) {
            return Err(GridError::RaggedMatrix);
        }
        for (row, values) in spec.matrix.iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                if value > 1 {
                    return Err(GridError::InvalidCell {
                        cell: Cell::new(row, col),
                        value,
                    });
                }
            }
        }
        let open = |c: Cell| spec.matrix[c.row][c.col] == 0;
        let in_bounds = |c: Cell| c.row < rows && c.col < cols;

        for endpoint in [spec.start, spec.goal] {
            if !in_bounds(endpoint) {
                return Err(GridError::OutOfBounds { cell: endpoint });
            }
            if !open(endpoint) {
                return Err(GridError::BlockedEndpoint { cell: endpoint });
            }
        }

        let mut allowed: BTreeMap<Cell, Vec<Move>> = BTreeMap::new();
        for (&cell, text) in &spec.moves {
            if !in_bounds(cell) {
                return Err(GridError::OutOfBounds { cell });
            }
            allowed.insert(cell, parse_moves(cell, text)?);
        }

        let mut graph = Graph::new();
        for row in 0..rows {
            for col in 0..cols {
                let cell = Cell::new(row, col);
                if !open(cell) {
                    continue;
                }
                graph.add_node(cell);
                let moves = allowed.get(&cell).map_or(&Move::ALL[..], Vec::as_slice);
                for m in moves {
                    if let Some(next) = m.apply(cell, rows, cols) {
                        if open(next) {
                            graph.add_edge(cell, next, 1.0);
                        }
                    }
                }
            }
        }
        tracing::debug!(
            rows,
            cols,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "compiled grid world"
        );

        let goal = spec.goal;
        let metric = spec.metric;
        Ok(Self {
            graph,
            heuristic: FnHeuristic(Box::new(move |c: &Cell| metric.distance(*c, goal))),
            start: spec.start,
            goal,
            metric,
        })
    }

    /// A 4x4 demo with one gap in the second row.
    ///
    /// ```text
    /// 0 0 0 0
    /// 1 1 0 1
    /// 0 0 0 0
    /// 0 1 1 0
    /// ```
    ///
    /// # Errors
    ///
    /// Never fails for the built-in matrix; the `Result` mirrors
    /// [`GridWorld::build`].
    pub fn demo(metric: Metric) -> Result<Self, GridError> {
        Self::build(&GridSpec {
            matrix: vec![
                vec![0, 0, 0, 0],
                vec![1, 1, 0, 1],
                vec![0, 0, 0, 0],
                vec![0, 1, 1, 0],
            ],
            moves: BTreeMap::new(),
            start: Cell::new(0, 0),
            goal: Cell::new(3, 3),
            metric,
        })
    }

    #[must_use]
    pub fn metric(&self) -> Metric {
        self.metric
    }
}

fn parse_moves(cell: Cell, text: &str) -> Result<Vec<Move>, GridError> {
    text.split_whitespace()
        .map(|token| {
            let mut chars = token.chars();
            match (chars.next().and_then(Move::from_char), chars.next()) {
                (Some(m), None) => Ok(m),
                _ => Err(GridError::InvalidMove {
                    cell,
                    token: token.to_string(),
                }),
            }
        })
        .collect()
}

impl Scenario for GridWorld {
    type Node = Cell;

    fn scenario_id(&self) -> &str {
        match self.metric {
            Metric::Manhattan => "grid_manhattan",
            Metric::Chebyshev => "grid_chebyshev",
        }
    }

    fn graph(&self) -> &Graph<Cell> {
        &self.graph
    }

    fn heuristic(&self) -> &dyn Heuristic<Cell> {
        &self.heuristic
    }

    fn start(&self) -> Cell {
        self.start
    }

    fn goal(&self) -> Cell {
        self.goal
    }
}
