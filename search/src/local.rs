//! 2-opt hill climbing over closed tours.
//!
//! A route lists every city except the fixed start city; the tour is
//! `start -> route[0] -> ... -> route[n-1] -> start`.

use std::collections::{BTreeMap, BTreeSet};

/// Errors from tour evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalSearchError {
    /// The table has no distance for this city pair.
    MissingDistance { from: usize, to: usize },
    /// A restart search was asked to run zero climbs.
    NoRestarts,
}

impl std::fmt::Display for LocalSearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingDistance { from, to } => {
                write!(f, "no distance between cities {from} and {to}")
            }
            Self::NoRestarts => write!(f, "restart count must be at least 1"),
        }
    }
}

impl std::error::Error for LocalSearchError {}

/// Symmetric city-to-city distances.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistanceTable {
    distances: BTreeMap<(usize, usize), f64>,
}

impl DistanceTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the distance between `a` and `b` in both directions.
    pub fn insert(&mut self, a: usize, b: usize, distance: f64) {
        self.distances.insert((a, b), distance);
        self.distances.insert((b, a), distance);
    }

    /// Distance from `from` to `to`.
    ///
    /// # Errors
    ///
    /// [`LocalSearchError::MissingDistance`] if the pair is absent.
    pub fn distance(&self, from: usize, to: usize) -> Result<f64, LocalSearchError> {
        self.distances
            .get(&(from, to))
            .copied()
            .ok_or(LocalSearchError::MissingDistance { from, to })
    }

    /// Every city mentioned by the table, sorted.
    #[must_use]
    pub fn cities(&self) -> BTreeSet<usize> {
        self.distances.keys().flat_map(|&(a, b)| [a, b]).collect()
    }
}

/// A route at which no 2-opt neighbour is shorter.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalOptimum {
    /// Visiting order, start city excluded.
    pub route: Vec<usize>,
    /// Closed tour length through the start city.
    pub length: f64,
    /// Improving moves accepted on the way.
    pub steps: u64,
}

/// Length of the closed tour `start -> route... -> start`.
///
/// An empty route has length 0.
///
/// # Errors
///
/// [`LocalSearchError::MissingDistance`] for any leg without a distance.
pub fn tour_length(
    route: &[usize],
    table: &DistanceTable,
    start: usize,
) -> Result<f64, LocalSearchError> {
    let Some(&last) = route.last() else {
        return Ok(0.0);
    };
    let mut total = 0.0;
    let mut current = start;
    for &next in route {
        total += table.distance(current, next)?;
        current = next;
    }
    Ok(total + table.distance(last, start)?)
}

/// All routes obtained by reversing one segment `route[i..=j]`, `i < j`,
/// in `(i, j)` lexicographic order.
#[must_use]
pub fn two_opt_neighbors(route: &[usize]) -> Vec<Vec<usize>> {
    let n = route.len();
    let mut neighbors = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n.saturating_sub(1) {
        for j in (i + 1)..n {
            let mut candidate = route.to_vec();
            candidate[i..=j].reverse();
            neighbors.push(candidate);
        }
    }
    neighbors
}

/// First-improvement 2-opt descent from `route`.
///
/// Accepts the first strictly shorter neighbour in generation order and
/// restarts the scan from it, until no neighbour improves.
///
/// # Errors
///
/// [`LocalSearchError::MissingDistance`] if a candidate tour uses an
/// unknown leg.
pub fn hill_climb(
    route: &[usize],
    table: &DistanceTable,
    start: usize,
) -> Result<LocalOptimum, LocalSearchError> {
    let mut current = route.to_vec();
    let mut length = tour_length(&current, table, start)?;
    let mut steps = 0u64;

    'descent: loop {
        for candidate in two_opt_neighbors(&current) {
            let candidate_length = tour_length(&candidate, table, start)?;
            if candidate_length < length {
                current = candidate;
                length = candidate_length;
                steps += 1;
                tracing::debug!(length, steps, "accepted 2-opt move");
                continue 'descent;
            }
        }
        break;
    }

    Ok(LocalOptimum {
        route: current,
        length,
        steps,
    })
}

/// Run `restarts` climbs from seeded random routes and keep the shortest.
///
/// The route covers every city of `table` except `start`. Ties keep the
/// earliest optimum, so a given `seed` always yields the same answer.
///
/// # Errors
///
/// [`LocalSearchError::NoRestarts`] when `restarts == 0`, or any error
/// from [`hill_climb`].
pub fn hill_climb_with_restarts(
    table: &DistanceTable,
    start: usize,
    restarts: u32,
    seed: u64,
) -> Result<LocalOptimum, LocalSearchError> {
    if restarts == 0 {
        return Err(LocalSearchError::NoRestarts);
    }
    let cities: Vec<usize> = table.cities().into_iter().filter(|&c| c != start).collect();
    let mut rng = fastrand::Rng::with_seed(seed);

    let mut best: Option<LocalOptimum> = None;
    for _ in 0..restarts {
        let mut initial = cities.clone();
        rng.shuffle(&mut initial);
        let optimum = hill_climb(&initial, table, start)?;
        if !matches!(&best, Some(b) if b.length <= optimum.length) {
            best = Some(optimum);
        }
    }
    best.ok_or(LocalSearchError::NoRestarts)
}
