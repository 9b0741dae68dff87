//! Best-first frontier with lazy deletion.
//!
//! Uses `BTreeSet`/`BTreeMap` (not `HashSet`/`HashMap`) for the expanded set
//! and best-known costs so any iteration at serialization boundaries is
//! deterministic.
//!
//! Stale entries are never removed eagerly. A node may sit in the heap
//! several times; the kernel pops, checks [`BestFirstFrontier::is_expanded`]
//! and discards the stale copy.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap};

use crate::node::{FrontierKey, SearchNode};

/// A frontier entry wrapping a node with its ordering key.
///
/// `BinaryHeap` is a max-heap, so we use `Reverse<FrontierKey>` to get
/// min-heap behavior (lowest priority first).
#[derive(Debug)]
struct FrontierEntry<N> {
    key: Reverse<FrontierKey>,
    node: SearchNode<N>,
}

impl<N> PartialEq for FrontierEntry<N> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<N> Eq for FrontierEntry<N> {}

impl<N> PartialOrd for FrontierEntry<N> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<N> Ord for FrontierEntry<N> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

/// Best-first frontier manager.
///
/// Maintains:
/// - A `BinaryHeap` for O(log n) pop of the best entry
/// - A `BTreeSet<N>` of expanded (finalized) nodes
/// - A `BTreeMap<N, f64>` of the cheapest cost pushed so far per node
pub struct BestFirstFrontier<N> {
    heap: BinaryHeap<FrontierEntry<N>>,
    expanded: BTreeSet<N>,
    best_cost: BTreeMap<N, f64>,
    high_water: u64,
}

impl<N: Ord + Clone> BestFirstFrontier<N> {
    /// Create a new empty frontier.
    #[must_use]
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            expanded: BTreeSet::new(),
            best_cost: BTreeMap::new(),
            high_water: 0,
        }
    }

    /// Push an entry. Never deduplicates; staleness is resolved on pop.
    pub fn push(&mut self, node: SearchNode<N>) {
        self.heap.push(FrontierEntry {
            key: Reverse(FrontierKey::from(&node)),
            node,
        });
        let size = self.heap.len() as u64;
        if size > self.high_water {
            self.high_water = size;
        }
    }

    /// Pop the best (lowest key) entry, stale or not.
    #[must_use]
    pub fn pop(&mut self) -> Option<SearchNode<N>> {
        self.heap.pop().map(|e| e.node)
    }

    /// Finalize `node`. Returns `false` if it was already expanded.
    pub fn mark_expanded(&mut self, node: N) -> bool {
        self.expanded.insert(node)
    }

    /// Whether `node` has been finalized.
    #[must_use]
    pub fn is_expanded(&self, node: &N) -> bool {
        self.expanded.contains(node)
    }

    /// Number of finalized nodes.
    #[must_use]
    pub fn expanded_count(&self) -> usize {
        self.expanded.len()
    }

    /// Whether `g_cost` is strictly cheaper than anything pushed for `node`.
    ///
    /// An unseen node counts as cost `+inf`, so an infinite `g_cost` never
    /// improves.
    #[must_use]
    pub fn improves(&self, node: &N, g_cost: f64) -> bool {
        g_cost < self.best_cost(node).unwrap_or(f64::INFINITY)
    }

    /// Record `g_cost` as the cheapest known arrival at `node`.
    pub fn record_cost(&mut self, node: N, g_cost: f64) {
        self.best_cost.insert(node, g_cost);
    }

    /// Cheapest recorded arrival at `node`.
    #[must_use]
    pub fn best_cost(&self, node: &N) -> Option<f64> {
        self.best_cost.get(node).copied()
    }

    /// Current heap size, stale entries included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the heap is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// High-water mark of heap size.
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }
}

impl<N: Ord + Clone> Default for BestFirstFrontier<N> {
    fn default() -> Self {
        Self::new()
    }
}
