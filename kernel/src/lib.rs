//! Wayfind Kernel: the immutable inputs of a graph search.
//!
//! # API Surface
//!
//! - [`graph::Graph`] -- weighted adjacency lists keyed by node id
//! - [`heuristic::Heuristic`] -- per-node remaining-cost estimates
//! - [`proof::canon::canonical_json_bytes`] -- the single canonicalizer
//! - [`proof::hash::canonical_hash`] -- domain-separated SHA-256 digests
//!
//! # Module Dependency Direction
//!
//! `cost`, `proof` ← `graph` ← `heuristic`
//!
//! One-way only. The kernel contains no search logic; `wayfind_search`
//! consumes these types read-only.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cost;
pub mod graph;
pub mod heuristic;
pub mod proof;
