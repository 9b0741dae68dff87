//! Wayfind Search: best-first graph search with an auditable expansion trace.
//!
//! This crate provides the search layer. It depends only on `wayfind_kernel`;
//! it does NOT depend on `wayfind_harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! wayfind_kernel  ←  wayfind_search  ←  wayfind_harness
//! (graph, hashes)    (kernels, trace)    (scenarios, reports, bundles)
//! ```
//!
//! # Key types
//!
//! - [`search::search`] -- uniform-cost / A* kernel with lazy deletion
//! - [`uninformed::bfs`], [`uninformed::dfs`] -- comparison baselines
//! - [`frontier::BestFirstFrontier`] -- min-priority frontier + expanded set
//! - [`node::FrontierKey`] -- total order `(priority, depth, creation_order)`
//! - [`policy::SearchPolicy`] -- path tracking, relaxation, generation budget
//! - [`trace::SearchTrace`] -- expansion-event audit log
//! - [`local::hill_climb`] -- 2-opt local search over closed tours

#![forbid(unsafe_code)]

pub mod error;
pub mod frontier;
pub mod local;
pub mod node;
pub mod policy;
pub mod search;
pub mod trace;
pub mod uninformed;
