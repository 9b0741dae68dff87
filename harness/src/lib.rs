//! Wayfind Harness: scenario-level orchestration for the search kernels.
//!
//! The harness runs a scenario through every strategy the search crate
//! offers (`astar` → `uniform_cost` → `bfs` → `dfs`), collects a
//! comparison report, and packages it as a self-contained artifact bundle.
//!
//! The harness does NOT implement search logic; it delegates to
//! `wayfind_search`. Scenarios provide domain data only; the harness owns
//! orchestration.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod bundle;
pub mod bundle_dir;
pub mod document;
pub mod policy;
pub mod runner;
pub mod scenario;
pub mod worlds;
