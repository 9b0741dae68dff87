//! Scenario implementations for the harness runner.

pub mod grid;
pub mod letters;
pub mod textbook;
