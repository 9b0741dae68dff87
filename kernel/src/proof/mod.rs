//! Proof module: canonical serialization and content hashing.
//!
//! Depends on nothing internal. Graph, trace and report digests all flow
//! through `canon` then `hash`.

pub mod canon;
pub mod hash;
