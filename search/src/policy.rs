//! Search policy types.

use wayfind_kernel::proof::canon::canonical_json_bytes;
use wayfind_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};

use crate::error::SearchError;

/// Per-call configuration for [`crate::search::search`].
///
/// The default reproduces the base kernel: inline paths, cost-so-far
/// relaxation, no generation cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPolicy {
    /// How the returned path is reconstructed.
    pub path_tracking: PathTracking,
    /// When a neighbour is pushed onto the frontier.
    pub relaxation: Relaxation,
    /// Abort after this many frontier insertions (seed included).
    pub max_generated: Option<u64>,
    /// Record per-expansion events in the trace. Metadata is always kept.
    pub record_trace: bool,
}

impl SearchPolicy {
    /// Reject policies that cannot run.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] when `max_generated` is zero,
    /// since the budget could not admit the seed entry.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_generated == Some(0) {
            return Err(SearchError::InvalidPolicy {
                detail: "max_generated must admit at least the seed entry".into(),
            });
        }
        Ok(())
    }

    /// JSON echo used in traces and reports.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "max_generated": self.max_generated,
            "path_tracking": self.path_tracking.as_str(),
            "record_trace": self.record_trace,
            "relaxation": self.relaxation.as_str(),
        })
    }

    /// Content hash of the policy echo.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Serialization`] if canonicalization fails.
    pub fn digest(&self) -> Result<ContentHash, SearchError> {
        let bytes = canonical_json_bytes(&self.to_json_value())?;
        Ok(canonical_hash(HashDomain::SearchPolicy, &bytes))
    }
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            path_tracking: PathTracking::Inline,
            relaxation: Relaxation::CostSoFar,
            max_generated: None,
            record_trace: true,
        }
    }
}

/// Path reconstruction strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathTracking {
    /// Every frontier entry carries its full start-to-node path.
    Inline,
    /// A parent map is updated on each strict cost improvement and walked
    /// from goal to start after termination.
    ParentPointers,
}

impl PathTracking {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inline => "inline",
            Self::ParentPointers => "parent_pointers",
        }
    }
}

/// Frontier insertion rule for neighbours that are not yet expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relaxation {
    /// Push only when the tentative cost strictly beats the best cost
    /// already pushed for that neighbour (Dijkstra-style).
    CostSoFar,
    /// Push every unexpanded neighbour; stale pops are discarded later.
    Unconditional,
}

impl Relaxation {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CostSoFar => "cost_so_far",
            Self::Unconditional => "unconditional",
        }
    }
}
