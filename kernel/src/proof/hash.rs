//! Content hashes with domain separation.
//!
//! Every digest in the workspace is `sha256(domain || bytes)` where `domain`
//! is a null-terminated prefix selected through [`HashDomain`]. Distinct
//! domains keep a graph digest from ever colliding with a trace digest over
//! the same bytes.

use sha2::{Digest, Sha256};

/// A content-addressed hash with algorithm identifier.
///
/// Format: `"algorithm:hex_digest"` (e.g., `"sha256:abcdef..."`).
///
/// Invariant: the inner string contains a `:` separator with non-empty
/// substrings on both sides (enforced by [`ContentHash::parse`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash {
    full: String,
    colon: usize,
}

impl ContentHash {
    /// Parse from `"algorithm:hex"` format.
    ///
    /// Returns `None` if the colon is missing or either side is empty.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let colon = s.find(':')?;
        if colon == 0 || colon == s.len() - 1 {
            return None;
        }
        Some(Self {
            full: s.to_string(),
            colon,
        })
    }

    /// The algorithm portion (e.g., "sha256").
    #[must_use]
    pub fn algorithm(&self) -> &str {
        &self.full[..self.colon]
    }

    /// The hex digest portion.
    #[must_use]
    pub fn hex_digest(&self) -> &str {
        &self.full[self.colon + 1..]
    }

    /// The full string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.full
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full)
    }
}

/// Typed domain separator for [`canonical_hash`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashDomain {
    /// Canonical JSON of a [`crate::graph::Graph`].
    Graph,
    /// Canonical JSON of a [`crate::heuristic::HeuristicTable`].
    Heuristic,
    /// Canonical JSON of a search policy snapshot.
    SearchPolicy,
    /// Canonical JSON of an expansion trace.
    SearchTrace,
    /// Canonical JSON of a strategy comparison report.
    Report,
    /// A single file inside a report bundle.
    BundleArtifact,
    /// The digest basis of a report bundle.
    BundleDigest,
}

impl HashDomain {
    /// All domains in declaration order.
    pub const ALL: &'static [HashDomain] = &[
        Self::Graph,
        Self::Heuristic,
        Self::SearchPolicy,
        Self::SearchTrace,
        Self::Report,
        Self::BundleArtifact,
        Self::BundleDigest,
    ];

    /// The raw domain-separator bytes (null-terminated).
    #[must_use]
    pub const fn as_bytes(&self) -> &'static [u8] {
        match self {
            Self::Graph => b"WAYFIND::GRAPH::V1\0",
            Self::Heuristic => b"WAYFIND::HEURISTIC::V1\0",
            Self::SearchPolicy => b"WAYFIND::SEARCH_POLICY::V1\0",
            Self::SearchTrace => b"WAYFIND::SEARCH_TRACE::V1\0",
            Self::Report => b"WAYFIND::REPORT::V1\0",
            Self::BundleArtifact => b"WAYFIND::BUNDLE_ARTIFACT::V1\0",
            Self::BundleDigest => b"WAYFIND::BUNDLE_DIGEST::V1\0",
        }
    }
}

/// Compute `sha256(domain || data)` as a [`ContentHash`].
#[must_use]
pub fn canonical_hash(domain: HashDomain, data: &[u8]) -> ContentHash {
    let mut hasher = Sha256::new();
    hasher.update(domain.as_bytes());
    hasher.update(data);
    let hex_digest = hex::encode(hasher.finalize());
    let full = format!("sha256:{hex_digest}");
    ContentHash { colon: 6, full }
}
