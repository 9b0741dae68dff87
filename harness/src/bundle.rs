//! Report bundles: one comparison report and its traces under one digest.
//!
//! A bundle is exactly two canonical JSON documents, `report.json` and
//! `trace.json`. Each is hashed under [`HashDomain::BundleArtifact`], and the
//! bundle digest hashes the canonical digest basis
//!
//! ```text
//! {"report":"sha256:..","schema_version":"wayfind.bundle.v1","trace":"sha256:.."}
//! ```
//!
//! under [`HashDomain::BundleDigest`]. No file I/O here; see
//! [`crate::bundle_dir`] for the on-disk form.

use wayfind_kernel::proof::canon::{canonical_json_bytes, CanonError};
use wayfind_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};

use crate::runner::{REPORT_SCHEMA, TRACES_SCHEMA};

/// File name of the comparison report.
pub const REPORT_FILENAME: &str = "report.json";

/// File name of the best-first traces.
pub const TRACE_FILENAME: &str = "trace.json";

/// `schema_version` of the digest basis.
pub const BUNDLE_SCHEMA: &str = "wayfind.bundle.v1";

/// A comparison report packaged with its traces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportBundle {
    /// Canonical bytes of `report.json`.
    pub report: Vec<u8>,
    /// Canonical bytes of `trace.json`.
    pub traces: Vec<u8>,
    pub report_hash: ContentHash,
    pub traces_hash: ContentHash,
    /// `canonical_hash(BundleDigest, digest_basis)`.
    pub digest: ContentHash,
}

impl ReportBundle {
    /// Hash both documents and derive the bundle digest.
    ///
    /// The bytes are taken as given; [`verify_bundle`] checks that they are
    /// canonical and agree with each other.
    ///
    /// # Errors
    ///
    /// [`CanonError`] if the digest basis cannot be serialized.
    pub fn new(report: Vec<u8>, traces: Vec<u8>) -> Result<Self, CanonError> {
        let report_hash = canonical_hash(HashDomain::BundleArtifact, &report);
        let traces_hash = canonical_hash(HashDomain::BundleArtifact, &traces);
        let digest = canonical_hash(
            HashDomain::BundleDigest,
            &digest_basis(&report_hash, &traces_hash)?,
        );
        Ok(Self {
            report,
            traces,
            report_hash,
            traces_hash,
            digest,
        })
    }

    /// `(file name, bytes)` for both documents.
    #[must_use]
    pub fn files(&self) -> [(&'static str, &[u8]); 2] {
        [
            (REPORT_FILENAME, self.report.as_slice()),
            (TRACE_FILENAME, self.traces.as_slice()),
        ]
    }
}

fn digest_basis(report: &ContentHash, traces: &ContentHash) -> Result<Vec<u8>, CanonError> {
    canonical_json_bytes(&serde_json::json!({
        "report": report.as_str(),
        "schema_version": BUNDLE_SCHEMA,
        "trace": traces.as_str(),
    }))
}

/// Error from bundle verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleVerifyError {
    /// A stored document hash does not match its bytes.
    ContentHashMismatch {
        artifact: String,
        expected: String,
        actual: String,
    },
    /// The stored digest does not match the recomputed digest basis.
    DigestMismatch { expected: String, actual: String },
    ArtifactParseError { artifact: String, detail: String },
    ArtifactNotCanonical { artifact: String },
    /// A document carries a foreign `schema_version`.
    SchemaMismatch { artifact: String, found: String },
    /// The report declares a trace digest for a strategy that has no trace.
    TraceMissing { strategy: String },
    /// A recorded trace does not hash to the digest the report declares.
    TraceDigestMismatch {
        strategy: String,
        declared: String,
        recomputed: String,
    },
    CanonError { detail: String },
}

impl std::fmt::Display for BundleVerifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ContentHashMismatch {
                artifact,
                expected,
                actual,
            } => write!(
                f,
                "content hash mismatch for {artifact}: expected {expected}, got {actual}"
            ),
            Self::DigestMismatch { expected, actual } => {
                write!(f, "bundle digest mismatch: expected {expected}, got {actual}")
            }
            Self::ArtifactParseError { artifact, detail } => {
                write!(f, "{artifact} is not valid JSON: {detail}")
            }
            Self::ArtifactNotCanonical { artifact } => {
                write!(f, "{artifact} is not canonical JSON")
            }
            Self::SchemaMismatch { artifact, found } => {
                write!(f, "{artifact} has unexpected schema_version {found:?}")
            }
            Self::TraceMissing { strategy } => write!(f, "no trace recorded for {strategy}"),
            Self::TraceDigestMismatch {
                strategy,
                declared,
                recomputed,
            } => write!(
                f,
                "trace digest mismatch for {strategy}: declared {declared}, recomputed {recomputed}"
            ),
            Self::CanonError { detail } => write!(f, "canonical JSON error: {detail}"),
        }
    }
}

impl std::error::Error for BundleVerifyError {}

impl From<CanonError> for BundleVerifyError {
    fn from(e: CanonError) -> Self {
        Self::CanonError {
            detail: e.to_string(),
        }
    }
}

/// Check a bundle without re-running any search.
///
/// Both document hashes and the bundle digest must match the bytes, both
/// documents must be canonical JSON with the expected `schema_version`, and
/// every `trace_digest` the report declares must match the trace recorded
/// under that strategy in `trace.json`.
///
/// # Errors
///
/// Returns the first [`BundleVerifyError`] encountered.
pub fn verify_bundle(bundle: &ReportBundle) -> Result<(), BundleVerifyError> {
    for (name, bytes, stored) in [
        (REPORT_FILENAME, &bundle.report, &bundle.report_hash),
        (TRACE_FILENAME, &bundle.traces, &bundle.traces_hash),
    ] {
        let actual = canonical_hash(HashDomain::BundleArtifact, bytes);
        if &actual != stored {
            return Err(BundleVerifyError::ContentHashMismatch {
                artifact: name.to_string(),
                expected: stored.to_string(),
                actual: actual.to_string(),
            });
        }
    }

    let digest = canonical_hash(
        HashDomain::BundleDigest,
        &digest_basis(&bundle.report_hash, &bundle.traces_hash)?,
    );
    if digest != bundle.digest {
        return Err(BundleVerifyError::DigestMismatch {
            expected: bundle.digest.to_string(),
            actual: digest.to_string(),
        });
    }

    let report = parse_document(REPORT_FILENAME, &bundle.report, REPORT_SCHEMA)?;
    let traces = parse_document(TRACE_FILENAME, &bundle.traces, TRACES_SCHEMA)?;
    verify_trace_binding(&report, &traces)
}

fn parse_document(
    name: &str,
    bytes: &[u8],
    schema: &str,
) -> Result<serde_json::Value, BundleVerifyError> {
    let value: serde_json::Value =
        serde_json::from_slice(bytes).map_err(|e| BundleVerifyError::ArtifactParseError {
            artifact: name.to_string(),
            detail: e.to_string(),
        })?;
    if canonical_json_bytes(&value)? != bytes {
        return Err(BundleVerifyError::ArtifactNotCanonical {
            artifact: name.to_string(),
        });
    }
    let found = value["schema_version"].as_str().unwrap_or_default();
    if found != schema {
        return Err(BundleVerifyError::SchemaMismatch {
            artifact: name.to_string(),
            found: found.to_string(),
        });
    }
    Ok(value)
}

fn verify_trace_binding(
    report: &serde_json::Value,
    traces: &serde_json::Value,
) -> Result<(), BundleVerifyError> {
    let outcomes = report["outcomes"].as_array().map_or(&[][..], Vec::as_slice);
    for outcome in outcomes {
        let Some(declared) = outcome["trace_digest"].as_str() else {
            continue;
        };
        let strategy = outcome["strategy"].as_str().unwrap_or_default().to_string();
        let trace = &traces["traces"][strategy.as_str()];
        if trace.is_null() {
            return Err(BundleVerifyError::TraceMissing { strategy });
        }
        let recomputed = canonical_hash(HashDomain::SearchTrace, &canonical_json_bytes(trace)?);
        if recomputed.as_str() != declared {
            return Err(BundleVerifyError::TraceDigestMismatch {
                strategy,
                declared: declared.to_string(),
                recomputed: recomputed.to_string(),
            });
        }
    }
    Ok(())
}
