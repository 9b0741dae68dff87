//! Report directories: a [`ReportBundle`] on disk.
//!
//! ```text
//! <dir>/
//!   report.json   comparison report, canonical JSON
//!   trace.json    best-first traces keyed by strategy, canonical JSON
//!   digest.txt    "sha256:<hex>" bundle digest
//! ```
//!
//! The directory path never enters a hash. Reading is fail-closed: a missing
//! file, any other file in the directory, or a `digest.txt` that disagrees
//! with the two documents is an error.

use std::path::Path;

use wayfind_kernel::proof::hash::ContentHash;

use crate::bundle::{
    verify_bundle, BundleVerifyError, ReportBundle, REPORT_FILENAME, TRACE_FILENAME,
};
use crate::runner::{report_bundle, ComparisonReport, RunError};

/// File holding the bundle digest.
pub const DIGEST_FILENAME: &str = "digest.txt";

const TEMP_PREFIX: &str = ".tmp_";

/// Error writing, reading or verifying a report directory.
#[derive(Debug)]
pub enum ReportDirError {
    Io { path: String, detail: String },
    /// One of the three expected files is absent.
    MissingFile { name: String },
    /// The directory holds a file that is not part of a report bundle.
    ExtraFile { name: String },
    /// `digest.txt` disagrees with the digest of the stored documents.
    DigestMismatch { stored: String, recomputed: String },
    /// The report could not be bundled.
    Run(RunError),
    /// The documents were read but failed [`verify_bundle`].
    Verify(BundleVerifyError),
}

impl std::fmt::Display for ReportDirError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, detail } => write!(f, "I/O error on {path}: {detail}"),
            Self::MissingFile { name } => write!(f, "missing {name}"),
            Self::ExtraFile { name } => write!(f, "unexpected file {name}"),
            Self::DigestMismatch { stored, recomputed } => {
                write!(f, "digest mismatch: stored={stored}, recomputed={recomputed}")
            }
            Self::Run(e) => write!(f, "{e}"),
            Self::Verify(e) => write!(f, "verification failed: {e}"),
        }
    }
}

impl std::error::Error for ReportDirError {}

impl From<RunError> for ReportDirError {
    fn from(e: RunError) -> Self {
        Self::Run(e)
    }
}

impl From<BundleVerifyError> for ReportDirError {
    fn from(e: BundleVerifyError) -> Self {
        Self::Verify(e)
    }
}

fn io_error(path: &Path, e: &std::io::Error) -> ReportDirError {
    ReportDirError::Io {
        path: path.display().to_string(),
        detail: e.to_string(),
    }
}

/// Write `bundle` into `dir`, creating it if needed.
///
/// The documents go first and `digest.txt` last, so an interrupted write
/// never leaves a digest vouching for files that are not there.
///
/// # Errors
///
/// [`ReportDirError::Io`].
pub fn write_bundle_dir(bundle: &ReportBundle, dir: &Path) -> Result<(), ReportDirError> {
    std::fs::create_dir_all(dir).map_err(|e| io_error(dir, &e))?;
    for (name, bytes) in bundle.files() {
        write_atomic(dir, name, bytes)?;
    }
    write_atomic(dir, DIGEST_FILENAME, bundle.digest.as_str().as_bytes())?;
    tracing::info!(dir = %dir.display(), digest = %bundle.digest, "wrote report directory");
    Ok(())
}

/// Bundle `report` and write it into `dir`. Returns the bundle digest.
///
/// # Errors
///
/// [`ReportDirError::Run`] if the report cannot be bundled, otherwise as
/// [`write_bundle_dir`].
pub fn write_report_dir(
    report: &ComparisonReport,
    dir: &Path,
) -> Result<ContentHash, ReportDirError> {
    let bundle = report_bundle(report)?;
    write_bundle_dir(&bundle, dir)?;
    Ok(bundle.digest)
}

/// Load a report directory.
///
/// Hashes are recomputed from the stored documents and the result must
/// match `digest.txt`. Document contents are not inspected; use
/// [`verify_bundle_dir`] for that.
///
/// # Errors
///
/// Returns the first [`ReportDirError`] found.
pub fn read_bundle_dir(dir: &Path) -> Result<ReportBundle, ReportDirError> {
    let entries = std::fs::read_dir(dir).map_err(|e| io_error(dir, &e))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_error(dir, &e))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with(TEMP_PREFIX) {
            continue;
        }
        if ![REPORT_FILENAME, TRACE_FILENAME, DIGEST_FILENAME].contains(&name.as_str()) {
            return Err(ReportDirError::ExtraFile { name });
        }
    }

    let report = read_required(dir, REPORT_FILENAME)?;
    let traces = read_required(dir, TRACE_FILENAME)?;
    let stored = read_required(dir, DIGEST_FILENAME)?;

    let bundle = ReportBundle::new(report, traces).map_err(RunError::from)?;
    let stored = String::from_utf8_lossy(&stored).trim().to_string();
    if stored != bundle.digest.as_str() {
        return Err(ReportDirError::DigestMismatch {
            stored,
            recomputed: bundle.digest.to_string(),
        });
    }
    Ok(bundle)
}

/// Read `dir`, then run [`verify_bundle`] on the result.
///
/// # Errors
///
/// Any [`read_bundle_dir`] error, or [`ReportDirError::Verify`].
pub fn verify_bundle_dir(dir: &Path) -> Result<ReportBundle, ReportDirError> {
    let bundle = read_bundle_dir(dir)?;
    verify_bundle(&bundle)?;
    Ok(bundle)
}

/// Write through a temp file in the same directory, then rename.
fn write_atomic(dir: &Path, name: &str, content: &[u8]) -> Result<(), ReportDirError> {
    let path = dir.join(name);
    let temp_path = dir.join(format!("{TEMP_PREFIX}{name}"));
    std::fs::write(&temp_path, content).map_err(|e| io_error(&temp_path, &e))?;
    std::fs::rename(&temp_path, &path).map_err(|e| io_error(&path, &e))
}

fn read_required(dir: &Path, name: &str) -> Result<Vec<u8>, ReportDirError> {
    std::fs::read(dir.join(name)).map_err(|_| ReportDirError::MissingFile {
        name: name.to_string(),
    })
}
