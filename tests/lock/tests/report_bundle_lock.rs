//! Report bundle lock tests.
//!
//! Proves:
//! 1. Bundles written to disk read back and verify, for every built-in world
//! 2. Bundle digests are stable across runs and sensitive to the policy
//! 3. Both documents are canonical JSON
//! 4. A trace swapped for another strategy's trace is caught by the
//!    report-to-trace binding even when the bundle is re-hashed

use wayfind_harness::bundle::{verify_bundle, BundleVerifyError, ReportBundle};
use wayfind_harness::bundle_dir::{read_bundle_dir, verify_bundle_dir, write_report_dir};
use wayfind_harness::policy::CompareConfig;
use wayfind_harness::runner::{compare, report_bundle, ComparisonReport};
use wayfind_harness::worlds::grid::{GridWorld, Metric};
use wayfind_harness::worlds::letters::Letters;
use wayfind_harness::worlds::textbook::Textbook;
use wayfind_kernel::proof::canon::canonical_json_bytes;
use wayfind_search::policy::{Relaxation, SearchPolicy};

fn textbook_report(config: &CompareConfig) -> ComparisonReport {
    compare(&Textbook::new(), config).unwrap()
}

/// Re-bundle the textbook report with its traces passed through `edit`.
fn rebundle_traces(edit: impl FnOnce(&mut serde_json::Value)) -> ReportBundle {
    let bundle = report_bundle(&textbook_report(&CompareConfig::default())).unwrap();
    let mut traces: serde_json::Value = serde_json::from_slice(&bundle.traces).unwrap();
    edit(&mut traces);
    ReportBundle::new(bundle.report, canonical_json_bytes(&traces).unwrap()).unwrap()
}

#[test]
fn every_world_round_trips_through_disk() {
    let config = CompareConfig::default();
    let reports = [
        textbook_report(&config),
        compare(&Letters::new(), &config).unwrap(),
        compare(&GridWorld::demo(Metric::Chebyshev).unwrap(), &config).unwrap(),
    ];
    for report in &reports {
        let dir = tempfile::tempdir().unwrap();
        let digest = write_report_dir(report, dir.path()).unwrap();
        assert_eq!(verify_bundle_dir(dir.path()).unwrap().digest, digest);
        assert_eq!(read_bundle_dir(dir.path()).unwrap(), report_bundle(report).unwrap());
    }
}

#[test]
fn digest_is_stable_and_policy_sensitive() {
    let config = CompareConfig::default();
    let a = report_bundle(&textbook_report(&config)).unwrap();
    let b = report_bundle(&textbook_report(&config)).unwrap();
    assert_eq!(a.digest, b.digest);

    let unconditional = CompareConfig {
        search_policy: SearchPolicy {
            relaxation: Relaxation::Unconditional,
            ..SearchPolicy::default()
        },
        ..CompareConfig::default()
    };
    let c = report_bundle(&textbook_report(&unconditional)).unwrap();
    assert_ne!(a.digest, c.digest);
}

#[test]
fn documents_are_canonical() {
    let bundle = report_bundle(&textbook_report(&CompareConfig::default())).unwrap();
    for (name, bytes) in bundle.files() {
        let value: serde_json::Value = serde_json::from_slice(bytes).unwrap();
        assert_eq!(canonical_json_bytes(&value).unwrap(), bytes, "{name}");
    }
}

#[test]
fn swapped_trace_breaks_binding() {
    let forged = rebundle_traces(|traces| {
        let ucs = traces["traces"]["uniform_cost"].clone();
        traces["traces"]["astar"] = ucs;
    });
    let err = verify_bundle(&forged).unwrap_err();
    assert!(
        matches!(err, BundleVerifyError::TraceDigestMismatch { ref strategy, .. } if strategy == "astar"),
        "got {err:?}"
    );
}

#[test]
fn dropped_trace_is_reported_missing() {
    let forged = rebundle_traces(|traces| {
        traces["traces"]
            .as_object_mut()
            .unwrap()
            .remove("uniform_cost");
    });
    assert_eq!(
        verify_bundle(&forged),
        Err(BundleVerifyError::TraceMissing {
            strategy: "uniform_cost".into()
        })
    );
}
