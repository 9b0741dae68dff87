//! Hash domain governance lock tests.
//!
//! Proves:
//! 1. Canonical domain set has expected count (catches forgotten additions to ALL)
//! 2. All domain byte strings are unique and null-terminated
//! 3. All domains follow the `WAYFIND::*::V1\0` naming convention
//! 4. Golden digests: the wire format of `canonical_hash` is frozen
//! 5. No raw `WAYFIND::` domain literals in production source outside `hash.rs`

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use wayfind_harness::bundle::ReportBundle;
use wayfind_kernel::proof::hash::{canonical_hash, HashDomain};

// ---------------------------------------------------------------------------
// 1. Canonical set count
// ---------------------------------------------------------------------------

#[test]
fn hash_domain_canonical_set_count() {
    assert_eq!(
        HashDomain::ALL.len(),
        7,
        "expected 7 domain variants; if you added a new domain, update this count"
    );
}

// ---------------------------------------------------------------------------
// 2. Unique, null-terminated
// ---------------------------------------------------------------------------

#[test]
fn hash_domain_bytes_unique_and_terminated() {
    let mut seen = BTreeSet::new();
    for domain in HashDomain::ALL {
        assert!(
            seen.insert(domain.as_bytes()),
            "duplicate domain bytes: {domain:?}"
        );
        assert!(
            domain.as_bytes().ends_with(&[0]),
            "{domain:?} is not null-terminated"
        );
    }
}

// ---------------------------------------------------------------------------
// 3. Naming convention
// ---------------------------------------------------------------------------

#[test]
fn hash_domain_all_follow_naming_convention() {
    for domain in HashDomain::ALL {
        let bytes = domain.as_bytes();
        assert!(
            bytes.starts_with(b"WAYFIND::"),
            "{domain:?} does not start with WAYFIND::"
        );
        assert!(
            bytes.ends_with(b"::V1\0"),
            "{domain:?} does not end with ::V1\\0"
        );
    }
}

// ---------------------------------------------------------------------------
// 4. Golden digests
// ---------------------------------------------------------------------------

#[test]
fn golden_graph_domain_digest() {
    assert_eq!(
        canonical_hash(HashDomain::Graph, b"{}").as_str(),
        "sha256:828961cc13661b4ac5dae273702eb1a4567b86403a01dbc523105f61557ef63e"
    );
}

#[test]
fn golden_trivial_bundle_digest() {
    let bundle = ReportBundle::new(b"{}".to_vec(), b"{}".to_vec()).unwrap();
    assert_eq!(
        bundle.report_hash.as_str(),
        "sha256:8fe8a9fe8c729af683dfa3133dc3eced6cb21cd5f1afbe574a7f224edfb5d1bc"
    );
    assert_eq!(
        bundle.digest.as_str(),
        "sha256:00876b9ba0a1d8ef065916b3a0918d60d879441383c2e711414de78b18515989"
    );
}

// ---------------------------------------------------------------------------
// 5. No raw WAYFIND:: domain literals in production source
// ---------------------------------------------------------------------------

/// Scan kernel/, search/, harness/ source for `b"WAYFIND::` literals.
/// The only file allowed to contain them is `hash.rs`.
#[test]
fn no_raw_domain_literals_outside_authority() {
    let workspace = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
    let authority_file = "hash.rs";
    let pattern = "b\"WAYFIND::";

    let mut scanned = 0usize;
    let mut violations = Vec::new();
    for crate_dir in ["kernel", "search", "harness"] {
        for path in rust_files(&workspace.join(crate_dir).join("src")) {
            scanned += 1;
            if path.file_name().and_then(|n| n.to_str()) == Some(authority_file) {
                continue;
            }
            let Ok(content) = std::fs::read_to_string(&path) else {
                continue;
            };
            for (i, line) in production_lines(&content) {
                if line.contains(pattern) {
                    violations.push(format!("  {}:{}: {}", path.display(), i + 1, line.trim()));
                }
            }
        }
    }

    assert!(scanned > 0, "no source files found under {}", workspace.display());
    assert!(
        violations.is_empty(),
        "raw WAYFIND:: domain literals found outside {authority_file}:\n{}",
        violations.join("\n")
    );
}

/// Non-comment lines outside `#[cfg(test)]` blocks, via brace-depth tracking.
fn production_lines(content: &str) -> Vec<(usize, &str)> {
    let mut lines = Vec::new();
    let mut brace_depth: usize = 0;
    let mut skip_depth: Option<usize> = None;
    let mut cfg_test_pending = false;

    for (i, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.contains("#[cfg(test)]") {
            cfg_test_pending = true;
            continue;
        }

        let opens = line.chars().filter(|&c| c == '{').count();
        let closes = line.chars().filter(|&c| c == '}').count();
        if cfg_test_pending && opens > 0 {
            skip_depth = Some(brace_depth);
            cfg_test_pending = false;
        }
        brace_depth = brace_depth.saturating_add(opens).saturating_sub(closes);

        if let Some(depth) = skip_depth {
            if brace_depth <= depth {
                skip_depth = None;
            }
            continue;
        }
        if !trimmed.starts_with("//") {
            lines.push((i, line));
        }
    }
    lines
}

fn rust_files(dir: &Path) -> Vec<PathBuf> {
    let mut results = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                results.extend(rust_files(&path));
            } else if path.extension().and_then(|e| e.to_str()) == Some("rs") {
                results.push(path);
            }
        }
    }
    results
}
