//! Cross-process determinism test.
//!
//! Spawns the `search_fixture` binary under several environment variants
//! and asserts that all produce identical stdout. This proves that search
//! results, traces and bundle digests are not influenced by process-level
//! state (cwd, locale, log level).

use std::path::Path;
use std::process::Command;

fn document_path() -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../fixtures/letters_document.json")
        .to_string_lossy()
        .to_string()
}

/// Run the fixture with the given cwd, args and env overrides; return stdout.
fn run_variant(work_dir: &Path, args: &[String], env_overrides: &[(&str, &str)]) -> String {
    let bin = env!("CARGO_BIN_EXE_search_fixture");
    let mut command = Command::new(bin);
    command
        .args(args)
        .current_dir(work_dir)
        .env_remove("LC_ALL")
        .env_remove("LC_COLLATE")
        .env_remove("LANG")
        .env_remove("RUST_LOG");
    for &(key, val) in env_overrides {
        command.env(key, val);
    }

    let output = command.output().unwrap_or_else(|e| {
        panic!("failed to spawn {bin} (overrides={env_overrides:?}): {e}")
    });
    assert!(
        output.status.success(),
        "search_fixture exited with {}: stderr={}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout is UTF-8")
}

fn assert_all_variants_agree(args: &[String]) -> String {
    let scratch = tempfile::tempdir().unwrap();
    let variants: [(&Path, Vec<(&str, &str)>); 4] = [
        (Path::new(env!("CARGO_MANIFEST_DIR")), vec![]),
        (scratch.path(), vec![]),
        (scratch.path(), vec![("LANG", "tr_TR.UTF-8"), ("LC_ALL", "C")]),
        (
            Path::new(env!("CARGO_MANIFEST_DIR")),
            vec![("RUST_LOG", "debug")],
        ),
    ];

    let outputs: Vec<String> = variants
        .iter()
        .map(|(dir, env)| run_variant(dir, args, env))
        .collect();
    for (i, out) in outputs.iter().enumerate().skip(1) {
        assert_eq!(&outputs[0], out, "variant {i} diverged from baseline");
    }
    outputs.into_iter().next().unwrap_or_default()
}

#[test]
fn builtin_worlds_are_process_independent() {
    let stdout = assert_all_variants_agree(&[]);
    for line in [
        "textbook.uniform_cost.path=0,2,4,3,6",
        "textbook.uniform_cost.cost=5",
        "textbook.uniform_cost.generated=10",
        "textbook.astar.cost=8",
        "textbook.astar.generated=9",
        "letters.uniform_cost.path=S,d,e,r,f,G",
        "letters.breadth_first.cost=14",
        "grid_manhattan.astar.cost=6",
    ] {
        assert!(stdout.lines().any(|l| l == line), "missing {line:?} in:\n{stdout}");
    }
    assert_eq!(
        stdout
            .lines()
            .filter(|l| l.contains(".bundle_digest=sha256:"))
            .count(),
        3
    );
}

#[test]
fn graph_document_is_process_independent() {
    let stdout = assert_all_variants_agree(&[document_path()]);
    assert!(stdout
        .lines()
        .any(|l| l == "letters_document.astar.path=S,d,e,r,f,G"));
    assert!(stdout.lines().all(|l| l.starts_with("letters_document.")));
}

#[test]
fn invalid_document_exits_nonzero() {
    let scratch = tempfile::tempdir().unwrap();
    let path = scratch.path().join("broken.json");
    std::fs::write(&path, br#"{"edges": {"a": [["b", -1]]}, "start": "a", "goal": "b"}"#)
        .unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_search_fixture"))
        .arg(&path)
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}
