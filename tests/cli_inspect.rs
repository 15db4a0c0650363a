use std::path::Path;

use predicates::prelude::*;

const DRAFT: &str = "# Heading\n\n> \"Debugging is hard.\" — Brian Kernighan\n\nCommentary on debugging errors.\n\n```python\ncode()\n```\n\nMore debugging errors.\n";

const ORGANIZED: &str = "# Post\n## Introduction\nHello.\n## Body\nMiddle.\n## Conclusion\nBye.\n";

fn write(dir: &Path, name: &str, contents: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write fixture");
    path.to_string_lossy().into_owned()
}

fn draftkit() -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("draftkit");
    for key in [
        "DRAFTKIT_FUZZY_THRESHOLD",
        "DRAFTKIT_SECTION_THRESHOLD",
        "DRAFTKIT_JACCARD_THRESHOLD",
        "DRAFTKIT_ATTRIBUTION_MAX_CHARS",
        "DRAFTKIT_LENGTH_TOLERANCE",
    ] {
        cmd.env_remove(key);
    }
    cmd
}

#[test]
fn segment_prints_chunks_as_json() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write(dir.path(), "draft.md", DRAFT);

    draftkit()
        .args(["segment", "--input", &input])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"kind\": \"heading\""))
        .stdout(predicate::str::contains("\"kind\": \"code\""))
        .stdout(predicate::str::contains("\"id\": \"5\""));
}

#[test]
fn segment_prints_yaml_on_request() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write(dir.path(), "draft.md", DRAFT);

    draftkit()
        .args(["--format", "yaml", "segment", "--input", &input])
        .assert()
        .success()
        .stdout(predicate::str::contains("kind: quote"));
}

#[test]
fn context_for_unknown_chunk_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write(dir.path(), "draft.md", DRAFT);

    draftkit()
        .args(["context", "--input", &input, "--id", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("chunk not found: 99"));
}

#[test]
fn quotes_lists_attributions() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write(dir.path(), "draft.md", DRAFT);

    draftkit()
        .args(["quotes", "--input", &input])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"source\": \"Brian Kernighan\""));
}

#[test]
fn connections_rejects_out_of_range_threshold() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write(dir.path(), "draft.md", DRAFT);

    draftkit()
        .args(["connections", "--input", &input, "--threshold", "1.5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid jaccard threshold"));
}

#[test]
fn bad_tuning_env_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write(dir.path(), "draft.md", DRAFT);

    draftkit()
        .env("DRAFTKIT_JACCARD_THRESHOLD", "lots")
        .args(["connections", "--input", &input])
        .assert()
        .failure()
        .stderr(predicate::str::contains("DRAFTKIT_JACCARD_THRESHOLD"));
}

#[test]
fn analyze_reports_languages_and_topics() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write(dir.path(), "draft.md", DRAFT);

    draftkit()
        .args(["analyze", "--input", &input, "--topics", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"python\""))
        .stdout(predicate::str::contains("\"debugging\""));
}

#[test]
fn check_split_passes_and_fails_with_exit_code() {
    let dir = tempfile::tempdir().expect("tempdir");
    let original = write(dir.path(), "original.md", "A\n\nB\n\nC");
    let part_a = write(dir.path(), "a.md", "A\n\nB");
    let part_b = write(dir.path(), "b.md", "C");
    let lossy = write(dir.path(), "lossy.md", "A");

    draftkit()
        .args([
            "check-split", "--original", &original, "--part-a", &part_a, "--part-b", &part_b,
            "--tolerance", "0.5",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"valid\": true"));

    draftkit()
        .args([
            "check-split", "--original", &original, "--part-a", &lossy, "--part-b", &part_b,
            "--tolerance", "1.0",
        ])
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"valid\": false"))
        .stderr(predicate::str::contains("Lost content: 1 paragraphs"));
}

#[test]
fn check_outline_and_reorg() {
    let dir = tempfile::tempdir().expect("tempdir");
    let outline = write(
        dir.path(),
        "outline.md",
        "## Introduction\n\n## Body\n\n## Conclusion",
    );
    let draft = write(dir.path(), "draft.md", "Hello.\n\nMiddle.\n\nBye.");
    let reorganized = write(
        dir.path(),
        "reorganized.md",
        "## Introduction\n\nHello.\n\n## Body\n\nMiddle.\n\n## Conclusion\n\nBye.",
    );
    let swapped = write(
        dir.path(),
        "swapped.md",
        "## Body\n\nMiddle.\n\n## Introduction\n\nHello.\n\n## Conclusion\n\nBye.",
    );

    draftkit()
        .args(["check-outline", "--outline", &outline])
        .assert()
        .success();

    draftkit()
        .args([
            "check-reorg", "--draft", &draft, "--outline", &outline, "--reorganized",
            &reorganized,
        ])
        .assert()
        .success();

    draftkit()
        .args([
            "check-reorg", "--draft", &draft, "--outline", &outline, "--reorganized", &swapped,
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Heading order mismatch at #1"));
}

#[test]
fn section_read_and_replace() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write(dir.path(), "organized.md", ORGANIZED);
    let polished = write(dir.path(), "polished.md", "## Body\nA better middle.");
    let out = dir.path().join("out").join("organized.md");
    let out_str = out.to_string_lossy().into_owned();

    draftkit()
        .args(["section", "read", "--input", &input, "--section", "body"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"prev_section\": \"Introduction\""));

    draftkit()
        .args([
            "section", "replace", "--input", &input, "--section", "Body", "--polished",
            &polished, "--out", &out_str,
        ])
        .assert()
        .success();
    let updated = std::fs::read_to_string(&out).expect("read output");
    assert!(updated.contains("## Body\nA better middle.\n## Conclusion"));
    assert!(!updated.contains("Middle."));

    draftkit()
        .args([
            "section", "replace", "--input", &input, "--section", "Body", "--polished",
            &polished, "--out", &out_str,
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("output already exists"));

    draftkit()
        .args([
            "section", "replace", "--input", &input, "--section", "Body", "--polished",
            &polished, "--out", &out_str, "--force",
        ])
        .assert()
        .success();
}

#[test]
fn rust_log_debug_emits_debug_line_to_stderr() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write(dir.path(), "draft.md", DRAFT);

    draftkit()
        .env("RUST_LOG", "debug")
        .args(["segment", "--input", &input])
        .assert()
        .success()
        .stderr(predicate::str::contains("parsed cli"));
}
