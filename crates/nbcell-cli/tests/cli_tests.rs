//! Integration tests for the nbcell CLI binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_nbcell"))
}

const THREE_CELL_NOTEBOOK: &str = r##"{
    "nbformat": 4,
    "nbformat_minor": 5,
    "metadata": {
        "kernelspec": { "name": "python3", "display_name": "Python 3" },
        "language_info": { "name": "python" }
    },
    "cells": [
        {
            "id": "a",
            "cell_type": "markdown",
            "metadata": {},
            "source": ["# Intro"]
        },
        {
            "id": "b",
            "cell_type": "code",
            "metadata": {},
            "execution_count": 1,
            "source": ["print(\"hi\")"],
            "outputs": [
                { "output_type": "stream", "name": "stdout", "text": ["hi\n"] }
            ]
        },
        {
            "id": "c",
            "cell_type": "code",
            "metadata": {},
            "execution_count": null,
            "source": ["x = 1"],
            "outputs": []
        }
    ]
}"##;

fn write_notebook(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("sample.ipynb");
    fs::write(&path, THREE_CELL_NOTEBOOK).unwrap();
    path
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("convert"))
        .stdout(predicate::str::contains("info"))
        .stdout(predicate::str::contains("completion"));
}

#[test]
fn test_convert_help() {
    cli()
        .args(["convert", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--notebook"))
        .stdout(predicate::str::contains("--prefix"))
        .stdout(predicate::str::contains("--keep"))
        .stdout(predicate::str::contains("--output-dir"));
}

#[test]
fn test_convert_writes_numbered_snippets() {
    let dir = TempDir::new().unwrap();
    let notebook = write_notebook(&dir);

    cli()
        .args(["convert", "-n"])
        .arg(&notebook)
        .arg("-o")
        .arg(dir.path())
        .args(["--prefix", "snip-"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 snippet(s)"));

    assert!(dir.path().join("snip-1.rst").exists());
    assert!(dir.path().join("snip-2.rst").exists());
    assert!(dir.path().join("snip-3.rst").exists());
    assert!(!dir.path().join("snip-4.rst").exists());
    // The composite is removed after splitting unless --keep is passed
    assert!(!dir.path().join("sample.rst").exists());

    let first = fs::read_to_string(dir.path().join("snip-1.rst")).unwrap();
    assert!(first.contains("# Intro"));
    let second = fs::read_to_string(dir.path().join("snip-2.rst")).unwrap();
    assert!(second.contains("print(\"hi\")"));
}

#[test]
fn test_convert_keep_retains_composite() {
    let dir = TempDir::new().unwrap();
    let notebook = write_notebook(&dir);

    cli()
        .args(["convert", "-n"])
        .arg(&notebook)
        .arg("-o")
        .arg(dir.path())
        .arg("--keep")
        .assert()
        .success()
        .stdout(predicate::str::contains("Composite kept"));

    assert!(dir.path().join("sample.rst").exists());
    assert!(dir.path().join("cell-1.rst").exists());
}

#[test]
fn test_convert_empty_notebook_succeeds() {
    let dir = TempDir::new().unwrap();
    let notebook = dir.path().join("empty.ipynb");
    fs::write(
        &notebook,
        r#"{ "nbformat": 4, "nbformat_minor": 5, "metadata": {}, "cells": [] }"#,
    )
    .unwrap();

    cli()
        .args(["convert", "-n"])
        .arg(&notebook)
        .arg("-o")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("0 snippet(s)"));

    assert!(!dir.path().join("cell-1.rst").exists());
}

#[test]
fn test_convert_missing_notebook_fails() {
    let dir = TempDir::new().unwrap();

    cli()
        .args(["convert", "-n"])
        .arg(dir.path().join("absent.ipynb"))
        .arg("-o")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("load stage failed"))
        .stderr(predicate::str::contains("Help:"));

    // Nothing is written when loading fails
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_convert_malformed_notebook_fails() {
    let dir = TempDir::new().unwrap();
    let notebook = dir.path().join("broken.ipynb");
    fs::write(&notebook, "{ not json }").unwrap();

    cli()
        .args(["convert", "-n"])
        .arg(&notebook)
        .arg("-o")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("load stage failed"));
}

#[test]
fn test_convert_quiet_suppresses_output() {
    let dir = TempDir::new().unwrap();
    let notebook = write_notebook(&dir);

    cli()
        .arg("--quiet")
        .args(["convert", "-n"])
        .arg(&notebook)
        .arg("-o")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(dir.path().join("cell-1.rst").exists());
}

#[test]
fn test_convert_verbose_lists_snippets() {
    let dir = TempDir::new().unwrap();
    let notebook = write_notebook(&dir);

    cli()
        .arg("--verbose")
        .args(["convert", "-n"])
        .arg(&notebook)
        .arg("-o")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("cell-1.rst"))
        .stdout(predicate::str::contains("cell-3.rst"));
}

#[test]
fn test_info_shows_metadata_and_cells() {
    let dir = TempDir::new().unwrap();
    let notebook = write_notebook(&dir);

    cli()
        .args(["info", "-n"])
        .arg(&notebook)
        .assert()
        .success()
        .stdout(predicate::str::contains("Kernel: python3"))
        .stdout(predicate::str::contains("Language: python"))
        .stdout(predicate::str::contains("Cells: 3"))
        .stdout(predicate::str::contains("markdown"))
        .stdout(predicate::str::contains("code"));
}

#[test]
fn test_info_json_output() {
    let dir = TempDir::new().unwrap();
    let notebook = write_notebook(&dir);

    let output = cli()
        .args(["info", "-n"])
        .arg(&notebook)
        .arg("--json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(parsed["kernel"], "python3");
    assert_eq!(parsed["language"], "python");
    assert_eq!(parsed["cells"].as_array().unwrap().len(), 3);
    assert_eq!(parsed["cells"][1]["kind"], "code");
    assert_eq!(parsed["cells"][1]["outputs"], 1);
}

#[test]
fn test_info_missing_notebook_fails() {
    cli()
        .args(["info", "-n", "does/not/exist.ipynb"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_completion_bash() {
    cli()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nbcell"));
}
