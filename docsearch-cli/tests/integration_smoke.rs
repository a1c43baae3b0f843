//! Smoke tests for the docsearch binary

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const INDEX_JSON: &str = r#"[
    {"imageformats": "imageformats.html"},
    {"imageformats.png": "png.html"},
    {"imageformats.png.read_png": "png.html#read_png"},
    {"imageformats.png.read_png16": "png.html#read_png16"},
    {"imageformats.bmp.write_bmp": "bmp.html#write_bmp"}
]"#;

fn write_index(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("index.json");
    fs::write(&path, INDEX_JSON).unwrap();
    path
}

/// Binary isolated from the caller's home directory and environment
fn docsearch(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("docsearch").unwrap();
    cmd.env("HOME", home)
        .env_remove("DOCSEARCH_INDEX")
        .env_remove("DOCSEARCH_HOME")
        .env_remove("RUST_LOG");
    cmd
}

// === Query Command Tests ===

#[test]
fn test_query_help() {
    let dir = TempDir::new().unwrap();
    docsearch(dir.path())
        .arg("query")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("regular expression"));
}

#[test]
fn test_query_lists_links_in_index_order() {
    let dir = TempDir::new().unwrap();
    let index = write_index(&dir);

    docsearch(dir.path())
        .arg("--index")
        .arg(&index)
        .arg("query")
        .arg("READ_PNG")
        .assert()
        .success()
        .stdout(
            "link0\timageformats.png.read_png\tpng.html#read_png\n\
             link1\timageformats.png.read_png16\tpng.html#read_png16\n",
        );
}

#[test]
fn test_query_without_matches_prints_placeholder() {
    let dir = TempDir::new().unwrap();
    let index = write_index(&dir);

    docsearch(dir.path())
        .args(["query", "zzz", "--index"])
        .arg(&index)
        .assert()
        .success()
        .stdout("No results\n");
}

#[test]
fn test_query_escape_key_hides_results() {
    let dir = TempDir::new().unwrap();
    let index = write_index(&dir);

    docsearch(dir.path())
        .args(["query", "png", "--key", "27", "--index"])
        .arg(&index)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_query_invalid_pattern_fails() {
    let dir = TempDir::new().unwrap();
    let index = write_index(&dir);

    docsearch(dir.path())
        .args(["query", "read_(png", "--index"])
        .arg(&index)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid search pattern"));
}

#[test]
fn test_query_literal_mode() {
    let dir = TempDir::new().unwrap();
    let index = write_index(&dir);

    docsearch(dir.path())
        .args(["query", "png.read", "--literal", "--index"])
        .arg(&index)
        .assert()
        .success()
        .stdout(predicate::str::contains("link1\timageformats.png.read_png16"));

    docsearch(dir.path())
        .args(["query", "(", "--literal", "--index"])
        .arg(&index)
        .assert()
        .success()
        .stdout("No results\n");
}

#[test]
fn test_query_json_output() {
    let dir = TempDir::new().unwrap();
    let index = write_index(&dir);

    let output = docsearch(dir.path())
        .args(["query", "write", "--output", "json", "--index"])
        .arg(&index)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["id"], "results");
    assert_eq!(json["visibility"], "shown");
    assert_eq!(json["rows"][0]["kind"], "link");
    assert_eq!(json["rows"][0]["id"], "link0");
    assert_eq!(json["rows"][0]["href"], "bmp.html#write_bmp");
}

#[test]
fn test_query_html_output() {
    let dir = TempDir::new().unwrap();
    let index = write_index(&dir);

    docsearch(dir.path())
        .args(["query", "write_bmp", "-o", "html", "--index"])
        .arg(&index)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "<a id=\"link0\" href=\"bmp.html#write_bmp\">imageformats.bmp.write_bmp</a>",
        ))
        .stdout(predicate::str::contains("display: block"));
}

#[test]
fn test_index_from_environment() {
    let dir = TempDir::new().unwrap();
    let index = write_index(&dir);

    docsearch(dir.path())
        .env("DOCSEARCH_INDEX", &index)
        .args(["query", "bmp"])
        .assert()
        .success()
        .stdout(predicate::str::contains("link0\timageformats.bmp.write_bmp"));
}

#[test]
fn test_missing_index_flag_is_explained() {
    let dir = TempDir::new().unwrap();

    docsearch(dir.path())
        .args(["query", "png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No symbol index given"));
}

#[test]
fn test_unreadable_index_fails() {
    let dir = TempDir::new().unwrap();

    docsearch(dir.path())
        .args(["query", "png", "--index"])
        .arg(dir.path().join("missing.js"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load symbol index"));
}

#[test]
fn test_script_index_format() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("search.js");
    fs::write(
        &path,
        "// generated\nvar items = [\n{\"a.b.c\": \"a.b.html#c\"},\n{\"a.b.d\": \"a.b.html#d\"},\n];\n",
    )
    .unwrap();

    docsearch(dir.path())
        .args(["query", "b\\.d$", "--index-format", "script", "--index"])
        .arg(&path)
        .assert()
        .success()
        .stdout("link0\ta.b.d\ta.b.html#d\n");
}

// === Config Command Tests ===

#[test]
fn test_config_path_override() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("custom.toml");

    docsearch(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.toml"));
}

#[test]
fn test_config_init_then_query_uses_configured_index() {
    let dir = TempDir::new().unwrap();
    let index = write_index(&dir);
    let config = dir.path().join("config.toml");

    docsearch(dir.path())
        .arg("--config")
        .arg(&config)
        .arg("--index")
        .arg(&index)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config"));

    // Second init without --force refuses to clobber
    docsearch(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    docsearch(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[search]"));

    docsearch(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["query", "read_png16"])
        .assert()
        .success()
        .stdout("link0\timageformats.png.read_png16\tpng.html#read_png16\n");
}

// === Completions Tests ===

#[test]
fn test_completions_bash() {
    let dir = TempDir::new().unwrap();
    docsearch(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("docsearch"));
}

#[test]
fn test_config_init_writes_default_location() {
    let dir = TempDir::new().unwrap();
    let index = write_index(&dir);

    docsearch(dir.path())
        .arg("--index")
        .arg(&index)
        .args(["config", "init"])
        .assert()
        .success();
    assert!(dir.path().join(".docsearch/config.toml").exists());

    // Picked up without --config or --index
    docsearch(dir.path())
        .args(["query", "write_bmp"])
        .assert()
        .success()
        .stdout("link0\timageformats.bmp.write_bmp\tbmp.html#write_bmp\n");
}
