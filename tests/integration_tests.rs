//! Integration tests for the amatta CLI
//!
//! Commands run inside a temp directory so no stray amatta.toml or .env is
//! picked up. Collaborator URLs point at a closed local port, which exercises
//! the degrade-to-defaults paths without network access.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const DEAD_BASE: &str = "http://127.0.0.1:1";

/// Helper to create an amatta Command running in `dir` with offline collaborators
fn amatta(dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("amatta");
    cmd.current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env("AMATTA_PRODUCTS_URL", format!("{}/products", DEAD_BASE))
        .env("AMATTA_METADATA_ENDPOINT", DEAD_BASE);
    cmd
}

fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

// =============================================================================
// Basic CLI Tests
// =============================================================================

mod cli_basics {
    use super::*;

    #[test]
    fn test_help() {
        let dir = temp_dir();
        amatta(&dir)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("serve"))
            .stdout(predicate::str::contains("unfurl"));
    }

    #[test]
    fn test_version() {
        let dir = temp_dir();
        amatta(&dir)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("amatta"));
    }

    #[test]
    fn test_unknown_subcommand_fails() {
        let dir = temp_dir();
        amatta(&dir).arg("frobnicate").assert().failure();
    }
}

// =============================================================================
// Config Tests
// =============================================================================

mod config {
    use super::*;

    #[test]
    fn test_config_show_defaults() {
        let dir = temp_dir();
        amatta(&dir)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("using defaults"))
            .stdout(predicate::str::contains("[metadata]"))
            .stdout(predicate::str::contains("max_concurrency = 4"));
    }

    #[test]
    fn test_config_show_reflects_env_override() {
        let dir = temp_dir();
        amatta(&dir)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("http://127.0.0.1:1/products"));
    }

    #[test]
    fn test_config_init_creates_file_once() {
        let dir = temp_dir();
        amatta(&dir)
            .args(["config", "init"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Created"));

        let content = fs::read_to_string(dir.path().join("amatta.toml")).unwrap();
        assert!(content.contains("[server]"));
        assert!(content.contains("candidates"));

        amatta(&dir)
            .args(["config", "init"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("already exists"));
    }

    #[test]
    fn test_config_file_is_read() {
        let dir = temp_dir();
        fs::write(dir.path().join("amatta.toml"), "[server]\nport = 4567\n").unwrap();
        amatta(&dir)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("port = 4567"));
    }

    #[test]
    fn test_explicit_config_path() {
        let dir = temp_dir();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[logging]\nlevel = \"warn\"\n").unwrap();
        amatta(&dir)
            .args(["--config", path.to_str().unwrap(), "config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("level = \"warn\""));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let dir = temp_dir();
        fs::write(dir.path().join("amatta.toml"), "[links]\ncandidates = []\n").unwrap();
        amatta(&dir)
            .args(["products", "--json"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("links.candidates"));
    }
}

// =============================================================================
// Storefront Command Tests
// =============================================================================

mod storefront {
    use super::*;

    #[test]
    fn test_products_source_down_prints_empty_json() {
        let dir = temp_dir();
        amatta(&dir)
            .args(["products", "--json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[]"));
    }

    #[test]
    fn test_add_rejects_blank_name_before_network() {
        let dir = temp_dir();
        amatta(&dir)
            .args(["add", "--name", " ", "--price", "1000", "--seller", "나이키"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("name is required"));
    }

    #[test]
    fn test_add_rejects_negative_price() {
        let dir = temp_dir();
        amatta(&dir)
            .args(["add", "--name", "바지", "--price", "-5", "--seller", "나이키"])
            .assert()
            .failure();
    }

    #[test]
    fn test_add_source_down_fails() {
        let dir = temp_dir();
        amatta(&dir)
            .args(["add", "--name", "바지", "--price", "10000", "--seller", "나이키"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("상품 추가에 실패했습니다"));
    }

    #[test]
    fn test_unfurl_unreachable_prints_default_company() {
        let dir = temp_dir();
        amatta(&dir)
            .args(["unfurl", "https://www.musinsa.com/products/2307747"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"company\": \"판매자\""))
            .stdout(predicate::str::contains("\"logo\": \"\""));
    }

    #[test]
    fn test_unfurl_card_falls_back_to_product_name() {
        let dir = temp_dir();
        amatta(&dir)
            .args(["unfurl", "https://x.example", "--product-name", "바지"])
            .assert()
            .success()
            .stdout(predicate::str::contains("상품"))
            .stdout(predicate::str::contains("바지"));
    }

    #[test]
    fn test_unfurl_raw_unreachable_fails() {
        let dir = temp_dir();
        amatta(&dir)
            .args(["unfurl", "https://x.example", "--raw"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to fetch link preview"));
    }
}
