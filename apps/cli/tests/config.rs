//! Tests for CLI config resolution.

use genway_cli::config::{self, DEFAULT_CONFIG};
use model::{BackendKind, GatewayConfig};

#[test]
fn explicit_path_wins() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.toml");
    std::fs::write(
        &path,
        "[backend]\nprovider = \"gemini\"\napi_key = \"g\"\nmodel = \"gemini-test\"",
    )
    .unwrap();

    let config = config::resolve_config(Some(&path)).unwrap();
    let backend = config.backend().unwrap();
    assert_eq!(backend.kind(), BackendKind::BridgedStream);
    assert_eq!(backend.model(), "gemini-test");
}

#[test]
fn explicit_missing_path_fails() {
    let dir = tempfile::tempdir().unwrap();
    assert!(config::resolve_config(Some(&dir.path().join("nope.toml"))).is_err());
}

#[test]
fn default_config_parses() {
    let config = GatewayConfig::from_toml(DEFAULT_CONFIG).unwrap();
    assert_eq!(config.backend().unwrap().kind(), BackendKind::DirectStream);
}

#[test]
fn generate_default_creates_parents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("genway.toml");
    config::generate_default_config(&path).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
}

#[test]
fn global_path_ends_with_file_name() {
    let path = config::global_config_path();
    assert!(path.ends_with("genway/genway.toml"));
}
