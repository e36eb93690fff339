//! Tests for gateway configuration.

use genway_model::{BackendConfig, BackendKind, GatewayConfig, GeminiConfig, config};
use llm::{Error, PromptMode};
use serde_json::json;
use std::{io::Write, time::Duration};

#[test]
fn parses_openai_backend() {
    let config = GatewayConfig::from_toml(
        r#"
        prompt_mode = "lenient"
        bridge_wait_secs = 5

        [backend]
        provider = "openai"
        model = "gpt-4o-mini"
        base_url = "http://localhost:8000/v1"
        api_key = "sk-test"

        [sampling]
        temperature = 0.2
        max_tokens = 64

        [sampling.extra]
        seed = 7
        "#,
    )
    .unwrap();

    assert_eq!(config.prompt_mode, PromptMode::Lenient);
    assert_eq!(config.bridge_wait(), Duration::from_secs(5));
    assert_eq!(config.sampling.temperature, Some(0.2));
    assert_eq!(config.sampling.max_tokens, Some(64));
    assert_eq!(config.sampling.extra.get("seed"), Some(&json!(7)));

    let backend = config.backend().unwrap();
    assert_eq!(backend.name(), "openai");
    assert_eq!(backend.kind(), BackendKind::DirectStream);
    assert_eq!(backend.model(), "gpt-4o-mini");
    let BackendConfig::OpenAI(openai) = backend else {
        panic!("expected openai backend");
    };
    assert_eq!(openai.api_key, "sk-test");
    assert_eq!(openai.base_url.as_deref(), Some("http://localhost:8000/v1"));
}

#[test]
fn parses_gemini_backend_with_generation_config() {
    let config = GatewayConfig::from_toml(
        r#"
        [backend]
        provider = "gemini"
        api_key = "g-key"

        [backend.generation_config]
        temperature = 0.1
        "#,
    )
    .unwrap();

    let backend = config.backend().unwrap();
    assert_eq!(backend.kind(), BackendKind::BridgedStream);
    assert_eq!(backend.model(), config::DEFAULT_GEMINI_MODEL);
    let BackendConfig::Gemini(gemini) = backend else {
        panic!("expected gemini backend");
    };
    assert_eq!(
        gemini.generation_config(&config.sampling),
        json!({ "temperature": 0.1 })
    );
}

#[test]
fn defaults() {
    let config = GatewayConfig::from_toml("").unwrap();
    assert!(config.backend.is_none());
    assert_eq!(config.prompt_mode, PromptMode::Strict);
    assert_eq!(
        config.bridge_wait(),
        Duration::from_secs(config::DEFAULT_BRIDGE_WAIT_SECS)
    );
}

#[test]
fn zero_bridge_wait_is_clamped() {
    let config = GatewayConfig::from_toml("bridge_wait_secs = 0").unwrap();
    assert_eq!(config.bridge_wait(), Duration::from_secs(1));
}

#[test]
fn gemini_generation_config_derived_from_sampling() {
    let gemini = GeminiConfig::default();
    let sampling = llm::SamplingParams {
        temperature: Some(0.3),
        ..Default::default()
    };
    assert_eq!(
        gemini.generation_config(&sampling),
        json!({ "temperature": 0.3, "topP": 0.8, "maxOutputTokens": 2048 })
    );
}

#[test]
fn expands_env_vars() {
    let config = GatewayConfig::from_toml(
        r#"
        [backend]
        provider = "openai"
        model = "${CARGO_PKG_NAME}"
        api_key = "${GENWAY_TEST_SURELY_UNSET_VAR}"
        "#,
    )
    .unwrap();

    let Some(BackendConfig::OpenAI(openai)) = config.backend else {
        panic!("expected openai backend");
    };
    assert_eq!(openai.model, env!("CARGO_PKG_NAME"));
    assert_eq!(openai.api_key, "");
}

#[test]
fn unterminated_reference_is_kept() {
    let config = GatewayConfig::from_toml(
        r#"
        [backend]
        provider = "openai"
        model = "gpt-${CARGO_PKG_NAME"
        "#,
    )
    .unwrap();
    assert_eq!(config.backend().unwrap().model(), "gpt-${CARGO_PKG_NAME");
}

#[test]
fn missing_backend_is_not_initialized() {
    let err = GatewayConfig::default().backend().unwrap_err();
    assert!(matches!(err, Error::BackendNotInitialized { .. }));
}

#[test]
fn blank_model_is_not_initialized() {
    let config = GatewayConfig::from_toml(
        r#"
        [backend]
        provider = "openai"
        model = "  "
        "#,
    )
    .unwrap();
    let err = config.backend().unwrap_err();
    assert!(matches!(
        err,
        Error::BackendNotInitialized {
            backend: "openai",
            ..
        }
    ));
}

#[test]
fn gemini_without_key_is_not_initialized() {
    if std::env::var(config::GEMINI_KEY_ENV).is_ok_and(|key| !key.is_empty()) {
        return;
    }
    let config = GatewayConfig::from_toml(
        r#"
        [backend]
        provider = "gemini"
        "#,
    )
    .unwrap();
    let err = config.backend().unwrap_err();
    assert!(matches!(
        err,
        Error::BackendNotInitialized {
            backend: "gemini",
            ..
        }
    ));
}

#[test]
fn unknown_provider_is_rejected() {
    let result = GatewayConfig::from_toml(
        r#"
        [backend]
        provider = "mystery"
        model = "m"
        "#,
    );
    assert!(result.is_err());
}

#[test]
fn load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[backend]\nprovider = \"openai\"\nmodel = \"gpt-4o\"\napi_key = \"k\""
    )
    .unwrap();

    let config = GatewayConfig::load(file.path()).unwrap();
    assert_eq!(config.backend().unwrap().model(), "gpt-4o");
}

#[test]
fn load_missing_file_names_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("genway.toml");
    let err = GatewayConfig::load(&path).unwrap_err();
    assert!(err.to_string().contains("genway.toml"));
}
