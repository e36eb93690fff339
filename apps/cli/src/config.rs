//! Configuration resolution for the CLI.
//!
//! Resolves genway.toml in priority order:
//! 1. `--config <path>` flag
//! 2. `./genway.toml`
//! 3. `~/.config/genway/genway.toml`
//!
//! If none exists, the global default is generated.

use anyhow::{Context, Result};
use model::GatewayConfig;
use std::path::{Path, PathBuf};

/// Config file name.
pub const CONFIG_FILE: &str = "genway.toml";

/// Default config generated when no config exists.
pub const DEFAULT_CONFIG: &str = r#"prompt_mode = "strict"

[backend]
provider = "openai"
model = "gpt-4o-mini"
api_key = "${LLM_API_KEY}"

[sampling]
temperature = 0.7
"#;

/// Resolve the gateway config following the priority chain.
pub fn resolve_config(config_flag: Option<&Path>) -> Result<GatewayConfig> {
    if let Some(path) = config_flag {
        return GatewayConfig::load(path);
    }

    let local = PathBuf::from(CONFIG_FILE);
    if local.exists() {
        return GatewayConfig::load(&local);
    }

    let global = global_config_path();
    if !global.exists() {
        generate_default_config(&global)?;
        tracing::info!("generated default config at {}", global.display());
    }
    GatewayConfig::load(&global)
}

/// Path to the global default config.
pub fn global_config_path() -> PathBuf {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("genway")
        .join(CONFIG_FILE)
}

/// Write the default config to `path`, creating parent directories.
pub fn generate_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    std::fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write default config to {}", path.display()))
}
