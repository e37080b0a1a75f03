//! Config loader — reads `~/.vocalis/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.vocalis/config.json`
//! 3. Environment variables `VOCALIS_<SECTION>__<FIELD>` (override JSON)

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::schema::{Config, ProviderConfig};
use crate::env::{EnvLookup, ProcessEnv};
use crate::types::Capability;

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load configuration from the default path + process env vars.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't be parsed.
pub fn load_config(path: Option<&Path>) -> Config {
    load_config_with(path, &ProcessEnv)
}

/// Load configuration, reading overrides through `env`.
pub fn load_config_with(path: Option<&Path>, env: &dyn EnvLookup) -> Config {
    let config_path = path
        .map(PathBuf::from)
        .unwrap_or_else(get_config_path);

    apply_env_overrides(load_config_from_path(&config_path), env)
}

/// Load config from a specific file path, without env overrides.
fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return Config::default();
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return Config::default();
        }
    };

    match serde_json::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to parse config {}: {}", path.display(), e);
            Config::default()
        }
    }
}

/// Save configuration to disk (pretty-printed JSON with camelCase keys).
pub fn save_config(config: &Config, path: Option<&Path>) -> std::io::Result<()> {
    let config_path = path
        .map(PathBuf::from)
        .unwrap_or_else(get_config_path);

    // Ensure parent directory exists
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config).map_err(std::io::Error::other)?;

    std::fs::write(&config_path, json)?;
    debug!("Config saved to {}", config_path.display());
    Ok(())
}

/// Apply environment variable overrides on top of a loaded config.
///
/// Env var format: `VOCALIS_<SECTION>__<FIELD>` (double underscore as delimiter).
///
/// Supported overrides:
/// - `VOCALIS_DEFAULTS__<CAP>__PROVIDER` → `defaults.<cap>.provider`
/// - `VOCALIS_DEFAULTS__<CAP>__MODEL_ID` → `defaults.<cap>.model_id`
/// - `VOCALIS_PROVIDERS__<NAME>__API_BASE` → `providers.<name>.api_base`
fn apply_env_overrides(mut config: Config, env: &dyn EnvLookup) -> Config {
    for capability in Capability::ALL {
        let section = capability.as_str().to_uppercase();
        let defaults = config.defaults.get_mut(capability);
        if let Some(val) = env.var(&format!("VOCALIS_DEFAULTS__{section}__PROVIDER")) {
            defaults.provider = val;
        }
        if let Some(val) = env.var(&format!("VOCALIS_DEFAULTS__{section}__MODEL_ID")) {
            defaults.model_id = val;
        }
    }

    let providers = &mut config.providers;
    apply_provider_env(&mut providers.openai, "OPENAI", env);
    apply_provider_env(&mut providers.groq, "GROQ", env);
    apply_provider_env(&mut providers.deepgram, "DEEPGRAM", env);
    apply_provider_env(&mut providers.assemblyai, "ASSEMBLYAI", env);
    apply_provider_env(&mut providers.cartesia, "CARTESIA", env);
    apply_provider_env(&mut providers.fal, "FAL", env);
    apply_provider_env(&mut providers.sarvam, "SARVAM", env);
    apply_provider_env(&mut providers.elevenlabs, "ELEVENLABS", env);
    apply_provider_env(&mut providers.playht, "PLAYHT", env);

    config
}

/// Apply env var overrides for a single provider.
fn apply_provider_env(provider: &mut ProviderConfig, name: &str, env: &dyn EnvLookup) {
    if let Some(val) = env.var(&format!("VOCALIS_PROVIDERS__{name}__API_BASE")) {
        provider.api_base = Some(val);
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
