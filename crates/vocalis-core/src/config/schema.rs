//! Configuration schema.
//!
//! Hierarchy: `Config` → `DefaultsConfig`, `ProvidersConfig`.
//!
//! JSON on disk uses **camelCase** keys; Rust uses snake_case.
//! Credentials never live here: they come from the request or from the
//! per-provider environment variable.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::{Capability, DEFAULT_PROVIDER};

// ─────────────────────────────────────────────
// Root Config
// ─────────────────────────────────────────────

/// Root configuration — loaded from `~/.vocalis/config.json` + env vars.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub defaults: DefaultsConfig,
    pub providers: ProvidersConfig,
}

// ─────────────────────────────────────────────
// Defaults
// ─────────────────────────────────────────────

/// Provider and model used for a capability the request leaves blank.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDefault {
    pub provider: String,
    pub model_id: String,
}

impl ModelDefault {
    /// Built-in default for a capability.
    pub fn builtin(capability: Capability) -> Self {
        Self {
            provider: DEFAULT_PROVIDER.to_string(),
            model_id: capability.default_model_id().to_string(),
        }
    }
}

/// Per-capability defaults.
///
/// Fields left out of the file (or left blank) keep the built-in value for
/// that capability, so a partial entry never invalidates the rest of the config.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "DefaultsData")]
pub struct DefaultsConfig {
    pub llm: ModelDefault,
    pub stt: ModelDefault,
    pub tts: ModelDefault,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            llm: ModelDefault::builtin(Capability::Llm),
            stt: ModelDefault::builtin(Capability::Stt),
            tts: ModelDefault::builtin(Capability::Tts),
        }
    }
}

impl DefaultsConfig {
    pub fn get(&self, capability: Capability) -> &ModelDefault {
        match capability {
            Capability::Llm => &self.llm,
            Capability::Stt => &self.stt,
            Capability::Tts => &self.tts,
        }
    }

    pub fn get_mut(&mut self, capability: Capability) -> &mut ModelDefault {
        match capability {
            Capability::Llm => &mut self.llm,
            Capability::Stt => &mut self.stt,
            Capability::Tts => &mut self.tts,
        }
    }
}

/// On-disk shape of `defaults`: every field optional.
#[derive(Default, Deserialize)]
#[serde(default)]
struct DefaultsData {
    llm: PartialDefault,
    stt: PartialDefault,
    tts: PartialDefault,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct PartialDefault {
    provider: Option<String>,
    model_id: Option<String>,
}

impl PartialDefault {
    fn or_builtin(self, capability: Capability) -> ModelDefault {
        let builtin = ModelDefault::builtin(capability);
        ModelDefault {
            provider: non_blank(self.provider).unwrap_or(builtin.provider),
            model_id: non_blank(self.model_id).unwrap_or(builtin.model_id),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl From<DefaultsData> for DefaultsConfig {
    fn from(data: DefaultsData) -> Self {
        Self {
            llm: data.llm.or_builtin(Capability::Llm),
            stt: data.stt.or_builtin(Capability::Stt),
            tts: data.tts.or_builtin(Capability::Tts),
        }
    }
}

// ─────────────────────────────────────────────
// Providers
// ─────────────────────────────────────────────

/// Per-provider connection settings (base URL, headers).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderConfig {
    /// Custom API base URL (overrides provider default).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    /// Extra HTTP headers to send with each request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_headers: Option<HashMap<String, String>>,
}

/// All provider configurations, one per built-in vendor.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProvidersConfig {
    pub openai: ProviderConfig,
    pub groq: ProviderConfig,
    pub deepgram: ProviderConfig,
    pub assemblyai: ProviderConfig,
    pub cartesia: ProviderConfig,
    pub fal: ProviderConfig,
    pub sarvam: ProviderConfig,
    pub elevenlabs: ProviderConfig,
    pub playht: ProviderConfig,
}

impl ProvidersConfig {
    /// Get a provider config by name (e.g. `"deepgram"`).
    pub fn get_by_name(&self, name: &str) -> Option<&ProviderConfig> {
        match name {
            "openai" => Some(&self.openai),
            "groq" => Some(&self.groq),
            "deepgram" => Some(&self.deepgram),
            "assemblyai" => Some(&self.assemblyai),
            "cartesia" => Some(&self.cartesia),
            "fal" => Some(&self.fal),
            "sarvam" => Some(&self.sarvam),
            "elevenlabs" => Some(&self.elevenlabs),
            "playht" => Some(&self.playht),
            _ => None,
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.defaults.llm.provider, "openai");
        assert_eq!(config.defaults.llm.model_id, "gpt-4o-mini");
        assert_eq!(config.defaults.stt.model_id, "whisper-1");
        assert_eq!(config.defaults.tts.model_id, "tts-1");
        assert!(config.providers.openai.api_base.is_none());
    }

    #[test]
    fn test_config_from_json_camel_case() {
        let json = serde_json::json!({
            "defaults": {
                "stt": { "provider": "deepgram", "modelId": "nova-2" }
            },
            "providers": {
                "deepgram": { "apiBase": "http://localhost:8080/v1" }
            }
        });

        let config: Config = serde_json::from_value(json).unwrap();
        assert_eq!(config.defaults.stt.provider, "deepgram");
        assert_eq!(config.defaults.stt.model_id, "nova-2");
        // Defaults preserved for missing fields
        assert_eq!(config.defaults.llm, ModelDefault::builtin(Capability::Llm));
        assert_eq!(
            config.providers.deepgram.api_base.as_deref(),
            Some("http://localhost:8080/v1")
        );
    }

    #[test]
    fn test_config_json_uses_camel_case() {
        let config = Config::default();
        let json = serde_json::to_value(&config).unwrap();
        assert!(json["defaults"]["llm"].get("modelId").is_some());
        assert!(json["defaults"]["llm"].get("model_id").is_none());
    }

    #[test]
    fn test_providers_get_by_name() {
        let mut providers = ProvidersConfig::default();
        providers.elevenlabs.api_base = Some("https://eu.elevenlabs.io/v1".into());

        assert!(providers.get_by_name("elevenlabs").unwrap().api_base.is_some());
        assert!(providers.get_by_name("openai").unwrap().api_base.is_none());
        assert!(providers.get_by_name("nonexistent").is_none());
    }

    #[test]
    fn test_defaults_get_mut() {
        let mut defaults = DefaultsConfig::default();
        defaults.get_mut(Capability::Tts).provider = "cartesia".into();
        assert_eq!(defaults.get(Capability::Tts).provider, "cartesia");
        assert_eq!(defaults.get(Capability::Llm).provider, "openai");
    }

    #[test]
    fn test_partial_default_keeps_builtin_fields() {
        let json = serde_json::json!({
            "defaults": {
                "llm": { "provider": "groq" },
                "tts": { "modelId": "tts-1-hd" },
                "stt": { "provider": "", "modelId": "nova-2" }
            }
        });

        let config: Config = serde_json::from_value(json).unwrap();
        assert_eq!(config.defaults.llm.provider, "groq");
        assert_eq!(config.defaults.llm.model_id, "gpt-4o-mini");
        assert_eq!(config.defaults.tts.provider, "openai");
        assert_eq!(config.defaults.tts.model_id, "tts-1-hd");
        // Blank provider counts as unset
        assert_eq!(config.defaults.stt.provider, "openai");
        assert_eq!(config.defaults.stt.model_id, "nova-2");
    }

    #[test]
    fn test_empty_json_gives_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.defaults, DefaultsConfig::default());
    }
}
