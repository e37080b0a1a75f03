//! Core types — the closed capability set and the request descriptor.
//!
//! `ModelRequest` is what the calling application sends when it wants a full
//! LLM + STT + TTS set. On the wire it is a flat `attributes` map plus one API
//! key per capability; in Rust it is one typed [`ModelSelection`] per capability.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

/// Vendor used for every capability when the request names none.
pub const DEFAULT_PROVIDER: &str = "openai";

// ─────────────────────────────────────────────
// Capability
// ─────────────────────────────────────────────

/// The three model roles a provider can fill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    /// Language model (text generation).
    Llm,
    /// Speech recognition (speech-to-text).
    Stt,
    /// Speech synthesis (text-to-speech).
    Tts,
}

impl Capability {
    /// All capabilities, in resolution order.
    pub const ALL: [Capability; 3] = [Capability::Llm, Capability::Stt, Capability::Tts];

    /// Short key used in attribute names and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Llm => "llm",
            Capability::Stt => "stt",
            Capability::Tts => "tts",
        }
    }

    /// Human-readable role name.
    pub fn description(&self) -> &'static str {
        match self {
            Capability::Llm => "language model",
            Capability::Stt => "speech-to-text",
            Capability::Tts => "text-to-speech",
        }
    }

    /// Model id used when a request does not name one.
    pub fn default_model_id(&self) -> &'static str {
        match self {
            Capability::Llm => "gpt-4o-mini",
            Capability::Stt => "whisper-1",
            Capability::Tts => "tts-1",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "llm" | "language-model" => Ok(Capability::Llm),
            "stt" | "speech-recognition" => Ok(Capability::Stt),
            "tts" | "speech-synthesis" => Ok(Capability::Tts),
            _ => Err(RegistryError::UnsupportedCapability(s.to_string())),
        }
    }
}

// ─────────────────────────────────────────────
// Request descriptor
// ─────────────────────────────────────────────

/// What the caller asked for under one capability. Every field is optional.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModelSelection {
    pub provider: Option<String>,
    pub model_id: Option<String>,
    pub api_key: Option<String>,
}

impl ModelSelection {
    /// Requested provider, ignoring empty strings.
    pub fn provider(&self) -> Option<&str> {
        non_empty(self.provider.as_deref())
    }

    /// Requested model id, ignoring empty strings.
    pub fn model_id(&self) -> Option<&str> {
        non_empty(self.model_id.as_deref())
    }

    /// Explicit credential, ignoring empty strings.
    pub fn api_key(&self) -> Option<&str> {
        non_empty(self.api_key.as_deref())
    }
}

/// A full LLM + STT + TTS request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RequestData", into = "RequestData")]
pub struct ModelRequest {
    pub llm: ModelSelection,
    pub stt: ModelSelection,
    pub tts: ModelSelection,
}

impl ModelRequest {
    /// Empty request: every capability falls back to defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// The selection for one capability.
    pub fn selection(&self, capability: Capability) -> &ModelSelection {
        match capability {
            Capability::Llm => &self.llm,
            Capability::Stt => &self.stt,
            Capability::Tts => &self.tts,
        }
    }

    /// Mutable access to the selection for one capability.
    pub fn selection_mut(&mut self, capability: Capability) -> &mut ModelSelection {
        match capability {
            Capability::Llm => &mut self.llm,
            Capability::Stt => &mut self.stt,
            Capability::Tts => &mut self.tts,
        }
    }

    /// Builder: set the provider for a capability.
    pub fn with_provider(mut self, capability: Capability, provider: impl Into<String>) -> Self {
        self.selection_mut(capability).provider = Some(provider.into());
        self
    }

    /// Builder: set the model id for a capability.
    pub fn with_model(mut self, capability: Capability, model_id: impl Into<String>) -> Self {
        self.selection_mut(capability).model_id = Some(model_id.into());
        self
    }

    /// Builder: set the explicit credential for a capability.
    pub fn with_api_key(mut self, capability: Capability, api_key: impl Into<String>) -> Self {
        self.selection_mut(capability).api_key = Some(api_key.into());
        self
    }
}

/// Wire shape: `{"attributes": {"llm_provider": ..}, "llmApiKey": ..}`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RequestData {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    attributes: BTreeMap<String, serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    llm_api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stt_api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tts_api_key: Option<String>,
}

impl From<RequestData> for ModelRequest {
    fn from(data: RequestData) -> Self {
        let attribute = |key: String| -> Option<String> {
            data.attributes
                .get(&key)
                .and_then(|v| v.as_str())
                .and_then(|s| non_empty(Some(s)))
                .map(String::from)
        };

        let mut request = ModelRequest::default();
        for capability in Capability::ALL {
            let selection = request.selection_mut(capability);
            selection.provider = attribute(format!("{capability}_provider"));
            selection.model_id = attribute(format!("{capability}_model_id"));
        }

        request.llm.api_key = data.llm_api_key.filter(|k| !k.is_empty());
        request.stt.api_key = data.stt_api_key.filter(|k| !k.is_empty());
        request.tts.api_key = data.tts_api_key.filter(|k| !k.is_empty());
        request
    }
}

impl From<ModelRequest> for RequestData {
    fn from(request: ModelRequest) -> Self {
        let mut attributes = BTreeMap::new();
        for capability in Capability::ALL {
            let selection = request.selection(capability);
            if let Some(provider) = selection.provider() {
                attributes.insert(format!("{capability}_provider"), provider.into());
            }
            if let Some(model_id) = selection.model_id() {
                attributes.insert(format!("{capability}_model_id"), model_id.into());
            }
        }

        RequestData {
            attributes,
            llm_api_key: request.llm.api_key().map(String::from),
            stt_api_key: request.stt.api_key().map(String::from),
            tts_api_key: request.tts.api_key().map(String::from),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
