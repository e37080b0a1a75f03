//! `vocalis resolve` — dry-run a model request.
//!
//! Builds a `ModelRequest` from an optional JSON file plus flags, resolves it
//! against the built-in registry and prints what each capability would use.
//! Nothing is sent to any provider.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tracing::{debug, info};

use vocalis_core::config::{get_config_path, load_config};
use vocalis_core::utils::mask_secret;
use vocalis_core::{Capability, ModelRequest, ProcessEnv};
use vocalis_providers::{Model, ModelClient, ModelRegistry};

use crate::helpers::{expand_tilde, key_status};

#[derive(Args, Debug, Default)]
pub struct ResolveArgs {
    /// JSON request descriptor (`{"attributes": {...}, "llmApiKey": ...}`)
    #[arg(short, long)]
    pub request: Option<String>,

    /// LLM provider
    #[arg(long)]
    pub llm_provider: Option<String>,
    /// LLM model id
    #[arg(long)]
    pub llm_model: Option<String>,

    /// Speech-to-text provider
    #[arg(long)]
    pub stt_provider: Option<String>,
    /// Speech-to-text model id
    #[arg(long)]
    pub stt_model: Option<String>,

    /// Text-to-speech provider
    #[arg(long)]
    pub tts_provider: Option<String>,
    /// Text-to-speech model id
    #[arg(long)]
    pub tts_model: Option<String>,
}

impl ResolveArgs {
    fn flags(&self, capability: Capability) -> (Option<&String>, Option<&String>) {
        match capability {
            Capability::Llm => (self.llm_provider.as_ref(), self.llm_model.as_ref()),
            Capability::Stt => (self.stt_provider.as_ref(), self.stt_model.as_ref()),
            Capability::Tts => (self.tts_provider.as_ref(), self.tts_model.as_ref()),
        }
    }
}

/// Run the resolve command.
pub fn run(args: &ResolveArgs) -> Result<()> {
    let request = build_request(args)?;
    debug!(config = %get_config_path().display(), "loading config");
    let config = load_config(None);
    let registry = ModelRegistry::with_builtin_providers(Arc::new(ProcessEnv), &config);

    let models = registry.resolve_from_descriptor(&request)?;

    println!();
    for capability in Capability::ALL {
        let model = models.get(capability);
        println!("  {}", format!("{}:", capability.description()).bold());
        println!("    {:<12} {}", "provider", model.provider());
        println!("    {:<12} {}", "model", model.model_id());

        if let Some(client) = model.downcast_ref::<ModelClient>() {
            println!("    {:<12} {}", "api base", client.api_base());
            let credential = match client.api_key() {
                Ok(key) => format!("{} {}", key_status(true), mask_secret(key).dimmed()),
                Err(_) => format!(
                    "{} {}",
                    key_status(false),
                    format!("(set {})", client.spec().env_key).dimmed()
                ),
            };
            println!("    {:<12} {}", "credential", credential);
        }
        println!();
    }

    Ok(())
}

/// Load the descriptor file (if any) and apply flag overrides on top.
fn build_request(args: &ResolveArgs) -> Result<ModelRequest> {
    let mut request = match &args.request {
        Some(path) => {
            let path = expand_tilde(path);
            info!(source = %path.display(), "reading request descriptor");
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("invalid request descriptor in {}", path.display()))?
        }
        None => {
            debug!("no request file; starting from an empty descriptor");
            ModelRequest::new()
        }
    };

    for capability in Capability::ALL {
        let (provider, model_id) = args.flags(capability);
        let selection = request.selection_mut(capability);
        if let Some(provider) = provider {
            selection.provider = Some(provider.clone());
        }
        if let Some(model_id) = model_id {
            selection.model_id = Some(model_id.clone());
        }
    }

    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_flags_only() {
        let args = ResolveArgs {
            stt_provider: Some("deepgram".into()),
            stt_model: Some("nova-2".into()),
            ..Default::default()
        };
        let request = build_request(&args).unwrap();
        assert_eq!(request.stt.provider(), Some("deepgram"));
        assert_eq!(request.stt.model_id(), Some("nova-2"));
        assert_eq!(request.llm.provider(), None);
    }

    #[test]
    fn test_flags_override_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"attributes": {{"tts_provider": "elevenlabs", "tts_model_id": "eleven_turbo_v2"}}, "ttsApiKey": "xi-1"}}"#
        )
        .unwrap();

        let args = ResolveArgs {
            request: Some(file.path().to_string_lossy().into_owned()),
            tts_model: Some("eleven_multilingual_v2".into()),
            ..Default::default()
        };
        let request = build_request(&args).unwrap();
        assert_eq!(request.tts.provider(), Some("elevenlabs"));
        assert_eq!(request.tts.model_id(), Some("eleven_multilingual_v2"));
        assert_eq!(request.tts.api_key(), Some("xi-1"));
    }

    #[test]
    fn test_missing_request_file() {
        let args = ResolveArgs {
            request: Some("/nonexistent/vocalis/request.json".into()),
            ..Default::default()
        };
        let err = build_request(&args).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn test_invalid_request_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let args = ResolveArgs {
            request: Some(file.path().to_string_lossy().into_owned()),
            ..Default::default()
        };
        assert!(build_request(&args).is_err());
    }
}
