//! Model registry — capability → provider → constructor.
//!
//! The table is filled once through [`ModelRegistryBuilder`] and is read-only
//! afterwards, so a `ModelRegistry` can be shared behind an `Arc` without
//! locking. Resolution is a pure lookup plus one constructor call: nothing is
//! cached, and every call yields a fresh handle.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use vocalis_core::config::{Config, DefaultsConfig};
use vocalis_core::{Capability, EnvLookup, ModelRequest, ProcessEnv, RegistryError};

use crate::client::ModelClient;
use crate::registry::PROVIDERS;
use crate::traits::{Model, ModelHandle};

/// Builds a handle from `(model_id, credential)`.
pub type Constructor = Box<dyn Fn(&str, Option<&str>) -> ModelHandle + Send + Sync>;

/// One registered (capability, provider) pair.
struct Entry {
    /// Env var consulted when the caller passes no credential.
    env_key: Option<String>,
    constructor: Constructor,
}

// ─────────────────────────────────────────────
// ModelSet
// ─────────────────────────────────────────────

/// The three handles produced from one request descriptor.
#[derive(Debug)]
pub struct ModelSet {
    pub llm: ModelHandle,
    pub stt: ModelHandle,
    pub tts: ModelHandle,
}

impl ModelSet {
    /// The handle for one capability.
    pub fn get(&self, capability: Capability) -> &dyn Model {
        match capability {
            Capability::Llm => self.llm.as_ref(),
            Capability::Stt => self.stt.as_ref(),
            Capability::Tts => self.tts.as_ref(),
        }
    }
}

// ─────────────────────────────────────────────
// Builder
// ─────────────────────────────────────────────

/// Collects constructors before the table is frozen.
pub struct ModelRegistryBuilder {
    table: HashMap<Capability, HashMap<String, Entry>>,
    defaults: DefaultsConfig,
    env: Arc<dyn EnvLookup>,
}

impl ModelRegistryBuilder {
    fn new() -> Self {
        Self {
            table: HashMap::new(),
            defaults: DefaultsConfig::default(),
            env: Arc::new(ProcessEnv),
        }
    }

    /// Register a constructor that receives the caller's credential as-is.
    ///
    /// Registering the same pair twice keeps the later constructor.
    pub fn register<F>(self, capability: Capability, provider: impl Into<String>, constructor: F) -> Self
    where
        F: Fn(&str, Option<&str>) -> ModelHandle + Send + Sync + 'static,
    {
        self.insert(capability, provider.into(), None, Box::new(constructor))
    }

    /// Register a constructor whose missing credential falls back to `env_key`.
    pub fn register_with_env<F>(
        self,
        capability: Capability,
        provider: impl Into<String>,
        env_key: impl Into<String>,
        constructor: F,
    ) -> Self
    where
        F: Fn(&str, Option<&str>) -> ModelHandle + Send + Sync + 'static,
    {
        self.insert(
            capability,
            provider.into(),
            Some(env_key.into()),
            Box::new(constructor),
        )
    }

    /// Provider/model used for capabilities a descriptor leaves blank.
    pub fn defaults(mut self, defaults: DefaultsConfig) -> Self {
        self.defaults = defaults;
        self
    }

    /// Where fallback credentials are read from. Defaults to the process env.
    pub fn env(mut self, env: Arc<dyn EnvLookup>) -> Self {
        self.env = env;
        self
    }

    /// Freeze the table.
    pub fn build(self) -> ModelRegistry {
        ModelRegistry {
            table: self.table,
            defaults: self.defaults,
            env: self.env,
        }
    }

    fn insert(
        mut self,
        capability: Capability,
        provider: String,
        env_key: Option<String>,
        constructor: Constructor,
    ) -> Self {
        let providers = self.table.entry(capability).or_default();
        if providers.contains_key(&provider) {
            warn!(%capability, provider = %provider, "replacing registered constructor");
        }
        providers.insert(
            provider,
            Entry {
                env_key,
                constructor,
            },
        );
        self
    }
}

// ─────────────────────────────────────────────
// Registry
// ─────────────────────────────────────────────

/// Read-only dispatch table from (capability, provider) to a constructor.
pub struct ModelRegistry {
    table: HashMap<Capability, HashMap<String, Entry>>,
    defaults: DefaultsConfig,
    env: Arc<dyn EnvLookup>,
}

impl fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for capability in Capability::ALL {
            map.entry(&capability, &self.providers(capability));
        }
        map.finish()
    }
}

impl ModelRegistry {
    /// Start an empty registry.
    pub fn builder() -> ModelRegistryBuilder {
        ModelRegistryBuilder::new()
    }

    /// Registry with every built-in provider, reading credentials from `env`.
    ///
    /// All handles share one connection pool. Per-provider `api_base` and
    /// extra headers come from `config.providers`; descriptor defaults from
    /// `config.defaults`.
    pub fn with_builtin_providers(env: Arc<dyn EnvLookup>, config: &Config) -> Self {
        let client = reqwest::Client::new();
        let mut builder = Self::builder().env(env).defaults(config.defaults.clone());

        for spec in PROVIDERS {
            let provider_config = config
                .providers
                .get_by_name(spec.name)
                .cloned()
                .unwrap_or_default();

            for &capability in spec.capabilities {
                let client = client.clone();
                let provider_config = provider_config.clone();
                builder = builder.register_with_env(
                    capability,
                    spec.name,
                    spec.env_key,
                    move |model_id, api_key| {
                        Box::new(ModelClient::new(
                            client.clone(),
                            capability,
                            spec,
                            model_id,
                            api_key,
                            &provider_config,
                        )) as ModelHandle
                    },
                );
            }
        }

        builder.build()
    }

    /// Built-in providers, process environment, default config.
    pub fn from_env() -> Self {
        Self::with_builtin_providers(Arc::new(ProcessEnv), &Config::default())
    }

    /// Resolve a handle, parsing the capability name first.
    ///
    /// Fails with `UnsupportedCapability` for anything outside `llm`/`stt`/`tts`
    /// and `UnsupportedProvider` for an unregistered provider.
    pub fn resolve(
        &self,
        capability: &str,
        provider: &str,
        model_id: &str,
        credential: Option<&str>,
    ) -> Result<ModelHandle, RegistryError> {
        let capability: Capability = capability.parse()?;
        self.resolve_for(capability, provider, model_id, credential)
    }

    /// Resolve a handle for an already-typed capability.
    ///
    /// An empty or whitespace-only credential counts as absent. When absent and the pair was
    /// registered with an env var, that var is read and passed on instead.
    /// A credential that is still missing is not an error here.
    pub fn resolve_for(
        &self,
        capability: Capability,
        provider: &str,
        model_id: &str,
        credential: Option<&str>,
    ) -> Result<ModelHandle, RegistryError> {
        let entry = self
            .table
            .get(&capability)
            .and_then(|providers| providers.get(provider))
            .ok_or_else(|| RegistryError::UnsupportedProvider {
                capability,
                provider: provider.to_string(),
            })?;

        let explicit = credential.filter(|c| !c.trim().is_empty());
        let fallback = match (explicit, &entry.env_key) {
            (None, Some(env_key)) => self.env.var(env_key),
            _ => None,
        };
        let credential = explicit.or(fallback.as_deref());

        debug!(
            %capability,
            provider,
            model = model_id,
            explicit_key = explicit.is_some(),
            has_key = credential.is_some(),
            "Resolving model"
        );

        Ok((entry.constructor)(model_id, credential))
    }

    /// Resolve LLM, STT and TTS from one descriptor.
    ///
    /// Blank fields take the registry defaults. The first failure aborts the
    /// whole call; no partial set is returned.
    pub fn resolve_from_descriptor(&self, request: &ModelRequest) -> Result<ModelSet, RegistryError> {
        Ok(ModelSet {
            llm: self.resolve_selection(Capability::Llm, request)?,
            stt: self.resolve_selection(Capability::Stt, request)?,
            tts: self.resolve_selection(Capability::Tts, request)?,
        })
    }

    fn resolve_selection(
        &self,
        capability: Capability,
        request: &ModelRequest,
    ) -> Result<ModelHandle, RegistryError> {
        let selection = request.selection(capability);
        let defaults = self.defaults.get(capability);
        let provider = selection.provider().unwrap_or(defaults.provider.as_str());
        let model_id = selection.model_id().unwrap_or(defaults.model_id.as_str());
        self.resolve_for(capability, provider, model_id, selection.api_key())
    }

    /// Registered provider names for a capability, sorted.
    pub fn providers(&self, capability: Capability) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .table
            .get(&capability)
            .map(|providers| providers.keys().map(String::as_str).collect())
            .unwrap_or_default();
        names.sort_unstable();
        names
    }

    /// Whether `provider` is registered under `capability`.
    pub fn supports(&self, capability: Capability, provider: &str) -> bool {
        self.table
            .get(&capability)
            .is_some_and(|providers| providers.contains_key(provider))
    }

    /// Env var consulted for a pair's fallback credential, if any.
    pub fn env_key(&self, capability: Capability, provider: &str) -> Option<&str> {
        self.table
            .get(&capability)
            .and_then(|providers| providers.get(provider))
            .and_then(|entry| entry.env_key.as_deref())
    }

    /// Descriptor defaults in effect.
    pub fn defaults(&self) -> &DefaultsConfig {
        &self.defaults
    }

    /// Number of registered (capability, provider) pairs.
    pub fn len(&self) -> usize {
        self.table.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
