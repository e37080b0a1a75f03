//! `vocalis providers` — list the registry contents.

use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;

use vocalis_core::config::load_config;
use vocalis_core::{Capability, EnvLookup, ProcessEnv};
use vocalis_providers::ModelRegistry;

use crate::helpers::key_status;

/// Run the providers command.
pub fn run(capability: Option<&str>) -> Result<()> {
    let capabilities = match capability {
        Some(name) => vec![name.parse::<Capability>()?],
        None => Capability::ALL.to_vec(),
    };

    let config = load_config(None);
    let env: Arc<dyn EnvLookup> = Arc::new(ProcessEnv);
    let registry = ModelRegistry::with_builtin_providers(env.clone(), &config);

    println!();
    for capability in capabilities {
        let defaults = registry.defaults().get(capability);
        println!(
            "  {} {}",
            format!("{}:", capability.description()).bold(),
            format!("(default {}/{})", defaults.provider, defaults.model_id).dimmed()
        );

        for provider in registry.providers(capability) {
            let env_key = registry.env_key(capability, provider);
            let configured = env_key.and_then(|key| env.var(key)).is_some();
            println!(
                "    {:<14} {:<22} {}",
                provider,
                env_key.unwrap_or("-").dimmed(),
                key_status(configured)
            );
        }
        println!();
    }

    Ok(())
}
