//! `vocalis status` — show configuration and effective defaults.

use anyhow::Result;
use colored::Colorize;

use vocalis_core::config::{get_config_path, load_config};
use vocalis_core::{Capability, EnvLookup, ProcessEnv};
use vocalis_providers::registry::{find_by_name, PROVIDERS};

use crate::helpers::key_status;

/// Run the status command.
pub fn run() -> Result<()> {
    let config = load_config(None);
    let config_path = get_config_path();

    println!();
    println!("{}", "Vocalis Status".cyan().bold());
    println!();

    // Config
    println!(
        "  {:<18} {} {}",
        "Config:".bold(),
        config_path.display(),
        if config_path.exists() {
            "✓".green().to_string()
        } else {
            "(not found, using defaults)".dimmed().to_string()
        }
    );

    // Defaults
    println!();
    println!("  {}", "Defaults:".bold());
    for capability in Capability::ALL {
        let default = config.defaults.get(capability);
        let known = find_by_name(&default.provider).is_some_and(|spec| spec.supports(capability));
        println!(
            "    {:<20} {}/{}{}",
            capability.description(),
            default.provider,
            default.model_id,
            if known {
                String::new()
            } else {
                format!(" {}", "(unsupported)".red())
            }
        );
    }

    // Providers
    println!();
    println!("  {}", "Providers:".bold());
    for spec in PROVIDERS {
        let api_base = config
            .providers
            .get_by_name(spec.name)
            .and_then(|p| p.api_base.as_deref())
            .unwrap_or(spec.default_api_base);
        println!(
            "    {:<20} {:<32} {}",
            spec.display_name,
            api_base.dimmed(),
            key_status(ProcessEnv.var(spec.env_key).is_some())
        );
    }

    println!();

    Ok(())
}
