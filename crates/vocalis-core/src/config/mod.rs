//! Configuration system — schema, loading, and env var overrides.
//!
//! # Usage
//! ```no_run
//! use vocalis_core::config;
//!
//! let cfg = config::load_config(None);
//! println!("LLM provider: {}", cfg.defaults.llm.provider);
//! ```

pub mod loader;
pub mod schema;

// Re-export key types
pub use loader::{get_config_path, load_config, load_config_with, save_config};
pub use schema::{Config, DefaultsConfig, ModelDefault, ProviderConfig, ProvidersConfig};
