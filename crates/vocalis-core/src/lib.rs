//! Core types for Vocalis — capabilities, request descriptors, errors, config.
//!
//! Everything here is provider-agnostic. The provider catalog and the
//! constructor table live in `vocalis-providers`.

pub mod config;
pub mod env;
pub mod error;
pub mod types;
pub mod utils;

pub use env::{EnvLookup, ProcessEnv, StaticEnv};
pub use error::RegistryError;
pub use types::{Capability, ModelRequest, ModelSelection};
