//! Provider layer for Vocalis.
//!
//! # Architecture
//!
//! - [`registry`] — static specs for the 9 supported vendors (env vars, API bases, auth)
//! - [`traits::Model`] — the opaque handle every constructor returns
//! - [`client::ModelClient`] — lazily-authenticated HTTP client used by the built-in constructors
//! - [`factory::ModelRegistry`] — capability → provider → constructor table with
//!   `resolve` and `resolve_from_descriptor`

pub mod client;
pub mod error;
pub mod factory;
pub mod registry;
pub mod traits;

// Re-export main types for convenience
pub use client::ModelClient;
pub use error::ModelError;
pub use factory::{Constructor, ModelRegistry, ModelRegistryBuilder, ModelSet};
pub use registry::{AuthScheme, ProviderSpec, PROVIDERS};
pub use traits::{Model, ModelHandle};
