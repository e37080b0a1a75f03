//! Errors raised by model handles at use time.

use thiserror::Error;

/// Errors a [`ModelClient`](crate::client::ModelClient) reports when it is used.
///
/// Resolution never produces these; a handle without a credential is still a
/// valid handle until it has to authenticate.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Neither an explicit key nor the provider's env var was available.
    #[error("no API key for {provider}: pass one explicitly or set {env_key}")]
    MissingCredential {
        provider: String,
        env_key: &'static str,
    },

    /// The key contains bytes that cannot go into an HTTP header.
    #[error("API key for {provider} is not a valid HTTP header value")]
    InvalidCredential { provider: String },
}
