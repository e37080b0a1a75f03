//! Resolution errors.

use thiserror::Error;

use crate::types::Capability;

/// Errors raised while resolving a (capability, provider) pair.
///
/// Both variants are reported synchronously to the caller. Credential problems
/// are not part of this taxonomy: they surface later, when a handle is used.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The capability string is not one of `llm`, `stt`, `tts`.
    #[error("unsupported model capability: {0}")]
    UnsupportedCapability(String),

    /// No constructor is registered for this provider under the capability.
    #[error("unsupported {capability} provider: {provider}")]
    UnsupportedProvider {
        capability: Capability,
        provider: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_capability_message() {
        let err = RegistryError::UnsupportedCapability("vision".into());
        assert_eq!(err.to_string(), "unsupported model capability: vision");
    }

    #[test]
    fn test_unsupported_provider_names_both() {
        let err = RegistryError::UnsupportedProvider {
            capability: Capability::Tts,
            provider: "acme".into(),
        };
        assert_eq!(err.to_string(), "unsupported tts provider: acme");
    }
}
