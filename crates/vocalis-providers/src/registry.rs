//! Provider registry — static specs for all 9 supported vendors.
//!
//! Each `ProviderSpec` describes how to reach one vendor: which capabilities it
//! offers, which env var holds its API key, its default API base and how the
//! key goes on the wire.

use vocalis_core::Capability;

// ─────────────────────────────────────────────
// ProviderSpec — static metadata for one provider
// ─────────────────────────────────────────────

/// How a provider expects the API key to be sent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthScheme {
    /// `Authorization: Bearer <key>`
    Bearer,
    /// `Authorization: <scheme> <key>`, e.g. `Token` or `Key`.
    Scheme(&'static str),
    /// `Authorization: <key>`
    Raw,
    /// `<header>: <key>`, e.g. `xi-api-key`.
    Header(&'static str),
}

impl AuthScheme {
    /// Header name and value carrying `api_key`.
    pub fn header(&self, api_key: &str) -> (&'static str, String) {
        match self {
            AuthScheme::Bearer => ("authorization", format!("Bearer {api_key}")),
            AuthScheme::Scheme(scheme) => ("authorization", format!("{scheme} {api_key}")),
            AuthScheme::Raw => ("authorization", api_key.to_string()),
            AuthScheme::Header(name) => (*name, api_key.to_string()),
        }
    }
}

/// Static specification describing one provider.
#[derive(Clone, Debug)]
pub struct ProviderSpec {
    /// Internal name (e.g. `"deepgram"`). Matches the request's `*_provider` attribute.
    pub name: &'static str,
    /// Human-readable name for logs. E.g. `"ElevenLabs"`.
    pub display_name: &'static str,
    /// Environment variable for the API key. E.g. `"DEEPGRAM_API_KEY"`.
    pub env_key: &'static str,
    /// Capabilities this provider offers.
    pub capabilities: &'static [Capability],
    /// Default API base URL.
    pub default_api_base: &'static str,
    /// Where the API key goes on each request.
    pub auth: AuthScheme,
}

impl ProviderSpec {
    /// Whether this provider offers `capability`.
    pub fn supports(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }
}

// ─────────────────────────────────────────────
// All 9 providers
// ─────────────────────────────────────────────

/// Complete list of supported provider specifications.
pub static PROVIDERS: &[ProviderSpec] = &[
    ProviderSpec {
        name: "openai",
        display_name: "OpenAI",
        env_key: "OPENAI_API_KEY",
        capabilities: &[Capability::Llm, Capability::Stt, Capability::Tts],
        default_api_base: "https://api.openai.com/v1",
        auth: AuthScheme::Bearer,
    },
    // OpenAI-compatible endpoints under /openai/v1
    ProviderSpec {
        name: "groq",
        display_name: "Groq",
        env_key: "GROQ_API_KEY",
        capabilities: &[Capability::Llm, Capability::Stt, Capability::Tts],
        default_api_base: "https://api.groq.com/openai/v1",
        auth: AuthScheme::Bearer,
    },
    ProviderSpec {
        name: "deepgram",
        display_name: "Deepgram",
        env_key: "DEEPGRAM_API_KEY",
        capabilities: &[Capability::Stt, Capability::Tts],
        default_api_base: "https://api.deepgram.com/v1",
        auth: AuthScheme::Scheme("Token"),
    },
    ProviderSpec {
        name: "assemblyai",
        display_name: "AssemblyAI",
        env_key: "ASSEMBLYAI_API_KEY",
        capabilities: &[Capability::Stt],
        default_api_base: "https://api.assemblyai.com/v2",
        auth: AuthScheme::Raw,
    },
    ProviderSpec {
        name: "cartesia",
        display_name: "Cartesia",
        env_key: "CARTESIA_API_KEY",
        capabilities: &[Capability::Stt, Capability::Tts],
        default_api_base: "https://api.cartesia.ai",
        auth: AuthScheme::Header("x-api-key"),
    },
    ProviderSpec {
        name: "fal",
        display_name: "Fal",
        env_key: "FAL_API_KEY",
        capabilities: &[Capability::Stt],
        default_api_base: "https://fal.run",
        auth: AuthScheme::Scheme("Key"),
    },
    ProviderSpec {
        name: "sarvam",
        display_name: "Sarvam",
        env_key: "SARVAM_API_KEY",
        capabilities: &[Capability::Stt, Capability::Tts],
        default_api_base: "https://api.sarvam.ai",
        auth: AuthScheme::Header("api-subscription-key"),
    },
    ProviderSpec {
        name: "elevenlabs",
        display_name: "ElevenLabs",
        env_key: "ELEVENLABS_API_KEY",
        capabilities: &[Capability::Tts],
        default_api_base: "https://api.elevenlabs.io/v1",
        auth: AuthScheme::Header("xi-api-key"),
    },
    ProviderSpec {
        name: "playht",
        display_name: "PlayHT",
        env_key: "PLAYHT_API_KEY",
        capabilities: &[Capability::Tts],
        default_api_base: "https://api.play.ht/api/v2",
        auth: AuthScheme::Bearer,
    },
];

// ─────────────────────────────────────────────
// Lookup functions
// ─────────────────────────────────────────────

/// Find a provider spec by exact name.
pub fn find_by_name(name: &str) -> Option<&'static ProviderSpec> {
    PROVIDERS.iter().find(|spec| spec.name == name)
}

/// All providers offering `capability`, in catalog order.
pub fn specs_for(capability: Capability) -> impl Iterator<Item = &'static ProviderSpec> {
    PROVIDERS.iter().filter(move |spec| spec.supports(capability))
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_by_name() {
        let spec = find_by_name("elevenlabs").unwrap();
        assert_eq!(spec.display_name, "ElevenLabs");
        assert_eq!(spec.env_key, "ELEVENLABS_API_KEY");
        assert!(find_by_name("acme").is_none());
    }

    #[test]
    fn test_capability_counts() {
        assert_eq!(specs_for(Capability::Llm).count(), 2);
        assert_eq!(specs_for(Capability::Stt).count(), 7);
        assert_eq!(specs_for(Capability::Tts).count(), 7);
    }

    #[test]
    fn test_llm_providers() {
        let names: Vec<&str> = specs_for(Capability::Llm).map(|s| s.name).collect();
        assert_eq!(names, vec!["openai", "groq"]);
    }

    #[test]
    fn test_shared_vendor_spans_capabilities() {
        let spec = find_by_name("deepgram").unwrap();
        assert!(spec.supports(Capability::Stt));
        assert!(spec.supports(Capability::Tts));
        assert!(!spec.supports(Capability::Llm));
    }

    #[test]
    fn test_auth_headers() {
        assert_eq!(
            AuthScheme::Bearer.header("sk-1"),
            ("authorization", "Bearer sk-1".to_string())
        );
        assert_eq!(
            AuthScheme::Scheme("Token").header("dg-1"),
            ("authorization", "Token dg-1".to_string())
        );
        assert_eq!(
            AuthScheme::Raw.header("aai-1"),
            ("authorization", "aai-1".to_string())
        );
        assert_eq!(
            AuthScheme::Header("xi-api-key").header("xi-1"),
            ("xi-api-key", "xi-1".to_string())
        );
    }

    #[test]
    fn test_all_providers_have_unique_names() {
        let names: Vec<&str> = PROVIDERS.iter().map(|s| s.name).collect();
        let mut unique = names.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(names.len(), unique.len(), "Duplicate provider names found");
    }

    #[test]
    fn test_env_keys_follow_naming() {
        for spec in PROVIDERS {
            assert_eq!(
                spec.env_key,
                format!("{}_API_KEY", spec.name.to_uppercase()),
                "unexpected env var for {}",
                spec.name
            );
        }
    }

    #[test]
    fn test_provider_count() {
        assert_eq!(PROVIDERS.len(), 9);
    }
}
