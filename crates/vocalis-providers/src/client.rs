//! Lazily-authenticated HTTP client for one provider/model pair.
//!
//! This is the handle the built-in constructors produce. Building one never
//! fails and never touches the network; the credential is only checked when
//! a request is prepared with [`ModelClient::request`].

use std::any::Any;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, RequestBuilder};
use tracing::{debug, warn};

use vocalis_core::config::ProviderConfig;
use vocalis_core::Capability;

use crate::error::ModelError;
use crate::registry::ProviderSpec;
use crate::traits::Model;

// ─────────────────────────────────────────────
// ModelClient
// ─────────────────────────────────────────────

/// A provider client bound to one capability and model.
pub struct ModelClient {
    /// HTTP client (shared, connection-pooled).
    client: reqwest::Client,
    /// The role this client was resolved for.
    capability: Capability,
    /// Static provider spec (env var, auth scheme).
    spec: &'static ProviderSpec,
    /// Model identifier passed through from the request.
    model_id: String,
    /// API base URL (config override or spec default).
    api_base: String,
    /// Resolved credential, if any.
    api_key: Option<String>,
    /// Extra headers to send with each request.
    extra_headers: HeaderMap,
}

impl std::fmt::Debug for ModelClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelClient")
            .field("capability", &self.capability)
            .field("provider", &self.spec.display_name)
            .field("model_id", &self.model_id)
            .field("api_base", &self.api_base)
            .field("has_api_key", &self.api_key.is_some())
            .finish()
    }
}

impl ModelClient {
    /// Create a client for `model_id` on the provider described by `spec`.
    ///
    /// # Arguments
    /// * `client`     — Shared HTTP client
    /// * `capability` — Role being filled
    /// * `spec`       — Static provider spec from the registry
    /// * `model_id`   — Model to use
    /// * `api_key`    — Credential, already resolved; `None` defers the failure to use time
    /// * `config`     — User's per-provider config (api_base, extra_headers)
    pub fn new(
        client: reqwest::Client,
        capability: Capability,
        spec: &'static ProviderSpec,
        model_id: &str,
        api_key: Option<&str>,
        config: &ProviderConfig,
    ) -> Self {
        // Resolve API base: config > spec default
        let api_base = config
            .api_base
            .clone()
            .unwrap_or_else(|| spec.default_api_base.to_string());

        // Build extra headers
        let mut extra_headers = HeaderMap::new();
        if let Some(ref headers) = config.extra_headers {
            for (key, value) in headers {
                if let (Ok(name), Ok(val)) = (
                    HeaderName::from_bytes(key.as_bytes()),
                    HeaderValue::from_str(value),
                ) {
                    extra_headers.insert(name, val);
                } else {
                    warn!(provider = spec.name, "Invalid header: {}", key);
                }
            }
        }

        let api_key = api_key.filter(|k| !k.trim().is_empty()).map(String::from);
        if api_key.is_none() {
            debug!(
                provider = spec.name,
                env_key = spec.env_key,
                "no credential yet; deferring to first request"
            );
        }

        ModelClient {
            client,
            capability,
            spec,
            model_id: model_id.to_string(),
            api_base,
            api_key,
            extra_headers,
        }
    }

    /// Display name for logging.
    pub fn display_name(&self) -> &str {
        self.spec.display_name
    }

    /// The static spec this client was built from.
    pub fn spec(&self) -> &'static ProviderSpec {
        self.spec
    }

    /// Effective API base URL.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Whether a credential was found at construction time.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// The credential, or `MissingCredential` naming the env var to set.
    pub fn api_key(&self) -> Result<&str, ModelError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| ModelError::MissingCredential {
                provider: self.spec.name.to_string(),
                env_key: self.spec.env_key,
            })
    }

    /// Full URL for `path` under the API base.
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.api_base.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Start an authenticated request to `path`.
    ///
    /// This is where a missing credential is reported.
    pub fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ModelError> {
        let api_key = self.api_key()?;
        let (name, value) = self.spec.auth.header(api_key);
        let mut value = HeaderValue::from_str(&value).map_err(|_| ModelError::InvalidCredential {
            provider: self.spec.name.to_string(),
        })?;
        value.set_sensitive(true);

        let url = self.endpoint(path);
        debug!(
            provider = self.spec.display_name,
            model = %self.model_id,
            %method,
            url = %url,
            "Preparing provider request"
        );

        Ok(self
            .client
            .request(method, url)
            .headers(self.extra_headers.clone())
            .header(name, value))
    }
}

impl Model for ModelClient {
    fn capability(&self) -> Capability {
        self.capability
    }

    fn provider(&self) -> &str {
        self.spec.name
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::find_by_name;
    use std::collections::HashMap;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn make_client(
        provider: &str,
        capability: Capability,
        api_key: Option<&str>,
        api_base: Option<&str>,
    ) -> ModelClient {
        let spec = find_by_name(provider).unwrap();
        let config = ProviderConfig {
            api_base: api_base.map(String::from),
            extra_headers: None,
        };
        ModelClient::new(
            reqwest::Client::new(),
            capability,
            spec,
            "test-model",
            api_key,
            &config,
        )
    }

    // ── Unit tests ──

    #[test]
    fn test_default_api_base() {
        let client = make_client("groq", Capability::Llm, Some("gsk"), None);
        assert_eq!(client.api_base(), "https://api.groq.com/openai/v1");
    }

    #[test]
    fn test_config_overrides_default_base() {
        let client = make_client("openai", Capability::Tts, Some("sk"), Some("https://proxy.local/v1"));
        assert_eq!(client.api_base(), "https://proxy.local/v1");
    }

    #[test]
    fn test_endpoint_joins_slashes() {
        let client = make_client("openai", Capability::Stt, None, Some("https://api.openai.com/v1/"));
        assert_eq!(
            client.endpoint("/audio/transcriptions"),
            "https://api.openai.com/v1/audio/transcriptions"
        );
        assert_eq!(
            client.endpoint("audio/speech"),
            "https://api.openai.com/v1/audio/speech"
        );
    }

    #[test]
    fn test_model_trait_accessors() {
        let client = make_client("deepgram", Capability::Tts, Some("dg"), None);
        assert_eq!(client.capability(), Capability::Tts);
        assert_eq!(client.provider(), "deepgram");
        assert_eq!(client.model_id(), "test-model");
        assert_eq!(client.display_name(), "Deepgram");
    }

    #[test]
    fn test_empty_key_is_unconfigured() {
        let client = make_client("openai", Capability::Llm, Some(""), None);
        assert!(!client.is_configured());
        let client = make_client("openai", Capability::Llm, Some("   "), None);
        assert!(!client.is_configured());
    }

    #[test]
    fn test_missing_credential_deferred_to_request() {
        let client = make_client("sarvam", Capability::Stt, None, None);
        // Construction succeeded; the failure shows up only on use.
        let err = client.request(Method::POST, "/speech-to-text").unwrap_err();
        match err {
            ModelError::MissingCredential { provider, env_key } => {
                assert_eq!(provider, "sarvam");
                assert_eq!(env_key, "SARVAM_API_KEY");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_credential_bytes() {
        let client = make_client("openai", Capability::Llm, Some("bad\nkey"), None);
        let err = client.request(Method::GET, "/models").unwrap_err();
        assert!(matches!(err, ModelError::InvalidCredential { .. }));
    }

    #[test]
    fn test_debug_hides_key() {
        let client = make_client("elevenlabs", Capability::Tts, Some("xi-secret-value"), None);
        let debug = format!("{:?}", client);
        assert!(!debug.contains("xi-secret-value"));
        assert!(debug.contains("has_api_key: true"));
    }

    #[test]
    fn test_invalid_extra_header_skipped() {
        let spec = find_by_name("playht").unwrap();
        let mut headers = HashMap::new();
        headers.insert("X-User-Id".to_string(), "user-1".to_string());
        headers.insert("bad header".to_string(), "x".to_string());
        let config = ProviderConfig {
            api_base: None,
            extra_headers: Some(headers),
        };
        let client = ModelClient::new(
            reqwest::Client::new(),
            Capability::Tts,
            spec,
            "PlayDialog",
            Some("key"),
            &config,
        );
        assert!(client.extra_headers.contains_key("x-user-id"));
        assert_eq!(client.extra_headers.len(), 1);
    }

    // ── Integration tests with mock server ──

    #[tokio::test]
    async fn test_bearer_auth_sent() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/models"))
            .and(header("Authorization", "Bearer sk-test-123"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = make_client("openai", Capability::Llm, Some("sk-test-123"), Some(mock_server.uri().as_str()));
        let resp = client.request(Method::GET, "/models").unwrap().send().await.unwrap();
        assert_eq!(resp.status().as_u16(), 200);
    }

    #[tokio::test]
    async fn test_token_auth_sent() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/listen"))
            .and(header("Authorization", "Token dg-key"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = make_client("deepgram", Capability::Stt, Some("dg-key"), Some(mock_server.uri().as_str()));
        let resp = client.request(Method::POST, "listen").unwrap().send().await.unwrap();
        assert_eq!(resp.status().as_u16(), 200);
    }

    #[tokio::test]
    async fn test_custom_header_auth_sent() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/text-to-speech/voice-1"))
            .and(header("xi-api-key", "xi-key"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = make_client("elevenlabs", Capability::Tts, Some("xi-key"), Some(mock_server.uri().as_str()));
        let resp = client
            .request(Method::POST, "/text-to-speech/voice-1")
            .unwrap()
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status().as_u16(), 200);
    }

    #[tokio::test]
    async fn test_extra_headers_sent() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/voices"))
            .and(header("x-user-id", "user-42"))
            .and(header("Authorization", "Bearer ph-key"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let spec = find_by_name("playht").unwrap();
        let mut headers = HashMap::new();
        headers.insert("X-User-Id".to_string(), "user-42".to_string());
        let config = ProviderConfig {
            api_base: Some(mock_server.uri()),
            extra_headers: Some(headers),
        };
        let client = ModelClient::new(
            reqwest::Client::new(),
            Capability::Tts,
            spec,
            "PlayDialog",
            Some("ph-key"),
            &config,
        );

        let resp = client.request(Method::GET, "/voices").unwrap().send().await.unwrap();
        assert_eq!(resp.status().as_u16(), 200);
    }
}
