use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use serde_json::{Value, json};

use super::error::ApiError;

pub const DEFAULT_API_URL: &str = "https://grackdb.fogo.sh/query";

const PROVIDER_USER_AGENT: &str = concat!("grackdb-provider/", env!("CARGO_PKG_VERSION"));

/// Provider-level settings, resolved by the host before any reconciler runs.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub api_url: String,
    /// Bearer token; anonymous requests are allowed when unset.
    pub token: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
        }
    }
}

/// GraphQL client for the GrackDB API.
///
/// Headers are fixed at construction; the client is immutable afterwards and
/// shared by reference across reconciler calls.
#[derive(Clone)]
pub struct GrackdbClient {
    client: reqwest::Client,
    api_url: String,
}

impl GrackdbClient {
    pub fn new(config: ProviderConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(PROVIDER_USER_AGENT));

        if let Some(token) = &config.token {
            let auth_value = format!("Bearer {}", token);
            let header_value =
                HeaderValue::from_str(&auth_value).map_err(|_| ApiError::Auth {
                    message: "invalid token format".to_string(),
                })?;
            headers.insert(AUTHORIZATION, header_value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(ApiError::Network)?;

        Ok(Self {
            client,
            api_url: config.api_url,
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Issues a single GraphQL request and returns the envelope's `data`
    /// value. One synchronous round-trip; no retries.
    pub async fn execute(&self, query: &str, variables: Value) -> Result<Value, ApiError> {
        let body = json!({
            "operationName": null,
            "query": query,
            "variables": variables,
        });

        let response = self.client.post(&self.api_url).json(&body).send().await?;
        let status = response.status();

        let envelope: Value = response.json().await.map_err(|e| ApiError::Decode {
            message: e.to_string(),
        })?;

        tracing::debug!(status = status.as_u16(), "GraphQL response received");

        match envelope.get("data") {
            Some(data) if !data.is_null() => Ok(data.clone()),
            _ => Err(ApiError::MissingData {
                key: "data".to_string(),
            }),
        }
    }
}

impl std::fmt::Debug for GrackdbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GrackdbClient")
            .field("api_url", &self.api_url)
            .field("authorization", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_token(token: &str) -> ProviderConfig {
        ProviderConfig {
            api_url: DEFAULT_API_URL.to_string(),
            token: Some(token.to_string()),
        }
    }

    #[test]
    fn test_client_creation() {
        let client = GrackdbClient::new(config_with_token("test_token"));
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_creation_without_token() {
        let client = GrackdbClient::new(ProviderConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_creation_invalid_token() {
        let result = GrackdbClient::new(config_with_token("bad\ntoken"));
        assert!(matches!(result, Err(ApiError::Auth { .. })));
    }

    #[test]
    fn test_debug_does_not_expose_token() {
        let client = GrackdbClient::new(config_with_token("super_secret_token_12345")).unwrap();
        let debug_output = format!("{:?}", client);

        assert!(
            debug_output.contains("[REDACTED]"),
            "Debug output should contain [REDACTED]"
        );
        assert!(
            !debug_output.contains("super_secret_token_12345"),
            "Debug output must NOT contain the actual token"
        );
    }

    #[test]
    fn test_client_is_clone() {
        let client = GrackdbClient::new(config_with_token("test_token")).unwrap();
        let _cloned = client.clone();
    }

    #[test]
    fn test_default_api_url() {
        let client = GrackdbClient::new(ProviderConfig::default()).unwrap();
        assert_eq!(client.api_url(), "https://grackdb.fogo.sh/query");
    }
}
