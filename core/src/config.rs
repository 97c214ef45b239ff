//! SDK client configuration.

use crate::error::{SdkError, SdkResult};
use secrecy::SecretString;
use std::time::Duration;
use tracing::warn;
use uuid::Uuid;

/// Configuration for a PingOne API client.
///
/// Base URLs default to the hosted platform domains and can be overridden
/// through `AUTH_BASE_URL` / `API_BASE_URL` or the builder methods, for
/// example when pointing the SDK at a regional deployment.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Environment (tenant) identifier
    pub environment_id: String,
    /// OAuth2 client identifier, must be a UUID
    pub client_id: String,
    /// OAuth2 client secret
    pub client_secret: SecretString,
    /// Space-separated OAuth2 scopes requested for the worker token
    pub scopes: String,
    /// Authorization server base URL
    pub auth_base: String,
    /// Management API base URL
    pub api_base: String,
    /// Request timeout
    pub timeout: Duration,
}

impl ApiConfig {
    /// Create a configuration for the given environment and client credentials.
    #[must_use]
    pub fn new(
        environment_id: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            environment_id: environment_id.into(),
            client_id: client_id.into(),
            client_secret: SecretString::from(client_secret.into()),
            scopes: String::new(),
            auth_base: std::env::var("AUTH_BASE_URL")
                .unwrap_or_else(|_| "https://auth.pingone.com".to_string()),
            api_base: std::env::var("API_BASE_URL")
                .unwrap_or_else(|_| "https://api.pingone.com".to_string()),
            timeout: Duration::from_secs(30),
        }
    }

    /// Set the OAuth2 scopes requested for the worker token.
    #[must_use]
    pub fn with_scopes(mut self, scopes: impl Into<String>) -> Self {
        self.scopes = scopes.into();
        self
    }

    /// Override the authorization server base URL.
    #[must_use]
    pub fn with_auth_base(mut self, auth_base: impl Into<String>) -> Self {
        self.auth_base = auth_base.into();
        self
    }

    /// Override the management API base URL.
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// OAuth2 issuer URL for this environment.
    #[must_use]
    pub fn issuer(&self) -> String {
        format!("{}/{}/as", self.auth_base, self.environment_id)
    }

    /// Token endpoint URL, `{issuer}/token`.
    #[must_use]
    pub fn token_endpoint(&self) -> String {
        format!("{}/token", self.issuer())
    }

    /// Management API root for this environment.
    #[must_use]
    pub fn api_url(&self) -> String {
        format!("{}/v1/environments/{}", self.api_base, self.environment_id)
    }

    /// Validate the configuration.
    ///
    /// Non-HTTPS base URLs are allowed (local testing) but logged as a
    /// warning.
    ///
    /// # Errors
    ///
    /// Returns `SdkError::InvalidConfig` when the client id is not a valid
    /// UUID or either base URL does not parse.
    pub fn validate(&self) -> SdkResult<()> {
        if Uuid::parse_str(&self.client_id).is_err() {
            return Err(SdkError::invalid_config(format!(
                "client id must be a valid UUID, got: {}",
                self.client_id
            )));
        }
        for base in [&self.auth_base, &self.api_base] {
            if url::Url::parse(base).is_err() {
                return Err(SdkError::invalid_config(format!("invalid base URL: {base}")));
            }
            if !base.starts_with("https://") {
                warn!(url = %base, "Base URL is not HTTPS");
            }
        }
        Ok(())
    }
}
