//! Bearer-authenticated HTTP request funnel.
//!
//! Every API call goes through [`Http::send`]: attach the bearer token,
//! issue the request, and convert any non-2xx response into
//! [`SdkError::Api`] carrying the parsed JSON error body.

use crate::config::ApiConfig;
use crate::error::{SdkError, SdkResult};
use crate::oauth::TokenProvider;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, ClientBuilder, Method};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Request timeout (default: 30s)
    pub timeout: Duration,
    /// Connection timeout (default: 10s)
    pub connect_timeout: Duration,
    /// Pool idle timeout (default: 90s)
    pub pool_idle_timeout: Duration,
    /// Maximum idle connections per host (default: 10)
    pub pool_max_idle_per_host: usize,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            pool_idle_timeout: Duration::from_secs(90),
            pool_max_idle_per_host: 10,
            user_agent: concat!("pingone-rust-sdk/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl HttpConfig {
    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Build a configured HTTP client with rustls TLS and connection pooling.
///
/// # Errors
///
/// Returns an error if the client cannot be built (e.g. TLS initialization
/// fails).
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    ClientBuilder::new()
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .pool_idle_timeout(config.pool_idle_timeout)
        .pool_max_idle_per_host(config.pool_max_idle_per_host)
        .user_agent(&config.user_agent)
        .use_rustls_tls()
        .build()
}

/// Request funnel that owns the HTTP client and the token provider.
pub struct Http {
    client: Client,
    tokens: TokenProvider,
}

impl Http {
    /// Create a funnel for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `SdkError::InvalidConfig` when the configuration fails
    /// validation, or a transport error when the client cannot be built.
    pub fn new(config: &ApiConfig) -> SdkResult<Self> {
        config.validate()?;
        let http_config = HttpConfig::default().with_timeout(config.timeout);
        let client = build_http_client(&http_config)?;
        let tokens = TokenProvider::new(config, client.clone());
        Ok(Self { client, tokens })
    }

    /// The token provider backing this funnel.
    #[must_use]
    pub const fn tokens(&self) -> &TokenProvider {
        &self.tokens
    }

    /// `GET` a JSON resource.
    ///
    /// # Errors
    ///
    /// See [`Http::send`] for the failure modes shared by all verbs.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> SdkResult<T> {
        self.send(Method::GET, url, None, None).await
    }

    /// `POST` a JSON body, with an optional vendor content type.
    ///
    /// # Errors
    ///
    /// See [`Http::send`].
    pub async fn post_json<T: DeserializeOwned>(
        &self,
        url: &str,
        content_type: Option<&str>,
        body: Option<&serde_json::Value>,
    ) -> SdkResult<T> {
        self.send(Method::POST, url, content_type, body).await
    }

    /// `PUT` a JSON body, with an optional vendor content type.
    ///
    /// # Errors
    ///
    /// See [`Http::send`].
    pub async fn put_json<T: DeserializeOwned>(
        &self,
        url: &str,
        content_type: Option<&str>,
        body: &serde_json::Value,
    ) -> SdkResult<T> {
        self.send(Method::PUT, url, content_type, Some(body)).await
    }

    /// `PATCH` a JSON body.
    ///
    /// # Errors
    ///
    /// See [`Http::send`].
    pub async fn patch_json<T: DeserializeOwned>(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> SdkResult<T> {
        self.send(Method::PATCH, url, None, Some(body)).await
    }

    /// `DELETE` a resource, discarding the response body.
    ///
    /// # Errors
    ///
    /// See [`Http::send`].
    pub async fn delete(&self, url: &str) -> SdkResult<()> {
        let response = self.request(Method::DELETE, url, None, None).await?;
        Self::error_filter(response).await?;
        Ok(())
    }

    /// Send a request and deserialize the JSON response.
    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        content_type: Option<&str>,
        body: Option<&serde_json::Value>,
    ) -> SdkResult<T> {
        let response = self.request(method, url, content_type, body).await?;
        let response = Self::error_filter(response).await?;
        Ok(response.json().await?)
    }

    async fn request(
        &self,
        method: Method,
        url: &str,
        content_type: Option<&str>,
        body: Option<&serde_json::Value>,
    ) -> SdkResult<reqwest::Response> {
        let token = self.tokens.access_token().await?;
        debug!(%method, url, "Sending API request");

        let mut request = self
            .client
            .request(method, url)
            .header(ACCEPT, "application/json")
            .bearer_auth(token);

        if let Some(ct) = content_type {
            request = request.header(CONTENT_TYPE, ct);
        }
        if let Some(b) = body {
            if content_type.is_none() {
                request = request.header(CONTENT_TYPE, "application/json");
            }
            request = request.body(serde_json::to_vec(b)?);
        }

        Ok(request.send().await?)
    }

    /// Pass 2xx responses through; convert anything else into an API error
    /// carrying the parsed JSON body. A body that is not valid JSON
    /// propagates as a serialization error instead.
    async fn error_filter(response: reqwest::Response) -> SdkResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await?;
        let body: serde_json::Value = serde_json::from_str(&text)?;
        Err(SdkError::Api {
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLIENT_ID: &str = "9c052a8a-14be-44e4-afc5-446f0b3b5c34";

    #[test]
    fn test_default_http_config() {
        let config = HttpConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.pool_max_idle_per_host, 10);
        assert!(config.user_agent.starts_with("pingone-rust-sdk/"));
    }

    #[test]
    fn test_build_client() {
        let config = HttpConfig::default().with_timeout(Duration::from_secs(5));
        assert!(build_http_client(&config).is_ok());
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = ApiConfig::new("env-1", "not-a-uuid", "secret");
        let err = match Http::new(&config) {
            Err(e) => e,
            Ok(_) => panic!("expected invalid config to be rejected"),
        };
        assert!(matches!(err, SdkError::InvalidConfig(_)));
    }
}
