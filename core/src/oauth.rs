//! OAuth2 client-credentials token acquisition.
//!
//! A worker token is fetched once and reused for the lifetime of the
//! provider. There is no automatic refresh: the server-reported lifetime is
//! exposed through [`TokenProvider::expires_in`] and callers that need a
//! fresh token call [`TokenProvider::invalidate`].

use crate::config::ApiConfig;
use crate::error::{SdkError, SdkResult};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

#[derive(Serialize)]
struct TokenRequest<'a> {
    grant_type: &'a str,
    scope: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    expires_in: Option<u64>,
}

struct CachedToken {
    access_token: String,
    expires_in: Option<Duration>,
}

/// Produces bearer tokens for the management API.
///
/// The token is cached in a single slot. Two tasks racing the first fetch may
/// both hit the token endpoint; the fetch is idempotent and the last writer
/// wins, so no locking is held across the network call.
pub struct TokenProvider {
    token_url: String,
    client_id: String,
    client_secret: SecretString,
    scopes: String,
    http: Client,
    cached: RwLock<Option<CachedToken>>,
}

impl TokenProvider {
    /// Create a provider for the given configuration, reusing an existing
    /// HTTP client.
    #[must_use]
    pub fn new(config: &ApiConfig, http: Client) -> Self {
        Self {
            token_url: config.token_endpoint(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            scopes: config.scopes.clone(),
            http,
            cached: RwLock::new(None),
        }
    }

    /// Return a bearer token, fetching one only when none is cached.
    ///
    /// # Errors
    ///
    /// Returns `SdkError::Auth` when the token endpoint is unreachable,
    /// returns a non-2xx status, or responds without an `access_token`. A
    /// failed fetch leaves the cache empty so a later call retries.
    pub async fn access_token(&self) -> SdkResult<String> {
        if let Some(ref token) = *self.cached.read().await {
            return Ok(token.access_token.clone());
        }

        let token = self.fetch_token().await?;
        let access_token = token.access_token.clone();
        *self.cached.write().await = Some(token);
        Ok(access_token)
    }

    /// Server-reported lifetime of the cached token, if any.
    ///
    /// Advisory only: the provider never refreshes on its own.
    pub async fn expires_in(&self) -> Option<Duration> {
        self.cached.read().await.as_ref().and_then(|t| t.expires_in)
    }

    /// Drop the cached token so the next call fetches a fresh one.
    pub async fn invalidate(&self) {
        *self.cached.write().await = None;
    }

    #[instrument(skip(self), fields(client_id = %self.client_id))]
    async fn fetch_token(&self) -> SdkResult<CachedToken> {
        debug!(url = %self.token_url, "Fetching access token");

        let request = TokenRequest {
            grant_type: "client_credentials",
            scope: &self.scopes,
            client_id: &self.client_id,
            client_secret: self.client_secret.expose_secret(),
        };

        let response = self
            .http
            .post(&self.token_url)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&request)
            .send()
            .await
            .map_err(|e| SdkError::auth(format!("token endpoint unreachable: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(SdkError::auth(format!(
                "token endpoint returned {status}: {text}"
            )));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| SdkError::auth(format!("invalid token response: {e}")))?;

        let access_token = body
            .access_token
            .ok_or_else(|| SdkError::auth("token response missing access_token"))?;

        info!("Obtained access token");
        Ok(CachedToken {
            access_token,
            expires_in: body.expires_in.map(Duration::from_secs),
        })
    }
}
