//! JWKS fetching with an in-process TTL cache.

use crate::error::{VerifyError, VerifyResult};
use jsonwebtoken::DecodingKey;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// A JSON Web Key, RSA fields only; other key types are skipped.
#[derive(Debug, Clone, Deserialize)]
pub struct Jwk {
    /// Key type (RSA, EC, oct)
    pub kty: String,
    /// Key ID
    pub kid: String,
    /// RSA modulus
    #[serde(default)]
    pub n: Option<String>,
    /// RSA exponent
    #[serde(default)]
    pub e: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Jwks {
    keys: Vec<Jwk>,
}

struct CacheEntry {
    keys: HashMap<String, DecodingKey>,
    fetched_at: Instant,
}

/// Resolves signing keys from a JWKS endpoint, caching the key set for a
/// fixed TTL. An unknown key id on a fresh cache triggers one refetch, which
/// covers key rotation.
///
/// Concurrent refreshes may duplicate the fetch; the fetch is idempotent and
/// the last writer wins, matching the token cache's discipline.
pub struct JwksCache {
    url: String,
    ttl: Duration,
    http: reqwest::Client,
    cache: RwLock<Option<CacheEntry>>,
}

impl JwksCache {
    /// Create a cache for the given JWKS URL.
    #[must_use]
    pub fn new(url: impl Into<String>, ttl: Duration, http: reqwest::Client) -> Self {
        Self {
            url: url.into(),
            ttl,
            http,
            cache: RwLock::new(None),
        }
    }

    /// Get the decoding key for the given key id.
    ///
    /// # Errors
    ///
    /// Returns `VerifyError::Jwks` when the key set cannot be fetched or
    /// parsed, `VerifyError::KeyNotFound` when no key matches after a
    /// refresh.
    pub async fn get_key(&self, kid: &str) -> VerifyResult<DecodingKey> {
        {
            let cache = self.cache.read().await;
            if let Some(ref entry) = *cache {
                if entry.fetched_at.elapsed() < self.ttl {
                    if let Some(key) = entry.keys.get(kid) {
                        return Ok(key.clone());
                    }
                }
            }
        }

        let entry = self.refresh().await?;
        let key = entry.keys.get(kid).cloned();
        *self.cache.write().await = Some(entry);
        key.ok_or_else(|| VerifyError::KeyNotFound(kid.to_string()))
    }

    /// Number of keys currently cached.
    pub async fn key_count(&self) -> usize {
        self.cache
            .read()
            .await
            .as_ref()
            .map_or(0, |entry| entry.keys.len())
    }

    async fn refresh(&self) -> VerifyResult<CacheEntry> {
        debug!(url = %self.url, "Fetching JWKS");

        let response = self.http.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(VerifyError::jwks(format!(
                "JWKS fetch failed with status {status}"
            )));
        }

        let jwks: Jwks = response
            .json()
            .await
            .map_err(|e| VerifyError::jwks(format!("failed to parse JWKS: {e}")))?;

        let mut keys = HashMap::new();
        for jwk in &jwks.keys {
            match Self::decoding_key(jwk) {
                Some(key) => {
                    keys.insert(jwk.kid.clone(), key);
                }
                None => warn!(kid = %jwk.kid, kty = %jwk.kty, "Skipping unusable JWK"),
            }
        }

        info!(count = keys.len(), "JWKS cache updated");
        Ok(CacheEntry {
            keys,
            fetched_at: Instant::now(),
        })
    }

    fn decoding_key(jwk: &Jwk) -> Option<DecodingKey> {
        if jwk.kty != "RSA" {
            return None;
        }
        let n = jwk.n.as_ref()?;
        let e = jwk.e.as_ref()?;
        DecodingKey::from_rsa_components(n, e).ok()
    }
}
