//! RS256 access token verification.

use crate::claims::{Audience, Claims};
use crate::error::{VerifyError, VerifyResult};
use crate::jwks::JwksCache;
use jsonwebtoken::{decode, decode_header, Algorithm, Validation};
use std::time::Duration;
use tracing::instrument;

/// Signing keys are cached for an hour before refetching.
const KEY_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

/// Verifies access tokens issued by a single environment.
///
/// All platform access tokens are JWTs signed with RS256; keys are resolved
/// from the issuer's `/v1/keys` endpoint.
pub struct TokenVerifier {
    issuer: String,
    jwks: JwksCache,
}

impl TokenVerifier {
    /// Create a verifier for the given issuer.
    #[must_use]
    pub fn new(issuer: impl Into<String>) -> Self {
        let issuer = issuer.into();
        let keys_url = format!("{issuer}/v1/keys");
        Self::with_keys_url(issuer, keys_url)
    }

    /// Create a verifier that resolves keys from an explicit JWKS URL.
    #[must_use]
    pub fn with_keys_url(issuer: impl Into<String>, keys_url: impl Into<String>) -> Self {
        Self {
            issuer: issuer.into(),
            jwks: JwksCache::new(keys_url, KEY_CACHE_TTL, reqwest::Client::new()),
        }
    }

    /// The issuer this verifier checks tokens against.
    #[must_use]
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Verify the token's signature and expiry and return its claims.
    ///
    /// # Errors
    ///
    /// Returns `VerifyError::Malformed` for unparseable tokens or a missing
    /// key id, `VerifyError::KeyNotFound`/`VerifyError::Jwks` when no signing
    /// key can be resolved, and `VerifyError::Verification` when the
    /// signature or expiry check fails.
    #[instrument(skip(self, token))]
    pub async fn validate_token(&self, token: &str) -> VerifyResult<Claims> {
        let header =
            decode_header(token).map_err(|e| VerifyError::malformed(format!("invalid header: {e}")))?;
        let kid = header
            .kid
            .ok_or_else(|| VerifyError::malformed("missing kid in header"))?;

        let key = self.jwks.get_key(&kid).await?;

        let mut validation = Validation::new(Algorithm::RS256);
        // Audience and issuer are checked separately so mismatches carry
        // both values in the error message.
        validation.validate_aud = false;

        let data = decode::<Claims>(token, &key, &validation)?;
        Ok(data.claims)
    }

    /// Verify a token and check its audience and issuer claims.
    ///
    /// # Errors
    ///
    /// Everything from [`TokenVerifier::validate_token`], plus
    /// `VerifyError::AudienceRequired` when `expected_audiences` is empty and
    /// the audience/issuer mismatch variants.
    pub async fn verify_access_token(
        &self,
        token: &str,
        expected_audiences: &[&str],
    ) -> VerifyResult<Claims> {
        let claims = self.validate_token(token).await?;
        check_audience(&claims, expected_audiences)?;
        check_issuer(&claims, &self.issuer)?;
        Ok(claims)
    }
}

fn check_audience(claims: &Claims, expected: &[&str]) -> VerifyResult<()> {
    if expected.is_empty() {
        return Err(VerifyError::AudienceRequired);
    }

    let actual = claims
        .aud
        .as_ref()
        .map_or_else(|| "(none)".to_string(), Audience::display);

    let matched = claims.aud.as_ref().is_some_and(|aud| {
        aud.values()
            .iter()
            .any(|value| expected.contains(&value.as_str()))
    });
    if matched {
        return Ok(());
    }

    if let [single] = expected {
        Err(VerifyError::AudienceMismatch {
            actual,
            expected: (*single).to_string(),
        })
    } else {
        Err(VerifyError::AudienceNotInSet {
            actual,
            expected: expected.join(", "),
        })
    }
}

fn check_issuer(claims: &Claims, expected: &str) -> VerifyResult<()> {
    if claims.iss == expected {
        Ok(())
    } else {
        Err(VerifyError::IssuerMismatch {
            actual: claims.iss.clone(),
            expected: expected.to_string(),
        })
    }
}
