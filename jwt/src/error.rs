//! Verification error types.

use thiserror::Error;

/// Errors raised while verifying an access token.
#[derive(Error, Debug)]
pub enum VerifyError {
    /// The caller did not supply an expected audience
    #[error("Audience claim is required")]
    AudienceRequired,

    /// Audience claim does not match the expected value
    #[error("Audience claim {actual} does not match expected audience: {expected}")]
    AudienceMismatch {
        /// Audience claim carried by the token
        actual: String,
        /// Audience the caller expected
        expected: String,
    },

    /// Audience claim matches none of the expected values
    #[error("Audience claim {actual} does not match one of the expected audiences: {expected}")]
    AudienceNotInSet {
        /// Audience claim carried by the token
        actual: String,
        /// Comma-separated list of expected audiences
        expected: String,
    },

    /// Issuer claim does not match the configured issuer
    #[error("Issuer claim {actual} does not match expected issuer: {expected}")]
    IssuerMismatch {
        /// Issuer claim carried by the token
        actual: String,
        /// Issuer the verifier was configured with
        expected: String,
    },

    /// Token structure could not be parsed
    #[error("Token malformed: {0}")]
    Malformed(String),

    /// Signature or standard claim verification failed
    #[error("Token verification failed: {0}")]
    Verification(#[from] jsonwebtoken::errors::Error),

    /// No signing key with the token's key id
    #[error("No signing key found for kid: {0}")]
    KeyNotFound(String),

    /// JWKS document could not be fetched or parsed
    #[error("JWKS error: {0}")]
    Jwks(String),

    /// Transport failure while fetching the JWKS document
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type for verification operations.
pub type VerifyResult<T> = Result<T, VerifyError>;

impl VerifyError {
    /// Create a malformed-token error.
    #[must_use]
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }

    /// Create a JWKS error.
    #[must_use]
    pub fn jwks(msg: impl Into<String>) -> Self {
        Self::Jwks(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatch_messages_name_both_values() {
        let err = VerifyError::AudienceMismatch {
            actual: "api://a".to_string(),
            expected: "api://b".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Audience claim api://a does not match expected audience: api://b"
        );

        let err = VerifyError::IssuerMismatch {
            actual: "https://other".to_string(),
            expected: "https://issuer".to_string(),
        };
        assert!(err.to_string().contains("https://other"));
        assert!(err.to_string().contains("https://issuer"));
    }
}
