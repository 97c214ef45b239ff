//! Access token claims.

use serde::{Deserialize, Serialize};

/// Audience claim: the platform issues a single string, but RFC 7519
/// allows an array.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Audience {
    /// A single audience value
    One(String),
    /// Multiple audience values
    Many(Vec<String>),
}

impl Audience {
    /// All audience values carried by the claim.
    #[must_use]
    pub fn values(&self) -> &[String] {
        match self {
            Self::One(aud) => std::slice::from_ref(aud),
            Self::Many(auds) => auds,
        }
    }

    /// Render the claim for error messages.
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::One(aud) => aud.clone(),
            Self::Many(auds) => auds.join(", "),
        }
    }
}

/// Claims carried by a platform access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Issuer
    pub iss: String,
    /// Subject
    #[serde(default)]
    pub sub: Option<String>,
    /// Audience (string or array)
    #[serde(default)]
    pub aud: Option<Audience>,
    /// Expiration, seconds since the epoch
    pub exp: i64,
    /// Issued-at, seconds since the epoch
    #[serde(default)]
    pub iat: Option<i64>,
    /// Everything else (scopes, environment, client id, ...)
    #[serde(flatten)]
    pub custom: serde_json::Map<String, serde_json::Value>,
}
