//! Wire types for the management API.

use serde::{Deserialize, Serialize};

/// Reference to a population by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationRef {
    /// Population identifier
    pub id: String,
}

/// A user's given and family name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserName {
    /// Given (first) name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given: Option<String>,
    /// Family (last) name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
}

/// A user resource as returned by the API.
///
/// Attributes this SDK does not model are preserved in `extra`.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    /// User identifier
    pub id: String,
    /// Email address
    #[serde(default)]
    pub email: Option<String>,
    /// Username
    #[serde(default)]
    pub username: Option<String>,
    /// Population the user belongs to
    #[serde(default)]
    pub population: Option<PopulationRef>,
    /// Given/family name
    #[serde(default)]
    pub name: Option<UserName>,
    /// Unmodeled attributes
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A population resource.
#[derive(Debug, Clone, Deserialize)]
pub struct Population {
    /// Population identifier
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Description
    #[serde(default)]
    pub description: Option<String>,
}

/// HAL-style envelope wrapping embedded collections.
#[derive(Debug, Deserialize)]
pub(crate) struct Embedded<T> {
    #[serde(rename = "_embedded")]
    pub embedded: T,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EmbeddedUsers {
    pub users: Vec<User>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EmbeddedPopulations {
    pub populations: Vec<Population>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EmbeddedPasswordPolicies {
    #[serde(rename = "passwordPolicies")]
    pub password_policies: Vec<crate::policy::PasswordPolicy>,
}
