//! Management API client for the PingOne Rust SDK.
//!
//! Wraps the environment-scoped REST endpoints: user provisioning,
//! population listing, password operations, and password-policy compilation.

pub mod client;
pub mod policy;
pub mod types;

pub use client::ApiClient;
pub use policy::{compile_password_pattern, LengthRange, PasswordPolicy};
pub use types::{Population, PopulationRef, User, UserName};
