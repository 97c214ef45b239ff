//! Core plumbing for the PingOne Rust SDK.
//!
//! This crate provides the pieces shared by every API surface:
//! - Configuration with validation and derived endpoint URLs
//! - Error types for auth, API, and transport failures
//! - A bearer-authenticated HTTP request funnel
//! - OAuth2 client-credentials token acquisition with memoization

pub mod config;
pub mod error;
pub mod http;
pub mod oauth;

pub use config::ApiConfig;
pub use error::{SdkError, SdkResult};
pub use http::{build_http_client, Http, HttpConfig};
pub use oauth::TokenProvider;
