//! Access token verification for the PingOne Rust SDK.
//!
//! Platform access tokens are JWTs signed with RS256. This crate resolves
//! signing keys from the issuer's JWKS endpoint, verifies signatures, and
//! checks the audience and issuer claims.

pub mod claims;
pub mod error;
pub mod jwks;
pub mod verifier;

pub use claims::{Audience, Claims};
pub use error::{VerifyError, VerifyResult};
pub use jwks::JwksCache;
pub use verifier::TokenVerifier;
