//! # Arrest Auth
//!
//! Bearer-token handling for the Arrest Management API:
//!
//! - [`claims`]: JWT claim structures for access and refresh tokens
//! - [`keys`]: the HMAC signing key
//! - [`identity`]: the per-request [`AuthenticatedIdentity`]
//! - [`revocation`]: the [`TokenInvalidationStore`] seam and an in-memory store
//! - [`service`]: [`TokenAuthenticationService`], which issues and validates tokens
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use arrest_auth::{InMemoryInvalidationStore, TokenAuthenticationService};
//! use arrest_config::JwtConfig;
//!
//! let service = TokenAuthenticationService::from_config(
//!     &JwtConfig::from_env(),
//!     Arc::new(InMemoryInvalidationStore::new()),
//! );
//! let issued = service.issue_access_token(user_id, "jdoe", vec!["PERSONE".into()])?;
//! let identity = service.authenticate(&issued.token).await?;
//! ```

pub mod claims;
pub mod error;
pub mod identity;
pub mod keys;
pub mod revocation;
pub mod service;

pub use claims::{AccessClaims, RefreshTokenClaims, TokenType};
pub use error::TokenError;
pub use identity::{AuthenticatedIdentity, roles};
pub use keys::SigningKey;
pub use revocation::{
    InMemoryInvalidationStore, StoreError, StoreFuture, TokenInvalidationStore,
};
pub use service::{IssuedToken, TokenAuthenticationService};
