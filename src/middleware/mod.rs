//! Request authentication and authorization.
//!
//! # Modules
//!
//! - [`auth`]: the JWT filter, the authorization gate and the [`AuthUser`](auth::AuthUser) extractor
//! - [`policy`]: the ordered route rule table
//!
//! # Flow
//!
//! 1. `jwt_filter` reads `Authorization: Bearer <token>` and, if the token is
//!    a valid access token, stores the identity in request extensions
//! 2. `authorize` looks up the first matching rule and returns 401 or 403 when
//!    the identity does not satisfy it
//! 3. Handlers take [`AuthUser`](auth::AuthUser) when they need the caller

pub mod auth;
pub mod policy;
