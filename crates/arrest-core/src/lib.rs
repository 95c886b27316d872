//! # Arrest Core
//!
//! Foundational types shared by every crate of the Arrest Management API:
//!
//! - [`errors`]: [`AppError`], the HTTP-aware error returned by handlers and services
//! - [`password`]: bcrypt password hashing and verification

pub mod errors;
pub mod password;

pub use errors::{AppError, ErrorResponse};
pub use password::{hash_password, verify_password};
