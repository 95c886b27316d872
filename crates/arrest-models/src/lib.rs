//! # Arrest Models
//!
//! Domain models and DTOs for the Arrest Management API.
//!
//! # Modules
//!
//! - [`organization`]: [`OrganizationCode`] and its persisted integer mapping
//! - [`arrests`]: arrest records
//! - [`users`]: user rows and profiles
//! - [`auth`]: auth, token and email request/response bodies

pub mod arrests;
pub mod auth;
pub mod organization;
pub mod users;

pub use arrests::{Arrest, CreateArrestRequest};
pub use auth::{
    AccessTokenResponse, LoginRequest, LoginResponse, LogoutRequest, MessageResponse,
    RefreshTokenRequest, RegisterRequest, ResendVerificationRequest, TokenPairResponse,
    VerifyUserRequest,
};
pub use organization::{OrganizationCode, OrganizationCodeError, from_persisted, to_persisted};
pub use users::{User, UserProfile};
