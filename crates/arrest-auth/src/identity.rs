use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Role labels understood by the route policy.
pub mod roles {
    pub const ADMIN: &str = "ADMIN";
    pub const PERSONE: &str = "PERSONE";
}

/// Identity established from a valid access token.
///
/// Built once per request by the JWT filter and stored in request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    pub user_id: Uuid,
    pub username: String,
    pub roles: Vec<String>,
    pub token_id: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl AuthenticatedIdentity {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn has_any_role<R: AsRef<str>>(&self, roles: &[R]) -> bool {
        roles.iter().any(|role| self.has_role(role.as_ref()))
    }
}
