//! Arrest records.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::organization::OrganizationCode;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
pub struct Arrest {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    #[schema(example = "01001012345")]
    pub personal_number: String,
    pub organization_code: OrganizationCode,
    pub reason: String,
    pub arrested_at: chrono::DateTime<chrono::Utc>,
    /// User who recorded the arrest
    pub created_by: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateArrestRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(length(min = 1, max = 20))]
    #[schema(example = "01001012345")]
    pub personal_number: String,
    #[schema(example = "POLICE")]
    pub organization_code: OrganizationCode,
    #[validate(length(min = 1, max = 1000))]
    pub reason: String,
    /// Defaults to the time of the request
    pub arrested_at: Option<chrono::DateTime<chrono::Utc>>,
}
