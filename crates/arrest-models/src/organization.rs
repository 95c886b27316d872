//! Organization codes and their persisted integer form.
//!
//! Every arrest records which organization made it. The column is an
//! `INTEGER`; the mapping below is the only place the numbers appear.
//!
//! | member                 | code |
//! |------------------------|------|
//! | `POLICE`               | 1    |
//! | `PROSECUTOR_OFFICE`    | 2    |
//! | `COURT`                | 3    |
//! | `PENITENTIARY_SERVICE` | 4    |
//! | `BORDER_POLICE`        | 5    |
//!
//! An integer outside this table is rejected when read; it never falls back
//! to a default member.

use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::{
    Database, Decode, Encode, Type,
    postgres::{PgHasArrayType, PgTypeInfo},
};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrganizationCode {
    Police,
    ProsecutorOffice,
    Court,
    PenitentiaryService,
    BorderPolice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum OrganizationCodeError {
    #[error("unknown organization code: {0}")]
    UnknownCode(i32),
}

impl OrganizationCode {
    pub const ALL: [OrganizationCode; 5] = [
        OrganizationCode::Police,
        OrganizationCode::ProsecutorOffice,
        OrganizationCode::Court,
        OrganizationCode::PenitentiaryService,
        OrganizationCode::BorderPolice,
    ];

    pub const fn code(self) -> i32 {
        match self {
            OrganizationCode::Police => 1,
            OrganizationCode::ProsecutorOffice => 2,
            OrganizationCode::Court => 3,
            OrganizationCode::PenitentiaryService => 4,
            OrganizationCode::BorderPolice => 5,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            OrganizationCode::Police => "POLICE",
            OrganizationCode::ProsecutorOffice => "PROSECUTOR_OFFICE",
            OrganizationCode::Court => "COURT",
            OrganizationCode::PenitentiaryService => "PENITENTIARY_SERVICE",
            OrganizationCode::BorderPolice => "BORDER_POLICE",
        }
    }
}

/// Column value for `value`.
pub fn to_persisted(value: OrganizationCode) -> i32 {
    value.code()
}

/// Member stored as `code`, or `UnknownCode` when no member matches.
pub fn from_persisted(code: i32) -> Result<OrganizationCode, OrganizationCodeError> {
    OrganizationCode::ALL
        .into_iter()
        .find(|member| member.code() == code)
        .ok_or(OrganizationCodeError::UnknownCode(code))
}

impl TryFrom<i32> for OrganizationCode {
    type Error = OrganizationCodeError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        from_persisted(code)
    }
}

impl From<OrganizationCode> for i32 {
    fn from(value: OrganizationCode) -> i32 {
        to_persisted(value)
    }
}

impl fmt::Display for OrganizationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Type<sqlx::Postgres> for OrganizationCode {
    fn type_info() -> PgTypeInfo {
        <i32 as Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <i32 as Type<sqlx::Postgres>>::compatible(ty)
    }
}

impl<'q> Encode<'q, sqlx::Postgres> for OrganizationCode {
    fn encode_by_ref(
        &self,
        buf: &mut <sqlx::Postgres as Database>::ArgumentBuffer<'q>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <i32 as Encode<'q, sqlx::Postgres>>::encode_by_ref(&to_persisted(*self), buf)
    }
}

impl<'r> Decode<'r, sqlx::Postgres> for OrganizationCode {
    fn decode(
        value: <sqlx::Postgres as Database>::ValueRef<'r>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        let code = <i32 as Decode<'r, sqlx::Postgres>>::decode(value)?;
        Ok(from_persisted(code)?)
    }
}

impl PgHasArrayType for OrganizationCode {
    fn array_type_info() -> PgTypeInfo {
        <i32 as PgHasArrayType>::array_type_info()
    }
}
