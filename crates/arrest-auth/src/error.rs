use thiserror::Error;

use crate::revocation::StoreError;

/// Why a token could not be issued or accepted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,

    #[error("token expired")]
    Expired,

    #[error("wrong token type")]
    WrongType,

    #[error("token has been invalidated")]
    Invalidated,

    #[error("invalidation store unavailable: {0}")]
    Store(String),

    #[error("failed to encode token: {0}")]
    Encoding(String),
}

impl TokenError {
    /// True when the caller presented a bad credential, as opposed to a
    /// failure on our side.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            TokenError::Malformed
                | TokenError::Expired
                | TokenError::WrongType
                | TokenError::Invalidated
        )
    }
}

impl From<StoreError> for TokenError {
    fn from(err: StoreError) -> Self {
        TokenError::Store(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed,
        }
    }
}
