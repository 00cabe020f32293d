use thiserror::Error;

use super::token::TokenError;
use crate::database::DatabaseError;

/// Terminal outcomes of identity resolution and access checks
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("No valid authentication credentials found")]
    MissingCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Thread not found")]
    ThreadNotFound,

    #[error("Thread has no associated account")]
    ThreadWithoutAccount,

    #[error("Not authorized for {0}")]
    NotAuthorized(&'static str),

    #[error("Admin access disabled: mock auth is not enabled")]
    AdminDisabled,

    #[error(transparent)]
    Store(#[from] DatabaseError),
}

impl From<TokenError> for AuthError {
    fn from(_: TokenError) -> Self {
        AuthError::InvalidToken
    }
}
