//! Tropipay adapter error types.

use ras_identity_core::IdentityError;
use reqwest::StatusCode;
use thiserror::Error;

pub type TropipayResult<T> = Result<T, TropipayError>;

#[derive(Debug, Error)]
pub enum TropipayError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid configuration: {0}")]
    ConfigError(#[from] config::ConfigError),

    #[error("User info request failed with status {status}: {body}")]
    UserInfoFailed { status: StatusCode, body: String },

    #[error("Invalid user info response: {0}")]
    InvalidUserInfoResponse(String),
}

impl From<TropipayError> for IdentityError {
    fn from(err: TropipayError) -> Self {
        match err {
            TropipayError::UserInfoFailed { status, body } => IdentityError::UserinfoFailed {
                status: status.as_u16(),
                body,
            },
            other => IdentityError::ProviderError(other.to_string()),
        }
    }
}
