//! Errors surfaced by identity providers to the authentication host.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Invalid authentication payload")]
    InvalidPayload,

    #[error("User info request failed with status {status}: {body}")]
    UserinfoFailed { status: u16, body: String },

    #[error("Invalid endpoint URL: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type IdentityResult<T> = Result<T, IdentityError>;
