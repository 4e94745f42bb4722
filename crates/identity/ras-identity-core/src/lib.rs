//! Core traits and types for OAuth identity providers.
//!
//! Providers built on this crate are declarative: they describe endpoints,
//! scopes and checks through [`OAuthConfig`], fetch the provider's profile,
//! and map it onto the host's user shape. The authorization-code flow itself
//! belongs to the host.

mod error;
mod identity;
mod provider;
mod tokens;

pub use error::{IdentityError, IdentityResult};
pub use identity::{AccessTokenPayload, IdentityProvider, VerifiedIdentity};
pub use provider::{Check, Endpoint, OAuthConfig, OAuthProvider, ProviderType};
pub use tokens::{TokenSet, UserinfoContext};
