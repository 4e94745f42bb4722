//! Tropipay OAuth2 identity provider.
//!
//! This crate declares Tropipay's OAuth2 endpoints, scope and checks for an
//! authentication host, fetches the user profile with the access token the
//! host obtained, and maps that profile onto a normalized user. The
//! authorization-code flow, PKCE and state verification stay in the host.
//!
//! ```no_run
//! use ras_identity_tropipay::{OAuthProvider, UserinfoContext, tropipay};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = tropipay(None)?;
//! let user = provider
//!     .fetch_user(&UserinfoContext::from_access_token("access-token"))
//!     .await?;
//! println!("{:?}", user.image);
//! # Ok(())
//! # }
//! ```

mod error;
mod options;
mod profile;
mod provider;
mod user;


pub use error::{TropipayError, TropipayResult};
pub use options::{DEFAULT_HOST, ENV_PREFIX, TropipayOptions, TropipayUserConfig};
pub use profile::{TropipayBusiness, TropipayProfile, TropipayUserDetail};
pub use provider::{
    PROFILE_SCOPE, PROVIDER_ID, PROVIDER_NAME, Tropipay, tropipay, tropipay_from_source,
};
pub use user::{TropipayUser, normalize};

// Re-export common types for convenience
pub use ras_identity_core::{
    IdentityProvider, OAuthConfig, OAuthProvider, TokenSet, UserinfoContext, VerifiedIdentity,
};
