//! Identity verification seam between providers and session issuance.

use crate::error::IdentityResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifiedIdentity {
    pub provider_id: String,
    pub subject: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

/// Payload carrying an access token obtained by the host's token exchange
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenPayload {
    pub access_token: String,
    #[serde(default)]
    pub provider: Option<String>,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    fn provider_id(&self) -> &str;

    async fn verify(&self, auth_payload: serde_json::Value) -> IdentityResult<VerifiedIdentity>;
}
