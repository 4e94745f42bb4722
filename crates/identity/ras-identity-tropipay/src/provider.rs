//! Tropipay OAuth2 provider.

use crate::error::{TropipayError, TropipayResult};
use crate::options::{TropipayOptions, TropipayUserConfig};
use crate::profile::TropipayProfile;
use crate::user::{TropipayUser, normalize};
use async_trait::async_trait;
use ras_identity_core::{
    AccessTokenPayload, Check, Endpoint, IdentityError, IdentityProvider, IdentityResult,
    OAuthConfig, OAuthProvider, ProviderType, UserinfoContext, VerifiedIdentity,
};
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tracing::{debug, error, info};

pub const PROVIDER_ID: &str = "tropipay";
pub const PROVIDER_NAME: &str = "Tropipay";

/// Scope needed to read the user profile
pub const PROFILE_SCOPE: &str = "ALLOW_GET_PROFILE_DATA";

const AUTHORIZE_PATH: &str = "/api/v2/access/authorize";
const TOKEN_PATH: &str = "/api/v2/access/token";
const PROFILE_PATH: &str = "/api/users/profile";

/// Build a Tropipay adapter from the current `TROPIPAY_*` environment.
///
/// The environment is read on every call, so two calls made around an
/// environment change yield adapters with different credentials.
pub fn tropipay(overrides: Option<TropipayUserConfig>) -> TropipayResult<Tropipay> {
    tropipay_from_source(None, overrides)
}

/// Same as [`tropipay`], reading `TROPIPAY_*` variables from `source` when given.
pub fn tropipay_from_source(
    source: Option<config::Map<String, String>>,
    overrides: Option<TropipayUserConfig>,
) -> TropipayResult<Tropipay> {
    let options = TropipayOptions::from_env_source(source)?;
    Tropipay::with_overrides(options, overrides.unwrap_or_default())
}

/// Tropipay adapter: static OAuth metadata plus the profile fetch and mapping
#[derive(Clone)]
pub struct Tropipay {
    config: OAuthConfig,
    http_client: Client,
}

impl Tropipay {
    pub fn new(options: TropipayOptions) -> TropipayResult<Self> {
        Self::with_overrides(options, TropipayUserConfig::default())
    }

    pub fn with_overrides(
        options: TropipayOptions,
        overrides: TropipayUserConfig,
    ) -> TropipayResult<Self> {
        let options = options.apply(&overrides);
        let base_url = options.base_url();

        let mut authorization = Endpoint::new(format!("{}{}", base_url, AUTHORIZE_PATH))
            .with_param("scope", PROFILE_SCOPE);
        authorization.params.extend(overrides.authorization_params);

        let config = OAuthConfig {
            id: PROVIDER_ID.to_string(),
            name: PROVIDER_NAME.to_string(),
            provider_type: ProviderType::OAuth,
            checks: vec![Check::Pkce, Check::State],
            client_id: options.client_id.clone(),
            client_secret: options.client_secret.clone(),
            authorization,
            token: Endpoint::new(format!("{}{}", base_url, TOKEN_PATH)),
            userinfo: Endpoint::new(format!("{}{}", base_url, PROFILE_PATH)),
        };

        let mut builder = Client::builder();
        if let Some(seconds) = options.http_timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let http_client = builder.build()?;

        info!("Configured Tropipay provider against {}", base_url);

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Fetch the raw profile document for an access token.
    pub async fn request_profile(&self, access_token: &str) -> TropipayResult<serde_json::Value> {
        let response = self
            .http_client
            .get(&self.config.userinfo.url)
            .bearer_auth(access_token)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Tropipay profile request failed with {}: {}", status, body);
            return Err(TropipayError::UserInfoFailed { status, body });
        }

        let profile: serde_json::Value = response
            .json()
            .await
            .map_err(|e| TropipayError::InvalidUserInfoResponse(e.to_string()))?;

        debug!("Fetched Tropipay profile");
        Ok(profile)
    }
}

#[async_trait]
impl OAuthProvider for Tropipay {
    type Profile = TropipayProfile;
    type User = TropipayUser;

    fn config(&self) -> &OAuthConfig {
        &self.config
    }

    async fn userinfo(&self, context: &UserinfoContext) -> IdentityResult<serde_json::Value> {
        Ok(self.request_profile(context.access_token()).await?)
    }

    fn profile(&self, profile: &TropipayProfile) -> TropipayUser {
        normalize(profile)
    }
}

#[async_trait]
impl IdentityProvider for Tropipay {
    fn provider_id(&self) -> &str {
        &self.config.id
    }

    async fn verify(&self, auth_payload: serde_json::Value) -> IdentityResult<VerifiedIdentity> {
        let payload: AccessTokenPayload =
            serde_json::from_value(auth_payload).map_err(|_| IdentityError::InvalidPayload)?;

        if let Some(provider) = payload
            .provider
            .as_deref()
            .filter(|provider| *provider != self.config.id)
        {
            return Err(IdentityError::ProviderError(format!(
                "Provider mismatch: expected {}, got {}",
                self.config.id, provider
            )));
        }

        let raw = self.request_profile(&payload.access_token).await?;
        let profile: TropipayProfile = serde_json::from_value(raw)?;
        let user = normalize(&profile);

        let subject = user.id.clone().ok_or_else(|| {
            IdentityError::ProviderError("Tropipay profile has no id".to_string())
        })?;

        info!("Verified Tropipay identity {}", subject);

        Ok(VerifiedIdentity {
            provider_id: format!("oauth2:{}", self.config.id),
            subject,
            email: user.email.clone(),
            display_name: profile.full_name(),
            metadata: Some(serde_json::to_value(&user)?),
        })
    }
}
