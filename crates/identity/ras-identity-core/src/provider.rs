//! Declarative OAuth provider configuration consumed by the authentication host.
//!
//! A provider describes *where* the host should send the user and which checks
//! it must perform; the host owns the actual authorization-code flow.

use crate::error::IdentityResult;
use crate::tokens::UserinfoContext;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use url::Url;

/// Protocol family of a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    OAuth,
    Oidc,
}

/// Security checks the host performs during the authorization flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Check {
    Pkce,
    State,
    Nonce,
    None,
}

/// A provider endpoint with the extra query parameters the host must send to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub url: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, String>,
}

impl Endpoint {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            params: BTreeMap::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Parse the endpoint and append its parameters to the query string.
    pub fn to_url(&self) -> IdentityResult<Url> {
        let mut url = Url::parse(&self.url)?;
        if !self.params.is_empty() {
            let mut query = url.query_pairs_mut();
            for (key, value) in &self.params {
                query.append_pair(key, value);
            }
        }
        Ok(url)
    }
}

/// Configuration record handed to the host's generic OAuth engine
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthConfig {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub provider_type: ProviderType,
    pub checks: Vec<Check>,
    pub client_id: Option<String>,
    #[serde(skip_serializing, default)]
    pub client_secret: Option<String>,
    pub authorization: Endpoint,
    pub token: Endpoint,
    pub userinfo: Endpoint,
}

impl OAuthConfig {
    pub fn has_check(&self, check: Check) -> bool {
        self.checks.contains(&check)
    }

    /// Scope requested on the authorization endpoint, if any
    pub fn scope(&self) -> Option<&str> {
        self.authorization.params.get("scope").map(String::as_str)
    }
}

impl fmt::Debug for OAuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthConfig")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("provider_type", &self.provider_type)
            .field("checks", &self.checks)
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "<redacted>"))
            .field("authorization", &self.authorization)
            .field("token", &self.token)
            .field("userinfo", &self.userinfo)
            .finish()
    }
}

/// An OAuth provider adapter.
///
/// The host drives the flow: after exchanging the authorization code it calls
/// [`OAuthProvider::userinfo`] with the resulting tokens and hands the raw
/// profile to [`OAuthProvider::profile`] to obtain its own user shape.
#[async_trait]
pub trait OAuthProvider: Send + Sync {
    /// Raw profile as returned by the provider's userinfo endpoint
    type Profile: DeserializeOwned + Send;

    /// Normalized user handed back to the host
    type User: Serialize + Send;

    fn config(&self) -> &OAuthConfig;

    /// Fetch the raw userinfo document for an access token.
    async fn userinfo(&self, context: &UserinfoContext) -> IdentityResult<serde_json::Value>;

    /// Map a provider profile onto the host's user shape.
    fn profile(&self, profile: &Self::Profile) -> Self::User;

    async fn fetch_user(&self, context: &UserinfoContext) -> IdentityResult<Self::User> {
        let raw = self.userinfo(context).await?;
        let profile: Self::Profile = serde_json::from_value(raw)?;
        Ok(self.profile(&profile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IdentityError;
    use crate::tokens::TokenSet;

    fn sample_config() -> OAuthConfig {
        OAuthConfig {
            id: "example".to_string(),
            name: "Example".to_string(),
            provider_type: ProviderType::OAuth,
            checks: vec![Check::Pkce, Check::State],
            client_id: Some("client".to_string()),
            client_secret: Some("super-secret".to_string()),
            authorization: Endpoint::new("https://example.com/authorize")
                .with_param("scope", "read profile"),
            token: Endpoint::new("https://example.com/token"),
            userinfo: Endpoint::new("https://example.com/me"),
        }
    }

    #[test]
    fn test_endpoint_to_url_appends_params() {
        let endpoint = Endpoint::new("https://example.com/authorize?prompt=login")
            .with_param("scope", "read profile");

        let url = endpoint.to_url().unwrap();
        let params: BTreeMap<_, _> = url.query_pairs().into_owned().collect();
        assert_eq!(params.get("prompt"), Some(&"login".to_string()));
        assert_eq!(params.get("scope"), Some(&"read profile".to_string()));
    }

    #[test]
    fn test_endpoint_to_url_without_params_is_unchanged() {
        let url = Endpoint::new("https://example.com/token").to_url().unwrap();
        assert_eq!(url.as_str(), "https://example.com/token");
        assert!(url.query().is_none());
    }

    #[test]
    fn test_endpoint_to_url_rejects_relative_url() {
        let result = Endpoint::new("/api/v2/access/token").to_url();
        assert!(matches!(result, Err(IdentityError::InvalidEndpoint(_))));
    }

    #[test]
    fn test_config_serialization_shape() {
        let json = serde_json::to_value(sample_config()).unwrap();

        assert_eq!(json["id"], "example");
        assert_eq!(json["type"], "oauth");
        assert_eq!(json["checks"], serde_json::json!(["pkce", "state"]));
        assert_eq!(json["clientId"], "client");
        assert!(json.get("clientSecret").is_none());
        assert_eq!(json["authorization"]["params"]["scope"], "read profile");
        assert!(json["token"].get("params").is_none());
    }

    #[test]
    fn test_config_debug_redacts_secret() {
        let debug = format!("{:?}", sample_config());
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_config_helpers() {
        let config = sample_config();
        assert!(config.has_check(Check::Pkce));
        assert!(config.has_check(Check::State));
        assert!(!config.has_check(Check::Nonce));
        assert_eq!(config.scope(), Some("read profile"));
    }

    struct StaticProvider {
        config: OAuthConfig,
        body: serde_json::Value,
    }

    #[derive(Deserialize)]
    struct StaticProfile {
        login: String,
    }

    #[async_trait]
    impl OAuthProvider for StaticProvider {
        type Profile = StaticProfile;
        type User = String;

        fn config(&self) -> &OAuthConfig {
            &self.config
        }

        async fn userinfo(&self, _context: &UserinfoContext) -> IdentityResult<serde_json::Value> {
            Ok(self.body.clone())
        }

        fn profile(&self, profile: &StaticProfile) -> String {
            profile.login.to_uppercase()
        }
    }

    #[tokio::test]
    async fn test_fetch_user_maps_userinfo_through_profile() {
        let provider = StaticProvider {
            config: sample_config(),
            body: serde_json::json!({ "login": "octo" }),
        };
        let context = UserinfoContext::new(TokenSet::bearer("token"));

        let user = provider.fetch_user(&context).await.unwrap();
        assert_eq!(user, "OCTO");
    }

    #[tokio::test]
    async fn test_fetch_user_reports_mismatched_profile() {
        let provider = StaticProvider {
            config: sample_config(),
            body: serde_json::json!({ "unexpected": true }),
        };
        let context = UserinfoContext::new(TokenSet::bearer("token"));

        let result = provider.fetch_user(&context).await;
        assert!(matches!(result, Err(IdentityError::SerializationError(_))));
    }
}
