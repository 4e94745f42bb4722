//! Tropipay adapter options.
//!
//! Options are resolved from `TROPIPAY_*` environment variables when the
//! adapter is built, then integrator overrides are applied on top.

use crate::error::TropipayResult;
use bon::Builder;
use config::{Config, Environment};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Tropipay production host, used when `TROPIPAY_HOST` is unset or empty
pub const DEFAULT_HOST: &str = "https://www.tropipay.com";

/// Prefix of the environment variables read by [`TropipayOptions::from_env`]
pub const ENV_PREFIX: &str = "TROPIPAY";

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

/// Environment-derived options for the Tropipay adapter
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct TropipayOptions {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
    /// Userinfo request timeout; no timeout when unset
    #[serde(default)]
    pub http_timeout_seconds: Option<u64>,
}

impl Default for TropipayOptions {
    fn default() -> Self {
        Self {
            host: default_host(),
            client_id: None,
            client_secret: None,
            http_timeout_seconds: None,
        }
    }
}

impl fmt::Debug for TropipayOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TropipayOptions")
            .field("host", &self.host)
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "<redacted>"))
            .field("http_timeout_seconds", &self.http_timeout_seconds)
            .finish()
    }
}

impl TropipayOptions {
    /// Read `TROPIPAY_HOST`, `TROPIPAY_CLIENT_ID`, `TROPIPAY_CLIENT_SECRET` and
    /// `TROPIPAY_HTTP_TIMEOUT_SECONDS` from the process environment.
    ///
    /// Nothing is validated here: missing credentials or a malformed host
    /// only surface once the host framework runs the authorization flow.
    pub fn from_env() -> TropipayResult<Self> {
        Self::from_env_source(None)
    }

    /// Same as [`TropipayOptions::from_env`], reading from `source` instead of
    /// the process environment when one is given.
    pub fn from_env_source(source: Option<config::Map<String, String>>) -> TropipayResult<Self> {
        let settings = Config::builder()
            .add_source(Environment::with_prefix(ENV_PREFIX).source(source))
            .build()?;

        let mut options: TropipayOptions = settings.try_deserialize()?;
        if options.host.trim().is_empty() {
            options.host = default_host();
        }

        debug!("Resolved Tropipay options for host {}", options.host);
        Ok(options)
    }

    /// Host without trailing slashes, the root of every endpoint URL
    pub fn base_url(&self) -> &str {
        self.host.trim_end_matches('/')
    }

    /// Apply integrator overrides on top of the resolved options.
    pub fn apply(mut self, overrides: &TropipayUserConfig) -> Self {
        if let Some(host) = overrides.host.as_deref().filter(|h| !h.trim().is_empty()) {
            self.host = host.to_string();
        }
        if let Some(client_id) = &overrides.client_id {
            self.client_id = Some(client_id.clone());
        }
        if let Some(client_secret) = &overrides.client_secret {
            self.client_secret = Some(client_secret.clone());
        }
        if let Some(timeout) = overrides.http_timeout_seconds {
            self.http_timeout_seconds = Some(timeout);
        }
        self
    }
}

/// Partial configuration supplied by the integrator.
///
/// Every field is optional; unset fields keep their environment-derived value.
/// A host override applies to all three endpoints and to the userinfo fetch.
/// A blank host override is ignored.
#[derive(Debug, Clone, Default, Builder)]
pub struct TropipayUserConfig {
    #[builder(into)]
    pub host: Option<String>,
    #[builder(into)]
    pub client_id: Option<String>,
    #[builder(into)]
    pub client_secret: Option<String>,
    /// Extra query parameters for the authorization endpoint
    #[builder(default)]
    pub authorization_params: BTreeMap<String, String>,
    pub http_timeout_seconds: Option<u64>,
}
