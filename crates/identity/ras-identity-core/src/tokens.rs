//! Token material the host passes to providers after the code exchange.

use serde::{Deserialize, Serialize};

/// Tokens returned by the provider's token endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSet {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,
}

impl TokenSet {
    /// A token set holding only a bearer access token
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: Some("Bearer".to_string()),
            expires_in: None,
            refresh_token: None,
            scope: None,
            id_token: None,
        }
    }
}

/// Context for a userinfo request
#[derive(Debug, Clone)]
pub struct UserinfoContext {
    pub tokens: TokenSet,
}

impl UserinfoContext {
    pub fn new(tokens: TokenSet) -> Self {
        Self { tokens }
    }

    pub fn from_access_token(access_token: impl Into<String>) -> Self {
        Self::new(TokenSet::bearer(access_token))
    }

    pub fn access_token(&self) -> &str {
        &self.tokens.access_token
    }
}
