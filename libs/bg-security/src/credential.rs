//! Credential material presented by an inbound request.
//!
//! One type per token kind, each carrying only the material needed to
//! validate it. Raw token values are wrapped in [`SecretString`] so
//! `Debug` output redacts them.

use secrecy::SecretString;

/// Operator/back-office session token, usually carried in a cookie.
#[derive(Debug, Clone)]
pub struct AdminCredential {
    /// Raw session token value.
    pub token: SecretString,
}

impl AdminCredential {
    #[must_use]
    pub fn new(token: impl Into<SecretString>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

/// Application key/secret pair carried in a pair of custom headers,
/// exchanged for a short-lived bearer token.
#[derive(Debug, Clone)]
pub struct ApiCredential {
    /// Application key (not secret; identifies the integration).
    pub app_key: String,
    /// Application secret.
    pub app_token: SecretString,
}

impl ApiCredential {
    #[must_use]
    pub fn new(app_key: impl Into<String>, app_token: impl Into<SecretString>) -> Self {
        Self {
            app_key: app_key.into(),
            app_token: app_token.into(),
        }
    }
}

/// End-customer storefront session token.
#[derive(Debug, Clone)]
pub struct StoreCredential {
    /// Raw session token value.
    pub token: SecretString,
}

impl StoreCredential {
    #[must_use]
    pub fn new(token: impl Into<SecretString>) -> Self {
        Self {
            token: token.into(),
        }
    }
}
