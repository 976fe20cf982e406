//! Configuration for the token resolver.

use http::HeaderMap;
use serde::Deserialize;

use bg_security::{AdminCredential, ApiCredential};
use token_resolver_sdk::RequestAttributes;

/// Configuration.
///
/// Wire names of the cookie and headers that carry credential material.
/// The defaults preserve the legacy storefront contract byte-for-byte;
/// deployments fronting a different client can override them.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TokenResolverConfig {
    /// Cookie written back when an API key pair mints an operator token.
    pub operator_cookie: String,

    /// Header carrying the application key of an API credential.
    pub api_key_header: String,

    /// Header carrying the application secret of an API credential.
    pub api_token_header: String,

    /// Lowercase header key carrying an operator token directly, used by
    /// callers that cannot present the session cookie.
    pub admin_token_header: String,

    /// Header identifying the calling application, captured for
    /// diagnostics only.
    pub caller_header: String,
}

impl Default for TokenResolverConfig {
    fn default() -> Self {
        Self {
            operator_cookie: "VtexIdclientAutCookie".to_owned(),
            api_key_header: "vtex-api-appkey".to_owned(),
            api_token_header: "vtex-api-apptoken".to_owned(),
            admin_token_header: "vtexidclientautcookie".to_owned(),
            caller_header: "x-vtex-caller".to_owned(),
        }
    }
}

impl TokenResolverConfig {
    /// Extract the API key/secret pair, requiring both headers to be
    /// present and non-empty.
    #[must_use]
    pub fn api_credential(&self, headers: &HeaderMap) -> Option<ApiCredential> {
        let app_key = non_empty(headers, &self.api_key_header)?;
        let app_token = non_empty(headers, &self.api_token_header)?;
        Some(ApiCredential::new(app_key, app_token.to_owned()))
    }

    /// Extract an operator token carried directly in a header.
    #[must_use]
    pub fn admin_credential_from_header(&self, headers: &HeaderMap) -> Option<AdminCredential> {
        non_empty(headers, &self.admin_token_header)
            .map(|token| AdminCredential::new(token.to_owned()))
    }

    /// Capture the request attributes surfaced in diagnostics.
    #[must_use]
    pub fn request_attributes(&self, headers: &HeaderMap, url: Option<&str>) -> RequestAttributes {
        RequestAttributes {
            url: url.map(str::to_owned),
            user_agent: header_value(headers, "user-agent"),
            caller: header_value(headers, &self.caller_header),
            forwarded_host: header_value(headers, "x-forwarded-host"),
        }
    }
}

fn non_empty<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}
