//! Wire models and request-scoped carriers for the token resolver.

use secrecy::SecretString;
use serde::Deserialize;

use bg_security::TokenValidationResult;

/// Fine-grained operator permissions this layer knows how to require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminPermission {
    /// Edit access to buyer organizations.
    BuyerOrganizationEdit,
    /// Read access to buyer organizations.
    BuyerOrganizationView,
}

impl AdminPermission {
    /// Permission name on the authority's wire.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BuyerOrganizationEdit => "buyer_organization_edit",
            Self::BuyerOrganizationView => "buyer_organization_view",
        }
    }
}

impl std::fmt::Display for AdminPermission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Short-lived bearer token minted by the identity authority in exchange
/// for an application key/secret pair.
#[derive(Debug, Clone, Deserialize)]
pub struct MintedToken {
    /// The bearer token value. Never serialized.
    pub token: SecretString,
}

/// Storefront user resolved for a store session token.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreUser {
    /// User login (email).
    pub user: String,
    /// Platform user id, when the authority reports it.
    #[serde(default)]
    pub user_id: Option<String>,
}

/// A cookie write pending on the caller's session.
#[derive(Debug, Clone)]
pub struct SessionCookie {
    /// Cookie name.
    pub name: String,
    /// Cookie value. Redacted in `Debug` output.
    pub value: SecretString,
}

/// Mutable request-scoped session state.
///
/// The one cross-cutting side effect of validation — persisting a minted
/// operator token — goes through this value instead of a hidden global,
/// so the caller owns the write and tests can observe it. The write is
/// fire-and-forget relative to the rest of the request: nothing in the
/// same request reads it back through this value.
#[derive(Debug, Default)]
pub struct RequestSession {
    cookies: Vec<SessionCookie>,
    operator_token: Option<SecretString>,
}

impl RequestSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Persist a minted bearer token as the caller's operator credential:
    /// one pending cookie write plus the ambient operator-token slot, so
    /// that logic downstream in the same request treats the caller as a
    /// cookie-authenticated operator.
    pub fn grant_operator_token(&mut self, cookie_name: &str, token: SecretString) {
        self.cookies.push(SessionCookie {
            name: cookie_name.to_owned(),
            value: token.clone(),
        });
        self.operator_token = Some(token);
    }

    /// Cookie writes accumulated during this request.
    #[must_use]
    pub fn cookies(&self) -> &[SessionCookie] {
        &self.cookies
    }

    /// The ambient operator-token slot, if a validator populated it.
    #[must_use]
    pub fn operator_token(&self) -> Option<&SecretString> {
        self.operator_token.as_ref()
    }
}

/// Request attributes carried into diagnostics when a store token resolves
/// to a principal that is not part of any buyer organization.
#[derive(Debug, Clone, Default)]
pub struct RequestAttributes {
    /// Request URL.
    pub url: Option<String>,
    /// `user-agent` header.
    pub user_agent: Option<String>,
    /// Caller application header.
    pub caller: Option<String>,
    /// `x-forwarded-host` header.
    pub forwarded_host: Option<String>,
}

/// Outcome of API key/secret validation: the trust record plus the minted
/// bearer token (when the exchange succeeded) for callers that need to
/// propagate it further than the request session.
#[derive(Debug)]
pub struct ApiTokenOutcome {
    /// The three-valued trust record.
    pub trust: TokenValidationResult,
    /// Bearer token minted during the exchange step, if it got that far.
    pub minted_token: Option<SecretString>,
}
