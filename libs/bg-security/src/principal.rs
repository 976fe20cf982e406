//! Authenticated principals as resolved by the identity authority.

use serde::Deserialize;

/// The audience a token was issued for.
///
/// Only `admin` carries meaning in this layer; every other value is
/// preserved as [`TokenAudience::Unknown`] and never trusted for operator
/// operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenAudience {
    /// Operator/back-office token.
    Admin,
    /// Storefront shopper token.
    Webstore,
    /// Any audience this layer does not recognize.
    #[serde(other)]
    Unknown,
}

/// How the token was minted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Token bound to a named platform user.
    User,
    /// Any token type this layer does not recognize.
    #[serde(other)]
    Unknown,
}

/// Identity resolved for a token by the identity authority.
///
/// Opaque beyond these fields; produced only by the authority, never
/// constructed locally. Identifiers are the platform's own opaque strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedPrincipal {
    /// Principal identifier minted by the identity authority.
    pub id: String,
    /// Account (tenant) the token was issued under.
    pub account: String,
    /// Audience the token was issued for.
    pub audience: TokenAudience,
    /// Login of the platform user behind the token, when there is one.
    #[serde(default)]
    pub user: Option<String>,
    /// How the token was minted, when the authority reports it.
    #[serde(default)]
    pub token_type: Option<TokenType>,
}

impl AuthenticatedPrincipal {
    /// Whether this principal may be considered for operator trust on the
    /// given account: admin audience and issued under that same account.
    /// A principal from a different tenant or a non-admin audience is
    /// never trusted for operator operations.
    #[must_use]
    pub fn is_operator_for(&self, account: &str) -> bool {
        self.audience == TokenAudience::Admin && self.account == account
    }
}
