//! Configuration for the static identity plugin.

use serde::Deserialize;

use bg_security::{AuthenticatedPrincipal, TokenAudience, TokenType};
use token_resolver_sdk::{AdminPermission, StoreUser};

/// Plugin configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaticIdentityPluginConfig {
    /// Bearer-token-to-principal mappings for operator validation.
    pub tokens: Vec<TokenMapping>,

    /// Key/secret pairs and the bearer token each pair mints.
    pub key_pairs: Vec<KeyPairMapping>,

    /// Storefront-token-to-user mappings.
    pub store_tokens: Vec<StoreTokenMapping>,

    /// Principals holding account-level admin permission.
    pub admin_grants: Vec<AdminGrant>,

    /// Fine-grained permission grants.
    pub permission_grants: Vec<PermissionGrant>,

    /// Users that belong to a buyer organization.
    pub buyer_org_members: Vec<String>,
}

/// Maps a static bearer token to the principal it resolves to.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TokenMapping {
    /// The bearer token value to match.
    pub token: String,
    /// The principal to return when this token is presented.
    pub principal: PrincipalConfig,
}

/// Principal returned for a mapped token.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrincipalConfig {
    /// Principal identifier.
    pub id: String,
    /// Account the token was issued under.
    pub account: String,
    /// Token audience.
    pub audience: TokenAudience,
    /// User login behind the token.
    pub user: Option<String>,
    /// How the token was minted.
    pub token_type: Option<TokenType>,
}

impl Default for PrincipalConfig {
    fn default() -> Self {
        Self {
            id: "operator-1".to_owned(),
            account: "main".to_owned(),
            audience: TokenAudience::Admin,
            user: Some("operator@example.com".to_owned()),
            token_type: Some(TokenType::User),
        }
    }
}

impl PrincipalConfig {
    #[must_use]
    pub fn to_principal(&self) -> AuthenticatedPrincipal {
        AuthenticatedPrincipal {
            id: self.id.clone(),
            account: self.account.clone(),
            audience: self.audience,
            user: self.user.clone(),
            token_type: self.token_type,
        }
    }
}

/// Maps an application key/secret pair to the bearer token it mints.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyPairMapping {
    /// Application key.
    pub app_key: String,
    /// Application secret.
    pub app_token: String,
    /// Bearer token minted for this pair.
    pub mints: String,
}

/// Maps a storefront token to the user it resolves to.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreTokenMapping {
    /// The storefront token value to match.
    pub token: String,
    /// User login (email).
    pub user: String,
    /// Platform user id.
    #[serde(default)]
    pub user_id: Option<String>,
}

impl StoreTokenMapping {
    #[must_use]
    pub fn to_store_user(&self) -> StoreUser {
        StoreUser {
            user: self.user.clone(),
            user_id: self.user_id.clone(),
        }
    }
}

/// Account-level admin permission grant.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdminGrant {
    /// Account the grant applies to.
    pub account: String,
    /// Principal holding the grant.
    pub principal_id: String,
}

/// Fine-grained permission grant.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PermissionGrant {
    /// Account the grant applies to.
    pub account: String,
    /// User login holding the grant.
    pub user: String,
    /// The granted permission.
    pub permission: AdminPermission,
}
