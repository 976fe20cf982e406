//! Service implementation for the static identity plugin.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use secrecy::SecretString;

use bg_security::AuthenticatedPrincipal;
use token_resolver_sdk::{
    AdminPermission, BuyerOrgDirectoryClient, DirectoryError, IdentityAuthorityClient,
    IdentityAuthorityError, MintedToken, PermissionAuthorityClient, PermissionAuthorityError,
    StoreUser,
};

use crate::config::StaticIdentityPluginConfig;

/// Static identity/permission/directory service.
///
/// Implements all three authority traits from literal lookup tables built
/// out of the plugin configuration.
pub struct Service {
    tokens: HashMap<String, AuthenticatedPrincipal>,
    key_pairs: HashMap<(String, String), String>,
    store_tokens: HashMap<String, StoreUser>,
    admin_grants: HashSet<(String, String)>,
    permission_grants: HashSet<(String, String, AdminPermission)>,
    buyer_org_members: HashSet<String>,
}

impl Service {
    /// Create a service from plugin configuration.
    #[must_use]
    pub fn from_config(cfg: &StaticIdentityPluginConfig) -> Self {
        Self {
            tokens: cfg
                .tokens
                .iter()
                .map(|m| (m.token.clone(), m.principal.to_principal()))
                .collect(),
            key_pairs: cfg
                .key_pairs
                .iter()
                .map(|m| ((m.app_key.clone(), m.app_token.clone()), m.mints.clone()))
                .collect(),
            store_tokens: cfg
                .store_tokens
                .iter()
                .map(|m| (m.token.clone(), m.to_store_user()))
                .collect(),
            admin_grants: cfg
                .admin_grants
                .iter()
                .map(|g| (g.account.clone(), g.principal_id.clone()))
                .collect(),
            permission_grants: cfg
                .permission_grants
                .iter()
                .map(|g| (g.account.clone(), g.user.clone(), g.permission))
                .collect(),
            buyer_org_members: cfg.buyer_org_members.iter().cloned().collect(),
        }
    }
}

#[async_trait]
impl IdentityAuthorityClient for Service {
    async fn validate_token(
        &self,
        token: &str,
    ) -> Result<AuthenticatedPrincipal, IdentityAuthorityError> {
        self.tokens
            .get(token)
            .cloned()
            .ok_or_else(|| IdentityAuthorityError::InvalidToken("token not recognized".to_owned()))
    }

    async fn get_token(
        &self,
        app_key: &str,
        app_token: &str,
    ) -> Result<MintedToken, IdentityAuthorityError> {
        self.key_pairs
            .get(&(app_key.to_owned(), app_token.to_owned()))
            .map(|minted| MintedToken {
                token: SecretString::from(minted.clone()),
            })
            .ok_or_else(|| {
                IdentityAuthorityError::InvalidToken("key pair not recognized".to_owned())
            })
    }

    async fn get_authenticated_user(
        &self,
        store_token: &str,
    ) -> Result<Option<StoreUser>, IdentityAuthorityError> {
        Ok(self.store_tokens.get(store_token).cloned())
    }
}

#[async_trait]
impl PermissionAuthorityClient for Service {
    async fn get_admin_permission(
        &self,
        account: &str,
        principal_id: &str,
    ) -> Result<bool, PermissionAuthorityError> {
        Ok(self
            .admin_grants
            .contains(&(account.to_owned(), principal_id.to_owned())))
    }

    async fn check_permission(
        &self,
        account: &str,
        user: &str,
        permission: AdminPermission,
    ) -> Result<(), PermissionAuthorityError> {
        if self
            .permission_grants
            .contains(&(account.to_owned(), user.to_owned(), permission))
        {
            Ok(())
        } else {
            Err(PermissionAuthorityError::Denied {
                account: account.to_owned(),
                user: user.to_owned(),
                permission,
            })
        }
    }
}

#[async_trait]
impl BuyerOrgDirectoryClient for Service {
    async fn is_user_part_of_buyer_org(&self, user: &str) -> Result<bool, DirectoryError> {
        Ok(self.buyer_org_members.contains(user))
    }
}
