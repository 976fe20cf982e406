//! Client traits for the upstream authorities.
//!
//! The resolver performs no I/O of its own; every remote decision is
//! delegated through one of these traits. Timeout and retry policy belong
//! to the implementations — this layer issues each call exactly once and
//! maps failures to a negative trust signal.

use async_trait::async_trait;

use bg_security::AuthenticatedPrincipal;

use crate::error::{DirectoryError, IdentityAuthorityError, PermissionAuthorityError};
use crate::models::{AdminPermission, MintedToken, StoreUser};

/// Client for the platform identity authority.
#[async_trait]
pub trait IdentityAuthorityClient: Send + Sync {
    /// Resolve a bearer token to its principal.
    ///
    /// # Errors
    ///
    /// - `InvalidToken` if the authority rejects the token
    /// - `Unavailable` for transport or upstream failures
    async fn validate_token(
        &self,
        token: &str,
    ) -> Result<AuthenticatedPrincipal, IdentityAuthorityError>;

    /// Exchange an application key/secret pair for a short-lived bearer
    /// token.
    ///
    /// # Errors
    ///
    /// - `InvalidToken` if the pair is not recognized
    /// - `Unavailable` for transport or upstream failures
    async fn get_token(
        &self,
        app_key: &str,
        app_token: &str,
    ) -> Result<MintedToken, IdentityAuthorityError>;

    /// Resolve a storefront session token to its user, via the
    /// store-audience endpoint (distinct from [`validate_token`]).
    /// Returns `None` when the authority knows no user for the token.
    ///
    /// # Errors
    ///
    /// - `Unavailable` for transport or upstream failures
    ///
    /// [`validate_token`]: IdentityAuthorityClient::validate_token
    async fn get_authenticated_user(
        &self,
        store_token: &str,
    ) -> Result<Option<StoreUser>, IdentityAuthorityError>;
}

/// Client for the platform permission authority.
#[async_trait]
pub trait PermissionAuthorityClient: Send + Sync {
    /// Whether the principal holds account-level admin permission.
    ///
    /// # Errors
    ///
    /// - `Unavailable` for transport or upstream failures
    async fn get_admin_permission(
        &self,
        account: &str,
        principal_id: &str,
    ) -> Result<bool, PermissionAuthorityError>;

    /// Assert that the user holds one specific fine-grained permission.
    ///
    /// # Errors
    ///
    /// - `Denied` when the authority refuses the permission — callers are
    ///   expected to surface this, not swallow it
    /// - `Unavailable` for transport or upstream failures
    async fn check_permission(
        &self,
        account: &str,
        user: &str,
        permission: AdminPermission,
    ) -> Result<(), PermissionAuthorityError>;
}

/// Membership predicate over the buyer-organization directory.
#[async_trait]
pub trait BuyerOrgDirectoryClient: Send + Sync {
    /// Whether the storefront user belongs to any buyer organization.
    ///
    /// # Errors
    ///
    /// - `Unavailable` for transport or upstream failures
    async fn is_user_part_of_buyer_org(&self, user: &str) -> Result<bool, DirectoryError>;
}
