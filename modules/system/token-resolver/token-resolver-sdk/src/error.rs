//! Error types for the authority clients.

use thiserror::Error;

use crate::models::AdminPermission;

/// Errors from the identity authority.
#[derive(Debug, Error)]
pub enum IdentityAuthorityError {
    /// The authority rejected the token or key pair.
    #[error("invalid token: {0}")]
    InvalidToken(String),

    /// Transport failure, timeout, or upstream outage.
    #[error("identity authority unavailable: {0}")]
    Unavailable(String),
}

/// Errors from the permission authority.
#[derive(Debug, Error)]
pub enum PermissionAuthorityError {
    /// The authority refused a fine-grained permission. This is a
    /// deliberate authorization decision, not a transient failure.
    #[error("permission '{permission}' denied for user '{user}' on account '{account}'")]
    Denied {
        account: String,
        user: String,
        permission: AdminPermission,
    },

    /// Transport failure, timeout, or upstream outage.
    #[error("permission authority unavailable: {0}")]
    Unavailable(String),
}

/// Errors from the buyer-organization directory.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Transport failure, timeout, or upstream outage.
    #[error("buyer-organization directory unavailable: {0}")]
    Unavailable(String),
}
