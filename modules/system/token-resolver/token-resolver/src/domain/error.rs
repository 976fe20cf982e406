//! Domain errors for the token resolver.

use token_resolver_sdk::{DirectoryError, IdentityAuthorityError, PermissionAuthorityError};

/// Internal funnel for the fallible part of a validation chain.
///
/// Every variant ends at the same place: the validator's single degrade
/// point, where the error is logged and the trust record is returned in
/// whatever state it had reached. Keeping the funnel explicit (instead of
/// a blanket catch) means only authority failures degrade — programming
/// errors still panic in tests.
#[derive(thiserror::Error, Debug)]
pub enum DomainError {
    #[error(transparent)]
    Identity(#[from] IdentityAuthorityError),

    #[error(transparent)]
    Permission(#[from] PermissionAuthorityError),

    #[error(transparent)]
    Directory(#[from] DirectoryError),
}
