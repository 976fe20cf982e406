//! Error types for the org gate.

use thiserror::Error;

/// Authorization failures surfaced to calling UIs.
///
/// The `Display` form is the stable machine-readable code, so the two
/// kinds stay distinguishable across the wire and must never be merged:
/// a missing affiliation is a data problem, a refused operation is a
/// policy decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GateError {
    /// The caller's session carries no organization affiliation at all.
    #[error("organization-data-not-found")]
    OrganizationDataNotFound,

    /// The affiliation exists but does not allow this operation.
    #[error("operation-not-permitted")]
    OperationNotPermitted,
}

impl GateError {
    /// The stable machine-readable code for this failure.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::OrganizationDataNotFound => "organization-data-not-found",
            Self::OperationNotPermitted => "operation-not-permitted",
        }
    }
}

/// Errors from the sibling user directory.
#[derive(Debug, Error)]
pub enum UserDirectoryError {
    /// Transport failure, timeout, or upstream outage.
    #[error("user directory unavailable: {0}")]
    Unavailable(String),

    /// The directory rejected the operation.
    #[error("user directory rejected the operation: {0}")]
    Rejected(String),
}
