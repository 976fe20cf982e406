//! Domain models for the org gate.

use serde::{Deserialize, Serialize};

use bg_security::TokenValidationResult;

/// Well-known storefront permission names.
///
/// These strings are minted by the sibling permissions service; the gate
/// only compares them. Kept as constants so call sites and tests share a
/// single source of truth.
pub mod permissions {
    /// Add or update users within the caller's organization.
    pub const ADD_USERS_ORGANIZATION: &str = "add-users-organization";

    /// Remove users from the caller's organization.
    pub const REMOVE_USERS_ORGANIZATION: &str = "remove-users-organization";
}

/// The caller's session-derived organization affiliation.
///
/// Resolved out of band (session + permissions service) and passed into
/// the gate as plain input; absence means the session carries no
/// storefront-permissions data at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrgAffiliation {
    /// Organization the caller belongs to.
    pub organization_id: String,
    /// Cost center the caller belongs to, when assigned.
    #[serde(default)]
    pub cost_center_id: Option<String>,
    /// Permission names granted to the caller's role.
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl OrgAffiliation {
    /// Whether the affiliation carries the named permission.
    #[must_use]
    pub fn has_permission(&self, name: &str) -> bool {
        self.permissions.iter().any(|p| p == name)
    }
}

/// Whether the caller presented a policy-valid operator credential.
///
/// Operators are globally trusted: a trusted record from the admin or API
/// validator bypasses organization-membership and permission checks
/// entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OperatorTrust {
    trusted: bool,
}

impl OperatorTrust {
    /// No operator credential was presented (or none validated).
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Derive trust from the request's validation records: any record
    /// that reached policy validity makes the caller an operator.
    #[must_use]
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a TokenValidationResult>) -> Self {
        Self {
            trusted: records.into_iter().any(TokenValidationResult::has_valid_token),
        }
    }

    #[must_use]
    pub fn is_trusted(&self) -> bool {
        self.trusted
    }
}

/// Input for saving (creating or updating) an organization user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveUserInput {
    /// Existing record id, when updating.
    #[serde(default)]
    pub id: Option<String>,
    /// Role to assign.
    pub role_id: String,
    /// Platform user id, when known.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Target organization id.
    #[serde(default)]
    pub org_id: Option<String>,
    /// Target cost center id.
    #[serde(default)]
    pub cost_id: Option<String>,
    /// Customer-list id, when known.
    #[serde(default)]
    pub cl_id: Option<String>,
    /// Whether the user may impersonate others.
    #[serde(default)]
    pub can_impersonate: bool,
    /// Display name.
    pub name: String,
    /// Email (the user's login).
    pub email: String,
}

/// Input for removing an organization user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveUserInput {
    /// Record id in the user directory.
    pub id: String,
    /// Platform user id, when known.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Email (the user's login).
    pub email: String,
}

/// Status of a delegated user-management operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationStatus {
    Success,
    Error,
}

/// Result payload of a delegated user-management operation.
///
/// Delegate failures are funneled into an `Error` payload rather than a
/// thrown error, so the caller always receives a status it can render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationResult {
    /// Operation status.
    pub status: OperationStatus,
    /// Message accompanying an error status; empty on success.
    #[serde(default)]
    pub message: String,
}

impl OperationResult {
    #[must_use]
    pub fn success() -> Self {
        Self {
            status: OperationStatus::Success,
            message: String::new(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: OperationStatus::Error,
            message: message.into(),
        }
    }
}
