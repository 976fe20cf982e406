//! Gated user administration, delegated to the sibling permissions
//! service.

use std::sync::Arc;

use org_gate_sdk::{
    GateError, OperationResult, OperatorTrust, OrgAffiliation, RemoveUserInput, SaveUserInput,
    UserDirectoryClient, permissions,
};

use super::gate;

/// User administration entry points.
///
/// The gate decides; the user directory executes. Directory failures are
/// funneled into an error-status payload so callers always get something
/// they can render — only the gate's own denials are raised.
pub struct UserAdministration {
    directory: Arc<dyn UserDirectoryClient>,
}

impl UserAdministration {
    #[must_use]
    pub fn new(directory: Arc<dyn UserDirectoryClient>) -> Self {
        Self { directory }
    }

    /// Create or update a user within the caller's organization.
    ///
    /// # Errors
    ///
    /// [`GateError`] when the caller may not manage users of the target
    /// organization.
    #[tracing::instrument(skip_all)]
    pub async fn save_user(
        &self,
        operator: OperatorTrust,
        affiliation: Option<&OrgAffiliation>,
        input: &SaveUserInput,
    ) -> Result<OperationResult, GateError> {
        gate::authorize(
            operator,
            affiliation,
            permissions::ADD_USERS_ORGANIZATION,
            input.org_id.as_deref(),
        )?;

        match self.directory.save_user(input).await {
            Ok(result) => Ok(result),
            Err(e) => {
                tracing::error!(error = %e, email = %input.email, "failed to save user");
                Ok(OperationResult::error(e.to_string()))
            }
        }
    }

    /// Remove a user from the caller's organization.
    ///
    /// The remove path carries no organization argument; the directory
    /// resolves the record itself.
    ///
    /// # Errors
    ///
    /// [`GateError`] when the caller may not manage users.
    #[tracing::instrument(skip_all)]
    pub async fn remove_user(
        &self,
        operator: OperatorTrust,
        affiliation: Option<&OrgAffiliation>,
        input: &RemoveUserInput,
    ) -> Result<OperationResult, GateError> {
        gate::authorize(
            operator,
            affiliation,
            permissions::REMOVE_USERS_ORGANIZATION,
            None,
        )?;

        match self.directory.delete_user(input).await {
            Ok(result) => Ok(result),
            Err(e) => {
                tracing::error!(error = %e, email = %input.email, "failed to remove user");
                Ok(OperationResult::error(e.to_string()))
            }
        }
    }
}
