//! Delegate trait for the sibling permissions service.
//!
//! User records are owned by a sibling service; the gate only decides
//! whether the delegation may happen and then forwards the call.

use async_trait::async_trait;

use crate::error::UserDirectoryError;
use crate::models::{OperationResult, RemoveUserInput, SaveUserInput};

/// Client for the user directory of the sibling permissions service.
#[async_trait]
pub trait UserDirectoryClient: Send + Sync {
    /// Create or update an organization user.
    ///
    /// # Errors
    ///
    /// - `Unavailable` for transport or upstream failures
    /// - `Rejected` when the directory refuses the payload
    async fn save_user(
        &self,
        input: &SaveUserInput,
    ) -> Result<OperationResult, UserDirectoryError>;

    /// Remove an organization user.
    ///
    /// # Errors
    ///
    /// - `Unavailable` for transport or upstream failures
    /// - `Rejected` when the directory refuses the payload
    async fn delete_user(
        &self,
        input: &RemoveUserInput,
    ) -> Result<OperationResult, UserDirectoryError>;
}
