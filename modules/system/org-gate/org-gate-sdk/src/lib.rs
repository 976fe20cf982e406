#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Org Gate SDK
//!
//! This crate provides the public surface of the `org_gate` module:
//!
//! - [`OrgAffiliation`], [`OperatorTrust`] - the gate's inputs
//! - [`permissions`] - well-known storefront permission names
//! - [`GateError`] - authorization failures with stable machine-readable
//!   codes
//! - [`UserDirectoryClient`] - delegate trait for the sibling permissions
//!   service that owns user records
//! - User-management inputs and the [`OperationResult`] payload

pub mod api;
pub mod error;
pub mod models;

// Re-export main types at crate root
pub use api::UserDirectoryClient;
pub use error::{GateError, UserDirectoryError};
pub use models::{
    OperationResult, OperationStatus, OperatorTrust, OrgAffiliation, RemoveUserInput,
    SaveUserInput, permissions,
};
