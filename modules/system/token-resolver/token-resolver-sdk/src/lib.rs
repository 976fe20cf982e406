#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Token Resolver SDK
//!
//! This crate provides the public surface consumed by and around the
//! `token_resolver` module:
//!
//! - [`IdentityAuthorityClient`], [`PermissionAuthorityClient`],
//!   [`BuyerOrgDirectoryClient`] - client traits for the upstream
//!   authorities this layer treats as black boxes
//! - [`MintedToken`], [`StoreUser`], [`AdminPermission`] - wire models
//! - [`RequestSession`], [`RequestAttributes`] - request-scoped carriers
//! - Error types per authority
//!
//! ## Usage
//!
//! Hosts implement the authority traits over their platform clients and
//! hand them to the resolver:
//!
//! ```ignore
//! use token_resolver_sdk::IdentityAuthorityClient;
//!
//! let principal = identity.validate_token(raw_token).await?;
//! ```

pub mod api;
pub mod error;
pub mod models;

// Re-export main types at crate root
pub use api::{BuyerOrgDirectoryClient, IdentityAuthorityClient, PermissionAuthorityClient};
pub use error::{DirectoryError, IdentityAuthorityError, PermissionAuthorityError};
pub use models::{
    AdminPermission, ApiTokenOutcome, MintedToken, RequestAttributes, RequestSession,
    SessionCookie, StoreUser,
};
