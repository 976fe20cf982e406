#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Token Resolver Module
//!
//! Validates the credential materials an inbound request may carry — an
//! operator session token, an API key/secret pair, a storefront user
//! token, or a header-carried operator token — against the platform's
//! identity and permission authorities, producing one three-valued trust
//! record per token kind.
//!
//! Upstream failures are a negative trust signal here, never an error: a
//! malfunctioning authority must not be read as "access granted" and must
//! not crash the request either. The single exception is the optional
//! fine-grained permission check on the admin path, whose denial is a
//! deliberate authorization decision the caller has to surface.

pub mod config;
pub mod domain;
