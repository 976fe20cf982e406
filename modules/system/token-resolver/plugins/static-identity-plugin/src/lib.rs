#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Static Identity Plugin
//!
//! Configuration-driven, in-memory implementations of the token
//! resolver's authority traits: identity (token-to-principal and
//! key-pair-to-token maps), permissions (grant lists), and the
//! buyer-organization membership set.
//!
//! For local development and integration tests only — tokens are matched
//! literally, nothing is verified cryptographically.

pub mod config;
pub mod domain;
