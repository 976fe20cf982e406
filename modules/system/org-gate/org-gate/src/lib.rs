#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Org Gate Module
//!
//! Applies the uniform authorization rule for organization-scoped
//! operations: a trusted operator credential bypasses every check;
//! everyone else needs a session-derived organization affiliation, the
//! specific permission the operation requires, and a target organization
//! inside their own tenant. The two failure kinds — no affiliation at
//! all versus a refused operation — carry distinct stable codes.
//!
//! User records themselves live in the sibling permissions service; this
//! module only gates and forwards the calls.

pub mod domain;
