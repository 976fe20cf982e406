#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
pub mod credential;
pub mod principal;
pub mod trust;

pub use credential::{AdminCredential, ApiCredential, StoreCredential};
pub use principal::{AuthenticatedPrincipal, TokenAudience, TokenType};
pub use trust::TokenValidationResult;
