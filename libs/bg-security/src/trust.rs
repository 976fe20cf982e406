//! The three-valued trust record produced per token kind.

/// Outcome of validating one credential against its upstream authority.
///
/// Built by the token resolver during validation and consumed by the
/// resolver entry point that requested it. Request-local: constructed
/// fresh per inbound request and discarded at the end of it.
///
/// The three fields form a ladder, weakest first:
///
/// - `has_token` — credential material was present in the request.
/// - `has_currently_valid_token` — the credential resolved to a principal
///   under the identity authority's current validation rules. Transitional
///   signal tracking the looser legacy semantics; slated for removal once
///   the stricter semantics are the only ones needed.
/// - `has_valid_token` — the credential additionally satisfied every
///   authorization predicate for this call (account match, permission
///   grant, organization membership).
///
/// Invariant: `has_valid_token ⟹ has_currently_valid_token ⟹ has_token`.
/// The only way to raise a rung is through [`confirm_current`] and
/// [`confirm_valid`], which assert the ladder, so a validation failure can
/// never leave the record in an inconsistent state.
///
/// [`confirm_current`]: TokenValidationResult::confirm_current
/// [`confirm_valid`]: TokenValidationResult::confirm_valid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct TokenValidationResult {
    has_token: bool,
    has_valid_token: bool,
    has_currently_valid_token: bool,
}

impl TokenValidationResult {
    /// Record for a request that carried no credential material at all.
    #[must_use]
    pub fn absent() -> Self {
        Self::default()
    }

    /// Record for a credential that was present but not yet validated.
    #[must_use]
    pub fn present() -> Self {
        Self {
            has_token: true,
            ..Self::default()
        }
    }

    /// Mark the credential as valid under the authority's current rules.
    pub fn confirm_current(&mut self) {
        debug_assert!(self.has_token, "cannot confirm an absent credential");
        self.has_currently_valid_token = true;
    }

    /// Mark the credential as satisfying this call's authorization policy.
    pub fn confirm_valid(&mut self) {
        debug_assert!(
            self.has_currently_valid_token,
            "policy validity implies current validity"
        );
        self.has_valid_token = true;
    }

    /// Credential material was present in the request.
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.has_token
    }

    /// Credential passed this call's authorization predicates.
    #[must_use]
    pub fn has_valid_token(&self) -> bool {
        self.has_valid_token
    }

    /// Credential resolved to a principal under current validation rules.
    #[must_use]
    pub fn has_currently_valid_token(&self) -> bool {
        self.has_currently_valid_token
    }

    /// Whether the ladder invariant holds. Exists so tests can assert it
    /// in one place; the mutators uphold it by construction.
    #[must_use]
    pub fn invariant_holds(&self) -> bool {
        (!self.has_valid_token || self.has_currently_valid_token)
            && (!self.has_currently_valid_token || self.has_token)
    }
}
