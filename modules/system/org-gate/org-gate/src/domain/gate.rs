//! The authorization gate applied at organization-scoped entry points.

use org_gate_sdk::{GateError, OperatorTrust, OrgAffiliation};

/// Authorize an organization-scoped operation.
///
/// 1. A trusted operator bypasses every further check.
/// 2. Otherwise the caller needs an affiliation
///    (`organization-data-not-found` when there is none).
/// 3. The affiliation must carry `required_permission`
///    (`operation-not-permitted`).
/// 4. A caller-supplied target organization must be the caller's own
///    (`operation-not-permitted`). Operations without an organization
///    argument pass `None` and skip this step.
///
/// # Errors
///
/// [`GateError::OrganizationDataNotFound`] or
/// [`GateError::OperationNotPermitted`], per the steps above.
pub fn authorize(
    operator: OperatorTrust,
    affiliation: Option<&OrgAffiliation>,
    required_permission: &str,
    target_organization: Option<&str>,
) -> Result<(), GateError> {
    if operator.is_trusted() {
        return Ok(());
    }

    let affiliation = affiliation.ok_or(GateError::OrganizationDataNotFound)?;

    if !affiliation.has_permission(required_permission) {
        return Err(GateError::OperationNotPermitted);
    }

    if let Some(target) = target_organization
        && target != affiliation.organization_id
    {
        return Err(GateError::OperationNotPermitted);
    }

    Ok(())
}

/// Resolve the organization a storefront query should read.
///
/// A missing (or empty) argument defaults to the caller's own
/// organization; anything else must match it.
///
/// # Errors
///
/// [`GateError::OrganizationDataNotFound`] without an affiliation,
/// [`GateError::OperationNotPermitted`] on a foreign organization id.
pub fn resolve_target_organization(
    requested: Option<&str>,
    affiliation: Option<&OrgAffiliation>,
) -> Result<String, GateError> {
    let affiliation = affiliation.ok_or(GateError::OrganizationDataNotFound)?;

    match requested.filter(|id| !id.is_empty()) {
        None => Ok(affiliation.organization_id.clone()),
        Some(id) if id == affiliation.organization_id => Ok(id.to_owned()),
        Some(_) => Err(GateError::OperationNotPermitted),
    }
}

/// Check that a fetched record belongs to the caller's organization.
///
/// For the fetch-then-check shape: the record names its owning
/// organization and the caller must be affiliated with that same one.
///
/// # Errors
///
/// [`GateError::OrganizationDataNotFound`] without an affiliation,
/// [`GateError::OperationNotPermitted`] on a foreign record.
pub fn ensure_same_organization(
    owning_organization: &str,
    affiliation: Option<&OrgAffiliation>,
) -> Result<(), GateError> {
    let affiliation = affiliation.ok_or(GateError::OrganizationDataNotFound)?;

    if owning_organization == affiliation.organization_id {
        Ok(())
    } else {
        Err(GateError::OperationNotPermitted)
    }
}
