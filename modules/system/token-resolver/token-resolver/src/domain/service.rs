//! Domain service implementing the validators.

use std::sync::Arc;

use http::HeaderMap;
use secrecy::{ExposeSecret, SecretString};

use bg_security::{
    AdminCredential, ApiCredential, AuthenticatedPrincipal, StoreCredential, TokenType,
    TokenValidationResult,
};
use token_resolver_sdk::{
    AdminPermission, ApiTokenOutcome, BuyerOrgDirectoryClient, IdentityAuthorityClient,
    PermissionAuthorityClient, PermissionAuthorityError, RequestAttributes, RequestSession,
};

use crate::config::TokenResolverConfig;

use super::error::DomainError;

/// Token resolver service.
///
/// One instance per account (tenant): a principal issued under a
/// different account is never trusted for operator operations, whatever
/// its audience. All remote calls go through the authority clients; the
/// calls inside one validation are sequential because each depends on the
/// previous one's result.
pub struct Service {
    identity: Arc<dyn IdentityAuthorityClient>,
    permissions: Arc<dyn PermissionAuthorityClient>,
    directory: Arc<dyn BuyerOrgDirectoryClient>,
    account: String,
    config: TokenResolverConfig,
}

impl Service {
    #[must_use]
    pub fn new(
        identity: Arc<dyn IdentityAuthorityClient>,
        permissions: Arc<dyn PermissionAuthorityClient>,
        directory: Arc<dyn BuyerOrgDirectoryClient>,
        account: impl Into<String>,
        config: TokenResolverConfig,
    ) -> Self {
        Self {
            identity,
            permissions,
            directory,
            account: account.into(),
            config,
        }
    }

    /// Validate an operator session token.
    ///
    /// Identity-authority failures degrade the record and are not
    /// surfaced. When `required_permission` is set, the record is already
    /// trusted, and the token is bound to a named user, the fine-grained
    /// check runs after that boundary and its failure does propagate.
    ///
    /// # Errors
    ///
    /// Only from the fine-grained `required_permission` check.
    #[tracing::instrument(skip_all)]
    pub async fn validate_admin(
        &self,
        credential: Option<&AdminCredential>,
        required_permission: Option<AdminPermission>,
    ) -> Result<TokenValidationResult, PermissionAuthorityError> {
        let (record, principal) = self.admin_record(credential).await;

        if let (Some(permission), Some(principal)) = (required_permission, principal)
            && record.has_valid_token()
            && principal.token_type == Some(TokenType::User)
            && let Some(user) = principal.user.as_deref()
        {
            self.permissions
                .check_permission(&self.account, user, permission)
                .await?;
        }

        Ok(record)
    }

    /// Validate an API key/secret pair.
    ///
    /// On a successful exchange the minted bearer token is persisted into
    /// `session` (cookie plus ambient operator-token slot), so downstream
    /// logic observes the caller as a cookie-authenticated operator even
    /// when the stricter checks end up failing.
    #[tracing::instrument(skip_all)]
    pub async fn validate_api(
        &self,
        credential: Option<&ApiCredential>,
        session: &mut RequestSession,
    ) -> ApiTokenOutcome {
        let Some(credential) = credential else {
            return ApiTokenOutcome {
                trust: TokenValidationResult::absent(),
                minted_token: None,
            };
        };

        if credential.app_key.is_empty() || credential.app_token.expose_secret().is_empty() {
            return ApiTokenOutcome {
                trust: TokenValidationResult::absent(),
                minted_token: None,
            };
        }

        let mut record = TokenValidationResult::present();
        let mut minted_token = None;

        if let Err(e) = self
            .api_trust(credential, session, &mut record, &mut minted_token)
            .await
        {
            tracing::warn!(error = %e, "error validating API token");
        }

        ApiTokenOutcome {
            trust: record,
            minted_token,
        }
    }

    /// Validate a storefront user token.
    ///
    /// A token that resolves to a user is only policy-valid when that
    /// user belongs to a buyer organization.
    #[tracing::instrument(skip_all)]
    pub async fn validate_store(
        &self,
        credential: Option<&StoreCredential>,
        attrs: &RequestAttributes,
    ) -> TokenValidationResult {
        let Some(credential) = credential else {
            return TokenValidationResult::absent();
        };

        if credential.token.expose_secret().is_empty() {
            return TokenValidationResult::absent();
        }

        let mut record = TokenValidationResult::present();

        if let Err(e) = self
            .store_trust(credential.token.expose_secret(), attrs, &mut record)
            .await
        {
            tracing::warn!(error = %e, "error validating store token");
        }

        record
    }

    /// Validate an operator token carried in the configured header
    /// instead of the session cookie. Absent header means no downstream
    /// call at all; otherwise this is the admin validation with no
    /// required permission.
    #[tracing::instrument(skip_all)]
    pub async fn validate_admin_from_header(&self, headers: &HeaderMap) -> TokenValidationResult {
        let Some(credential) = self.config.admin_credential_from_header(headers) else {
            return TokenValidationResult::absent();
        };

        self.admin_record(Some(&credential)).await.0
    }

    /// Presence check plus the fallible admin chain, degraded at one
    /// point. The principal is handed back for the fine-grained check,
    /// which must run outside this boundary.
    async fn admin_record(
        &self,
        credential: Option<&AdminCredential>,
    ) -> (TokenValidationResult, Option<AuthenticatedPrincipal>) {
        let Some(credential) = credential else {
            return (TokenValidationResult::absent(), None);
        };

        if credential.token.expose_secret().is_empty() {
            return (TokenValidationResult::absent(), None);
        }

        let mut record = TokenValidationResult::present();

        let principal = match self
            .admin_trust(credential.token.expose_secret(), &mut record)
            .await
        {
            Ok(principal) => Some(principal),
            Err(e) => {
                // the degrade point: an authority failure is a negative
                // trust signal, never an error
                tracing::warn!(error = %e, "error validating admin token");
                None
            }
        };

        (record, principal)
    }

    async fn admin_trust(
        &self,
        token: &str,
        record: &mut TokenValidationResult,
    ) -> Result<AuthenticatedPrincipal, DomainError> {
        let principal = self.identity.validate_token(token).await?;

        // valid by current standards; remove once the strict check below
        // is the only semantics left
        record.confirm_current();

        if principal.is_operator_for(&self.account)
            && self
                .permissions
                .get_admin_permission(&self.account, &principal.id)
                .await?
        {
            record.confirm_valid();
        }

        Ok(principal)
    }

    async fn api_trust(
        &self,
        credential: &ApiCredential,
        session: &mut RequestSession,
        record: &mut TokenValidationResult,
        minted_token: &mut Option<SecretString>,
    ) -> Result<(), DomainError> {
        let minted = self
            .identity
            .get_token(&credential.app_key, credential.app_token.expose_secret())
            .await?;

        let principal = self
            .identity
            .validate_token(minted.token.expose_secret())
            .await?;

        record.confirm_current();

        // compatibility shim: API-key callers are made to look like
        // cookie-authenticated operators downstream; remove together with
        // the transitional current-validity flag
        session.grant_operator_token(&self.config.operator_cookie, minted.token.clone());
        *minted_token = Some(minted.token);

        if principal.is_operator_for(&self.account)
            && self
                .permissions
                .get_admin_permission(&self.account, &principal.id)
                .await?
        {
            record.confirm_valid();
        }

        Ok(())
    }

    async fn store_trust(
        &self,
        token: &str,
        attrs: &RequestAttributes,
        record: &mut TokenValidationResult,
    ) -> Result<(), DomainError> {
        let Some(store_user) = self.identity.get_authenticated_user(token).await? else {
            return Ok(());
        };

        record.confirm_current();

        if self
            .directory
            .is_user_part_of_buyer_org(&store_user.user)
            .await?
        {
            record.confirm_valid();
        } else {
            // observability for invalid store token use; remove once the
            // cases are understood
            tracing::warn!(
                operation = attrs.url.as_deref().unwrap_or_default(),
                user_agent = attrs.user_agent.as_deref().unwrap_or_default(),
                caller = attrs.caller.as_deref().unwrap_or_default(),
                forwarded_host = attrs.forwarded_host.as_deref().unwrap_or_default(),
                principal = ?store_user,
                "store token user is not part of a buyer organization"
            );
        }

        Ok(())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use tracing_test::traced_test;

    use bg_security::TokenAudience;
    use token_resolver_sdk::{
        DirectoryError, IdentityAuthorityError, MintedToken, PermissionAuthorityError, StoreUser,
    };

    use super::*;

    #[derive(Default)]
    struct FakeIdentity {
        principal: Option<AuthenticatedPrincipal>,
        minted_token: Option<String>,
        store_user: Option<StoreUser>,
        fail_validate: bool,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl IdentityAuthorityClient for FakeIdentity {
        async fn validate_token(
            &self,
            _token: &str,
        ) -> Result<AuthenticatedPrincipal, IdentityAuthorityError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_validate {
                return Err(IdentityAuthorityError::Unavailable("timeout".to_owned()));
            }
            self.principal
                .clone()
                .ok_or_else(|| IdentityAuthorityError::InvalidToken("unknown token".to_owned()))
        }

        async fn get_token(
            &self,
            _app_key: &str,
            _app_token: &str,
        ) -> Result<MintedToken, IdentityAuthorityError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.minted_token
                .clone()
                .map(|token| MintedToken {
                    token: SecretString::from(token),
                })
                .ok_or_else(|| IdentityAuthorityError::InvalidToken("unknown key pair".to_owned()))
        }

        async fn get_authenticated_user(
            &self,
            _store_token: &str,
        ) -> Result<Option<StoreUser>, IdentityAuthorityError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.store_user.clone())
        }
    }

    #[derive(Default)]
    struct FakePermissions {
        admin_grant: bool,
        deny_fine_grained: bool,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PermissionAuthorityClient for FakePermissions {
        async fn get_admin_permission(
            &self,
            _account: &str,
            _principal_id: &str,
        ) -> Result<bool, PermissionAuthorityError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.admin_grant)
        }

        async fn check_permission(
            &self,
            account: &str,
            user: &str,
            permission: AdminPermission,
        ) -> Result<(), PermissionAuthorityError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.deny_fine_grained {
                return Err(PermissionAuthorityError::Denied {
                    account: account.to_owned(),
                    user: user.to_owned(),
                    permission,
                });
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeDirectory {
        member: bool,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl BuyerOrgDirectoryClient for FakeDirectory {
        async fn is_user_part_of_buyer_org(&self, _user: &str) -> Result<bool, DirectoryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.member)
        }
    }

    fn admin_principal(account: &str) -> AuthenticatedPrincipal {
        AuthenticatedPrincipal {
            id: "u1".to_owned(),
            account: account.to_owned(),
            audience: TokenAudience::Admin,
            user: Some("operator@example.com".to_owned()),
            token_type: Some(TokenType::User),
        }
    }

    fn service(
        identity: Arc<FakeIdentity>,
        permissions: Arc<FakePermissions>,
        directory: Arc<FakeDirectory>,
    ) -> Service {
        Service::new(
            identity,
            permissions,
            directory,
            "storeA",
            TokenResolverConfig::default(),
        )
    }

    #[tokio::test]
    async fn absent_admin_credential_issues_no_calls() {
        let identity = Arc::new(FakeIdentity::default());
        let svc = service(
            identity.clone(),
            Arc::new(FakePermissions::default()),
            Arc::new(FakeDirectory::default()),
        );

        let record = svc.validate_admin(None, None).await.unwrap();

        assert!(!record.has_token());
        assert!(!record.has_valid_token());
        assert!(!record.has_currently_valid_token());
        assert_eq!(identity.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn admin_token_with_matching_account_and_grant_is_valid() {
        let identity = Arc::new(FakeIdentity {
            principal: Some(admin_principal("storeA")),
            ..FakeIdentity::default()
        });
        let permissions = Arc::new(FakePermissions {
            admin_grant: true,
            ..FakePermissions::default()
        });
        let svc = service(identity, permissions, Arc::new(FakeDirectory::default()));

        let credential = AdminCredential::new("admin-token".to_owned());
        let record = svc.validate_admin(Some(&credential), None).await.unwrap();

        assert!(record.has_token());
        assert!(record.has_currently_valid_token());
        assert!(record.has_valid_token());
        assert!(record.invariant_holds());
    }

    #[tokio::test]
    async fn admin_token_from_another_account_is_only_currently_valid() {
        let identity = Arc::new(FakeIdentity {
            principal: Some(admin_principal("storeB")),
            ..FakeIdentity::default()
        });
        let permissions = Arc::new(FakePermissions {
            admin_grant: true,
            ..FakePermissions::default()
        });
        let svc = service(
            identity,
            permissions.clone(),
            Arc::new(FakeDirectory::default()),
        );

        let credential = AdminCredential::new("admin-token".to_owned());
        let record = svc.validate_admin(Some(&credential), None).await.unwrap();

        assert!(record.has_token());
        assert!(record.has_currently_valid_token());
        assert!(!record.has_valid_token());
        // never asked for a grant on behalf of a foreign principal
        assert_eq!(permissions.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn identity_failure_degrades_instead_of_propagating() {
        let identity = Arc::new(FakeIdentity {
            fail_validate: true,
            ..FakeIdentity::default()
        });
        let svc = service(
            identity,
            Arc::new(FakePermissions::default()),
            Arc::new(FakeDirectory::default()),
        );

        let credential = AdminCredential::new("admin-token".to_owned());
        let record = svc.validate_admin(Some(&credential), None).await.unwrap();

        assert!(record.has_token());
        assert!(!record.has_currently_valid_token());
        assert!(!record.has_valid_token());
    }

    #[tokio::test]
    async fn denied_fine_grained_permission_propagates() {
        let identity = Arc::new(FakeIdentity {
            principal: Some(admin_principal("storeA")),
            ..FakeIdentity::default()
        });
        let permissions = Arc::new(FakePermissions {
            admin_grant: true,
            deny_fine_grained: true,
            ..FakePermissions::default()
        });
        let svc = service(identity, permissions, Arc::new(FakeDirectory::default()));

        let credential = AdminCredential::new("admin-token".to_owned());
        let result = svc
            .validate_admin(Some(&credential), Some(AdminPermission::BuyerOrganizationEdit))
            .await;

        assert!(matches!(
            result,
            Err(PermissionAuthorityError::Denied { .. })
        ));
    }

    #[tokio::test]
    async fn fine_grained_check_is_skipped_for_untrusted_records() {
        let identity = Arc::new(FakeIdentity {
            principal: Some(admin_principal("storeA")),
            ..FakeIdentity::default()
        });
        // no admin grant: record stays below valid, so the fine-grained
        // check must not run at all
        let permissions = Arc::new(FakePermissions {
            deny_fine_grained: true,
            ..FakePermissions::default()
        });
        let svc = service(
            identity,
            permissions.clone(),
            Arc::new(FakeDirectory::default()),
        );

        let credential = AdminCredential::new("admin-token".to_owned());
        let record = svc
            .validate_admin(Some(&credential), Some(AdminPermission::BuyerOrganizationView))
            .await
            .unwrap();

        assert!(!record.has_valid_token());
        // one call for the admin grant lookup, none for check_permission
        assert_eq!(permissions.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn api_pair_mints_and_persists_exactly_one_operator_token() {
        let identity = Arc::new(FakeIdentity {
            principal: Some(admin_principal("storeA")),
            minted_token: Some("b1".to_owned()),
            ..FakeIdentity::default()
        });
        let permissions = Arc::new(FakePermissions {
            admin_grant: true,
            ..FakePermissions::default()
        });
        let svc = service(identity, permissions, Arc::new(FakeDirectory::default()));

        let credential = ApiCredential::new("k1", "t1".to_owned());
        let mut session = RequestSession::new();
        let outcome = svc.validate_api(Some(&credential), &mut session).await;

        assert!(outcome.trust.has_token());
        assert!(outcome.trust.has_currently_valid_token());
        assert!(outcome.trust.has_valid_token());
        assert_eq!(
            outcome.minted_token.as_ref().map(ExposeSecret::expose_secret),
            Some("b1"),
        );

        assert_eq!(session.cookies().len(), 1);
        assert_eq!(session.cookies()[0].name, "VtexIdclientAutCookie");
        assert_eq!(session.cookies()[0].value.expose_secret(), "b1");
        assert_eq!(
            session.operator_token().map(ExposeSecret::expose_secret),
            Some("b1"),
        );
    }

    #[tokio::test]
    async fn failed_exchange_writes_nothing_to_the_session() {
        let identity = Arc::new(FakeIdentity::default()); // no minted token
        let svc = service(
            identity,
            Arc::new(FakePermissions::default()),
            Arc::new(FakeDirectory::default()),
        );

        let credential = ApiCredential::new("k1", "t1".to_owned());
        let mut session = RequestSession::new();
        let outcome = svc.validate_api(Some(&credential), &mut session).await;

        assert!(outcome.trust.has_token());
        assert!(!outcome.trust.has_currently_valid_token());
        assert!(!outcome.trust.has_valid_token());
        assert!(outcome.minted_token.is_none());
        assert!(session.cookies().is_empty());
        assert!(session.operator_token().is_none());
    }

    #[tokio::test]
    async fn minted_token_is_persisted_even_when_the_grant_is_missing() {
        let identity = Arc::new(FakeIdentity {
            principal: Some(admin_principal("storeA")),
            minted_token: Some("b1".to_owned()),
            ..FakeIdentity::default()
        });
        // structural validation succeeds, the stricter check does not
        let svc = service(
            identity,
            Arc::new(FakePermissions::default()),
            Arc::new(FakeDirectory::default()),
        );

        let credential = ApiCredential::new("k1", "t1".to_owned());
        let mut session = RequestSession::new();
        let outcome = svc.validate_api(Some(&credential), &mut session).await;

        assert!(outcome.trust.has_currently_valid_token());
        assert!(!outcome.trust.has_valid_token());
        assert_eq!(session.cookies().len(), 1);
    }

    #[tokio::test]
    async fn empty_api_material_is_treated_as_absent() {
        let identity = Arc::new(FakeIdentity::default());
        let svc = service(
            identity.clone(),
            Arc::new(FakePermissions::default()),
            Arc::new(FakeDirectory::default()),
        );

        let credential = ApiCredential::new("", "t1".to_owned());
        let mut session = RequestSession::new();
        let outcome = svc.validate_api(Some(&credential), &mut session).await;

        assert!(!outcome.trust.has_token());
        assert_eq!(identity.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    #[traced_test]
    async fn store_user_outside_buyer_orgs_warns_and_stays_below_valid() {
        let identity = Arc::new(FakeIdentity {
            store_user: Some(StoreUser {
                user: "shopper@example.com".to_owned(),
                user_id: None,
            }),
            ..FakeIdentity::default()
        });
        let directory = Arc::new(FakeDirectory::default()); // not a member
        let svc = service(identity, Arc::new(FakePermissions::default()), directory);

        let credential = StoreCredential::new("store-token".to_owned());
        let record = svc
            .validate_store(Some(&credential), &RequestAttributes::default())
            .await;

        assert!(record.has_token());
        assert!(record.has_currently_valid_token());
        assert!(!record.has_valid_token());
        assert!(logs_contain(
            "store token user is not part of a buyer organization"
        ));
    }

    #[tokio::test]
    async fn store_member_is_fully_valid() {
        let identity = Arc::new(FakeIdentity {
            store_user: Some(StoreUser {
                user: "shopper@example.com".to_owned(),
                user_id: Some("c1".to_owned()),
            }),
            ..FakeIdentity::default()
        });
        let directory = Arc::new(FakeDirectory {
            member: true,
            ..FakeDirectory::default()
        });
        let svc = service(identity, Arc::new(FakePermissions::default()), directory);

        let credential = StoreCredential::new("store-token".to_owned());
        let record = svc
            .validate_store(Some(&credential), &RequestAttributes::default())
            .await;

        assert!(record.has_valid_token());
        assert!(record.invariant_holds());
    }

    #[tokio::test]
    async fn absent_store_credential_issues_no_calls() {
        let identity = Arc::new(FakeIdentity::default());
        let svc = service(
            identity.clone(),
            Arc::new(FakePermissions::default()),
            Arc::new(FakeDirectory::default()),
        );

        let record = svc.validate_store(None, &RequestAttributes::default()).await;

        assert!(!record.has_token());
        assert_eq!(identity.calls.load(Ordering::SeqCst), 0);

        let empty = StoreCredential::new(String::new());
        let record = svc
            .validate_store(Some(&empty), &RequestAttributes::default())
            .await;
        assert!(!record.has_token());
        assert_eq!(identity.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unknown_store_token_stays_present_only() {
        let identity = Arc::new(FakeIdentity::default()); // no user resolves
        let directory = Arc::new(FakeDirectory::default());
        let svc = service(
            identity,
            Arc::new(FakePermissions::default()),
            directory.clone(),
        );

        let credential = StoreCredential::new("store-token".to_owned());
        let record = svc
            .validate_store(Some(&credential), &RequestAttributes::default())
            .await;

        assert!(record.has_token());
        assert!(!record.has_currently_valid_token());
        // membership is never looked up without a resolved user
        assert_eq!(directory.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_header_token_skips_the_admin_path_entirely() {
        let identity = Arc::new(FakeIdentity {
            principal: Some(admin_principal("storeA")),
            ..FakeIdentity::default()
        });
        let svc = service(
            identity.clone(),
            Arc::new(FakePermissions::default()),
            Arc::new(FakeDirectory::default()),
        );

        let record = svc.validate_admin_from_header(&HeaderMap::new()).await;

        assert!(!record.has_token());
        assert!(!record.has_currently_valid_token());
        assert!(!record.has_valid_token());
        assert_eq!(identity.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn header_token_delegates_to_admin_validation() {
        let identity = Arc::new(FakeIdentity {
            principal: Some(admin_principal("storeA")),
            ..FakeIdentity::default()
        });
        let permissions = Arc::new(FakePermissions {
            admin_grant: true,
            ..FakePermissions::default()
        });
        let svc = service(identity, permissions, Arc::new(FakeDirectory::default()));

        let mut headers = HeaderMap::new();
        headers.insert(
            "vtexidclientautcookie",
            http::HeaderValue::from_static("admin-token"),
        );
        let record = svc.validate_admin_from_header(&headers).await;

        assert!(record.has_token());
        assert!(record.has_currently_valid_token());
        assert!(record.has_valid_token());
    }
}
