use std::sync::Arc;

use thiserror::Error;

use claimforge_core::{RoleId, TenantId};

use crate::claims::{Claim, UserPreferences, age_on};
use crate::clock::{Clock, SystemClock};
use crate::features::disabled_features;
use crate::identity::{Identity, RequestingClient};
use crate::locale::{Locale, default_locale_from_env, resolve_locale};
use crate::permissions::merge_permissions;
use crate::stores::{
    FeatureToggleStore, MembershipStore, PermissionOverrideStore, RoleStore, StoreError,
    TenantConfigStore,
};

/// Enrichment failure taxonomy.
///
/// Authorization failures and data-integrity faults are distinct variants so
/// callers can map them to different statuses and logging severities.
#[derive(Debug, Error)]
pub enum EnrichmentError {
    /// No membership exists for the resolved tenant (authorization failure,
    /// not a system fault).
    #[error("identity has no membership in the requested tenant")]
    IdentityNotMember,

    /// The requesting client is not in the identity's authorized set.
    #[error("client is not authorized for this identity")]
    ClientNotAuthorized,

    /// The membership references a role that does not exist. This is bad
    /// data, not a bad request; callers should alert rather than deny.
    #[error("role {0} referenced by membership cannot be resolved")]
    RoleNotResolvable(RoleId),

    /// A backing store failed transiently. Propagated as-is; the caller
    /// owns retry policy.
    #[error(transparent)]
    Dependency(#[from] StoreError),
}

/// Coarse classification of an enrichment error, for status mapping and
/// log severity at the transport boundary.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    Authorization,
    DataIntegrity,
    Dependency,
}

impl EnrichmentError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::IdentityNotMember | Self::ClientNotAuthorized => ErrorKind::Authorization,
            Self::RoleNotResolvable(_) => ErrorKind::DataIntegrity,
            Self::Dependency(_) => ErrorKind::Dependency,
        }
    }
}

/// Orchestrates claim enrichment against the backing stores.
///
/// Each call is a request-scoped computation over immutable snapshots: the
/// membership resolves first (it supplies the keys for everything else),
/// then the independent lookups run concurrently and the claim is assembled
/// only after all of them complete. Any failure aborts the whole call — no
/// partial claim is ever returned.
pub struct ClaimEnricher {
    memberships: Arc<dyn MembershipStore>,
    roles: Arc<dyn RoleStore>,
    overrides: Arc<dyn PermissionOverrideStore>,
    tenant_configs: Arc<dyn TenantConfigStore>,
    feature_toggles: Arc<dyn FeatureToggleStore>,
    clock: Arc<dyn Clock>,
    default_locale: Locale,
}

impl ClaimEnricher {
    pub fn new(
        memberships: Arc<dyn MembershipStore>,
        roles: Arc<dyn RoleStore>,
        overrides: Arc<dyn PermissionOverrideStore>,
        tenant_configs: Arc<dyn TenantConfigStore>,
        feature_toggles: Arc<dyn FeatureToggleStore>,
    ) -> Self {
        Self {
            memberships,
            roles,
            overrides,
            tenant_configs,
            feature_toggles,
            clock: Arc::new(SystemClock),
            default_locale: default_locale_from_env(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_default_locale(mut self, locale: Locale) -> Self {
        self.default_locale = locale;
        self
    }

    /// Build the token claim for `identity` in the requested tenant context.
    ///
    /// `tenant_id` falls back to the identity's default tenant when absent.
    pub async fn enrich(
        &self,
        identity: &Identity,
        client: &RequestingClient,
        tenant_id: Option<TenantId>,
    ) -> Result<Claim, EnrichmentError> {
        let tenant_id = tenant_id.unwrap_or(identity.default_tenant_id);

        let membership = self
            .memberships
            .find_membership(identity.id, tenant_id)
            .await?
            .ok_or(EnrichmentError::IdentityNotMember)?;

        if !identity.authorized_client_ids.contains(&client.id) {
            return Err(EnrichmentError::ClientNotAuthorized);
        }

        // Role, overrides, toggles and locale have no interdependency once
        // the membership is known; the first failure aborts the join.
        let (role, overrides, disabled, locale) = tokio::try_join!(
            self.roles.find_role(membership.role_id),
            self.overrides.overrides_for_membership(membership.id),
            disabled_features(
                self.feature_toggles.as_ref(),
                membership.tenant_id,
                membership.id,
            ),
            resolve_locale(&membership, self.tenant_configs.as_ref(), &self.default_locale),
        )?;

        let Some(role) = role else {
            tracing::error!(
                role_id = %membership.role_id,
                membership_id = %membership.id,
                "membership references a role that does not exist"
            );
            return Err(EnrichmentError::RoleNotResolvable(membership.role_id));
        };

        let permissions = merge_permissions(&role.permissions, &overrides);
        let age = identity.dob.map(|dob| age_on(dob, self.clock.today()));

        Ok(Claim {
            id: identity.id,
            username: identity.username.clone(),
            email: identity.email.clone(),
            first_name: identity.first_name.clone(),
            last_name: identity.last_name.clone(),
            phone: identity.phone.clone(),
            default_tenant_id: identity.default_tenant_id,
            dob: identity.dob,
            user_preferences: UserPreferences { locale },
            tenant_id: membership.tenant_id,
            membership_id: membership.id,
            status: membership.status,
            permissions,
            role: role.name,
            age,
            disabled_features: disabled.into_iter().collect(),
        })
    }
}
