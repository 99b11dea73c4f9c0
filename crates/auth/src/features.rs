use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use claimforge_core::{MembershipId, TenantId};

use crate::stores::{FeatureToggleStore, StoreError};

/// Scope at which a feature toggle applies.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToggleScope {
    /// Applies to every tenant and membership.
    System,
    /// Applies to one tenant (all of its memberships).
    Tenant(TenantId),
    /// Applies to a single membership.
    Membership(MembershipId),
}

impl ToggleScope {
    /// Whether this scope covers the given tenant/membership pair.
    pub fn applies_to(&self, tenant_id: TenantId, membership_id: MembershipId) -> bool {
        match self {
            ToggleScope::System => true,
            ToggleScope::Tenant(t) => *t == tenant_id,
            ToggleScope::Membership(m) => *m == membership_id,
        }
    }
}

/// A feature flag record.
///
/// Toggles have no ownership relation to identities; they match purely by
/// scope. How a disabled feature gates behavior is decided by consumers of
/// the claim, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureToggle {
    pub feature_key: String,

    /// `false` disables the feature for everything the scope covers.
    pub status: bool,

    pub scope: ToggleScope,
}

impl FeatureToggle {
    pub fn is_disabled(&self) -> bool {
        !self.status
    }
}

/// Collect the feature keys disabled for a tenant/membership pair.
///
/// A key is reported when any matching scope (system, tenant, membership)
/// disables it; there is no precedence between scopes, and a key disabled at
/// several scopes appears once. The result is always a set, possibly empty.
pub async fn disabled_features(
    store: &dyn FeatureToggleStore,
    tenant_id: TenantId,
    membership_id: MembershipId,
) -> Result<BTreeSet<String>, StoreError> {
    let toggles = store.disabled_in_scopes(tenant_id, membership_id).await?;

    Ok(toggles.into_iter().map(|t| t.feature_key).collect())
}
