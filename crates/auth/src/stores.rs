//! Capability traits the enrichment engine consumes.
//!
//! All inputs are fetched per call and treated as immutable snapshots; the
//! traits therefore expose read-only lookups. Implementations must not retry
//! internally — transient failures surface as [`StoreError`] and the caller
//! owns retry policy. Cancellation propagates by dropping the futures.

use async_trait::async_trait;
use thiserror::Error;

use claimforge_core::{IdentityId, MembershipId, RoleId, TenantId};

use crate::{
    ConfigKey, FeatureToggle, PermissionOverride, Role, TenantConfig, TenantMembership,
};

/// Store lookup error.
///
/// These are infrastructure failures (connectivity, timeouts, poisoned
/// state). "Not found" is not an error at this layer — lookups return
/// `Option` or an empty list instead.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Lookup of identity-tenant memberships.
#[async_trait]
pub trait MembershipStore: Send + Sync {
    /// Find the membership for `(identity_id, tenant_id)`.
    ///
    /// Implementations must keep at most one membership per pair; the
    /// enricher treats whatever comes back as authoritative.
    async fn find_membership(
        &self,
        identity_id: IdentityId,
        tenant_id: TenantId,
    ) -> Result<Option<TenantMembership>, StoreError>;
}

/// Lookup of role records.
#[async_trait]
pub trait RoleStore: Send + Sync {
    async fn find_role(&self, role_id: RoleId) -> Result<Option<Role>, StoreError>;
}

/// Lookup of user-level permission overrides.
#[async_trait]
pub trait PermissionOverrideStore: Send + Sync {
    /// List the overrides for a membership.
    ///
    /// The order must be stable across calls (retrieval order); merge
    /// semantics are last-seen-wins, so ordering decides conflicts.
    async fn overrides_for_membership(
        &self,
        membership_id: MembershipId,
    ) -> Result<Vec<PermissionOverride>, StoreError>;
}

/// Lookup of keyed per-tenant configuration entries.
#[async_trait]
pub trait TenantConfigStore: Send + Sync {
    async fn find_config(
        &self,
        tenant_id: TenantId,
        key: ConfigKey,
    ) -> Result<Option<TenantConfig>, StoreError>;
}

/// Query of feature toggles by scope.
#[async_trait]
pub trait FeatureToggleStore: Send + Sync {
    /// All toggles with disabled status whose scope matches the system
    /// sentinel, this tenant, or this membership.
    async fn disabled_in_scopes(
        &self,
        tenant_id: TenantId,
        membership_id: MembershipId,
    ) -> Result<Vec<FeatureToggle>, StoreError>;
}
