//! In-memory store implementations.
//!
//! Intended for tests/dev. Not optimized for performance. Poisoned locks are
//! reported as [`StoreError::Unavailable`] like any other backend outage.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use claimforge_auth::{
    ConfigKey, FeatureToggle, FeatureToggleStore, MembershipStore, PermissionOverride,
    PermissionOverrideStore, Role, RoleStore, StoreError, TenantConfig, TenantConfigStore,
    TenantMembership,
};
use claimforge_core::{IdentityId, MembershipId, RoleId, TenantId};

fn poisoned() -> StoreError {
    StoreError::Unavailable("lock poisoned".to_string())
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
struct MembershipKey {
    identity_id: IdentityId,
    tenant_id: TenantId,
}

/// In-memory membership store keyed by (identity, tenant).
///
/// Inserting a membership for an existing pair replaces it, which keeps the
/// one-membership-per-pair contract trivially true.
#[derive(Debug, Default)]
pub struct InMemoryMembershipStore {
    memberships: RwLock<HashMap<MembershipKey, TenantMembership>>,
}

impl InMemoryMembershipStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, membership: TenantMembership) {
        let key = MembershipKey {
            identity_id: membership.identity_id,
            tenant_id: membership.tenant_id,
        };
        if let Ok(mut memberships) = self.memberships.write() {
            memberships.insert(key, membership);
        }
    }
}

#[async_trait]
impl MembershipStore for InMemoryMembershipStore {
    async fn find_membership(
        &self,
        identity_id: IdentityId,
        tenant_id: TenantId,
    ) -> Result<Option<TenantMembership>, StoreError> {
        let key = MembershipKey {
            identity_id,
            tenant_id,
        };
        let memberships = self.memberships.read().map_err(|_| poisoned())?;
        Ok(memberships.get(&key).cloned())
    }
}

/// In-memory role store keyed by role id.
#[derive(Debug, Default)]
pub struct InMemoryRoleStore {
    roles: RwLock<HashMap<RoleId, Role>>,
}

impl InMemoryRoleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, role: Role) {
        if let Ok(mut roles) = self.roles.write() {
            roles.insert(role.id, role);
        }
    }
}

#[async_trait]
impl RoleStore for InMemoryRoleStore {
    async fn find_role(&self, role_id: RoleId) -> Result<Option<Role>, StoreError> {
        let roles = self.roles.read().map_err(|_| poisoned())?;
        Ok(roles.get(&role_id).cloned())
    }
}

/// In-memory permission override store.
///
/// Overrides are returned in insertion order, which is the stable retrieval
/// order the merge contract depends on.
#[derive(Debug, Default)]
pub struct InMemoryPermissionOverrideStore {
    overrides: RwLock<HashMap<MembershipId, Vec<PermissionOverride>>>,
}

impl InMemoryPermissionOverrideStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, r#override: PermissionOverride) {
        if let Ok(mut overrides) = self.overrides.write() {
            overrides
                .entry(r#override.membership_id)
                .or_default()
                .push(r#override);
        }
    }
}

#[async_trait]
impl PermissionOverrideStore for InMemoryPermissionOverrideStore {
    async fn overrides_for_membership(
        &self,
        membership_id: MembershipId,
    ) -> Result<Vec<PermissionOverride>, StoreError> {
        let overrides = self.overrides.read().map_err(|_| poisoned())?;
        Ok(overrides.get(&membership_id).cloned().unwrap_or_default())
    }
}

/// In-memory tenant config store keyed by (tenant, config key).
#[derive(Debug, Default)]
pub struct InMemoryTenantConfigStore {
    configs: RwLock<HashMap<(TenantId, ConfigKey), TenantConfig>>,
}

impl InMemoryTenantConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, config: TenantConfig) {
        if let Ok(mut configs) = self.configs.write() {
            configs.insert((config.tenant_id, config.config_key), config);
        }
    }
}

#[async_trait]
impl TenantConfigStore for InMemoryTenantConfigStore {
    async fn find_config(
        &self,
        tenant_id: TenantId,
        key: ConfigKey,
    ) -> Result<Option<TenantConfig>, StoreError> {
        let configs = self.configs.read().map_err(|_| poisoned())?;
        Ok(configs.get(&(tenant_id, key)).cloned())
    }
}

/// In-memory feature toggle store.
#[derive(Debug, Default)]
pub struct InMemoryFeatureToggleStore {
    toggles: RwLock<Vec<FeatureToggle>>,
}

impl InMemoryFeatureToggleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, toggle: FeatureToggle) {
        if let Ok(mut toggles) = self.toggles.write() {
            toggles.push(toggle);
        }
    }
}

#[async_trait]
impl FeatureToggleStore for InMemoryFeatureToggleStore {
    async fn disabled_in_scopes(
        &self,
        tenant_id: TenantId,
        membership_id: MembershipId,
    ) -> Result<Vec<FeatureToggle>, StoreError> {
        let toggles = self.toggles.read().map_err(|_| poisoned())?;
        Ok(toggles
            .iter()
            .filter(|t| t.is_disabled() && t.scope.applies_to(tenant_id, membership_id))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use claimforge_auth::ToggleScope;

    use super::*;

    #[tokio::test]
    async fn membership_insert_replaces_existing_pair() {
        let store = InMemoryMembershipStore::new();
        let identity_id = IdentityId::new();
        let tenant_id = TenantId::new();

        let first = TenantMembership {
            id: MembershipId::new(),
            identity_id,
            tenant_id,
            role_id: RoleId::new(),
            status: claimforge_auth::MembershipStatus::Registered,
            locale: None,
        };
        let second = TenantMembership {
            status: claimforge_auth::MembershipStatus::Active,
            ..first.clone()
        };
        store.insert(first);
        store.insert(second.clone());

        let found = store
            .find_membership(identity_id, tenant_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found, second);
    }

    #[tokio::test]
    async fn toggle_query_excludes_enabled_and_foreign_scopes() {
        let store = InMemoryFeatureToggleStore::new();
        let tenant_id = TenantId::new();
        let membership_id = MembershipId::new();

        store.insert(FeatureToggle {
            feature_key: "system_off".to_string(),
            status: false,
            scope: ToggleScope::System,
        });
        store.insert(FeatureToggle {
            feature_key: "tenant_off".to_string(),
            status: false,
            scope: ToggleScope::Tenant(tenant_id),
        });
        store.insert(FeatureToggle {
            feature_key: "other_tenant_off".to_string(),
            status: false,
            scope: ToggleScope::Tenant(TenantId::new()),
        });
        store.insert(FeatureToggle {
            feature_key: "membership_on".to_string(),
            status: true,
            scope: ToggleScope::Membership(membership_id),
        });

        let found = store
            .disabled_in_scopes(tenant_id, membership_id)
            .await
            .unwrap();
        let keys: Vec<&str> = found.iter().map(|t| t.feature_key.as_str()).collect();

        assert_eq!(keys, vec!["system_off", "tenant_off"]);
    }

    #[tokio::test]
    async fn overrides_keep_insertion_order() {
        let store = InMemoryPermissionOverrideStore::new();
        let membership_id = MembershipId::new();

        for (perm, allowed) in [("a", true), ("a", false), ("b", true)] {
            store.insert(PermissionOverride {
                membership_id,
                permission: claimforge_auth::Permission::new(perm),
                allowed,
            });
        }

        let overrides = store.overrides_for_membership(membership_id).await.unwrap();
        let order: Vec<(&str, bool)> = overrides
            .iter()
            .map(|o| (o.permission.as_str(), o.allowed))
            .collect();

        assert_eq!(order, vec![("a", true), ("a", false), ("b", true)]);
    }
}
