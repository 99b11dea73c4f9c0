use std::borrow::Cow;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use claimforge_core::MembershipId;

/// Permission identifier.
///
/// Permissions are modeled as opaque strings (e.g. "invoice.read"). Mapping
/// them onto enforcement points is the consumer's concern; this crate only
/// computes which ones an identity effectively holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A user-level grant or revocation layered on top of a role baseline.
///
/// Scoped to a membership, not an identity: the same person can hold
/// different overrides in different tenants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionOverride {
    pub membership_id: MembershipId,
    pub permission: Permission,

    /// `true` grants the permission, `false` revokes it from the baseline.
    pub allowed: bool,
}

/// Merge a role's baseline permissions with user-level overrides.
///
/// Overrides apply in slice order: `allowed = true` inserts, `allowed =
/// false` removes, so when the same permission appears more than once the
/// later override wins. Callers must supply overrides in their stable
/// retrieval order. The result is deduplicated and sorted.
pub fn merge_permissions(
    baseline: &[Permission],
    overrides: &[PermissionOverride],
) -> Vec<Permission> {
    let mut effective: BTreeSet<&str> = baseline.iter().map(Permission::as_str).collect();

    for o in overrides {
        if o.allowed {
            effective.insert(o.permission.as_str());
        } else {
            effective.remove(o.permission.as_str());
        }
    }

    effective
        .into_iter()
        .map(|p| Permission::new(p.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perms(names: &[&'static str]) -> Vec<Permission> {
        names.iter().map(|n| Permission::new(*n)).collect()
    }

    fn grant(name: &'static str) -> PermissionOverride {
        PermissionOverride {
            membership_id: MembershipId::new(),
            permission: Permission::new(name),
            allowed: true,
        }
    }

    fn revoke(name: &'static str) -> PermissionOverride {
        PermissionOverride {
            membership_id: MembershipId::new(),
            permission: Permission::new(name),
            allowed: false,
        }
    }

    #[test]
    fn revoke_and_grant_rewrites_baseline() {
        let merged = merge_permissions(&perms(&["a", "b"]), &[revoke("a"), grant("c")]);

        assert_eq!(merged, perms(&["b", "c"]));
    }

    #[test]
    fn later_override_wins_on_conflict() {
        let merged = merge_permissions(&perms(&["b"]), &[grant("a"), revoke("a")]);

        assert_eq!(merged, perms(&["b"]));
    }

    #[test]
    fn grant_after_revoke_restores_permission() {
        let merged = merge_permissions(&perms(&["a"]), &[revoke("a"), grant("a")]);

        assert_eq!(merged, perms(&["a"]));
    }

    #[test]
    fn no_overrides_returns_sorted_baseline() {
        let merged = merge_permissions(&perms(&["c", "a", "b", "a"]), &[]);

        assert_eq!(merged, perms(&["a", "b", "c"]));
    }

    #[test]
    fn revoking_absent_permission_is_a_noop() {
        let merged = merge_permissions(&perms(&["a"]), &[revoke("z")]);

        assert_eq!(merged, perms(&["a"]));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn override_strategy() -> impl Strategy<Value = (String, bool)> {
            ("[a-e]\\.[a-e]", any::<bool>())
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 1000,
                ..ProptestConfig::default()
            })]

            /// Property: merged output contains no duplicates and is sorted.
            #[test]
            fn merged_output_is_sorted_and_unique(
                baseline in prop::collection::vec("[a-e]\\.[a-e]", 0..12),
                raw_overrides in prop::collection::vec(override_strategy(), 0..12),
            ) {
                let baseline: Vec<Permission> =
                    baseline.into_iter().map(|p| Permission::new(p)).collect();
                let overrides: Vec<PermissionOverride> = raw_overrides
                    .iter()
                    .map(|(p, allowed)| PermissionOverride {
                        membership_id: MembershipId::new(),
                        permission: Permission::new(p.clone()),
                        allowed: *allowed,
                    })
                    .collect();

                let merged = merge_permissions(&baseline, &overrides);

                let as_strs: Vec<&str> = merged.iter().map(Permission::as_str).collect();
                let mut deduped = as_strs.clone();
                deduped.sort();
                deduped.dedup();
                prop_assert_eq!(as_strs, deduped);
            }

            /// Property: for every permission, the last override decides; with
            /// no override, baseline membership decides.
            #[test]
            fn last_override_decides_membership(
                baseline in prop::collection::vec("[a-e]\\.[a-e]", 0..12),
                raw_overrides in prop::collection::vec(override_strategy(), 0..12),
            ) {
                let baseline_perms: Vec<Permission> =
                    baseline.iter().map(|p| Permission::new(p.clone())).collect();
                let overrides: Vec<PermissionOverride> = raw_overrides
                    .iter()
                    .map(|(p, allowed)| PermissionOverride {
                        membership_id: MembershipId::new(),
                        permission: Permission::new(p.clone()),
                        allowed: *allowed,
                    })
                    .collect();

                let merged = merge_permissions(&baseline_perms, &overrides);

                let mut keys: Vec<&String> = baseline.iter().collect();
                keys.extend(raw_overrides.iter().map(|(p, _)| p));
                for key in keys {
                    let expected = match raw_overrides.iter().rev().find(|(p, _)| p == key) {
                        Some((_, allowed)) => *allowed,
                        None => baseline.contains(key),
                    };
                    let present = merged.iter().any(|p| p.as_str() == key);
                    prop_assert_eq!(present, expected, "permission {}", key);
                }
            }
        }
    }
}
