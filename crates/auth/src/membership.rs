use serde::{Deserialize, Serialize};

use claimforge_core::{IdentityId, MembershipId, RoleId, TenantId};

use crate::Locale;

/// Lifecycle status of a tenant membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MembershipStatus {
    /// Membership created, identity has not completed onboarding.
    Registered,
    /// Membership is active and can be enriched into tokens.
    #[default]
    Active,
    /// Membership has been deactivated.
    Inactive,
}

impl core::fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MembershipStatus::Registered => write!(f, "Registered"),
            MembershipStatus::Active => write!(f, "Active"),
            MembershipStatus::Inactive => write!(f, "Inactive"),
        }
    }
}

/// An identity's membership in a tenant.
///
/// This is the pivot record of enrichment: it names the tenant the claim is
/// scoped to, the role supplying baseline permissions, and an optional locale
/// preference. At most one membership exists per (identity, tenant) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantMembership {
    pub id: MembershipId,
    pub identity_id: IdentityId,
    pub tenant_id: TenantId,
    pub role_id: RoleId,
    pub status: MembershipStatus,

    /// Per-membership locale preference; first tier of locale resolution.
    pub locale: Option<Locale>,
}
