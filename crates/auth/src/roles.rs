use serde::{Deserialize, Serialize};

use claimforge_core::RoleId;

use crate::Permission;

/// A named bundle of baseline permissions.
///
/// Roles are immutable for the duration of an enrichment call; user-level
/// overrides are layered on top of the baseline, never written back into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,

    /// Display name, attached to the claim as the `role` field.
    pub name: String,

    pub permissions: Vec<Permission>,
}
