use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use claimforge_core::{ClientId, IdentityId, TenantId};

/// Audit metadata carried on identity records.
///
/// These fields are bookkeeping owned by the identity store. They must never
/// leave this crate inside an issued claim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditMeta {
    pub created_by: Option<IdentityId>,
    pub created_on: Option<DateTime<Utc>>,
    pub modified_by: Option<IdentityId>,
    pub modified_on: Option<DateTime<Utc>>,
    pub deleted: bool,
    pub deleted_by: Option<IdentityId>,
    pub deleted_on: Option<DateTime<Utc>>,
}

/// An authenticated identity record (read-only to this crate).
///
/// Authentication has already happened by the time this object reaches the
/// enricher; this is the snapshot the identity store returned for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: IdentityId,

    /// Tenant used when the caller does not request a specific one.
    pub default_tenant_id: TenantId,

    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub phone: Option<String>,

    /// Date of birth, when the identity provided one. Drives the derived
    /// `age` claim field.
    pub dob: Option<NaiveDate>,

    /// Clients allowed to request tokens for this identity. Checked during
    /// enrichment; never emitted in the claim.
    pub authorized_client_ids: Vec<ClientId>,

    /// Credential material from an external IdP; stripped from every claim.
    pub external_auth_token: Option<String>,
    pub external_refresh_token: Option<String>,

    pub audit: AuditMeta,
}

/// Descriptor of the client application requesting the token.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestingClient {
    pub id: ClientId,
}
