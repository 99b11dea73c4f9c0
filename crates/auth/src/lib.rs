//! `claimforge-auth` — token claim enrichment engine (transport-agnostic).
//!
//! This crate is intentionally decoupled from HTTP and storage: backing
//! stores are capability traits supplied by the caller, and token signing
//! happens outside this crate.

pub mod claims;
pub mod clock;
pub mod enrich;
pub mod features;
pub mod identity;
pub mod locale;
pub mod membership;
pub mod permissions;
pub mod roles;
pub mod stores;

pub use claims::{Claim, UserPreferences, age_on};
pub use clock::{Clock, SystemClock};
pub use enrich::{ClaimEnricher, EnrichmentError, ErrorKind};
pub use features::{FeatureToggle, ToggleScope, disabled_features};
pub use identity::{AuditMeta, Identity, RequestingClient};
pub use locale::{ConfigKey, Locale, TenantConfig, default_locale_from_env, resolve_locale};
pub use membership::{MembershipStatus, TenantMembership};
pub use permissions::{Permission, PermissionOverride, merge_permissions};
pub use roles::Role;
pub use stores::{
    FeatureToggleStore, MembershipStore, PermissionOverrideStore, RoleStore, StoreError,
    TenantConfigStore,
};
