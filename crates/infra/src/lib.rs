//! Infrastructure layer: store implementations backing the enrichment engine.
//!
//! Production deployments wire real databases behind the store traits; this
//! crate ships the in-memory implementations used by tests and local dev.

pub mod stores;


pub use stores::in_memory::{
    InMemoryFeatureToggleStore, InMemoryMembershipStore, InMemoryPermissionOverrideStore,
    InMemoryRoleStore, InMemoryTenantConfigStore,
};
