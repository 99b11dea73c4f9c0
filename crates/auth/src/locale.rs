use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use claimforge_core::TenantId;

use crate::TenantMembership;
use crate::stores::{StoreError, TenantConfigStore};

/// Locale tag (e.g. "en", "fr", "de-CH").
///
/// Opaque at this layer; validation against a locale registry is the
/// consumer's concern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locale(Cow<'static, str>);

impl Locale {
    pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl core::fmt::Display for Locale {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self(Cow::Borrowed("en"))
    }
}

/// Process-wide default locale, from the `LOCALE` environment variable.
///
/// Falls back to `"en"` when unset or blank.
pub fn default_locale_from_env() -> Locale {
    match std::env::var("LOCALE") {
        Ok(tag) if !tag.trim().is_empty() => Locale::new(tag),
        _ => Locale::default(),
    }
}

/// Keys under which per-tenant configuration entries are stored.
///
/// Only `Profile` is consulted by this crate.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfigKey {
    Profile,
}

/// A keyed configuration entry for a tenant.
///
/// The value shape is owned by whoever writes the entry; this crate only
/// reads the `locale` field out of the `Profile` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantConfig {
    pub tenant_id: TenantId,
    pub config_key: ConfigKey,
    pub config_value: JsonValue,
}

/// Resolve the effective locale for a membership.
///
/// Precedence, first match wins:
/// 1. the membership's own locale preference, when non-empty
/// 2. the `locale` field of the tenant's `Profile` configuration entry
/// 3. the supplied process default
///
/// The tenant config lookup is issued only when tier 1 misses. A missing or
/// unusable `Profile` entry degrades to the default; only a failing store
/// lookup is an error.
pub async fn resolve_locale(
    membership: &TenantMembership,
    config_store: &dyn TenantConfigStore,
    default_locale: &Locale,
) -> Result<Locale, StoreError> {
    if let Some(locale) = &membership.locale {
        if !locale.is_empty() {
            return Ok(locale.clone());
        }
    }

    let config = config_store
        .find_config(membership.tenant_id, ConfigKey::Profile)
        .await?;

    Ok(config
        .and_then(|c| profile_locale(&c.config_value))
        .unwrap_or_else(|| default_locale.clone()))
}

/// Extract a usable locale from a `Profile` config value.
fn profile_locale(value: &JsonValue) -> Option<Locale> {
    value
        .get("locale")
        .and_then(JsonValue::as_str)
        .filter(|tag| !tag.trim().is_empty())
        .map(|tag| Locale::new(tag.to_string()))
}
