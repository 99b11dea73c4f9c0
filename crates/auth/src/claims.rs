use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use claimforge_core::{IdentityId, MembershipId, TenantId};

use crate::{Locale, MembershipStatus, Permission};

/// Per-user preference block embedded in the claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub locale: Locale,
}

/// The enriched fact set embedded in an issued session token.
///
/// Built fresh per enrichment call and handed to the token issuer; never
/// persisted. Credential and audit internals from the identity record are
/// deliberately not representable here, so they cannot leak into a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub id: IdentityId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub default_tenant_id: TenantId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dob: Option<NaiveDate>,

    pub user_preferences: UserPreferences,

    /// Tenant the token is scoped to.
    pub tenant_id: TenantId,
    pub membership_id: MembershipId,
    pub status: MembershipStatus,

    /// Merged role baseline + user-level overrides, deduplicated and sorted.
    pub permissions: Vec<Permission>,

    /// Display name of the membership's role.
    pub role: String,

    /// Whole years of age; omitted when the identity has no date of birth.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,

    /// Feature keys disabled for this identity/tenant. Always present,
    /// possibly empty.
    pub disabled_features: Vec<String>,
}

/// Age in whole years at `today` (floor of elapsed years).
///
/// The year difference is decremented when the birthday has not yet been
/// reached this year. A Feb 29 birth date counts its birthday as Mar 1 in
/// non-leap years.
pub fn age_on(dob: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn age_is_exact_on_the_birthday() {
        assert_eq!(age_on(date(1990, 6, 15), date(2020, 6, 15)), 30);
    }

    #[test]
    fn age_is_one_less_the_day_before() {
        assert_eq!(age_on(date(1990, 6, 15), date(2020, 6, 14)), 29);
    }

    #[test]
    fn age_counts_later_month_in_year() {
        assert_eq!(age_on(date(1990, 1, 2), date(2020, 11, 1)), 30);
    }

    #[test]
    fn leap_day_birthday_rolls_on_march_first() {
        assert_eq!(age_on(date(2000, 2, 29), date(2021, 2, 28)), 20);
        assert_eq!(age_on(date(2000, 2, 29), date(2021, 3, 1)), 21);
    }

    #[test]
    fn claim_serialization_omits_absent_age_and_keeps_empty_features() {
        let claim = Claim {
            id: IdentityId::new(),
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
            first_name: "Ada".to_string(),
            last_name: None,
            phone: None,
            default_tenant_id: TenantId::new(),
            dob: None,
            user_preferences: UserPreferences {
                locale: Locale::default(),
            },
            tenant_id: TenantId::new(),
            membership_id: MembershipId::new(),
            status: MembershipStatus::Active,
            permissions: vec![Permission::new("profile.read")],
            role: "Member".to_string(),
            age: None,
            disabled_features: Vec::new(),
        };

        let json = serde_json::to_value(&claim).unwrap();

        assert!(json.get("age").is_none());
        assert_eq!(json["disabled_features"], serde_json::json!([]));
        assert_eq!(json["user_preferences"]["locale"], "en");
    }
}
