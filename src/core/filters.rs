use crate::models::{RuleRecord, UserProfile};

/// Case-insensitive comparison of two category labels
#[inline]
pub fn same_category(rule_value: &str, profile_value: &str) -> bool {
    rule_value == profile_value || rule_value.to_lowercase() == profile_value.to_lowercase()
}

/// Check whether a profile satisfies every condition of a single rule
#[inline]
pub fn matches_rule(rule: &RuleRecord, profile: &UserProfile) -> bool {
    // Check age range
    if !rule.age_range.contains(profile.age) {
        return false;
    }

    // Check categorical fields
    same_category(&rule.income_range, &profile.income)
        && same_category(&rule.employment_status, &profile.employment_status)
        && same_category(&rule.residency, &profile.residency)
}
