use crate::core::filters::matches_rule;
use crate::models::{MatchResult, RuleRecord, UserProfile};

/// Collect every scheme the profile is eligible for.
///
/// Rules are evaluated in table order and none are skipped once a match is
/// found, so schemes from several matching rows accumulate in row order and
/// then in the order listed within each row. Duplicates are preserved.
pub fn match_schemes(rules: &[RuleRecord], profile: &UserProfile) -> MatchResult {
    let schemes = rules
        .iter()
        .filter(|rule| matches_rule(rule, profile))
        .flat_map(|rule| rule.eligible_schemes.iter().cloned())
        .collect();

    MatchResult { schemes }
}
