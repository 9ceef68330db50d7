use shared_types::{MatchConfidence, MatchType};
use std::collections::BTreeSet;

/// High when an email or phone link contributed anywhere in the group.
/// Name collisions alone are too common to be trusted.
pub fn classify_confidence(match_types: &BTreeSet<MatchType>) -> MatchConfidence {
    if match_types.contains(&MatchType::Email) || match_types.contains(&MatchType::Phone) {
        MatchConfidence::High
    } else {
        MatchConfidence::Low
    }
}
