use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::Contact;

/// Matching rule that linked two contacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Name,
    Email,
    Phone,
}

impl MatchType {
    pub fn label(&self) -> &'static str {
        match self {
            MatchType::Name => "Name",
            MatchType::Email => "Email",
            MatchType::Phone => "Phone",
        }
    }
}

/// Declaration order doubles as sort order: `High` sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum MatchConfidence {
    High,
    Low,
}

/// Candidate set of records describing the same person. Computed per
/// detection run, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DuplicateGroup {
    pub id: String,
    pub contacts: Vec<Contact>,
    pub confidence: MatchConfidence,
    pub match_types: Vec<MatchType>,
    pub match_reasons: Vec<String>,
}

impl DuplicateGroup {
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn contact_ids(&self) -> Vec<i64> {
        self.contacts.iter().map(|c| c.id).collect()
    }
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DuplicateGroupsResponse {
    pub groups: Vec<DuplicateGroup>,
    pub total_contacts: usize,
}
