use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

use crate::Contact;

/// Scalar contact fields a merge may back-fill on the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum MergeField {
    Phone,
    AltPhone,
    Email,
    Address,
    City,
    State,
    Zip,
    Notes,
}

impl MergeField {
    pub const ALL: [MergeField; 8] = [
        MergeField::Phone,
        MergeField::AltPhone,
        MergeField::Email,
        MergeField::Address,
        MergeField::City,
        MergeField::State,
        MergeField::Zip,
        MergeField::Notes,
    ];

    /// Column name in the `contacts` table.
    pub fn column(&self) -> &'static str {
        match self {
            MergeField::Phone => "phone",
            MergeField::AltPhone => "alt_phone",
            MergeField::Email => "email",
            MergeField::Address => "address",
            MergeField::City => "city",
            MergeField::State => "state",
            MergeField::Zip => "zip",
            MergeField::Notes => "notes",
        }
    }

    pub fn value<'a>(&self, contact: &'a Contact) -> &'a Option<String> {
        match self {
            MergeField::Phone => &contact.phone,
            MergeField::AltPhone => &contact.alt_phone,
            MergeField::Email => &contact.email,
            MergeField::Address => &contact.address,
            MergeField::City => &contact.city,
            MergeField::State => &contact.state,
            MergeField::Zip => &contact.zip,
            MergeField::Notes => &contact.notes,
        }
    }
}

/// Values to write onto the merge target. Only holds fields the target is
/// missing; an absent field means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MergeFieldUpdate {
    pub fields: BTreeMap<MergeField, String>,
}

impl MergeFieldUpdate {
    pub fn get(&self, field: MergeField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: MergeField) -> bool {
        self.fields.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MergeField, &str)> {
        self.fields.iter().map(|(field, value)| (*field, value.as_str()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum AssociationDisposition {
    /// Point the row at the merge target.
    Reassign,
    /// The target already has this association; drop the source row.
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ClubDisposition {
    pub club_contact_id: i64,
    pub source_contact_id: i64,
    pub club_id: i64,
    pub disposition: AssociationDisposition,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CommitteeDisposition {
    pub committee_member_id: i64,
    pub source_contact_id: i64,
    pub role: String,
    pub home_club_id: i64,
    pub disposition: AssociationDisposition,
}

/// Everything needed to fold `source_ids` into `target_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MergePlan {
    pub target_id: i64,
    pub source_ids: Vec<i64>,
    pub field_updates: MergeFieldUpdate,
    pub clubs: Vec<ClubDisposition>,
    pub committees: Vec<CommitteeDisposition>,
}

impl MergePlan {
    pub fn count(&self, disposition: AssociationDisposition) -> usize {
        let clubs = self.clubs.iter().filter(|c| c.disposition == disposition).count();
        let committees = self
            .committees
            .iter()
            .filter(|c| c.disposition == disposition)
            .count();
        clubs + committees
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, TS)]
#[ts(export)]
pub struct MergeContactsRequest {
    pub target_id: i64,
    pub source_ids: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MergeSummary {
    pub target_id: i64,
    pub merged_source_ids: Vec<i64>,
    pub fields_updated: Vec<MergeField>,
    pub associations_reassigned: usize,
    pub associations_deleted: usize,
}

/// Audit row written for every source absorbed by a merge.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MergeHistoryEntry {
    pub id: i64,
    pub target_id: i64,
    pub source_id: i64,
    pub source_snapshot: String,
    pub merged_at: i64,
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MergeHistoryResponse {
    pub entries: Vec<MergeHistoryEntry>,
}
