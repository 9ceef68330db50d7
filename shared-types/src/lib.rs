use serde::{Deserialize, Serialize};

pub mod association;
pub mod contact;
pub mod duplicate;
pub mod merge;

pub use association::{committee_key, Club, ClubContact, CommitteeMember, ContactAssociations};
pub use contact::{has_value, Contact, ContactsResponse, CreateContactRequest};
pub use duplicate::{DuplicateGroup, DuplicateGroupsResponse, MatchConfidence, MatchType};
pub use merge::{
    AssociationDisposition, ClubDisposition, CommitteeDisposition, MergeContactsRequest,
    MergeField, MergeFieldUpdate, MergeHistoryEntry, MergeHistoryResponse, MergePlan,
    MergeSummary,
};

/// Error response for API endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_serialization() {
        let json = serde_json::to_string(&MatchConfidence::High).unwrap();
        assert_eq!(json, "\"high\"");

        let deserialized: MatchConfidence = serde_json::from_str("\"low\"").unwrap();
        assert_eq!(deserialized, MatchConfidence::Low);
    }

    #[test]
    fn test_high_confidence_orders_first() {
        assert!(MatchConfidence::High < MatchConfidence::Low);
    }

    #[test]
    fn test_merge_field_update_serializes_as_field_map() {
        let mut update = MergeFieldUpdate::default();
        update
            .fields
            .insert(MergeField::AltPhone, "555-0100".to_string());

        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["fields"]["alt_phone"], "555-0100");
    }

    #[test]
    fn test_committee_key_format() {
        assert_eq!(committee_key("Treasurer", 7), "Treasurer|7");

        let seat = CommitteeMember {
            id: 1,
            contact_id: 2,
            role: "Secretary".to_string(),
            home_club_id: 3,
        };
        assert_eq!(seat.identity(), "Secretary|3");
    }

    #[test]
    fn test_has_value_treats_blank_as_missing() {
        assert!(!has_value(&None));
        assert!(!has_value(&Some(String::new())));
        assert!(!has_value(&Some("   ".to_string())));
        assert!(has_value(&Some("x".to_string())));
    }

    #[test]
    fn test_disposition_counts() {
        let plan = MergePlan {
            target_id: 1,
            source_ids: vec![2],
            field_updates: MergeFieldUpdate::default(),
            clubs: vec![
                ClubDisposition {
                    club_contact_id: 10,
                    source_contact_id: 2,
                    club_id: 5,
                    disposition: AssociationDisposition::Reassign,
                },
                ClubDisposition {
                    club_contact_id: 11,
                    source_contact_id: 2,
                    club_id: 6,
                    disposition: AssociationDisposition::Delete,
                },
            ],
            committees: vec![CommitteeDisposition {
                committee_member_id: 20,
                source_contact_id: 2,
                role: "Chair".to_string(),
                home_club_id: 5,
                disposition: AssociationDisposition::Delete,
            }],
        };

        assert_eq!(plan.count(AssociationDisposition::Reassign), 1);
        assert_eq!(plan.count(AssociationDisposition::Delete), 2);
    }
}
