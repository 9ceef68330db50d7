//! Contact Dedup Crate
//!
//! Finds contacts that likely describe the same person and plans how to fold
//! them into one surviving record. Everything here is pure: callers supply
//! snapshots from the record store and apply the resulting plan themselves.
//!
//! # Architecture
//!
//! - **Types**: `Contact`, `DuplicateGroup`, `MergePlan` and friends live in
//!   the `shared-types` crate
//! - **Detection**: `matching` clusters contacts by name, email and phone
//!   using a union-find forest; `confidence` labels each cluster
//! - **Planning**: `merge_fields` back-fills empty target fields,
//!   `associations` decides whether each club or committee row moves or is
//!   dropped, and `plan` combines both behind a validated `MergeRequest`
//!
//! # Example
//!
//! ```rust,ignore
//! use contact_dedup::{build_merge_plan, detect_duplicates, MergeRequest};
//!
//! let groups = detect_duplicates(&contacts);
//! let request = MergeRequest::new(target_id, source_ids)?;
//! let plan = build_merge_plan(&request, &snapshot)?;
//! ```

pub mod associations;
pub mod confidence;
pub mod error;
pub mod matching;
pub mod merge_fields;
pub mod normalize;
pub mod plan;
pub mod union_find;

pub use associations::{classify_club_contact, classify_committee};
pub use confidence::classify_confidence;
pub use error::PlanError;
pub use matching::detect_duplicates;
pub use merge_fields::build_merge_field_updates;
pub use normalize::shares_name_part;
pub use plan::{build_merge_plan, MergeRequest, MergeSnapshot};
pub use union_find::UnionFind;

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{Contact, MatchConfidence, MergeField};

    #[test]
    fn test_detect_then_plan() {
        let mut first = Contact::named(1, "John", "Doe");
        first.phone = Some("612-555-0101".to_string());
        let mut second = Contact::named(2, "John", "Doe");
        second.email = Some("jd@x.com".to_string());
        let mut third = Contact::named(3, "Jane", "Doe");
        third.email = Some("jd@x.com".to_string());
        third.city = Some("Mankato".to_string());

        let contacts = vec![first, second, third];
        let groups = detect_duplicates(&contacts);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].confidence, MatchConfidence::High);

        let group = &groups[0];
        let target = group.contacts[0].clone();
        let sources: Vec<Contact> = group.contacts[1..].to_vec();
        let request =
            MergeRequest::new(target.id, sources.iter().map(|c| c.id).collect()).unwrap();
        let snapshot = MergeSnapshot {
            target_associations: shared_types::ContactAssociations::empty(target.id),
            source_associations: sources
                .iter()
                .map(|c| shared_types::ContactAssociations::empty(c.id))
                .collect(),
            target,
            sources,
        };

        let plan = build_merge_plan(&request, &snapshot).unwrap();
        assert_eq!(plan.source_ids, vec![2, 3]);
        assert_eq!(plan.field_updates.get(MergeField::Email), Some("jd@x.com"));
        assert_eq!(plan.field_updates.get(MergeField::City), Some("Mankato"));
        assert!(!plan.field_updates.contains(MergeField::Phone));

        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["field_updates"]["fields"]["email"], "jd@x.com");
    }
}
