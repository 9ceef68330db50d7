use shared_types::{committee_key, AssociationDisposition};
use std::collections::HashSet;

/// Delete the source membership when the target already belongs to the club.
pub fn classify_club_contact(club_id: i64, target_club_ids: &HashSet<i64>) -> AssociationDisposition {
    if target_club_ids.contains(&club_id) {
        AssociationDisposition::Delete
    } else {
        AssociationDisposition::Reassign
    }
}

/// Delete the source seat when the target already holds `role` at `home_club_id`.
/// `target_keys` holds `role|homeClubId` keys.
pub fn classify_committee(
    role: &str,
    home_club_id: i64,
    target_keys: &HashSet<String>,
) -> AssociationDisposition {
    if target_keys.contains(&committee_key(role, home_club_id)) {
        AssociationDisposition::Delete
    } else {
        AssociationDisposition::Reassign
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_club_conflict_deletes() {
        let target = HashSet::from([3, 7]);
        assert_eq!(classify_club_contact(7, &target), AssociationDisposition::Delete);
        assert_eq!(classify_club_contact(8, &target), AssociationDisposition::Reassign);
    }

    #[test]
    fn test_empty_target_always_reassigns() {
        assert_eq!(
            classify_club_contact(1, &HashSet::new()),
            AssociationDisposition::Reassign
        );
        assert_eq!(
            classify_committee("Chair", 1, &HashSet::new()),
            AssociationDisposition::Reassign
        );
    }

    #[test]
    fn test_committee_needs_same_role_and_club() {
        let target = HashSet::from([committee_key("Treasurer", 4)]);

        assert_eq!(
            classify_committee("Treasurer", 4, &target),
            AssociationDisposition::Delete
        );
        assert_eq!(
            classify_committee("Treasurer", 5, &target),
            AssociationDisposition::Reassign
        );
        assert_eq!(
            classify_committee("Secretary", 4, &target),
            AssociationDisposition::Reassign
        );
    }
}
