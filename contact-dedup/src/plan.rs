use crate::associations::{classify_club_contact, classify_committee};
use crate::error::PlanError;
use crate::merge_fields::build_merge_field_updates;
use shared_types::{
    AssociationDisposition, ClubDisposition, CommitteeDisposition, Contact, ContactAssociations,
    MergeContactsRequest, MergePlan,
};
use std::collections::HashSet;

/// A target plus at least one distinct source, none equal to the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeRequest {
    target_id: i64,
    source_ids: Vec<i64>,
}

impl MergeRequest {
    pub fn new(target_id: i64, source_ids: Vec<i64>) -> Result<Self, PlanError> {
        if source_ids.is_empty() {
            return Err(PlanError::NoSources);
        }

        let mut seen = HashSet::with_capacity(source_ids.len());
        for &source_id in &source_ids {
            if source_id == target_id {
                return Err(PlanError::TargetInSources(target_id));
            }
            if !seen.insert(source_id) {
                return Err(PlanError::RepeatedSource(source_id));
            }
        }

        Ok(Self {
            target_id,
            source_ids,
        })
    }

    pub fn target_id(&self) -> i64 {
        self.target_id
    }

    pub fn source_ids(&self) -> &[i64] {
        &self.source_ids
    }
}

impl TryFrom<MergeContactsRequest> for MergeRequest {
    type Error = PlanError;

    fn try_from(request: MergeContactsRequest) -> Result<Self, Self::Error> {
        Self::new(request.target_id, request.source_ids)
    }
}

/// Point-in-time view of everything a merge touches. Sources and their
/// associations are in request order.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeSnapshot {
    pub target: Contact,
    pub sources: Vec<Contact>,
    pub target_associations: ContactAssociations,
    pub source_associations: Vec<ContactAssociations>,
}

impl MergeSnapshot {
    fn check(&self, request: &MergeRequest) -> Result<(), PlanError> {
        expect_id(request.target_id, Some(self.target.id))?;
        expect_id(request.target_id, Some(self.target_associations.contact_id))?;

        let sources = request.source_ids.len();
        if self.sources.len() > sources || self.source_associations.len() > sources {
            let extra = self
                .sources
                .get(sources)
                .map(|c| c.id)
                .or_else(|| self.source_associations.get(sources).map(|a| a.contact_id))
                .unwrap_or_default();
            return Err(PlanError::UnexpectedSnapshot(extra));
        }

        for (i, &source_id) in request.source_ids.iter().enumerate() {
            expect_id(source_id, self.sources.get(i).map(|c| c.id))?;
            expect_id(
                source_id,
                self.source_associations.get(i).map(|a| a.contact_id),
            )?;
        }

        Ok(())
    }
}

fn expect_id(expected: i64, actual: Option<i64>) -> Result<(), PlanError> {
    match actual {
        Some(actual) if actual == expected => Ok(()),
        Some(actual) => Err(PlanError::SnapshotMismatch { expected, actual }),
        None => Err(PlanError::MissingSnapshot(expected)),
    }
}

/// Combine field back-fill and association dispositions into one plan.
///
/// Associations are classified source by source. Once a row is planned for
/// reassignment its identity counts as held by the target, so a later source
/// with the same club or seat is planned for deletion.
pub fn build_merge_plan(
    request: &MergeRequest,
    snapshot: &MergeSnapshot,
) -> Result<MergePlan, PlanError> {
    snapshot.check(request)?;

    let field_updates = build_merge_field_updates(&snapshot.target, &snapshot.sources);

    let mut target_clubs: HashSet<i64> = snapshot.target_associations.club_ids().collect();
    let mut target_seats: HashSet<String> =
        snapshot.target_associations.committee_keys().collect();

    let mut clubs = Vec::new();
    let mut committees = Vec::new();

    for associations in &snapshot.source_associations {
        for row in &associations.clubs {
            let disposition = classify_club_contact(row.club_id, &target_clubs);
            if disposition == AssociationDisposition::Reassign {
                target_clubs.insert(row.club_id);
            }
            clubs.push(ClubDisposition {
                club_contact_id: row.id,
                source_contact_id: associations.contact_id,
                club_id: row.club_id,
                disposition,
            });
        }

        for seat in &associations.committees {
            let disposition = classify_committee(&seat.role, seat.home_club_id, &target_seats);
            if disposition == AssociationDisposition::Reassign {
                target_seats.insert(seat.identity());
            }
            committees.push(CommitteeDisposition {
                committee_member_id: seat.id,
                source_contact_id: associations.contact_id,
                role: seat.role.clone(),
                home_club_id: seat.home_club_id,
                disposition,
            });
        }
    }

    let plan = MergePlan {
        target_id: request.target_id,
        source_ids: request.source_ids.clone(),
        field_updates,
        clubs,
        committees,
    };

    tracing::debug!(
        "Planned merge into {}: {} fields, {} reassigned, {} deleted",
        plan.target_id,
        plan.field_updates.len(),
        plan.count(AssociationDisposition::Reassign),
        plan.count(AssociationDisposition::Delete)
    );

    Ok(plan)
}
