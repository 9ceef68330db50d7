use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Club {
    pub id: i64,
    pub name: String,
    pub created_at: i64,
}

/// Membership row linking a contact to a club. Identity is the club id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ClubContact {
    pub id: i64,
    pub club_id: i64,
    pub contact_id: i64,
}

/// Committee seat held by a contact. Identity is the (role, home club) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CommitteeMember {
    pub id: i64,
    pub contact_id: i64,
    pub role: String,
    pub home_club_id: i64,
}

impl CommitteeMember {
    pub fn identity(&self) -> String {
        committee_key(&self.role, self.home_club_id)
    }
}

/// Composite natural key of a committee seat: `role|homeClubId`.
pub fn committee_key(role: &str, home_club_id: i64) -> String {
    format!("{}|{}", role, home_club_id)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ContactAssociations {
    pub contact_id: i64,
    pub clubs: Vec<ClubContact>,
    pub committees: Vec<CommitteeMember>,
}

impl ContactAssociations {
    pub fn empty(contact_id: i64) -> Self {
        Self {
            contact_id,
            ..Default::default()
        }
    }

    pub fn club_ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.clubs.iter().map(|c| c.club_id)
    }

    pub fn committee_keys(&self) -> impl Iterator<Item = String> + '_ {
        self.committees.iter().map(|c| c.identity())
    }
}
