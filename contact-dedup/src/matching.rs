//! Duplicate detection over a full contact population.
//!
//! Contacts are clustered with a union-find forest. Three rules feed it, in
//! order:
//!
//! 1. identical normalized full name (always links)
//! 2. identical normalized email, if the pair shares a first or last name
//! 3. identical phone digits across primary and alternate phones, with the
//!    same name-part guard
//!
//! Links are transitive, so a group can hold contacts with no direct signal
//! between them. Match types and reasons are tracked per root and merged on
//! every union.

use crate::confidence::classify_confidence;
use crate::normalize::{shares_name_part, NormalizedContact};
use crate::union_find::UnionFind;
use shared_types::{Contact, DuplicateGroup, MatchType};
use std::collections::{BTreeMap, BTreeSet, HashMap};

#[derive(Debug, Default, Clone)]
struct GroupEvidence {
    match_types: BTreeSet<MatchType>,
    reasons: Vec<String>,
}

impl GroupEvidence {
    fn record(&mut self, match_type: MatchType, reason: String) {
        self.match_types.insert(match_type);
        if !self.reasons.contains(&reason) {
            self.reasons.push(reason);
        }
    }

    fn absorb(&mut self, other: GroupEvidence) {
        self.match_types.extend(other.match_types);
        for reason in other.reasons {
            if !self.reasons.contains(&reason) {
                self.reasons.push(reason);
            }
        }
    }
}

type KeyIndex = BTreeMap<String, Vec<usize>>;

struct Clusterer {
    sets: UnionFind,
    evidence: HashMap<usize, GroupEvidence>,
}

impl Clusterer {
    fn new(len: usize) -> Self {
        Self {
            sets: UnionFind::new(len),
            evidence: HashMap::new(),
        }
    }

    /// Union `a` and `b` and attach the match to the surviving root. A link
    /// between contacts already in one group still counts as evidence.
    fn link(&mut self, a: usize, b: usize, match_type: MatchType, reason: String) {
        let root = match self.sets.union(a, b) {
            Some(joined) => {
                if let Some(absorbed) = self.evidence.remove(&joined.absorbed) {
                    self.evidence.entry(joined.root).or_default().absorb(absorbed);
                }
                joined.root
            }
            None => self.sets.find(a),
        };

        self.evidence
            .entry(root)
            .or_default()
            .record(match_type, reason);
    }

    fn link_all(&mut self, index: &KeyIndex, match_type: MatchType) {
        for (key, members) in index {
            if let Some((&first, rest)) = members.split_first() {
                for &other in rest {
                    self.link(first, other, match_type, reason(match_type, key));
                }
            }
        }
    }

    fn link_guarded<F>(
        &mut self,
        index: &KeyIndex,
        match_type: MatchType,
        normalized: &[NormalizedContact],
        guard: F,
    ) where
        F: Fn(&NormalizedContact, &NormalizedContact) -> bool,
    {
        for (key, members) in index {
            for (i, &a) in members.iter().enumerate() {
                for &b in &members[i + 1..] {
                    if guard(&normalized[a], &normalized[b]) {
                        self.link(a, b, match_type, reason(match_type, key));
                    }
                }
            }
        }
    }
}

fn reason(match_type: MatchType, key: &str) -> String {
    format!("{}: {}", match_type.label(), key)
}

struct Indexes {
    by_name: KeyIndex,
    by_email: KeyIndex,
    by_phone: KeyIndex,
}

fn build_indexes(normalized: &[NormalizedContact]) -> Indexes {
    let mut indexes = Indexes {
        by_name: KeyIndex::new(),
        by_email: KeyIndex::new(),
        by_phone: KeyIndex::new(),
    };

    for (position, contact) in normalized.iter().enumerate() {
        indexes
            .by_name
            .entry(contact.full_name.clone())
            .or_default()
            .push(position);

        if let Some(email) = &contact.email {
            indexes
                .by_email
                .entry(email.clone())
                .or_default()
                .push(position);
        }

        for phone in &contact.phones {
            indexes
                .by_phone
                .entry(phone.clone())
                .or_default()
                .push(position);
        }
    }

    indexes
}

/// Partition `contacts` into duplicate groups of two or more.
///
/// High-confidence groups come first, then larger groups; ties keep the
/// order in which their first member appears in `contacts`.
pub fn detect_duplicates(contacts: &[Contact]) -> Vec<DuplicateGroup> {
    if contacts.len() < 2 {
        return Vec::new();
    }

    let normalized: Vec<NormalizedContact> =
        contacts.iter().map(NormalizedContact::from_contact).collect();
    let indexes = build_indexes(&normalized);

    let mut clusterer = Clusterer::new(contacts.len());
    clusterer.link_all(&indexes.by_name, MatchType::Name);
    clusterer.link_guarded(&indexes.by_email, MatchType::Email, &normalized, shares_name_part);
    clusterer.link_guarded(&indexes.by_phone, MatchType::Phone, &normalized, shares_name_part);

    let mut root_order = Vec::new();
    let mut members_by_root: HashMap<usize, Vec<usize>> = HashMap::new();
    for position in 0..contacts.len() {
        let root = clusterer.sets.find(position);
        let members = members_by_root.entry(root).or_default();
        if members.is_empty() {
            root_order.push(root);
        }
        members.push(position);
    }

    let mut groups = Vec::new();
    for root in root_order {
        let members = &members_by_root[&root];
        if members.len() < 2 {
            continue;
        }

        let evidence = clusterer.evidence.remove(&root).unwrap_or_default();
        let group_contacts: Vec<Contact> =
            members.iter().map(|&i| contacts[i].clone()).collect();
        let lowest_id = group_contacts.iter().map(|c| c.id).min().unwrap_or_default();

        groups.push(DuplicateGroup {
            id: format!("dup-{}", lowest_id),
            contacts: group_contacts,
            confidence: classify_confidence(&evidence.match_types),
            match_types: evidence.match_types.into_iter().collect(),
            match_reasons: evidence.reasons,
        });
    }

    groups.sort_by(|a, b| {
        a.confidence
            .cmp(&b.confidence)
            .then_with(|| b.len().cmp(&a.len()))
    });

    tracing::debug!(
        "Duplicate detection: {} contacts, {} groups",
        contacts.len(),
        groups.len()
    );

    groups
}
