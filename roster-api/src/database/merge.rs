//! Transactional merge execution.
//!
//! A merge runs inside one IMMEDIATE transaction, so SQLite holds the write
//! lock from the precondition check until commit. The executor reloads every
//! snapshot the plan was built from and rebuilds the plan; if anything moved
//! in between, the merge fails with `StalePlan` and nothing is written.
//! Dropping the transaction on any error rolls it back.

use crate::database::associations::find_associations;
use crate::database::contacts::find_contact;
use crate::database::AsyncDbConnection;
use contact_dedup::{build_merge_plan, MergeRequest, MergeSnapshot, PlanError};
use rusqlite::{Connection, TransactionBehavior};
use shared_types::{
    AssociationDisposition, MergeField, MergeHistoryEntry, MergePlan, MergeSummary,
};

#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    #[error("Invalid merge request: {0}")]
    InvalidRequest(#[from] PlanError),

    #[error("Contact {0} not found")]
    ContactNotFound(i64),

    #[error("Merge plan is stale: {0}")]
    StalePlan(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Failed to snapshot contact: {0}")]
    Snapshot(#[from] serde_json::Error),
}

fn load_snapshot(conn: &Connection, request: &MergeRequest) -> Result<MergeSnapshot, MergeError> {
    let target = find_contact(conn, request.target_id())?
        .ok_or(MergeError::ContactNotFound(request.target_id()))?;

    let mut sources = Vec::with_capacity(request.source_ids().len());
    let mut source_associations = Vec::with_capacity(request.source_ids().len());
    for &source_id in request.source_ids() {
        let source =
            find_contact(conn, source_id)?.ok_or(MergeError::ContactNotFound(source_id))?;
        sources.push(source);
        source_associations.push(find_associations(conn, source_id)?);
    }

    Ok(MergeSnapshot {
        target_associations: find_associations(conn, target.id)?,
        target,
        sources,
        source_associations,
    })
}

/// Build the plan for `request` from current data without writing anything.
pub async fn preview_merge(
    conn: AsyncDbConnection,
    request: &MergeRequest,
) -> Result<MergePlan, MergeError> {
    let conn = conn.lock().await?;

    let snapshot = load_snapshot(&conn, request)?;
    Ok(build_merge_plan(request, &snapshot)?)
}

fn expect_single_row(affected: usize, what: &str) -> Result<(), MergeError> {
    if affected == 1 {
        Ok(())
    } else {
        Err(MergeError::StalePlan(format!(
            "{} touched {} rows, expected 1",
            what, affected
        )))
    }
}

fn apply_field_updates(conn: &Connection, plan: &MergePlan, now: i64) -> Result<(), MergeError> {
    for (field, value) in plan.field_updates.iter() {
        // Column names come from the closed MergeField set
        let affected = conn.execute(
            &format!(
                "UPDATE contacts SET {} = ?1, updated_at = ?2 WHERE id = ?3",
                field.column()
            ),
            rusqlite::params![value, now, plan.target_id],
        )?;
        expect_single_row(affected, &format!("update of {}", field.column()))?;
    }

    Ok(())
}

/// Returns (reassigned, deleted).
fn apply_dispositions(conn: &Connection, plan: &MergePlan) -> Result<(usize, usize), MergeError> {
    let mut reassigned = 0;
    let mut deleted = 0;

    for club in &plan.clubs {
        let affected = match club.disposition {
            AssociationDisposition::Reassign => {
                reassigned += 1;
                conn.execute(
                    "UPDATE club_contacts SET contact_id = ?1 WHERE id = ?2 AND contact_id = ?3",
                    rusqlite::params![plan.target_id, club.club_contact_id, club.source_contact_id],
                )?
            }
            AssociationDisposition::Delete => {
                deleted += 1;
                conn.execute(
                    "DELETE FROM club_contacts WHERE id = ?1 AND contact_id = ?2",
                    rusqlite::params![club.club_contact_id, club.source_contact_id],
                )?
            }
        };
        expect_single_row(affected, &format!("club membership {}", club.club_contact_id))?;
    }

    for seat in &plan.committees {
        let affected = match seat.disposition {
            AssociationDisposition::Reassign => {
                reassigned += 1;
                conn.execute(
                    "UPDATE committee_members SET contact_id = ?1 WHERE id = ?2 AND contact_id = ?3",
                    rusqlite::params![
                        plan.target_id,
                        seat.committee_member_id,
                        seat.source_contact_id
                    ],
                )?
            }
            AssociationDisposition::Delete => {
                deleted += 1;
                conn.execute(
                    "DELETE FROM committee_members WHERE id = ?1 AND contact_id = ?2",
                    rusqlite::params![seat.committee_member_id, seat.source_contact_id],
                )?
            }
        };
        expect_single_row(affected, &format!("committee seat {}", seat.committee_member_id))?;
    }

    Ok((reassigned, deleted))
}

/// Apply `plan` atomically: fill target fields, move or drop every source
/// association, record and delete each source contact.
///
/// Fails without writing if the plan no longer matches the stored data.
/// A failed merge must be re-detected and re-planned; blind retries will not
/// succeed.
pub async fn execute_merge(
    conn: AsyncDbConnection,
    plan: &MergePlan,
) -> Result<MergeSummary, MergeError> {
    let request = MergeRequest::new(plan.target_id, plan.source_ids.clone())?;

    let mut conn = conn.lock().await?;
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let snapshot = load_snapshot(&tx, &request)?;
    let current = build_merge_plan(&request, &snapshot)?;
    if &current != plan {
        tracing::warn!(
            "Rejected merge into {}: data changed since the plan was built",
            plan.target_id
        );
        return Err(MergeError::StalePlan(format!(
            "contacts {:?} changed since the plan was built",
            plan.source_ids
        )));
    }

    tracing::info!(
        "Merging {:?} into contact {}",
        plan.source_ids,
        plan.target_id
    );

    let now = chrono::Utc::now().timestamp();
    apply_field_updates(&tx, plan, now)?;
    let (associations_reassigned, associations_deleted) = apply_dispositions(&tx, plan)?;

    for source in &snapshot.sources {
        tx.execute(
            "INSERT INTO contact_merge_history (target_id, source_id, source_snapshot, merged_at)
             VALUES (?, ?, ?, ?)",
            rusqlite::params![plan.target_id, source.id, serde_json::to_string(source)?, now],
        )?;

        let affected = tx.execute("DELETE FROM contacts WHERE id = ?", [source.id])?;
        expect_single_row(affected, &format!("delete of contact {}", source.id))?;
    }

    let affected = tx.execute(
        "UPDATE contacts SET updated_at = ?1 WHERE id = ?2",
        rusqlite::params![now, plan.target_id],
    )?;
    expect_single_row(affected, &format!("touch of contact {}", plan.target_id))?;

    tx.commit()?;

    let fields_updated: Vec<MergeField> = plan.field_updates.iter().map(|(f, _)| f).collect();
    tracing::info!(
        "Merged {} contacts into {}: {} fields filled, {} associations reassigned, {} deleted",
        plan.source_ids.len(),
        plan.target_id,
        fields_updated.len(),
        associations_reassigned,
        associations_deleted
    );

    Ok(MergeSummary {
        target_id: plan.target_id,
        merged_source_ids: plan.source_ids.clone(),
        fields_updated,
        associations_reassigned,
        associations_deleted,
    })
}

/// Plan from current data and execute in one call.
pub async fn merge_contacts(
    conn: AsyncDbConnection,
    request: &MergeRequest,
) -> Result<MergeSummary, MergeError> {
    let plan = preview_merge(conn.clone(), request).await?;
    execute_merge(conn, &plan).await
}

pub async fn list_merge_history(
    conn: AsyncDbConnection,
    target_id: i64,
) -> anyhow::Result<Vec<MergeHistoryEntry>> {
    let conn = conn.lock().await?;

    let mut stmt = conn.prepare(
        "SELECT id, target_id, source_id, source_snapshot, merged_at
         FROM contact_merge_history
         WHERE target_id = ?
         ORDER BY merged_at DESC, id DESC",
    )?;

    let entries = stmt
        .query_map([target_id], |row| {
            Ok(MergeHistoryEntry {
                id: row.get(0)?,
                target_id: row.get(1)?,
                source_id: row.get(2)?,
                source_snapshot: row.get(3)?,
                merged_at: row.get(4)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| anyhow::anyhow!("Failed to get merge history: {}", e))?;

    Ok(entries)
}
