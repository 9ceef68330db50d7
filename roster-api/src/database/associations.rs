use crate::database::AsyncDbConnection;
use anyhow::Result;
use rusqlite::Connection;
use shared_types::{ClubContact, CommitteeMember, ContactAssociations};

pub(crate) fn find_associations(
    conn: &Connection,
    contact_id: i64,
) -> rusqlite::Result<ContactAssociations> {
    let mut stmt = conn.prepare(
        "SELECT id, club_id, contact_id FROM club_contacts WHERE contact_id = ? ORDER BY id",
    )?;
    let clubs = stmt
        .query_map([contact_id], |row| {
            Ok(ClubContact {
                id: row.get(0)?,
                club_id: row.get(1)?,
                contact_id: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut stmt = conn.prepare(
        "SELECT id, contact_id, role, home_club_id FROM committee_members
         WHERE contact_id = ? ORDER BY id",
    )?;
    let committees = stmt
        .query_map([contact_id], |row| {
            Ok(CommitteeMember {
                id: row.get(0)?,
                contact_id: row.get(1)?,
                role: row.get(2)?,
                home_club_id: row.get(3)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ContactAssociations {
        contact_id,
        clubs,
        committees,
    })
}

pub async fn get_contact_associations(
    conn: AsyncDbConnection,
    contact_id: i64,
) -> Result<ContactAssociations> {
    let conn = conn.lock().await?;

    find_associations(&conn, contact_id)
        .map_err(|e| anyhow::anyhow!("Failed to get associations for {}: {}", contact_id, e))
}

pub async fn add_club_contact(conn: AsyncDbConnection, club_id: i64, contact_id: i64) -> Result<i64> {
    let conn = conn.lock().await?;
    let now = chrono::Utc::now().timestamp();

    let id: i64 = conn.query_row(
        "INSERT INTO club_contacts (club_id, contact_id, created_at)
         VALUES (?, ?, ?)
         RETURNING id",
        rusqlite::params![club_id, contact_id, now],
        |row| row.get(0),
    )?;

    Ok(id)
}

pub async fn add_committee_member(
    conn: AsyncDbConnection,
    contact_id: i64,
    role: &str,
    home_club_id: i64,
) -> Result<i64> {
    let conn = conn.lock().await?;
    let now = chrono::Utc::now().timestamp();

    let id: i64 = conn.query_row(
        "INSERT INTO committee_members (contact_id, role, home_club_id, created_at)
         VALUES (?, ?, ?, ?)
         RETURNING id",
        rusqlite::params![contact_id, role, home_club_id, now],
        |row| row.get(0),
    )?;

    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::clubs::insert_club;
    use crate::database::contacts::insert_contact;
    use crate::database::test_support::test_db;
    use shared_types::CreateContactRequest;

    async fn seed_contact(conn: AsyncDbConnection) -> i64 {
        insert_contact(
            conn,
            &CreateContactRequest {
                first_name: "John".to_string(),
                last_name: "Doe".to_string(),
                phone: None,
                alt_phone: None,
                email: None,
                address: None,
                city: None,
                state: None,
                zip: None,
                notes: None,
                email_opt_in: None,
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_associations_roundtrip() {
        let db = test_db();
        let conn = db.async_connection.clone();
        let contact_id = seed_contact(conn.clone()).await;
        let north = insert_club(conn.clone(), "North Shore").await.unwrap();
        let south = insert_club(conn.clone(), "South Metro").await.unwrap();

        add_club_contact(conn.clone(), north, contact_id).await.unwrap();
        add_club_contact(conn.clone(), south, contact_id).await.unwrap();
        add_committee_member(conn.clone(), contact_id, "Treasurer", north)
            .await
            .unwrap();

        let associations = get_contact_associations(conn.clone(), contact_id).await.unwrap();
        assert_eq!(associations.contact_id, contact_id);
        assert_eq!(associations.club_ids().collect::<Vec<_>>(), vec![north, south]);
        assert_eq!(
            associations.committee_keys().collect::<Vec<_>>(),
            vec![format!("Treasurer|{}", north)]
        );
    }

    #[tokio::test]
    async fn test_contact_without_associations() {
        let db = test_db();
        let associations = get_contact_associations(db.async_connection.clone(), 7)
            .await
            .unwrap();
        assert_eq!(associations, ContactAssociations::empty(7));
    }

    #[tokio::test]
    async fn test_membership_requires_existing_club() {
        let db = test_db();
        let conn = db.async_connection.clone();
        let contact_id = seed_contact(conn.clone()).await;

        assert!(add_club_contact(conn, 999, contact_id).await.is_err());
    }
}
