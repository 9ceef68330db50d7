use crate::database::AsyncDbConnection;
use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, Row};
use shared_types::{Contact, CreateContactRequest};

const CONTACT_COLUMNS: &str = "id, first_name, last_name, phone, alt_phone, email, address, city,
                state, zip, notes, email_opt_in, created_at, updated_at";

fn row_to_contact(row: &Row) -> rusqlite::Result<Contact> {
    Ok(Contact {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        phone: row.get(3)?,
        alt_phone: row.get(4)?,
        email: row.get(5)?,
        address: row.get(6)?,
        city: row.get(7)?,
        state: row.get(8)?,
        zip: row.get(9)?,
        notes: row.get(10)?,
        email_opt_in: row.get(11)?,
        created_at: row.get(12)?,
        updated_at: row.get(13)?,
    })
}

pub(crate) fn find_contact(conn: &Connection, id: i64) -> rusqlite::Result<Option<Contact>> {
    conn.query_row(
        &format!("SELECT {} FROM contacts WHERE id = ?", CONTACT_COLUMNS),
        [id],
        row_to_contact,
    )
    .optional()
}

pub async fn insert_contact(conn: AsyncDbConnection, request: &CreateContactRequest) -> Result<i64> {
    let conn = conn.lock().await?;
    let now = chrono::Utc::now().timestamp();

    let id: i64 = conn.query_row(
        "INSERT INTO contacts
         (first_name, last_name, phone, alt_phone, email, address, city, state, zip,
          notes, email_opt_in, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
         RETURNING id",
        rusqlite::params![
            &request.first_name,
            &request.last_name,
            request.phone.as_ref(),
            request.alt_phone.as_ref(),
            request.email.as_ref(),
            request.address.as_ref(),
            request.city.as_ref(),
            request.state.as_ref(),
            request.zip.as_ref(),
            request.notes.as_ref(),
            request.email_opt_in.unwrap_or(false),
            now,
            now
        ],
        |row| row.get(0),
    )?;

    Ok(id)
}

/// `Ok(None)` when no contact has this id.
pub async fn get_contact(conn: AsyncDbConnection, id: i64) -> Result<Option<Contact>> {
    let conn = conn.lock().await?;

    find_contact(&conn, id).map_err(|e| anyhow::anyhow!("Failed to get contact {}: {}", id, e))
}

/// Full contact population, oldest first.
pub async fn list_contacts(conn: AsyncDbConnection) -> Result<Vec<Contact>> {
    let conn = conn.lock().await?;

    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM contacts ORDER BY id",
        CONTACT_COLUMNS
    ))?;

    let contacts = stmt
        .query_map([], row_to_contact)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| anyhow::anyhow!("Failed to list contacts: {}", e))?;

    Ok(contacts)
}
