use rusqlite::Connection;

/// Run all database migrations
pub fn run_migrations(conn: &Connection) -> anyhow::Result<()> {
    // Create clubs table
    conn.execute(
        "CREATE TABLE IF NOT EXISTS clubs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name VARCHAR NOT NULL,
            created_at BIGINT NOT NULL
        )",
        [],
    )?;

    // Create contacts table
    conn.execute(
        "CREATE TABLE IF NOT EXISTS contacts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name VARCHAR NOT NULL,
            last_name VARCHAR NOT NULL,
            phone VARCHAR,
            alt_phone VARCHAR,
            email VARCHAR,
            address VARCHAR,
            city VARCHAR,
            state VARCHAR,
            zip VARCHAR,
            notes VARCHAR,
            email_opt_in BOOLEAN NOT NULL DEFAULT false,
            created_at BIGINT NOT NULL,
            updated_at BIGINT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_contacts_email ON contacts(email)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_contacts_name ON contacts(last_name, first_name)",
        [],
    )?;

    // Create club_contacts table (one membership row per club and contact)
    conn.execute(
        "CREATE TABLE IF NOT EXISTS club_contacts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            club_id INTEGER NOT NULL,
            contact_id INTEGER NOT NULL,
            created_at BIGINT NOT NULL,
            FOREIGN KEY (club_id) REFERENCES clubs (id),
            FOREIGN KEY (contact_id) REFERENCES contacts (id),
            UNIQUE(club_id, contact_id)
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_club_contacts_contact ON club_contacts(contact_id)",
        [],
    )?;

    // Create committee_members table
    conn.execute(
        "CREATE TABLE IF NOT EXISTS committee_members (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            contact_id INTEGER NOT NULL,
            role VARCHAR NOT NULL,
            home_club_id INTEGER NOT NULL,
            created_at BIGINT NOT NULL,
            FOREIGN KEY (contact_id) REFERENCES contacts (id),
            FOREIGN KEY (home_club_id) REFERENCES clubs (id),
            UNIQUE(contact_id, role, home_club_id)
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_committee_members_contact ON committee_members(contact_id)",
        [],
    )?;

    // Audit trail of merged-away contacts. No foreign keys: both ids may be
    // deleted by later merges.
    conn.execute(
        "CREATE TABLE IF NOT EXISTS contact_merge_history (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            target_id INTEGER NOT NULL,
            source_id INTEGER NOT NULL,
            source_snapshot VARCHAR NOT NULL,
            merged_at BIGINT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_contact_merge_history_target
            ON contact_merge_history(target_id, merged_at)",
        [],
    )?;

    Ok(())
}
