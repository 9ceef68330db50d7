use crate::database::AsyncDbConnection;
use anyhow::Result;
use shared_types::Club;

pub async fn insert_club(conn: AsyncDbConnection, name: &str) -> Result<i64> {
    let conn = conn.lock().await?;
    let now = chrono::Utc::now().timestamp();

    let id: i64 = conn.query_row(
        "INSERT INTO clubs (name, created_at) VALUES (?, ?) RETURNING id",
        rusqlite::params![name, now],
        |row| row.get(0),
    )?;

    Ok(id)
}

pub async fn list_clubs(conn: AsyncDbConnection) -> Result<Vec<Club>> {
    let conn = conn.lock().await?;

    let mut stmt = conn.prepare("SELECT id, name, created_at FROM clubs ORDER BY name")?;

    let clubs = stmt
        .query_map([], |row| {
            Ok(Club {
                id: row.get(0)?,
                name: row.get(1)?,
                created_at: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| anyhow::anyhow!("Failed to list clubs: {}", e))?;

    Ok(clubs)
}
