use std::path::PathBuf;
use std::sync::Arc;

use crate::database::Database;

/// Returns the default path to the roster database for this platform
///
/// # Platform-specific paths
///
/// - **macOS**: `~/Library/Application Support/roster/roster.db`
/// - **Linux**: `~/.local/share/roster/roster.db`
/// - **Windows**: `%LOCALAPPDATA%\roster\roster.db`
pub fn get_db_path() -> anyhow::Result<PathBuf> {
    let data_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(data_dir.join("roster").join("roster.db"))
}

/// Open the database at `path`, falling back to [`get_db_path`].
///
/// An existing file is kept as is; merges are destructive and history lives in it.
pub fn initialize_database(path: Option<PathBuf>) -> anyhow::Result<(Arc<Database>, PathBuf)> {
    let db_path = match path {
        Some(path) => path,
        None => get_db_path()?,
    };

    let db = Database::new(&db_path)?;
    Ok((Arc::new(db), db_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::clubs::{insert_club, list_clubs};

    #[tokio::test]
    async fn test_initialize_keeps_existing_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("roster.db");

        let (db, opened_at) = initialize_database(Some(path.clone())).unwrap();
        assert_eq!(opened_at, path);
        insert_club(db.async_connection.clone(), "North Shore")
            .await
            .unwrap();
        drop(db);

        let (db, _) = initialize_database(Some(path)).unwrap();
        let clubs = list_clubs(db.async_connection.clone()).await.unwrap();
        assert_eq!(clubs.len(), 1);
        assert_eq!(clubs[0].name, "North Shore");
    }
}
