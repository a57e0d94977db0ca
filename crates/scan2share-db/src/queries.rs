use crate::Database;
use crate::models::SnapshotRow;
use anyhow::Result;
use rusqlite::Connection;

impl Database {
    // -- Snapshots --

    pub fn get_snapshot(&self, key: &str) -> Result<Option<SnapshotRow>> {
        self.with_conn(|conn| query_snapshot(conn, key))
    }

    /// Insert or replace the snapshot stored under `key`.
    pub fn put_snapshot(&self, key: &str, value: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO snapshots (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = datetime('now')",
                (key, value),
            )?;
            Ok(())
        })
    }

    /// Returns whether a snapshot was removed.
    pub fn delete_snapshot(&self, key: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let removed = conn.execute("DELETE FROM snapshots WHERE key = ?1", [key])?;
            Ok(removed > 0)
        })
    }
}

fn query_snapshot(conn: &Connection, key: &str) -> Result<Option<SnapshotRow>> {
    let mut stmt = conn.prepare("SELECT key, value, updated_at FROM snapshots WHERE key = ?1")?;

    let row = stmt
        .query_row([key], |row| {
            Ok(SnapshotRow {
                key: row.get(0)?,
                value: row.get(1)?,
                updated_at: row.get(2)?,
            })
        })
        .optional()?;

    Ok(row)
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
