use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use scan2share_store::{AppState, Persistence};

use crate::Database;

/// Storage key the whole application snapshot is saved under.
pub const DEFAULT_STORAGE_KEY: &str = "scan2share-store";

/// [`Persistence`] adapter writing the snapshot as one JSON document under a
/// fixed key. The document has no version field: changing the shape of
/// `AppState` breaks existing data.
pub struct SnapshotStore {
    db: Arc<Database>,
    key: String,
}

impl SnapshotStore {
    pub fn new(db: Arc<Database>, key: impl Into<String>) -> Self {
        Self { db, key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Persistence for SnapshotStore {
    fn load(&self) -> Result<Option<AppState>> {
        let Some(row) = self.db.get_snapshot(&self.key)? else {
            return Ok(None);
        };
        let state = serde_json::from_str(&row.value)
            .with_context(|| format!("Corrupt snapshot under key {}", self.key))?;
        debug!(key = %self.key, updated_at = %row.updated_at, "Snapshot loaded");
        Ok(Some(state))
    }

    fn save(&self, state: &AppState) -> Result<()> {
        let json = serde_json::to_string(state)?;
        self.db.put_snapshot(&self.key, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scan2share_store::{FixedClock, Store};
    use scan2share_types::{NewShare, Platform};

    #[test]
    fn snapshot_survives_reopen() {
        let db = Arc::new(Database::open_in_memory().unwrap());

        let mut store = Store::open(
            SnapshotStore::new(db.clone(), DEFAULT_STORAGE_KEY),
            FixedClock::new(0),
        );
        let share = store.record_share(NewShare {
            event_id: "evt-1".into(),
            platform: Platform::Linkedin,
            url: "https://linkedin.com/posts/1".into(),
        });
        store.verify_share(&share.id, 15.0).unwrap();

        let reopened = Store::open(
            SnapshotStore::new(db.clone(), DEFAULT_STORAGE_KEY),
            FixedClock::new(0),
        );
        assert_eq!(reopened.state().balance(), 15.0);
        assert!(reopened.state().shares()[0].verified);
    }

    #[test]
    fn keys_are_isolated() {
        let db = Arc::new(Database::open_in_memory().unwrap());
        let a = SnapshotStore::new(db.clone(), "a");
        let b = SnapshotStore::new(db, "b");

        let (state, _) = AppState::default().stake(5.0, 0).unwrap();
        a.save(&state).unwrap();
        assert_eq!(a.load().unwrap(), Some(state));
        assert!(b.load().unwrap().is_none());
    }

    #[test]
    fn corrupt_snapshot_is_an_error() {
        let db = Arc::new(Database::open_in_memory().unwrap());
        db.put_snapshot("bad", "not json").unwrap();
        let err = SnapshotStore::new(db, "bad").load().unwrap_err();
        assert!(err.to_string().contains("bad"));
    }

    #[test]
    fn corrupt_snapshot_opens_empty_store() {
        let db = Arc::new(Database::open_in_memory().unwrap());
        db.put_snapshot(DEFAULT_STORAGE_KEY, "[").unwrap();
        let store = Store::open(
            SnapshotStore::new(db, DEFAULT_STORAGE_KEY),
            FixedClock::new(0),
        );
        assert_eq!(store.state(), &AppState::default());
    }
}
