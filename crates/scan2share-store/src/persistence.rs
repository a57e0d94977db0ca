use std::sync::Mutex;

use anyhow::{Result, anyhow};

use crate::state::AppState;

/// Durable home for the store snapshot.
///
/// The host calls [`save`](Persistence::save) after every accepted mutation
/// and [`load`](Persistence::load) once at startup. Implementations can write
/// to SQLite, a file, or keep the snapshot in memory.
pub trait Persistence: Send + Sync {
    /// Read the last saved snapshot. `Ok(None)` when nothing was saved yet.
    fn load(&self) -> Result<Option<AppState>>;

    fn save(&self, state: &AppState) -> Result<()>;
}

/// In-process persistence holding the serialized snapshot.
#[derive(Debug, Default)]
pub struct MemoryPersistence {
    snapshot: Mutex<Option<String>>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// The raw JSON of the last save.
    pub fn raw(&self) -> Option<String> {
        self.snapshot.lock().ok().and_then(|s| s.clone())
    }
}

impl Persistence for MemoryPersistence {
    fn load(&self) -> Result<Option<AppState>> {
        let snapshot = self
            .snapshot
            .lock()
            .map_err(|e| anyhow!("Snapshot lock poisoned: {}", e))?;
        match snapshot.as_deref() {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    fn save(&self, state: &AppState) -> Result<()> {
        let json = serde_json::to_string(state)?;
        let mut snapshot = self
            .snapshot
            .lock()
            .map_err(|e| anyhow!("Snapshot lock poisoned: {}", e))?;
        *snapshot = Some(json);
        Ok(())
    }
}

impl<P: Persistence + ?Sized> Persistence for std::sync::Arc<P> {
    fn load(&self) -> Result<Option<AppState>> {
        (**self).load()
    }

    fn save(&self, state: &AppState) -> Result<()> {
        (**self).save(state)
    }
}
