/// Database row types. These map directly to SQLite rows and stay
/// independent of the store's snapshot type.

pub struct SnapshotRow {
    pub key: String,
    pub value: String,
    pub updated_at: String,
}
