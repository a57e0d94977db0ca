//! Scan2Share application state store.
//!
//! The store is split in two layers:
//! - a pure reducer: every operation is a method on [`AppState`] that takes the
//!   current snapshot and returns the next one alongside the operation's result
//! - a host, [`Store`], that owns the live snapshot, reads time from a [`Clock`]
//!   and hands every accepted snapshot to a [`Persistence`] adapter
//!
//! Lookups by unknown id return `None` and leave the snapshot untouched.

mod accounts;
mod catalog;
pub mod clock;
pub mod error;
mod events;
pub mod oauth;
pub mod persistence;
mod rewards;
pub mod state;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::StoreError;
pub use oauth::SyncOutcome;
pub use persistence::{MemoryPersistence, Persistence};
pub use state::AppState;
pub use store::Store;
