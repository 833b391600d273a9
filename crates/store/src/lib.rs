//! Durable per-client storage for the discovery wizard.
//!
//! The core only speaks the [`packfit_core::DraftStore`] port; this crate
//! provides the key-value implementations behind it: an in-memory store for
//! tests and hosts without durable storage, and a SQLite-backed store for
//! everything else. The draft repository binds the port to one fixed key
//! with last-writer-wins semantics.

pub mod drafts;
pub mod kv;
pub mod sqlite;

pub use drafts::{DraftRepository, DRAFT_KEY};
pub use kv::{KeyValueStore, MemoryStore, StoreError};
pub use sqlite::{connect, connect_with_settings, DbPool, SqliteStore};
