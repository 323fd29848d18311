//! Persistence adapters implementing the domain repository traits.

mod sqlite;

pub use sqlite::SqliteStore;
