//! `atelier-infra` — storage adapter and flat-file export.

pub mod export;
pub mod sqlite;

pub use export::parts_to_csv;
pub use sqlite::SqlitePartStore;
