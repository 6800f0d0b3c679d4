//! # hearth-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the [`EntityStore`](hearth_app::ports::EntityStore) port
//!   once per entity kind, each against its own table
//! - Manage the `SQLite` connection pool lifecycle
//! - Run database migrations (sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `hearth-app` (for the port trait) and `hearth-domain` (for
//! domain types). The `app` and `domain` crates must never reference this
//! adapter.

pub mod device_store;
pub mod dwelling_store;
pub mod error;
pub mod hub_store;
pub mod pool;

pub use device_store::SqliteDeviceStore;
pub use dwelling_store::SqliteDwellingStore;
pub use error::StorageError;
pub use hub_store::SqliteHubStore;
pub use pool::{Config, Database};
