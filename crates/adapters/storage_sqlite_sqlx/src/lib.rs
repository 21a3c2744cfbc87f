//! # ticketing-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the event store port traits defined in `ticketing-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle (WAL journal, lock timeout,
//!   separate writer and reader pools)
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//! - Classify lock timeouts as contention, distinct from other storage errors
//!
//! ## Locking
//! Booking transactions start with `BEGIN IMMEDIATE`, which takes the database
//! write lock before the first read. A second booking transaction waits for it
//! up to the configured lock timeout. Plain reads run outside transactions on a
//! separate reader pool and, in WAL mode, are never blocked by the writer or
//! by bookings queued behind it.
//!
//! ## Dependency rule
//! Depends on `ticketing-app` (for port traits) and `ticketing-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod error;
mod event_repo;
mod pool;

pub use error::StorageError;
pub use event_repo::{SqliteEventRepository, SqliteEventTransaction};
pub use pool::{Config, Database};
