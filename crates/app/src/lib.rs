//! # ticketing-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `EventRepository`: create, point lookups, full scan, open transactions
//!   - `EventTransaction`: locked lookup, upsert, commit (drop rolls back)
//! - Define **driving/inbound ports** as use-case structs:
//!   - `BookingService`: locked read, validate, decrement, commit
//!   - `QueryService`: list and get events
//!   - `SeedService`: populate an empty store at startup
//! - Orchestrate domain objects without knowing *how* persistence or locking works
//!
//! ## Dependency rule
//! Depends on `ticketing-domain` only (plus `tracing`).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;
