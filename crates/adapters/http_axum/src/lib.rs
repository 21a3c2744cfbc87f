//! # ticketing-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **JSON ticket API**:
//!   - `GET  /tickets`                : list all events
//!   - `GET  /tickets/{id}`           : get one event
//!   - `POST /tickets/{id}/book?count`: book tickets
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map typed failures into status codes: not-found is `404`, every other
//!   business failure is `400`, lock contention is `503`, storage failures
//!   are `500`
//!
//! ## Dependency rule
//! Depends on `ticketing-app` (for port traits and services) and `ticketing-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
