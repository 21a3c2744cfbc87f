//! # ticketing-domain
//!
//! Pure domain model for the ticketing service.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, the failure taxonomy
//! - Define **Events** (bookable units holding a finite ticket inventory)
//! - Define **Bookings** (validated ticket quantities and booking receipts)
//! - Contain all invariant enforcement, most importantly that an event's
//!   available ticket count never goes negative
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod booking;
pub mod event;
