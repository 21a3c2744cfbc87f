//! Common error types used across the workspace.
//!
//! [`TicketingError`] is the closed set of failures any use-case can report.
//! Each layer defines its own typed errors and converts into it via `From`.

/// Top-level failure returned by every application use-case.
#[derive(Debug, thiserror::Error)]
pub enum TicketingError {
    /// The caller sent something invalid. Reported before any store access.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The referenced record does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The event has fewer tickets left than were requested.
    #[error(transparent)]
    InsufficientInventory(#[from] InsufficientInventoryError),

    /// The event lock could not be acquired in time. Safe to retry.
    #[error(transparent)]
    Contention(#[from] ContentionError),

    /// Any other failure of the underlying store.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl TicketingError {
    /// Whether a caller may retry the same request unchanged.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Contention(_))
    }
}

/// Domain invariant or request validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Event name must not be empty.")]
    EmptyName,

    #[error("Available tickets must not be negative, got {0}.")]
    NegativeInventory(i64),

    #[error("Number of tickets to book must be positive.")]
    NonPositiveCount,

    #[error("Number of tickets to book is required.")]
    MissingCount,

    #[error("Number of tickets to book must be an integer, got {0:?}.")]
    InvalidCount(String),

    #[error("Invalid event ID: {0:?}")]
    InvalidId(String),
}

/// A lookup by id found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} not found with ID: {id}")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// A booking asked for more tickets than remain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Not enough tickets available. Requested: {requested}, Available: {available}")]
pub struct InsufficientInventoryError {
    pub requested: i64,
    pub available: i64,
}

/// The store gave up waiting for a lock held by another transaction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Event is busy, please retry the booking.")]
pub struct ContentionError;
