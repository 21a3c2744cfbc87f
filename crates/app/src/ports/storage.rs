//! Storage port: repository and transaction traits for event persistence.

use std::future::Future;

use ticketing_domain::error::TicketingError;
use ticketing_domain::event::{Event, NewEvent};
use ticketing_domain::id::EventId;

/// Durable table of [`Event`]s.
///
/// Reads through the repository itself never take the booking lock. Anything
/// that mutates inventory goes through a [`EventTransaction`] opened with
/// [`EventRepository::begin`].
pub trait EventRepository {
    /// Unit of work returned by [`EventRepository::begin`].
    type Transaction: EventTransaction + Send;

    /// Persist a new event. The store assigns the id.
    fn create(&self, event: NewEvent) -> impl Future<Output = Result<Event, TicketingError>> + Send;

    /// Non-locking lookup by id.
    fn get_by_id(
        &self,
        id: EventId,
    ) -> impl Future<Output = Result<Option<Event>, TicketingError>> + Send;

    /// Every stored event, in store-defined order.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Event>, TicketingError>> + Send;

    /// Number of stored events.
    fn count(&self) -> impl Future<Output = Result<u64, TicketingError>> + Send;

    /// Open a new atomic transaction.
    ///
    /// Fails with [`TicketingError::Contention`] when the store cannot start
    /// one within its configured lock timeout.
    fn begin(&self) -> impl Future<Output = Result<Self::Transaction, TicketingError>> + Send;
}

/// One atomic read-validate-write sequence against the event table.
///
/// Dropping a transaction without calling [`EventTransaction::commit`] rolls
/// it back, so every early return leaves stored state unchanged.
pub trait EventTransaction {
    /// Look up an event and hold an exclusive lock on it until the
    /// transaction ends.
    ///
    /// Blocks while another transaction holds the same lock, up to the
    /// store's lock timeout, then fails with [`TicketingError::Contention`].
    fn get_by_id_for_update(
        &mut self,
        id: EventId,
    ) -> impl Future<Output = Result<Option<Event>, TicketingError>> + Send;

    /// Number of stored events, including ones created in this transaction.
    fn count(&mut self) -> impl Future<Output = Result<u64, TicketingError>> + Send;

    /// Persist a new event as part of this transaction. The store assigns
    /// the id.
    fn create(
        &mut self,
        event: NewEvent,
    ) -> impl Future<Output = Result<Event, TicketingError>> + Send;

    /// Insert or update `event` as part of this transaction.
    fn save(&mut self, event: &Event) -> impl Future<Output = Result<(), TicketingError>> + Send;

    /// Make every write of this transaction visible and release its locks.
    fn commit(self) -> impl Future<Output = Result<(), TicketingError>> + Send;
}
