//! Booking service: the only code path that lowers an event's inventory.

use ticketing_domain::booking::{Booking, TicketCount};
use ticketing_domain::error::{NotFoundError, TicketingError};
use ticketing_domain::id::EventId;

use crate::ports::{EventRepository, EventTransaction};

/// Application service booking tickets against an event's inventory.
///
/// Every attempt re-reads the event under an exclusive lock; no inventory
/// value is ever carried over between transactions.
pub struct BookingService<R> {
    repo: R,
}

impl<R: EventRepository> BookingService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Book `count` tickets for the event `event_id`.
    ///
    /// Locks the event row, checks the remaining inventory, decrements it and
    /// commits, all inside one transaction. Any failure drops the transaction
    /// before commit, so the stored counter is never partially updated.
    ///
    /// # Errors
    ///
    /// - [`TicketingError::Validation`] when `count <= 0`, before the store
    ///   is touched.
    /// - [`TicketingError::NotFound`] when no event has this id.
    /// - [`TicketingError::InsufficientInventory`] when fewer than `count`
    ///   tickets remain.
    /// - [`TicketingError::Contention`] when the lock could not be taken in
    ///   time.
    /// - [`TicketingError::Storage`] for any other store failure.
    #[tracing::instrument(skip(self))]
    pub async fn book_tickets(
        &self,
        event_id: EventId,
        count: i64,
    ) -> Result<Booking, TicketingError> {
        let count = TicketCount::try_from(count)?;

        tracing::info!(count = count.get(), "attempting to book tickets");

        let mut tx = self.repo.begin().await?;

        let Some(mut event) = tx.get_by_id_for_update(event_id).await? else {
            tracing::warn!("event not found during booking attempt");
            return Err(NotFoundError {
                entity: "Event",
                id: event_id.to_string(),
            }
            .into());
        };

        tracing::debug!(
            name = %event.name,
            available = event.available_tickets,
            "locked event for booking"
        );

        if let Err(err) = event.reserve(count) {
            tracing::warn!(
                requested = err.requested,
                available = err.available,
                "not enough tickets to book"
            );
            return Err(err.into());
        }

        tx.save(&event).await?;
        tx.commit().await?;

        tracing::info!(
            count = count.get(),
            remaining = event.available_tickets,
            "booked tickets"
        );

        Ok(Booking {
            event_id,
            booked: count.get(),
            remaining: event.available_tickets,
        })
    }
}
