//! Query service: read-only access to events.

use ticketing_domain::error::{NotFoundError, TicketingError};
use ticketing_domain::event::Event;
use ticketing_domain::id::EventId;

use crate::ports::EventRepository;

/// Application service for listing and looking up events.
///
/// Never takes the booking lock.
pub struct QueryService<R> {
    repo: R,
}

impl<R: EventRepository> QueryService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// List all events.
    ///
    /// An empty store yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn list_events(&self) -> Result<Vec<Event>, TicketingError> {
        let events = self.repo.get_all().await?;
        tracing::debug!(count = events.len(), "fetched all events");
        Ok(events)
    }

    /// Look up an event by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`TicketingError::NotFound`] when no event with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_event(&self, id: EventId) -> Result<Event, TicketingError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            tracing::warn!("event not found");
            NotFoundError {
                entity: "Event",
                id: id.to_string(),
            }
            .into()
        })
    }
}
