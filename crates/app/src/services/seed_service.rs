//! Seed service: populates an empty store with the configured events.

use ticketing_domain::error::TicketingError;
use ticketing_domain::event::NewEvent;

use crate::ports::{EventRepository, EventTransaction};

/// Creates events out-of-band, before any booking happens.
pub struct SeedService<R> {
    repo: R,
}

impl<R: EventRepository> SeedService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Insert `events` when the store holds no event yet.
    ///
    /// Returns how many events were inserted; zero when the store was already
    /// populated, so restarting with the same configuration never resets or
    /// duplicates inventory. The emptiness check and the inserts run in one
    /// transaction, so two seeders racing on the same store insert once.
    ///
    /// # Errors
    ///
    /// Returns [`TicketingError::Validation`] if an event breaks a domain
    /// invariant, or a storage error from the repository.
    #[tracing::instrument(skip_all, fields(candidates = events.len()))]
    pub async fn seed(&self, events: Vec<NewEvent>) -> Result<usize, TicketingError> {
        let mut tx = self.repo.begin().await?;

        let existing = tx.count().await?;
        if existing > 0 {
            tracing::info!(existing, "store already populated, skipping seed");
            return Ok(0);
        }

        for event in &events {
            event.validate()?;
        }

        let mut inserted = 0;
        for event in events {
            let created = tx.create(event).await?;
            tracing::info!(
                id = %created.id,
                name = %created.name,
                available = created.available_tickets,
                "seeded event"
            );
            inserted += 1;
        }
        tx.commit().await?;
        Ok(inserted)
    }
}
