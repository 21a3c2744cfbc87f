//! Shared application state for axum handlers.

use std::sync::Arc;

use ticketing_app::ports::EventRepository;
use ticketing_app::services::booking_service::BookingService;
use ticketing_app::services::query_service::QueryService;

/// Application state shared across all axum handlers.
///
/// Generic over the event repository to avoid dynamic dispatch.
/// `Clone` is implemented manually so the repository itself does not need
/// to be `Clone`. Only the `Arc` wrappers are cloned.
pub struct AppState<R> {
    /// Locked read-validate-decrement bookings.
    pub booking_service: Arc<BookingService<R>>,
    /// Read-only event listing and lookup.
    pub query_service: Arc<QueryService<R>>,
}

impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            booking_service: Arc::clone(&self.booking_service),
            query_service: Arc::clone(&self.query_service),
        }
    }
}

impl<R> AppState<R>
where
    R: EventRepository + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(booking_service: BookingService<R>, query_service: QueryService<R>) -> Self {
        Self {
            booking_service: Arc::new(booking_service),
            query_service: Arc::new(query_service),
        }
    }
}
