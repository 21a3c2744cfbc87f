//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod tickets;

use axum::Router;
use axum::routing::{get, post};

use ticketing_app::ports::EventRepository;

use crate::state::AppState;

/// Build the `/tickets` routes.
pub fn routes<R>() -> Router<AppState<R>>
where
    R: EventRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/tickets", get(tickets::list::<R>))
        .route("/tickets/{id}", get(tickets::get::<R>))
        .route("/tickets/{id}/book", post(tickets::book::<R>))
}
