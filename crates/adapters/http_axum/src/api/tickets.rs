//! JSON REST handlers for events and bookings.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use ticketing_app::ports::EventRepository;
use ticketing_domain::error::{TicketingError, ValidationError};
use ticketing_domain::event::Event;
use ticketing_domain::id::EventId;

use crate::error::ApiError;
use crate::state::AppState;

/// Public projection of an [`Event`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventView {
    pub id: EventId,
    pub event_name: String,
    pub available_tickets: i64,
}

impl From<Event> for EventView {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            event_name: event.name,
            available_tickets: event.available_tickets,
        }
    }
}

/// Query string of the booking endpoint.
///
/// `count` is kept raw so a missing or malformed value gets the same JSON
/// error body as every other validation failure.
#[derive(Debug, Deserialize)]
pub struct BookParams {
    pub count: Option<String>,
}

/// Body returned by a successful booking.
#[derive(Debug, Serialize)]
pub struct BookedBody {
    pub message: String,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<EventView>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<EventView>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the book endpoint.
pub enum BookResponse {
    Ok(Json<BookedBody>),
}

impl IntoResponse for BookResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

fn parse_id(raw: &str) -> Result<EventId, ApiError> {
    EventId::from_str(raw).map_err(|err| ApiError::from(TicketingError::from(err)))
}

fn parse_count(raw: Option<&str>) -> Result<i64, ValidationError> {
    let raw = raw.ok_or(ValidationError::MissingCount)?;
    raw.trim()
        .parse()
        .map_err(|_| ValidationError::InvalidCount(raw.to_string()))
}

/// `GET /tickets`
pub async fn list<R>(State(state): State<AppState<R>>) -> Result<ListResponse, ApiError>
where
    R: EventRepository + Send + Sync + 'static,
{
    let events = state.query_service.list_events().await?;
    Ok(ListResponse::Ok(Json(
        events.into_iter().map(EventView::from).collect(),
    )))
}

/// `GET /tickets/{id}`
pub async fn get<R>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    R: EventRepository + Send + Sync + 'static,
{
    let event_id = parse_id(&id)?;
    let event = state.query_service.get_event(event_id).await?;
    Ok(GetResponse::Ok(Json(event.into())))
}

/// `POST /tickets/{id}/book?count=N`
pub async fn book<R>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    Query(params): Query<BookParams>,
) -> Result<BookResponse, ApiError>
where
    R: EventRepository + Send + Sync + 'static,
{
    let event_id = parse_id(&id)?;
    let count = parse_count(params.count.as_deref()).map_err(TicketingError::from)?;
    let booking = state.booking_service.book_tickets(event_id, count).await?;
    Ok(BookResponse::Ok(Json(BookedBody {
        message: format!(
            "Successfully booked {} tickets for event ID {}",
            booking.booked, booking.event_id
        ),
    })))
}
