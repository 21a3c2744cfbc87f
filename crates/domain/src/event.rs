//! Event: a bookable unit with a finite, shared ticket inventory.

use serde::{Deserialize, Serialize};

use crate::booking::TicketCount;
use crate::error::{InsufficientInventoryError, TicketingError, ValidationError};
use crate::id::EventId;

/// A persisted event.
///
/// `available_tickets` is never negative in any committed state. The only
/// way to lower it is [`Event::reserve`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub available_tickets: i64,
}

impl Event {
    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`TicketingError::Validation`] when `name` is empty or the
    /// inventory is negative.
    pub fn validate(&self) -> Result<(), TicketingError> {
        validate_fields(&self.name, self.available_tickets)
    }

    /// Take `count` tickets out of the remaining inventory.
    ///
    /// Leaves the event untouched when there are not enough tickets.
    ///
    /// # Errors
    ///
    /// Returns [`InsufficientInventoryError`] carrying both the requested
    /// and the available counts.
    pub fn reserve(&mut self, count: TicketCount) -> Result<(), InsufficientInventoryError> {
        let requested = count.get();
        if self.available_tickets < requested {
            return Err(InsufficientInventoryError {
                requested,
                available: self.available_tickets,
            });
        }
        self.available_tickets -= requested;
        Ok(())
    }
}

/// An event that has not been stored yet, so it has no id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEvent {
    pub name: String,
    pub available_tickets: i64,
}

impl NewEvent {
    /// Create a builder for constructing a [`NewEvent`].
    #[must_use]
    pub fn builder() -> NewEventBuilder {
        NewEventBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`TicketingError::Validation`] when `name` is empty or the
    /// inventory is negative.
    pub fn validate(&self) -> Result<(), TicketingError> {
        validate_fields(&self.name, self.available_tickets)
    }

    /// Attach the id the store assigned.
    #[must_use]
    pub fn with_id(self, id: EventId) -> Event {
        Event {
            id,
            name: self.name,
            available_tickets: self.available_tickets,
        }
    }
}

fn validate_fields(name: &str, available_tickets: i64) -> Result<(), TicketingError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName.into());
    }
    if available_tickets < 0 {
        return Err(ValidationError::NegativeInventory(available_tickets).into());
    }
    Ok(())
}

/// Step-by-step builder for [`NewEvent`].
#[derive(Debug, Default)]
pub struct NewEventBuilder {
    name: Option<String>,
    available_tickets: Option<i64>,
}

impl NewEventBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn available_tickets(mut self, available_tickets: i64) -> Self {
        self.available_tickets = Some(available_tickets);
        self
    }

    /// Consume the builder, validate, and return a [`NewEvent`].
    ///
    /// Inventory defaults to zero when not set.
    ///
    /// # Errors
    ///
    /// Returns [`TicketingError::Validation`] if `name` is missing or empty,
    /// or if the inventory is negative.
    pub fn build(self) -> Result<NewEvent, TicketingError> {
        let event = NewEvent {
            name: self.name.unwrap_or_default(),
            available_tickets: self.available_tickets.unwrap_or_default(),
        };
        event.validate()?;
        Ok(event)
    }
}
