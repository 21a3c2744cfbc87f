//! Booking: validated ticket quantities and booking receipts.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::EventId;

/// A strictly positive number of tickets requested in one booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TicketCount(i64);

impl TicketCount {
    #[must_use]
    pub fn get(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for TicketCount {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value <= 0 {
            return Err(ValidationError::NonPositiveCount);
        }
        Ok(Self(value))
    }
}

/// Receipt of a committed booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub event_id: EventId,
    /// Tickets taken by this booking.
    pub booked: i64,
    /// Tickets left on the event once the booking committed.
    pub remaining: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_accept_positive_count() {
        assert_eq!(TicketCount::try_from(1).unwrap().get(), 1);
        assert_eq!(TicketCount::try_from(250).unwrap().get(), 250);
    }

    #[test]
    fn should_reject_zero_and_negative_counts() {
        assert_eq!(
            TicketCount::try_from(0),
            Err(ValidationError::NonPositiveCount)
        );
        assert_eq!(
            TicketCount::try_from(-5),
            Err(ValidationError::NonPositiveCount)
        );
        assert_eq!(
            TicketCount::try_from(i64::MIN),
            Err(ValidationError::NonPositiveCount)
        );
    }
}
