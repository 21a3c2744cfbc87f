//! Typed identifier newtypes backed by store-assigned integers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Unique identifier for an [`Event`](crate::event::Event).
///
/// Assigned by the store when the event is created and never changed
/// afterwards. Serialises as a bare JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(i64);

impl EventId {
    /// Wrap a raw store identifier.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Access the raw store identifier.
    #[must_use]
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for EventId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| ValidationError::InvalidId(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_roundtrip_through_display_and_from_str() {
        let id = EventId::new(17);
        let text = id.to_string();
        assert_eq!(text, "17");
        let parsed: EventId = text.parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn should_serialize_as_bare_number() {
        let json = serde_json::to_string(&EventId::new(3)).unwrap();
        assert_eq!(json, "3");
        let parsed: EventId = serde_json::from_str("3").unwrap();
        assert_eq!(parsed.get(), 3);
    }

    #[test]
    fn should_return_error_when_parsing_non_numeric_id() {
        let result = EventId::from_str("abc");
        assert_eq!(result, Err(ValidationError::InvalidId("abc".to_string())));
    }

    #[test]
    fn should_order_by_raw_value() {
        assert!(EventId::new(1) < EventId::new(2));
    }
}
