use super::event_kind::EventKind;
use chrono::NaiveDateTime;
use serde::Serialize;

/// Identity of a scheduled slot across its add/delete history.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SessionKey {
    pub timestamp: NaiveDateTime,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedEvent {
    pub kind: EventKind,
    pub timestamp: Option<NaiveDateTime>,
    pub location: Option<String>,
    /// Three-letter zone code from the detail text; informational only.
    pub tz: Option<String>,
}

impl ParsedEvent {
    pub fn ignored() -> Self {
        Self {
            kind: EventKind::Ignored,
            timestamp: None,
            location: None,
            tz: None,
        }
    }

    /// An add/delete that is missing its timestamp or location.
    pub fn is_malformed(&self) -> bool {
        self.kind.is_mutation() && (self.timestamp.is_none() || self.location.is_none())
    }

    /// Key for reconciliation; `None` for ignored or malformed events.
    pub fn key(&self) -> Option<SessionKey> {
        if !self.kind.is_mutation() {
            return None;
        }

        match (&self.timestamp, &self.location) {
            (Some(ts), Some(loc)) => Some(SessionKey {
                timestamp: *ts,
                location: loc.clone(),
            }),
            _ => None,
        }
    }
}
