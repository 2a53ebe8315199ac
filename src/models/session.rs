use super::event::SessionKey;
use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::Serialize;

/// A session key whose add/delete history nets out strictly positive.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct ReconciledSession {
    pub timestamp: NaiveDateTime,
    pub location: String,
    pub net: i32,
}

impl ReconciledSession {
    pub fn from_key(key: SessionKey, net: i32) -> Self {
        Self {
            timestamp: key.timestamp,
            location: key.location,
            net,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Wall-clock hour as written in the log; no zone conversion.
    pub fn hour(&self) -> u32 {
        self.timestamp.hour()
    }

    pub fn scheduled_str(&self) -> String {
        self.timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}
