//! Log record parser: one raw table row in, one classified event out.
//!
//! Detail cells look like
//! `2025-02-03 14:00:00 (PST) added session Midterm in 014 in CBTF Lab`.
//! The timestamp is the text before the parenthesised zone code, the
//! location is the first `in <X> in CBTF` span.

use crate::models::event::ParsedEvent;
use crate::models::event_kind::EventKind;
use crate::models::raw_row::RawLogRow;
use chrono::NaiveDateTime;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

static TIMESTAMP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<date>.+?) \((?P<tz>[A-Za-z]{3})\) added").expect("valid timestamp regex")
});

static LOCATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bin (?P<loc>.+?) in CBTF").expect("valid location regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformReason {
    /// No `<date> (<TZ>) added` prefix.
    NoTimestamp,
    /// Prefix found but the date text is not `YYYY-MM-DD HH:MM:SS`.
    BadTimestamp(String),
    /// No `in <location> in CBTF` span.
    NoLocation,
}

impl fmt::Display for MalformReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformReason::NoTimestamp => write!(f, "no timestamp prefix"),
            MalformReason::BadTimestamp(s) => write!(f, "unparseable timestamp '{s}'"),
            MalformReason::NoLocation => write!(f, "no 'in <location> in CBTF' span"),
        }
    }
}

/// An add/delete row whose detail text could not be fully extracted.
/// Reported as a warning; the row never reaches reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedRow {
    pub kind: EventKind,
    pub detail: String,
    pub reasons: Vec<MalformReason>,
}

impl fmt::Display for MalformedRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reasons: Vec<String> = self.reasons.iter().map(|r| r.to_string()).collect();
        write!(
            f,
            "malformed {} row ({}): {}",
            self.kind.as_str(),
            reasons.join(", "),
            self.detail
        )
    }
}

pub fn parse(row: &RawLogRow) -> ParsedEvent {
    parse_checked(row).0
}

/// Parse a row and report why an add/delete row is malformed, if it is.
pub fn parse_checked(row: &RawLogRow) -> (ParsedEvent, Option<MalformedRow>) {
    let kind = EventKind::from_label(&row.label);
    if !kind.is_mutation() {
        return (ParsedEvent::ignored(), None);
    }

    let mut reasons = Vec::new();
    let mut timestamp = None;
    let mut tz = None;

    match TIMESTAMP_RE.captures(&row.detail) {
        Some(caps) => {
            let raw = &caps["date"];
            tz = Some(caps["tz"].to_string());
            match NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT) {
                Ok(ts) => timestamp = Some(ts),
                Err(_) => reasons.push(MalformReason::BadTimestamp(raw.to_string())),
            }
        }
        None => reasons.push(MalformReason::NoTimestamp),
    }

    let location = LOCATION_RE
        .captures(&row.detail)
        .map(|caps| caps["loc"].trim().to_string())
        .filter(|loc| !loc.is_empty());
    if location.is_none() {
        reasons.push(MalformReason::NoLocation);
    }

    let event = ParsedEvent {
        kind,
        timestamp,
        location,
        tz,
    };

    let problem = (!reasons.is_empty()).then(|| MalformedRow {
        kind,
        detail: row.detail.clone(),
        reasons,
    });

    (event, problem)
}
