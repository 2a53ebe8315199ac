//! Reconciled-session checkpoint: a CSV with `Scheduled Date,Location`
//! columns sitting between the scrape and the occupancy report.

use crate::core::parser::TIMESTAMP_FORMAT;
use crate::errors::{AppError, AppResult};
use crate::export::model::SessionRecord;
use crate::models::session::ReconciledSession;
use chrono::NaiveDateTime;
use std::path::Path;

pub fn write_sessions_csv(path: &Path, sessions: &[ReconciledSession]) -> AppResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    if sessions.is_empty() {
        // serde only emits the header with the first record
        wtr.write_record(["Scheduled Date", "Location"])?;
    }

    for s in sessions {
        wtr.serialize(SessionRecord::from(s))?;
    }

    wtr.flush()?;
    Ok(())
}

/// Read a checkpoint back. Each line is one active session.
pub fn read_sessions_csv(path: &Path) -> AppResult<Vec<ReconciledSession>> {
    let mut rdr = csv::Reader::from_path(path)?;
    let mut out = Vec::new();

    for rec in rdr.deserialize::<SessionRecord>() {
        let rec = rec?;
        let timestamp = NaiveDateTime::parse_from_str(&rec.scheduled, TIMESTAMP_FORMAT)
            .map_err(|_| AppError::InvalidDate(rec.scheduled.clone()))?;

        out.push(ReconciledSession {
            timestamp,
            location: rec.location,
            net: 1,
        });
    }

    Ok(out)
}
