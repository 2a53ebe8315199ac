// src/export/model.rs

use crate::models::occupancy::OccupancyCell;
use crate::models::session::ReconciledSession;
use serde::{Deserialize, Serialize};

/// One line of the reconciled-session checkpoint file.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SessionRecord {
    #[serde(rename = "Scheduled Date")]
    pub scheduled: String,
    #[serde(rename = "Location")]
    pub location: String,
}

impl From<&ReconciledSession> for SessionRecord {
    fn from(s: &ReconciledSession) -> Self {
        Self {
            scheduled: s.scheduled_str(),
            location: s.location.clone(),
        }
    }
}

/// Flat occupancy cell for CSV / JSON / XLSX.
#[derive(Serialize, Clone, Debug)]
pub struct CellRecord {
    pub date: String,
    pub hour: u32,
    pub location: String,
    pub count: u32,
}

impl From<OccupancyCell> for CellRecord {
    fn from(c: OccupancyCell) -> Self {
        Self {
            date: c.date.format("%Y-%m-%d").to_string(),
            hour: c.hour,
            location: c.location,
            count: c.count,
        }
    }
}

pub(crate) fn get_headers() -> Vec<&'static str> {
    vec!["date", "hour", "location", "count"]
}

pub(crate) fn cell_to_row(c: &CellRecord) -> Vec<String> {
    vec![
        c.date.clone(),
        c.hour.to_string(),
        c.location.clone(),
        c.count.to_string(),
    ]
}
