use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Number of scheduled sessions in one (date, hour, location) slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OccupancyCell {
    pub date: NaiveDate,
    pub hour: u32,
    pub location: String,
    pub count: u32,
}

/// Dense occupancy matrix keyed by (date, hour, location).
///
/// Built only by the aggregator, which inserts every triple of the
/// requested range up front, so lookups inside the range never miss.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OccupancyGrid {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub locations: Vec<String>,
    pub(crate) counts: BTreeMap<(NaiveDate, u32, String), u32>,
    /// Sessions whose location matched no canonical code.
    pub unmapped: usize,
    /// Sessions that fell outside the requested dates.
    pub out_of_range: usize,
}

impl OccupancyGrid {
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn get(&self, date: NaiveDate, hour: u32, location: &str) -> Option<u32> {
        self.counts
            .get(&(date, hour, location.to_string()))
            .copied()
    }

    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    /// Cells ordered by date, hour, then location.
    pub fn cells(&self) -> impl Iterator<Item = OccupancyCell> + '_ {
        self.counts
            .iter()
            .map(|((date, hour, location), count)| OccupancyCell {
                date: *date,
                hour: *hour,
                location: location.clone(),
                count: *count,
            })
    }

    pub fn nonzero(&self) -> impl Iterator<Item = OccupancyCell> + '_ {
        self.cells().filter(|c| c.count > 0)
    }
}
