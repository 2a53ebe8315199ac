//! Hourly occupancy roll-up.

use crate::errors::{AppError, AppResult};
use crate::models::location::LocationSet;
use crate::models::occupancy::OccupancyGrid;
use crate::models::session::ReconciledSession;
use crate::utils::date::days_between;
use chrono::NaiveDate;

pub const HOURS_PER_DAY: u32 = 24;

/// Longest range the dense grid is built for (about ten years).
pub const MAX_RANGE_DAYS: i64 = 3660;

/// Reject `end < start` and spans too long to zero-fill.
pub fn check_span(start: NaiveDate, end: NaiveDate) -> AppResult<()> {
    if end < start {
        return Err(AppError::InvalidRange { start, end });
    }

    let days = (end - start).num_days() + 1;
    if days > MAX_RANGE_DAYS {
        return Err(AppError::InvalidRangeFormat(format!(
            "{start}:{end} spans {days} days, more than {MAX_RANGE_DAYS}"
        )));
    }
    Ok(())
}

/// Count sessions per (date, hour, canonical location) over `[start, end]`.
///
/// Every triple of the range is present in the result, zero-filled where no
/// session landed. Sessions outside the range or with a location that maps
/// to no code are left out and only counted on the grid. Spans longer than
/// [`MAX_RANGE_DAYS`] are refused.
pub fn aggregate(
    sessions: &[ReconciledSession],
    start: NaiveDate,
    end: NaiveDate,
    locations: &LocationSet,
) -> AppResult<OccupancyGrid> {
    check_span(start, end)?;

    let mut grid = OccupancyGrid {
        start: Some(start),
        end: Some(end),
        locations: locations.codes().to_vec(),
        ..Default::default()
    };

    for day in days_between(start, end) {
        for hour in 0..HOURS_PER_DAY {
            for code in locations.codes() {
                grid.counts.insert((day, hour, code.clone()), 0);
            }
        }
    }

    for s in sessions {
        let Some(code) = locations.canonical(&s.location) else {
            grid.unmapped += 1;
            continue;
        };

        let date = s.date();
        if date < start || date > end {
            grid.out_of_range += 1;
            continue;
        }

        if let Some(count) = grid.counts.get_mut(&(date, s.hour(), code.to_string())) {
            *count += 1;
        }
    }

    Ok(grid)
}

/// Smallest date range covering all sessions, if any.
pub fn session_span(sessions: &[ReconciledSession]) -> Option<(NaiveDate, NaiveDate)> {
    let first = sessions.iter().map(|s| s.date()).min()?;
    let last = sessions.iter().map(|s| s.date()).max()?;
    Some((first, last))
}
