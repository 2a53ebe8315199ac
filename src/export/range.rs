// src/export/range.rs

use crate::core::aggregate::check_span;
use crate::errors::{AppError, AppResult};
use crate::utils::date::month_last_day;
use chrono::NaiveDate;

/// Parse a --range expression into inclusive calendar bounds.
///
/// Accepted shapes:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - YYYY:YYYY
/// - YYYY-MM:YYYY-MM
/// - YYYY-MM-DD:YYYY-MM-DD
///
/// A well-formed range whose end precedes its start is rejected with
/// [`AppError::InvalidRange`], one longer than
/// [`MAX_RANGE_DAYS`](crate::core::aggregate::MAX_RANGE_DAYS) with
/// [`AppError::InvalidRangeFormat`].
pub fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let (start, end) = match r.split_once(':') {
        Some((s, e)) => {
            let (s, e) = (s.trim(), e.trim());
            if s.len() != e.len() {
                return Err(AppError::InvalidRangeFormat(format!(
                    "{r}: start and end must have the same format"
                )));
            }
            (period_bounds(s)?.0, period_bounds(e)?.1)
        }
        None => period_bounds(r.trim())?,
    };

    check_span(start, end)?;
    Ok((start, end))
}

/// First and last day of a single YYYY / YYYY-MM / YYYY-MM-DD period.
fn period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let bad = || AppError::InvalidRangeFormat(p.to_string());

    match p.len() {
        // YYYY
        4 => {
            let y: i32 = p.parse().map_err(|_| bad())?;
            let d1 = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(bad)?;
            let d2 = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(bad)?;
            Ok((d1, d2))
        }
        // YYYY-MM
        7 => {
            let (ys, ms) = p.split_once('-').ok_or_else(bad)?;
            let y: i32 = ys.parse().map_err(|_| bad())?;
            let m: u32 = ms.parse().map_err(|_| bad())?;
            let last = month_last_day(y, m).ok_or_else(bad)?;
            let d1 = NaiveDate::from_ymd_opt(y, m, 1).ok_or_else(bad)?;
            let d2 = NaiveDate::from_ymd_opt(y, m, last).ok_or_else(bad)?;
            Ok((d1, d2))
        }
        // YYYY-MM-DD
        10 => {
            let d = NaiveDate::parse_from_str(p, "%Y-%m-%d")
                .map_err(|_| AppError::InvalidDate(p.to_string()))?;
            Ok((d, d))
        }
        _ => Err(bad()),
    }
}
