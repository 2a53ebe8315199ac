use crate::core::aggregate::aggregate;
use crate::core::parser::{MalformedRow, parse_checked};
use crate::core::reconcile::reconcile;
use crate::errors::AppResult;
use crate::models::event::ParsedEvent;
use crate::models::event_kind::EventKind;
use crate::models::location::LocationSet;
use crate::models::occupancy::OccupancyGrid;
use crate::models::raw_row::RawLogRow;
use crate::models::session::ReconciledSession;
use crate::ui::messages::warning;
use chrono::NaiveDate;

/// Outcome of parsing + reconciling one batch of rows.
#[derive(Debug, Default)]
pub struct PipelineReport {
    pub rows_seen: usize,
    pub adds: usize,
    pub deletes: usize,
    pub ignored: usize,
    pub warnings: Vec<MalformedRow>,
    pub sessions: Vec<ReconciledSession>,
}

pub struct Core;

impl Core {
    /// Parse every row and reconcile the usable events, collecting one
    /// warning per malformed add/delete row. Nothing is printed.
    pub fn reconcile_rows(rows: &[RawLogRow]) -> PipelineReport {
        let mut report = PipelineReport {
            rows_seen: rows.len(),
            ..Default::default()
        };
        let mut events: Vec<ParsedEvent> = Vec::with_capacity(rows.len());

        for row in rows {
            let (event, problem) = parse_checked(row);

            if let Some(p) = problem {
                report.warnings.push(p);
                continue;
            }

            match event.kind {
                EventKind::Add => report.adds += 1,
                EventKind::Delete => report.deletes += 1,
                EventKind::Ignored => {
                    report.ignored += 1;
                    continue;
                }
            }

            events.push(event);
        }

        report.sessions = reconcile(&events);
        report
    }

    /// Same as [`Core::reconcile_rows`] but emits each warning on the console.
    pub fn run_pipeline(rows: &[RawLogRow]) -> PipelineReport {
        let report = Self::reconcile_rows(rows);
        for w in &report.warnings {
            warning(w);
        }
        report
    }

    pub fn build_occupancy(
        sessions: &[ReconciledSession],
        start: NaiveDate,
        end: NaiveDate,
        locations: &LocationSet,
    ) -> AppResult<OccupancyGrid> {
        aggregate(sessions, start, end, locations)
    }
}
