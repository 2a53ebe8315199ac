use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::aggregate::session_span;
use crate::core::logic::Core;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{load_rows, resolve_snapshot};
use crate::errors::{AppError, AppResult};
use crate::export::range::parse_range;
use crate::export::{ExportFormat, ExportLogic, read_sessions_csv};
use crate::models::location::LocationSet;
use crate::models::occupancy::OccupancyGrid;
use crate::models::session::ReconciledSession;
use crate::ui::messages::{header, info, warning};
use crate::utils::date::{days_between, today, weekday_short};
use crate::utils::path::expand_tilde;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Occupancy {
        range,
        locations,
        observed,
        snapshot,
        from_csv,
        format,
        file,
        force,
    } = cmd
    {
        // a bad range fails before any data is read
        let requested = range.as_deref().map(parse_range).transpose()?;

        let mut pool = None;

        let sessions: Vec<ReconciledSession> = match from_csv {
            Some(csv_file) => read_sessions_csv(&expand_tilde(csv_file))?,
            None => {
                let p = DbPool::new(&cfg.database)?;
                let id = resolve_snapshot(&p, *snapshot)?;
                let rows = load_rows(&p, id)?;
                pool = Some(p);
                Core::run_pipeline(&rows).sessions
            }
        };

        let (start, end) = match requested {
            Some(bounds) => bounds,
            None => session_span(&sessions).unwrap_or_else(|| (today(), today())),
        };

        let loc_set = if *observed {
            LocationSet::observed(&sessions)
        } else if let Some(list) = locations {
            LocationSet::from_csv_list(list)
        } else {
            cfg.location_set()
        };

        if loc_set.is_empty() {
            warning("Location set is empty; the grid has no cells.");
        }

        let grid = Core::build_occupancy(&sessions, start, end, &loc_set)?;

        if grid.unmapped > 0 {
            warning(format!(
                "{} sessions matched no location code and were left out",
                grid.unmapped
            ));
        }
        if grid.out_of_range > 0 {
            info(format!("{} sessions fall outside {start}..{end}", grid.out_of_range));
        }

        match file {
            Some(f) => {
                let fmt = match format {
                    Some(fmt) => *fmt,
                    None => ExportFormat::from_config(&cfg.default_format).ok_or_else(|| {
                        AppError::Config(format!("unknown default_format '{}'", cfg.default_format))
                    })?,
                };
                let path = expand_tilde(f);
                ExportLogic::export_grid(&grid, fmt, &path, *force)?;

                if let Some(p) = &pool
                    && let Err(e) = ttlog(
                        &p.conn,
                        "occupancy",
                        &format!("{start}:{end}"),
                        &format!("{} cells to {}", grid.len(), path.display()),
                    )
                {
                    warning(format!("Failed to write internal log: {}", e));
                }
            }
            None => print_grid(&grid),
        }
    }

    Ok(())
}

/// One date x hour matrix per location; zero cells shown as '.'.
fn print_grid(grid: &OccupancyGrid) {
    let (Some(start), Some(end)) = (grid.start, grid.end) else {
        return;
    };

    for loc in &grid.locations {
        header(format!("Location {loc}"));

        let mut cols = vec![Column::new("DATE", 14)];
        cols.extend((0..24).map(|h| Column::new(format!("{h:02}"), 2)));
        let mut table = Table::new(cols);

        for day in days_between(start, end) {
            let mut row = vec![format!("{} {}", day.format("%Y-%m-%d"), weekday_short(day))];
            for hour in 0..24 {
                let n = grid.get(day, hour, loc).unwrap_or(0);
                row.push(if n == 0 { ".".to_string() } else { n.to_string() });
            }
            table.add_row(row);
        }

        print!("{}", table.render());
    }

    info(format!("{} cells, {} sessions counted", grid.len(), grid.total()));
}
