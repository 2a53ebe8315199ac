use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::logic::{Core, PipelineReport};
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{load_rows, resolve_snapshot};
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::ui::messages::{header, info, warning};
use crate::utils::path::expand_tilde;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Sessions {
        snapshot,
        export,
        force,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;
        let id = resolve_snapshot(&pool, *snapshot)?;
        let rows = load_rows(&pool, id)?;

        let report = Core::run_pipeline(&rows);
        print_report(id, &report);

        if let Some(file) = export {
            let path = expand_tilde(file);
            ExportLogic::export_sessions(&report.sessions, &path, *force)?;

            if let Err(e) = ttlog(
                &pool.conn,
                "export",
                &format!("snapshot {id}"),
                &format!("{} sessions to {}", report.sessions.len(), path.display()),
            ) {
                warning(format!("Failed to write internal log: {}", e));
            }
        }
    }

    Ok(())
}

pub(crate) fn print_report(snapshot: i64, report: &PipelineReport) {
    header(format!("Snapshot {snapshot}"));
    info(format!(
        "{} rows: {} adds, {} deletes, {} ignored, {} malformed",
        report.rows_seen,
        report.adds,
        report.deletes,
        report.ignored,
        report.warnings.len()
    ));

    if report.sessions.is_empty() {
        info("No active sessions.");
        return;
    }

    let mut table = Table::new(vec![Column::new("Scheduled Date", 19), Column::new("Location", 8)]);
    for s in &report.sessions {
        table.add_row(vec![s.scheduled_str(), s.location.clone()]);
    }

    print!("{}", table.render());
    info(format!("{} active sessions", report.sessions.len()));
}
