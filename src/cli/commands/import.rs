use crate::cli::parser::Commands;
use crate::collab::extractor::{HtmlTableExtractor, TableExtractor, TsvExtractor};
use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::insert_snapshot;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use crate::utils::path::expand_tilde;
use std::fs;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Import { html, tsv, note } = cmd {
        let (source, rows) = match (html, tsv) {
            (Some(file), _) => {
                let markup = fs::read_to_string(expand_tilde(file))?;
                let rows = HtmlTableExtractor::new(markup, cfg.columns()).extract()?;
                // a saved page is a copy of the staff log
                (format!("{} ({})", cfg.log_url, file), rows)
            }
            (None, Some(file)) => {
                let text = fs::read_to_string(expand_tilde(file))?;
                (file.clone(), TsvExtractor::new(text).extract()?)
            }
            (None, None) => {
                return Err(AppError::Other("either --html or --tsv is required".into()));
            }
        };

        if rows.is_empty() {
            warning(format!("No log rows found in {}", source));
        }

        let mut pool = DbPool::new(&cfg.database)?;
        let id = insert_snapshot(&mut pool, &source, note, &rows)?;

        if let Err(e) = ttlog(
            &pool.conn,
            "import",
            &format!("snapshot {id}"),
            &format!("{} rows from {}", rows.len(), source),
        ) {
            warning(format!("Failed to write internal log: {}", e));
        }

        success(format!("Imported {} rows as snapshot {}", rows.len(), id));
    }

    Ok(())
}
