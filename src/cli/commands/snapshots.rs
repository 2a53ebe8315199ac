use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::queries::list_snapshots;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::table::{Column, Table};

pub fn handle(cfg: &Config) -> AppResult<()> {
    let pool = DbPool::new(&cfg.database)?;
    let snaps = list_snapshots(&pool)?;

    if snaps.is_empty() {
        info("No snapshots imported yet.");
        return Ok(());
    }

    let mut table = Table::new(vec![
        Column::new("ID", 4),
        Column::new("ROWS", 6),
        Column::new("CREATED", 25),
        Column::new("SOURCE", 30),
        Column::new("NOTE", 10),
    ]);

    for s in snaps {
        table.add_row(vec![
            s.id.to_string(),
            s.row_count.to_string(),
            s.created_at,
            s.source,
            s.note,
        ]);
    }

    print!("{}", table.render());
    Ok(())
}
