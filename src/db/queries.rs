use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::raw_row::RawLogRow;
use chrono::Local;
use rusqlite::{OptionalExtension, params};

#[derive(Debug, Clone)]
pub struct SnapshotInfo {
    pub id: i64,
    pub source: String,
    pub row_count: i64,
    pub created_at: String,
    pub note: String,
}

/// Store one extracted page as a new snapshot. Returns the snapshot id.
pub fn insert_snapshot(
    pool: &mut DbPool,
    source: &str,
    note: &str,
    rows: &[RawLogRow],
) -> AppResult<i64> {
    let tx = pool.conn.transaction()?;

    tx.execute(
        "INSERT INTO snapshots (source, row_count, created_at, note) VALUES (?1, ?2, ?3, ?4)",
        params![source, rows.len() as i64, Local::now().to_rfc3339(), note],
    )?;
    let snapshot_id = tx.last_insert_rowid();

    {
        let mut stmt = tx.prepare_cached(
            "INSERT INTO log_rows (snapshot_id, position, label, detail) VALUES (?1, ?2, ?3, ?4)",
        )?;
        for (pos, row) in rows.iter().enumerate() {
            stmt.execute(params![snapshot_id, pos as i64, row.label, row.detail])?;
        }
    }

    tx.commit()?;
    Ok(snapshot_id)
}

pub fn latest_snapshot_id(pool: &DbPool) -> AppResult<Option<i64>> {
    let id = pool
        .conn
        .query_row("SELECT MAX(id) FROM snapshots", [], |row| {
            row.get::<_, Option<i64>>(0)
        })?;
    Ok(id)
}

fn snapshot_exists(pool: &DbPool, id: i64) -> AppResult<bool> {
    let found = pool
        .conn
        .query_row("SELECT 1 FROM snapshots WHERE id = ?1", [id], |_| Ok(()))
        .optional()?;
    Ok(found.is_some())
}

/// The requested snapshot, or the latest one when none is given.
pub fn resolve_snapshot(pool: &DbPool, requested: Option<i64>) -> AppResult<i64> {
    match requested {
        Some(id) => {
            if snapshot_exists(pool, id)? {
                Ok(id)
            } else {
                Err(AppError::NoSnapshot(format!(" with id {id}")))
            }
        }
        None => latest_snapshot_id(pool)?
            .ok_or_else(|| AppError::NoSnapshot(": run `import` first".to_string())),
    }
}

/// Raw rows of a snapshot in their original page order.
pub fn load_rows(pool: &DbPool, snapshot_id: i64) -> AppResult<Vec<RawLogRow>> {
    let mut stmt = pool.conn.prepare(
        "SELECT label, detail FROM log_rows
         WHERE snapshot_id = ?1
         ORDER BY position ASC",
    )?;

    let rows = stmt.query_map([snapshot_id], |row| {
        Ok(RawLogRow {
            label: row.get(0)?,
            detail: row.get(1)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn list_snapshots(pool: &DbPool) -> AppResult<Vec<SnapshotInfo>> {
    let mut stmt = pool.conn.prepare(
        "SELECT id, source, row_count, created_at, note FROM snapshots ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(SnapshotInfo {
            id: row.get(0)?,
            source: row.get(1)?,
            row_count: row.get(2)?,
            created_at: row.get(3)?,
            note: row.get(4)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
