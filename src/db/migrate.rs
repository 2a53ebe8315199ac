use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// `snapshots` holds one row per import, `log_rows` the raw table rows of
/// each import in page order. Rows are never updated.
fn create_snapshot_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS snapshots (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            source      TEXT NOT NULL,
            row_count   INTEGER NOT NULL DEFAULT 0,
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS log_rows (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            snapshot_id  INTEGER NOT NULL REFERENCES snapshots(id) ON DELETE CASCADE,
            position     INTEGER NOT NULL,
            label        TEXT NOT NULL,
            detail       TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

fn migrate_index_log_rows(conn: &Connection) -> Result<()> {
    let version = "20250310_0001_index_log_rows_snapshot";
    if migration_applied(conn, version)? {
        return Ok(());
    }

    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_log_rows_snapshot ON log_rows(snapshot_id, position);",
    )?;
    mark_applied(conn, version, "Indexed log_rows by snapshot")?;
    Ok(())
}

fn migrate_add_snapshot_note(conn: &Connection) -> Result<()> {
    let version = "20250402_0002_add_snapshot_note";
    if migration_applied(conn, version)? {
        return Ok(());
    }

    conn.execute(
        "ALTER TABLE snapshots ADD COLUMN note TEXT NOT NULL DEFAULT '';",
        [],
    )?;
    mark_applied(conn, version, "Added note column to snapshots")?;
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;

    ensure_log_table(conn)?;

    if !table_exists(conn, "snapshots")? {
        create_snapshot_tables(conn)?;
        success("Created snapshot tables.");
    }

    migrate_index_log_rows(conn)?;
    migrate_add_snapshot_note(conn)?;

    Ok(())
}
