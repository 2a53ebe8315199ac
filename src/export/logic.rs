// src/export/logic.rs

use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::CellRecord;
use crate::export::notify_export_success;
use crate::export::xlsx::export_xlsx;
use crate::export::write_sessions_csv;
use crate::models::occupancy::OccupancyGrid;
use crate::models::session::ReconciledSession;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Write every cell of the grid, zero cells included.
    pub fn export_grid(
        grid: &OccupancyGrid,
        format: ExportFormat,
        path: &Path,
        force: bool,
    ) -> AppResult<()> {
        check_parent(path)?;
        ensure_writable(path, force)?;

        let cells: Vec<CellRecord> = grid.cells().map(CellRecord::from).collect();

        match format {
            ExportFormat::Csv => export_csv(&cells, path),
            ExportFormat::Json => export_json(&cells, path),
            ExportFormat::Xlsx => export_xlsx(&cells, path),
        }
    }

    pub fn export_sessions(
        sessions: &[ReconciledSession],
        path: &Path,
        force: bool,
    ) -> AppResult<()> {
        check_parent(path)?;
        ensure_writable(path, force)?;

        write_sessions_csv(path, sessions)?;
        notify_export_success("Sessions CSV", path);
        Ok(())
    }
}

fn check_parent(path: &Path) -> AppResult<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.exists() => Err(AppError::Export(
            format!("directory does not exist: {}", dir.display()),
        )),
        _ => Ok(()),
    }
}
