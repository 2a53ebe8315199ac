//! Unified application error type.
//! Every module (db, core, collab, export, cli) returns AppError so the
//! binary has a single place where failures are reported.
//!
//! Dirty log data is NOT an error: malformed rows and unmapped locations
//! are carried as values in the pipeline report.

use chrono::NaiveDate;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("No imported snapshot found{0}")]
    NoSnapshot(String),

    // ---------------------------
    // Serialization
    // ---------------------------
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Parsing / caller contract
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid range: end {end} is before start {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Unsupported range format: {0}")]
    InvalidRangeFormat(String),

    // ---------------------------
    // Portal collaborators
    // ---------------------------
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Timed out waiting for the portal after {0} attempts")]
    AuthTimeout(u32),

    #[error("Log table extraction failed: {0}")]
    Extract(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
