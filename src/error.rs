//! Error taxonomy for the data pipeline
//!
//! Load-time failures (missing files, missing columns) are fatal for the
//! session; `InvalidDate` is recoverable because it carries the full valid
//! set. Empty filter results are never errors.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AtlasError {
    /// Input CSV path unreadable. Startup aborts; no partial session.
    #[error("input file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// A required source column is absent. No best-effort schema is
    /// attempted for that load.
    #[error("missing required column '{column}' in {table} data")]
    MissingColumn {
        table: &'static str,
        column: String,
    },

    /// Requested report date is not among the distinct dates in the
    /// loaded community data. Carries the valid set so a caller can
    /// retry.
    #[error("report date '{requested}' not in loaded data; valid dates: [{}]", .valid.join(", "))]
    InvalidDate {
        requested: String,
        valid: Vec<String>,
    },

    /// Boundary WKT text that the geometry parser rejects.
    #[error("invalid boundary geometry: {detail}")]
    Geometry { detail: String },

    #[error(transparent)]
    Polars(#[from] polars::error::PolarsError),
}

pub type Result<T, E = AtlasError> = std::result::Result<T, E>;
