use std::path::PathBuf;

use thiserror::Error;

use crate::category::Category;
use crate::upload::UploadError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Student not found: {0}")]
    NotFound(String),

    #[error("Malformed data: {0}")]
    MalformedData(String),

    #[error("Snapshot file not found: {}", path.display())]
    SnapshotNotFound { path: PathBuf },

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Score overflow for student {id} in {category}")]
    ScoreOverflow { id: String, category: Category },

    #[error("Config parse error: {0}")]
    ConfigParseError(String),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
