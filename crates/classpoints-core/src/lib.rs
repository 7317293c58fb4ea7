//! # classpoints-core
//!
//! Core library for the classroom points tracker.
//!
//! This crate provides:
//! - The score ledger with per-category adjustments and derived totals
//! - JSON snapshots of the ledger and the student directory used for autofill
//! - Spreadsheet export and upload to S3-compatible object storage
//! - Configuration and the session state shared by the shells

pub mod category;
pub mod config;
pub mod directory;
pub mod error;
pub mod export;
pub mod ledger;
pub mod session;
pub mod snapshot;
pub mod title;
pub mod upload;

pub use category::Category;
pub use config::{Config, ExportConfig, StorageConfig, UploadConfig};
pub use directory::Directory;
pub use error::{Error, Result};
pub use export::{SheetLayout, SheetRow, XlsxExporter, export_file_name};
pub use ledger::{Ledger, LoadReport, ScoreEntry, StudentRecord, TotalMismatch};
pub use session::Session;
pub use snapshot::SnapshotRecord;
pub use title::{DEFAULT_TITLE, TitleStore};
pub use upload::{Credentials, S3Uploader, UploadError};
