//! Spreadsheet export of the ledger.
//!
//! The sheet has a merged title banner, a spacer row, a header row, one row
//! per student in ledger order, and a merged footer directly below the data.

mod xlsx;

pub use xlsx::{render_workbook, write_workbook};

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Local};
use strum::EnumCount;
use tracing::info;

use crate::category::Category;
use crate::config::ExportConfig;
use crate::error::Result;
use crate::ledger::Ledger;

/// Timestamp format shared by export file names and remote object keys.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// One student row as rendered in the sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    pub id: String,
    pub name: String,
    pub scores: Vec<i64>,
    pub total: i64,
}

/// Row-by-row content of an exported sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetLayout {
    pub title: String,
    pub header: Vec<String>,
    pub rows: Vec<SheetRow>,
    pub footer: String,
}

impl SheetLayout {
    pub const TITLE_ROW: u32 = 0;
    pub const HEADER_ROW: u32 = 2;
    pub const FIRST_DATA_ROW: u32 = 3;

    pub fn from_ledger(ledger: &Ledger, title: &str, footer: &str) -> Self {
        let mut header = vec!["ID".to_string(), "Name".to_string()];
        header.extend(Category::all().map(|c| c.label().to_string()));
        header.push("Total".to_string());

        let rows = ledger
            .iter()
            .map(|record| SheetRow {
                id: record.id().to_string(),
                name: record.name().to_string(),
                scores: record.scores().map(|(_, score)| score).collect(),
                total: record.total(),
            })
            .collect();

        Self {
            title: title.to_string(),
            header,
            rows,
            footer: footer.to_string(),
        }
    }

    /// Number of columns: id, name, every category, total.
    pub fn column_count(&self) -> u16 {
        (Category::COUNT + 3) as u16
    }

    pub fn last_column(&self) -> u16 {
        self.column_count() - 1
    }

    pub fn data_row(&self, index: usize) -> u32 {
        Self::FIRST_DATA_ROW + index as u32
    }

    pub fn footer_row(&self) -> u32 {
        self.data_row(self.rows.len())
    }
}

/// `{title}_{YYYYMMDD_HHMMSS}.xlsx`, with characters that are not allowed in
/// file names replaced by `_`.
pub fn export_file_name(title: &str, now: &DateTime<Local>) -> String {
    format!(
        "{}_{}.xlsx",
        sanitize_file_stem(title),
        now.format(TIMESTAMP_FORMAT)
    )
}

fn sanitize_file_stem(title: &str) -> String {
    let stem: String = title
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    if stem.is_empty() {
        "export".to_string()
    } else {
        stem
    }
}

/// Writes ledger spreadsheets into the configured output directory.
#[derive(Debug, Clone)]
pub struct XlsxExporter {
    output_dir: PathBuf,
    footer: String,
}

impl XlsxExporter {
    pub fn new(config: &ExportConfig) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
            footer: config.footer.clone(),
        }
    }

    /// Export with the current local time in the file name.
    pub fn export(&self, ledger: &Ledger, title: &str) -> Result<PathBuf> {
        self.export_at(ledger, title, &Local::now())
    }

    pub fn export_at(&self, ledger: &Ledger, title: &str, now: &DateTime<Local>) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(export_file_name(title, now));

        let layout = SheetLayout::from_ledger(ledger, title, &self.footer);
        write_workbook(&layout, &path)?;

        info!("Exported {} rows to {}", layout.rows.len(), path.display());
        Ok(path)
    }
}
