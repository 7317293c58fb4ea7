//! Student id to name lookup used to prefill names.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::ledger::Ledger;
use crate::snapshot::deserialize_student_id;

#[derive(Deserialize)]
struct DirectoryRecord {
    #[serde(alias = "学号", deserialize_with = "deserialize_student_id")]
    id: String,
    #[serde(alias = "姓名")]
    name: String,
}

#[derive(Debug, Clone, Default)]
pub struct Directory {
    names: HashMap<String, String>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read id/name pairs from a snapshot file. Scores are ignored, so a
    /// snapshot that fails full validation can still seed the directory.
    ///
    /// A missing file yields an empty directory.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::new());
        }
        let content = fs::read_to_string(path)?;
        let records: Vec<DirectoryRecord> = serde_json::from_str(&content)
            .map_err(|e| Error::MalformedData(format!("{}: {}", path.display(), e)))?;

        let mut directory = Self::new();
        for record in records {
            directory.insert(&record.id, &record.name);
        }
        Ok(directory)
    }

    /// Build a directory from the current ledger.
    pub fn from_ledger(ledger: &Ledger) -> Self {
        let mut directory = Self::new();
        directory.absorb(ledger);
        directory
    }

    /// Add or refresh every student of the ledger.
    pub fn absorb(&mut self, ledger: &Ledger) {
        for record in ledger.iter() {
            self.insert(record.id(), record.name());
        }
    }

    pub fn insert(&mut self, id: &str, name: &str) {
        let (id, name) = (id.trim(), name.trim());
        if !id.is_empty() && !name.is_empty() {
            self.names.insert(id.to_string(), name.to_string());
        }
    }

    pub fn lookup(&self, id: &str) -> Option<&str> {
        self.names.get(id.trim()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
