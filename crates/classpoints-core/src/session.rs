//! Application state owned by a running shell.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::Config;
use crate::directory::Directory;
use crate::error::{Error, Result};
use crate::export::XlsxExporter;
use crate::ledger::{Ledger, LoadReport, ScoreEntry, StudentRecord};
use crate::snapshot;
use crate::title::TitleStore;
use crate::upload::{S3Uploader, UploadError};

/// Ledger, directory and title of one session, plus the configuration that
/// locates their files. Every shell action borrows the session explicitly.
pub struct Session {
    config: Config,
    ledger: Ledger,
    directory: Directory,
    title: TitleStore,
}

impl Session {
    /// Start a session with an empty ledger.
    ///
    /// The title is read from its file and the directory is seeded from the
    /// snapshot file. An unreadable snapshot only leaves the directory empty.
    pub fn open(config: Config) -> Result<Self> {
        let title = TitleStore::load(&config.storage.title_file)?;
        let directory = load_directory(&config.storage.snapshot_file);

        Ok(Self {
            config,
            ledger: Ledger::new(),
            directory,
            title,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn title(&self) -> &str {
        self.title.title()
    }

    pub fn set_title(&mut self, title: &str) -> Result<()> {
        self.title.set(title)
    }

    pub fn snapshot_path(&self) -> &Path {
        &self.config.storage.snapshot_file
    }

    /// Name to prefill for a student id.
    pub fn lookup_name(&self, id: &str) -> Option<&str> {
        self.ledger
            .get(id)
            .map(StudentRecord::name)
            .or_else(|| self.directory.lookup(id))
    }

    /// Apply an entry and refresh the directory from the ledger.
    pub fn record_entry(&mut self, entry: &ScoreEntry) -> Result<&StudentRecord> {
        self.ledger.apply(entry)?;
        self.directory.absorb(&self.ledger);
        self.ledger
            .get(&entry.id)
            .ok_or_else(|| Error::NotFound(entry.id.trim().to_string()))
    }

    /// Save the whole ledger to the snapshot file.
    pub fn save_snapshot(&self) -> Result<PathBuf> {
        if self.ledger.is_empty() {
            return Err(Error::Validation(
                "no records to save; enter scores first".to_string(),
            ));
        }
        let path = self.snapshot_path().to_path_buf();
        snapshot::save(&path, &self.ledger)?;
        Ok(path)
    }

    /// Replace the ledger with the snapshot file and rebuild the directory
    /// from what was read.
    pub fn load_snapshot(&mut self) -> Result<LoadReport> {
        let (ledger, report) = snapshot::load(self.snapshot_path())?;
        self.ledger = ledger;
        self.directory = Directory::from_ledger(&self.ledger);
        Ok(report)
    }

    /// Load the snapshot if the file exists; report whether it did.
    pub fn load_snapshot_if_present(&mut self) -> Result<Option<LoadReport>> {
        if self.snapshot_path().exists() {
            self.load_snapshot().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Export the ledger under the current title.
    pub fn export(&self) -> Result<PathBuf> {
        XlsxExporter::new(&self.config.export).export(&self.ledger, self.title())
    }

    /// Uploader for the configured bucket, or `None` when uploads are disabled.
    pub fn uploader(&self) -> Option<S3Uploader> {
        self.config
            .upload
            .enabled
            .then(|| S3Uploader::from_config(&self.config.upload))
    }

    /// Upload a file with the configured uploader.
    pub fn upload(&self, path: &Path) -> Result<String> {
        let uploader = S3Uploader::from_config(&self.config.upload);
        let key = uploader.upload(path).map_err(|e: UploadError| {
            warn!("Upload of {} failed: {}", path.display(), e);
            Error::Upload(e)
        })?;
        info!("Upload finished as {}", key);
        Ok(key)
    }
}

fn load_directory(path: &Path) -> Directory {
    match Directory::load(path) {
        Ok(directory) => directory,
        Err(e) => {
            warn!("Failed to load student directory: {}", e);
            Directory::new()
        }
    }
}
