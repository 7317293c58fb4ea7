use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Error, Result};

pub const DEFAULT_TITLE: &str = "Class Points";

/// Report title persisted as the whole content of a text file.
#[derive(Debug, Clone)]
pub struct TitleStore {
    path: PathBuf,
    title: String,
}

impl TitleStore {
    /// Load the title, falling back to [`DEFAULT_TITLE`] when the file is
    /// missing or blank.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let title = if path.exists() {
            let content = fs::read_to_string(&path)?;
            let content = content.trim();
            if content.is_empty() {
                DEFAULT_TITLE.to_string()
            } else {
                content.to_string()
            }
        } else {
            DEFAULT_TITLE.to_string()
        };
        Ok(Self { path, title })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Set and immediately persist a new title.
    pub fn set(&mut self, title: &str) -> Result<()> {
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::Validation("title must not be empty".to_string()));
        }
        fs::write(&self.path, title)?;
        self.title = title.to_string();
        info!("Title set to {:?}", self.title);
        Ok(())
    }
}
