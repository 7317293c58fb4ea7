//! Configuration file.
//!
//! The configuration is a TOML file with three sections:
//! - `[storage]` - title file and snapshot file locations
//! - `[export]` - spreadsheet output directory and footer text
//! - `[upload]` - S3-compatible bucket settings and credentials
//!
//! Every field has a default, so an empty or missing file is valid.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub export: ExportConfig,
    pub upload: UploadConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub title_file: PathBuf,
    pub snapshot_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            title_file: PathBuf::from("title.txt"),
            snapshot_file: PathBuf::from("all_students_data.json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
    pub footer: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            footer: "Powered by classpoints".to_string(),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    pub enabled: bool,
    pub endpoint: String,
    pub bucket: String,
    pub region: String,
    /// Remote object names are `{prefix}_{YYYYMMDD_HHMMSS}.xlsx`.
    pub prefix: String,
    pub timeout_secs: u64,
    pub access_key: String,
    pub secret_key: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: String::new(),
            bucket: String::new(),
            region: "us-east-1".to_string(),
            prefix: "class_points".to_string(),
            timeout_secs: 30,
            access_key: String::new(),
            secret_key: String::new(),
        }
    }
}

impl std::fmt::Debug for UploadConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadConfig")
            .field("enabled", &self.enabled)
            .field("endpoint", &self.endpoint)
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .field("prefix", &self.prefix)
            .field("timeout_secs", &self.timeout_secs)
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

impl Config {
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::ConfigParseError(e.to_string()))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Load the file if it exists, otherwise use defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.storage.snapshot_file, PathBuf::from("all_students_data.json"));
        assert_eq!(config.upload.timeout_secs, 30);
        assert!(!config.upload.enabled);
    }

    #[test]
    fn test_partial_override() {
        let config = Config::parse(
            r#"
[export]
footer = "Room 204"

[upload]
enabled = true
bucket = "points"
endpoint = "https://s3.example.com"
"#,
        )
        .unwrap();

        assert_eq!(config.export.footer, "Room 204");
        assert_eq!(config.export.output_dir, PathBuf::from("."));
        assert!(config.upload.enabled);
        assert_eq!(config.upload.bucket, "points");
        assert_eq!(config.upload.region, "us-east-1");
        assert_eq!(config.upload.prefix, "class_points");
    }

    #[test]
    fn test_invalid_toml() {
        let err = Config::parse("[upload\nenabled = true").unwrap_err();
        assert!(matches!(err, Error::ConfigParseError(_)));

        let err = Config::parse("[upload]\ntimeout_secs = \"soon\"").unwrap_err();
        assert!(matches!(err, Error::ConfigParseError(_)));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let temp = TempDir::new().unwrap();
        let config = Config::load_or_default(temp.path().join("classpoints.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let upload = UploadConfig {
            secret_key: "hunter2".to_string(),
            ..Default::default()
        };
        let rendered = format!("{:?}", upload);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }
}
