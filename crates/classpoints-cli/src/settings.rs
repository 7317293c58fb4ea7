//! Configuration lookup and command-line overrides.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use classpoints_core::Config;
use tracing::info;

const LOCAL_CONFIG: &str = "classpoints.toml";

/// Candidate config files in lookup order.
fn candidates(explicit: Option<&Path>) -> Vec<PathBuf> {
    if let Some(path) = explicit {
        return vec![path.to_path_buf()];
    }
    let mut paths = vec![PathBuf::from(LOCAL_CONFIG)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("classpoints").join("config.toml"));
    }
    paths
}

/// Load the first config file that exists, or defaults when none does.
///
/// An explicit `--config` path must exist.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit
        && !path.exists()
    {
        anyhow::bail!("Config file not found: {}", path.display());
    }

    for path in candidates(explicit) {
        if path.exists() {
            info!("Loading config from {}", path.display());
            return Config::load(&path)
                .with_context(|| format!("Failed to load config {}", path.display()));
        }
    }
    Ok(Config::default())
}

/// Replace configured credentials with the ones given on the command line
/// or through the environment.
pub fn apply_credentials(config: &mut Config, access_key: Option<&str>, secret_key: Option<&str>) {
    if let Some(key) = access_key.filter(|k| !k.trim().is_empty()) {
        config.upload.access_key = key.to_string();
    }
    if let Some(key) = secret_key.filter(|k| !k.trim().is_empty()) {
        config.upload.secret_key = key.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_config_is_loaded() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cp.toml");
        fs::write(&path, "[upload]\nbucket = \"room-9\"\n").unwrap();

        let config = load_config(Some(path.as_path())).unwrap();
        assert_eq!(config.upload.bucket, "room-9");
        assert!(!config.upload.enabled);
    }

    #[test]
    fn test_missing_explicit_config_is_error() {
        let temp = TempDir::new().unwrap();
        assert!(load_config(Some(temp.path().join("absent.toml").as_path())).is_err());
    }

    #[test]
    fn test_broken_config_is_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cp.toml");
        fs::write(&path, "[upload\n").unwrap();
        assert!(load_config(Some(path.as_path())).is_err());
    }

    #[test]
    fn test_explicit_config_is_only_candidate() {
        let path = PathBuf::from("/tmp/x.toml");
        assert_eq!(candidates(Some(path.as_path())), vec![path]);
        assert_eq!(candidates(None)[0], PathBuf::from(LOCAL_CONFIG));
    }

    #[test]
    fn test_credential_overrides() {
        let mut config = Config::default();
        config.upload.access_key = "from-file".to_string();

        apply_credentials(&mut config, Some("AKID"), None);
        assert_eq!(config.upload.access_key, "AKID");
        assert_eq!(config.upload.secret_key, "");

        apply_credentials(&mut config, Some("  "), Some("s3cr3t"));
        assert_eq!(config.upload.access_key, "AKID");
        assert_eq!(config.upload.secret_key, "s3cr3t");
    }
}
