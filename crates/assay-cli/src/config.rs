//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use assay::{AssayError, config::AppConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for AssayError {
    fn from(err: ConfigError) -> Self {
        AssayError::Config(err.to_string())
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (assay/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, AssayError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("assay/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "assay", "assay") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load configuration from a TOML file
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, AssayError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

fn parse_config(content: &str) -> Result<AppConfig, AssayError> {
    let config: AppConfig =
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sections() {
        let config = parse_config(
            r#"
            [placement]
            padding = 8.0
            max_attempts = 5
            snap_to_grid = false

            [placement.node_size]
            width = 120.0
            height = 60.0

            [visibility]
            default_expanded = true
            debounce_ms = 30
            "#,
        )
        .unwrap();

        assert_eq!(config.placement().padding(), 8.0);
        assert_eq!(config.placement().max_attempts(), 5);
        assert!(!config.placement().snap_to_grid());
        assert_eq!(config.placement().node_size().width(), 120.0);
        assert!(config.visibility().default_expanded());
        assert_eq!(config.visibility().debounce().as_millis(), 30);
    }

    #[test]
    fn test_empty_file_is_default() {
        let config = parse_config("").unwrap();
        assert_eq!(config.placement().grid_size(), 20.0);
        assert_eq!(config.visibility().snapshot_key(), None);
    }

    #[test]
    fn test_invalid_toml() {
        let err = parse_config("[placement\npadding = ").unwrap_err();
        assert!(matches!(err, AssayError::Config(_)));
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(dir.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("Missing configuration file"));
    }
}
