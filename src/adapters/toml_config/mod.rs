// TOML config adapter - Configuration files in TOML

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::AppConfig;
use crate::domain::errors::*;

/// Reads [`AppConfig`] from TOML files
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Load a specific file; a missing file is an error
    pub fn load_file(path: &Path) -> Result<AppConfig, DomainError> {
        if !path.exists() {
            return Err(DomainError::Config(format!(
                "Config file does not exist: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            DomainError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config = Self::parse(&content)
            .map_err(|e| DomainError::Config(format!("{}: {}", path.display(), e)))?;

        debug!(path = %path.display(), "Parsed configuration file");
        Ok(config)
    }

    /// Load the first existing file from `candidates`, with its path
    pub fn discover<P: AsRef<Path>>(
        candidates: &[P],
    ) -> Result<Option<(PathBuf, AppConfig)>, DomainError> {
        let found: Option<PathBuf> = candidates
            .iter()
            .map(|p| p.as_ref().to_path_buf())
            .find(|p| p.is_file());

        found
            .map(|path| Self::load_file(&path).map(|config| (path, config)))
            .transpose()
    }

    /// Parse TOML text; unspecified keys keep their defaults
    pub fn parse(content: &str) -> Result<AppConfig, DomainError> {
        toml::from_str(content)
            .map_err(|e| DomainError::Config(format!("Failed to parse TOML config: {}", e)))
    }

    /// Render a configuration back to TOML
    pub fn serialize(config: &AppConfig) -> Result<String, DomainError> {
        toml::to_string_pretty(config)
            .map_err(|e| DomainError::Config(format!("Failed to serialize config: {}", e)))
    }
}
