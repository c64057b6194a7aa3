//! Application configuration
//!
//! Precedence, highest first: command-line flags, `AVCUT_*` environment
//! variables, the TOML file, built-in defaults.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::adapters::toml_config::TomlConfigAdapter;
use crate::domain::errors::DomainError;
use crate::domain::rules::{ExtensionPolicy, SurfaceProfile};
use crate::utils::logging::{LogFormat, LogLevel, LoggingConfig};

/// Full application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tools: ToolsConfig,
    pub output: OutputConfig,
    pub web: WebConfig,
    pub log: LoggingConfig,
}

/// External programs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub ffmpeg: PathBuf,
    pub ffprobe: PathBuf,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ffmpeg: PathBuf::from("ffmpeg"),
            ffprobe: PathBuf::from("ffprobe"),
        }
    }
}

/// Where the CLI writes its cuts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Destination directory; the working directory when unset
    pub dir: Option<PathBuf>,
}

/// Web front-end settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    pub bind: SocketAddr,
    /// Shared folder for uploads, downloads and outputs; a temporary
    /// directory owned by the server when unset
    pub scratch_dir: Option<PathBuf>,
    pub allowed_extensions: Vec<String>,
    pub video_codec: String,
    pub audio_codec: String,
    /// Cap for uploads and URL downloads alike
    pub max_upload_mb: u64,
    pub download_timeout_secs: u64,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 7860)),
            scratch_dir: None,
            allowed_extensions: vec!["mp3".to_string(), "mp4".to_string()],
            video_codec: "libx264".to_string(),
            audio_codec: "aac".to_string(),
            max_upload_mb: 512,
            download_timeout_secs: 600,
        }
    }
}

impl WebConfig {
    pub fn extension_policy(&self) -> ExtensionPolicy {
        ExtensionPolicy::new(&self.allowed_extensions)
    }

    pub fn profile(&self) -> SurfaceProfile {
        SurfaceProfile::web(&self.video_codec, &self.audio_codec)
    }

    pub fn max_upload_bytes(&self) -> usize {
        usize::try_from(self.max_download_bytes()).unwrap_or(usize::MAX)
    }

    pub fn max_download_bytes(&self) -> u64 {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config_path: Option<PathBuf>,
    pub log_level: Option<LogLevel>,
    pub bind: Option<SocketAddr>,
}

/// Files searched when no explicit path is given
pub const CONFIG_SEARCH_PATHS: &[&str] = &["avcut.toml", "config/avcut.toml"];

/// Where the resolved configuration came from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigSource {
    /// File that was read, `None` when running on defaults
    pub file: Option<PathBuf>,
    /// Number of `AVCUT_*` variables applied
    pub env_overrides: usize,
}

impl ConfigSource {
    /// Report the source; call once the subscriber is installed
    pub fn log(&self) {
        match &self.file {
            Some(path) => info!("Loaded configuration from: {}", path.display()),
            None => info!("No configuration file found, using defaults"),
        }
        if self.env_overrides > 0 {
            info!("Applied {} environment variable overrides", self.env_overrides);
        }
    }
}

impl AppConfig {
    /// Resolve the configuration hierarchy
    pub fn load(overrides: &CliOverrides) -> Result<(Self, ConfigSource), DomainError> {
        let (file, mut config) = match &overrides.config_path {
            Some(path) => (Some(path.clone()), TomlConfigAdapter::load_file(path)?),
            None => match TomlConfigAdapter::discover(CONFIG_SEARCH_PATHS)? {
                Some((path, config)) => (Some(path), config),
                None => (None, AppConfig::default()),
            },
        };

        let env_overrides = config.apply_env(|key| std::env::var(key).ok())?;
        config.apply_cli(overrides);
        Ok((
            config,
            ConfigSource {
                file,
                env_overrides,
            },
        ))
    }

    /// Apply `AVCUT_*` overrides from a variable lookup, returning how many were set
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<usize, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut applied = 0;

        if let Some(value) = lookup("AVCUT_FFMPEG") {
            self.tools.ffmpeg = PathBuf::from(value);
            applied += 1;
        }
        if let Some(value) = lookup("AVCUT_FFPROBE") {
            self.tools.ffprobe = PathBuf::from(value);
            applied += 1;
        }
        if let Some(value) = lookup("AVCUT_OUTPUT_DIR") {
            self.output.dir = Some(PathBuf::from(value));
            applied += 1;
        }
        if let Some(value) = lookup("AVCUT_SCRATCH_DIR") {
            self.web.scratch_dir = Some(PathBuf::from(value));
            applied += 1;
        }
        if let Some(value) = lookup("AVCUT_BIND") {
            self.web.bind = value.parse().map_err(|e| {
                DomainError::Config(format!("Invalid AVCUT_BIND '{}': {}", value, e))
            })?;
            applied += 1;
        }
        if let Some(value) = lookup("AVCUT_LOG_LEVEL") {
            self.log.level = Some(value.parse()?);
            applied += 1;
        }
        if let Some(value) = lookup("AVCUT_LOG_FORMAT") {
            self.log.format = value.parse::<LogFormat>()?;
            applied += 1;
        }

        Ok(applied)
    }

    /// Apply command-line overrides
    pub fn apply_cli(&mut self, overrides: &CliOverrides) {
        if let Some(level) = overrides.log_level {
            self.log.level = Some(level);
        }
        if let Some(bind) = overrides.bind {
            self.web.bind = bind;
        }
    }
}
