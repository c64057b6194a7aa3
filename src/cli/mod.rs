//! CLI module for avcut
//!
//! Argument parsing for both binaries and the interactive trimming session.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser};

use crate::config::CliOverrides;
use crate::utils::logging::LogLevel;

pub mod session;

pub use session::{Session, SessionOutcome};

/// Flags shared by every binary
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Configuration file (default: avcut.toml or config/avcut.toml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Logging level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<LogLevel>,
}

/// Interactive audio/video cutter
///
/// Prompts for a file, a start and an end time, then trims the segment with
/// FFmpeg using stream copy.
#[derive(Parser, Debug)]
#[command(name = "avcut")]
#[command(about = "Audio/Video Cut Application - trim a segment out of a media file")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub common: CommonArgs,
}

impl Cli {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            config_path: self.common.config.clone(),
            log_level: self.common.log_level,
            bind: None,
        }
    }
}

/// Web front-end for the audio/video cutter
#[derive(Parser, Debug)]
#[command(name = "avcut-web")]
#[command(about = "Serve a single-page form for trimming audio and video files")]
#[command(version)]
pub struct WebCli {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Address to listen on (default 127.0.0.1:7860)
    #[arg(long)]
    pub bind: Option<SocketAddr>,
}

impl WebCli {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            config_path: self.common.config.clone(),
            log_level: self.common.log_level,
            bind: self.bind,
        }
    }
}
