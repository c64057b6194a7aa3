//! FFprobe adapter for media duration lookup
//!
//! Asks `ffprobe` for the container-level duration and degrades to "unknown"
//! on any failure.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// FFprobe-based probe adapter
pub struct FFprobeAdapter {
    ffprobe: PathBuf,
    executor: Arc<dyn CommandExecutor>,
}

impl FFprobeAdapter {
    /// Create new FFprobe adapter
    pub fn new(ffprobe: impl Into<PathBuf>, executor: Arc<dyn CommandExecutor>) -> Self {
        Self {
            ffprobe: ffprobe.into(),
            executor,
        }
    }

    /// Command printing only the format duration, one bare number
    pub fn duration_command(&self, file_path: &Path) -> CommandSpec {
        CommandSpec::new(&self.ffprobe)
            .args([
                "-v",
                "quiet",
                "-show_entries",
                "format=duration",
                "-of",
                "default=noprint_wrappers=1:nokey=1",
            ])
            .arg(file_path)
    }

    async fn probe_duration(&self, file_path: &Path) -> Result<TimePoint, DomainError> {
        let output = self.executor.run(&self.duration_command(file_path)).await?;

        if !output.success {
            return Err(DomainError::ProbeFailure(format!(
                "ffprobe exited with status {:?}",
                output.code
            )));
        }

        let text = output.stdout.trim();
        let seconds: f64 = text
            .parse()
            .map_err(|_| DomainError::ProbeFailure(format!("non-numeric output '{}'", text)))?;

        if !seconds.is_finite() || seconds <= 0.0 {
            return Err(DomainError::ProbeFailure(format!(
                "unusable duration '{}'",
                text
            )));
        }

        TimePoint::new(seconds)
    }
}

#[async_trait]
impl ProbePort for FFprobeAdapter {
    async fn duration(&self, file_path: &Path) -> Option<TimePoint> {
        match self.probe_duration(file_path).await {
            Ok(duration) => {
                info!(file = %file_path.display(), %duration, "Probed media duration");
                Some(duration)
            }
            Err(e) => {
                warn!(file = %file_path.display(), error = %e, "Duration unavailable");
                None
            }
        }
    }
}
