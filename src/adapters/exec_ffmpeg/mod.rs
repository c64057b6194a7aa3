//! FFmpeg execution adapter
//!
//! Builds the trim command line and turns the process result into a
//! [`CutReport`] or a [`DomainError::Process`] carrying ffmpeg's diagnostics.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Audio encoder used when a re-encode targets an mp3 container
pub const MP3_AUDIO_CODEC: &str = "libmp3lame";

/// FFmpeg-based execution adapter
pub struct FFmpegAdapter {
    ffmpeg: PathBuf,
    executor: Arc<dyn CommandExecutor>,
}

impl FFmpegAdapter {
    /// Create new FFmpeg adapter
    pub fn new(ffmpeg: impl Into<PathBuf>, executor: Arc<dyn CommandExecutor>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            executor,
        }
    }

    /// Full command for a job
    pub fn cut_command(&self, job: &CutJob) -> CommandSpec {
        CommandSpec::new(&self.ffmpeg).args(build_cut_args(job))
    }
}

/// Argument vector for a trim
///
/// Seeks to the range start, limits the output to the range length, applies
/// the encoding policy, shifts timestamps so the output never starts negative
/// and overwrites an existing destination.
pub fn build_cut_args(job: &CutJob) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "-y".into(),
        "-i".into(),
        job.source.path.clone().into(),
        "-ss".into(),
        job.range.start().to_string().into(),
        "-t".into(),
        job.range.duration().to_string().into(),
    ];

    match &job.encoding {
        EncodingPolicy::StreamCopy => {
            args.extend(["-c".into(), "copy".into()]);
        }
        EncodingPolicy::Reencode {
            video_codec,
            audio_codec,
        } => {
            if is_audio_only(&job.destination) {
                args.extend(["-vn".into(), "-c:a".into(), MP3_AUDIO_CODEC.into()]);
            } else {
                args.extend([
                    "-c:v".into(),
                    video_codec.into(),
                    "-c:a".into(),
                    audio_codec.into(),
                ]);
            }
        }
    }

    args.extend(["-avoid_negative_ts".into(), "make_zero".into()]);
    args.push(job.destination.clone().into());
    args
}

/// Destinations that cannot carry a video stream
fn is_audio_only(destination: &Path) -> bool {
    destination
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("mp3"))
        .unwrap_or(false)
}

#[async_trait]
impl CutPort for FFmpegAdapter {
    async fn cut(&self, job: &CutJob) -> Result<CutReport, DomainError> {
        let command = self.cut_command(job);
        info!(
            input = %job.source.path.display(),
            output = %job.destination.display(),
            range = %job.range,
            "Cutting media"
        );
        debug!(command = %command, "ffmpeg command line");

        let output = self.executor.run(&command).await?;

        if !output.success {
            error!(code = ?output.code, "ffmpeg reported failure");
            return Err(DomainError::Process {
                detail: output.stderr,
            });
        }

        let bytes = tokio::fs::metadata(&job.destination)
            .await
            .map(|meta| meta.len())
            .ok();

        info!(output = %job.destination.display(), ?bytes, "Cut completed");
        Ok(CutReport {
            output_path: job.destination.clone(),
            bytes,
        })
    }

    async fn is_available(&self) -> bool {
        let command = CommandSpec::new(&self.ffmpeg).arg("-version");
        match self.executor.run(&command).await {
            Ok(output) => output.success,
            Err(e) => {
                debug!(error = %e, "ffmpeg not runnable");
                false
            }
        }
    }
}
