//! Interactive trimming session
//!
//! A linear prompt flow with back-edges on invalid input:
//! `AwaitFile → ProbeDuration → AwaitStart → AwaitEnd → AwaitConfirm → Cutting`,
//! ending in [`SessionOutcome`].

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::app::CutInteractor;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::utils::format_megabytes;
use crate::utils::time::{TimeParser, FORMAT_HINT};

const END_HINT: &str =
    "Please use format: seconds (60), minutes:seconds (2:30), or hours:minutes:seconds (2:30:45)";

/// Non-terminal session states
#[derive(Debug)]
enum SessionState {
    AwaitFile,
    ProbeDuration(PathBuf),
    AwaitStart(MediaHandle),
    AwaitEnd(MediaHandle, TimePoint),
    AwaitConfirm(CutJob),
    Cutting(CutJob),
}

/// How a session ended
#[derive(Debug)]
pub enum SessionOutcome {
    /// The cut succeeded
    Done(CutReport),
    /// The user declined at the confirmation prompt
    Cancelled,
    /// ffmpeg could not be started
    ToolMissing,
    /// The cut failed
    Failed(DomainError),
}

impl SessionOutcome {
    /// Process exit status for this outcome
    pub fn exit_code(&self) -> u8 {
        match self {
            SessionOutcome::Done(_) | SessionOutcome::Cancelled => 0,
            SessionOutcome::ToolMissing | SessionOutcome::Failed(_) => 1,
        }
    }
}

/// Prompt-driven session over any line reader and writer
pub struct Session<'a, R, W> {
    input: R,
    output: W,
    interactor: &'a CutInteractor,
    profile: SurfaceProfile,
    output_dir: PathBuf,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(
        input: R,
        output: W,
        interactor: &'a CutInteractor,
        profile: SurfaceProfile,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            input,
            output,
            interactor,
            profile,
            output_dir: output_dir.into(),
        }
    }

    /// Drive the session to completion
    ///
    /// Returns `Err` only when input closes or the terminal cannot be written.
    pub async fn run(mut self) -> Result<SessionOutcome, DomainError> {
        writeln!(self.output, "Audio/Video Cut Application")?;
        writeln!(self.output, "{}", "=".repeat(30))?;

        if !self.interactor.tool_available().await {
            writeln!(self.output, "Error: FFmpeg is not installed or not found in PATH.")?;
            writeln!(
                self.output,
                "Please install FFmpeg and make sure it's accessible from the command line."
            )?;
            writeln!(
                self.output,
                "Visit https://ffmpeg.org/download.html for installation instructions."
            )?;
            return Ok(SessionOutcome::ToolMissing);
        }

        let mut state = SessionState::AwaitFile;
        loop {
            debug!(?state, "Session state");
            state = match state {
                SessionState::AwaitFile => SessionState::ProbeDuration(self.await_file()?),
                SessionState::ProbeDuration(path) => {
                    SessionState::AwaitStart(self.probe_duration(&path).await?)
                }
                SessionState::AwaitStart(handle) => {
                    let start = self.await_start(&handle)?;
                    SessionState::AwaitEnd(handle, start)
                }
                SessionState::AwaitEnd(handle, start) => {
                    let end = self.await_end(&handle, start)?;
                    SessionState::AwaitConfirm(self.plan(handle, start, end)?)
                }
                SessionState::AwaitConfirm(job) => {
                    if self.await_confirm()? {
                        SessionState::Cutting(job)
                    } else {
                        writeln!(self.output, "Operation cancelled.")?;
                        info!("User declined the cut");
                        return Ok(SessionOutcome::Cancelled);
                    }
                }
                SessionState::Cutting(job) => return self.cut(job).await,
            };
        }
    }

    fn await_file(&mut self) -> Result<PathBuf, DomainError> {
        loop {
            let raw = self.prompt("Enter the path to the video/audio file: ")?;
            if raw.is_empty() {
                writeln!(self.output, "Please enter a valid file path.")?;
                continue;
            }

            let path = PathBuf::from(&raw);
            if !path.exists() {
                writeln!(self.output, "Error: File '{}' does not exist.", path.display())?;
                continue;
            }
            if !path.is_file() {
                writeln!(self.output, "Error: '{}' is not a file.", path.display())?;
                continue;
            }
            return Ok(path);
        }
    }

    async fn probe_duration(&mut self, path: &Path) -> Result<MediaHandle, DomainError> {
        writeln!(self.output, "\nAnalyzing media file...")?;
        let handle = self.interactor.open(path).await;

        match handle.duration {
            Some(duration) => writeln!(self.output, "Media duration: {}", duration)?,
            None => writeln!(self.output, "Warning: Could not determine media duration.")?,
        }
        Ok(handle)
    }

    fn await_start(&mut self, handle: &MediaHandle) -> Result<TimePoint, DomainError> {
        let parser = TimeParser::new(self.profile.grammar);
        loop {
            let raw = self.prompt("\nEnter start time (e.g., 10, 1:30, 1:30:45): ")?;
            if raw.is_empty() {
                writeln!(self.output, "Please enter a start time.")?;
                continue;
            }

            let start = match parser.parse(&raw) {
                Ok(start) => start,
                Err(e) => {
                    writeln!(self.output, "Error: {}", e)?;
                    writeln!(self.output, "{}", FORMAT_HINT)?;
                    continue;
                }
            };

            match RangeRules::check_start(start, handle.duration) {
                Ok(()) => return Ok(start),
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }
    }

    fn await_end(&mut self, handle: &MediaHandle, start: TimePoint) -> Result<TimePoint, DomainError> {
        let parser = TimeParser::new(self.profile.grammar);
        loop {
            let raw = self.prompt("Enter end time (e.g., 60, 2:30, 2:30:45): ")?;
            if raw.is_empty() {
                writeln!(self.output, "Please enter an end time.")?;
                continue;
            }

            let end = match parser.parse(&raw) {
                Ok(end) => end,
                Err(e) => {
                    writeln!(self.output, "Error: {}", e)?;
                    writeln!(self.output, "{}", END_HINT)?;
                    continue;
                }
            };

            match RangeRules::check_end(start, end, handle.duration) {
                Ok(()) => return Ok(end),
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }
    }

    /// Build the job and show where the output will land
    fn plan(&mut self, handle: MediaHandle, start: TimePoint, end: TimePoint) -> Result<CutJob, DomainError> {
        let range = TimeRange::new(start, end)?;
        let destination = self
            .output_dir
            .join(self.profile.naming.name(handle.path(), &range));
        writeln!(self.output, "\nOutput file: {}", destination.display())?;

        Ok(CutJob::new(handle, range, destination, self.profile.encoding.clone()))
    }

    fn await_confirm(&mut self) -> Result<bool, DomainError> {
        let answer = self.prompt("\nProceed with cutting? (y/n): ")?.to_lowercase();
        Ok(answer == "y" || answer == "yes")
    }

    async fn cut(&mut self, job: CutJob) -> Result<SessionOutcome, DomainError> {
        writeln!(
            self.output,
            "Cutting media from {} to {}...",
            job.range.start(),
            job.range.end()
        )?;
        writeln!(self.output, "Duration: {}", job.range.duration())?;
        self.output.flush()?;

        match self.interactor.cut(&job).await {
            Ok(report) => {
                writeln!(
                    self.output,
                    "\n✓ Successfully created: {}",
                    report.output_path.display()
                )?;
                match report.bytes {
                    Some(bytes) => writeln!(self.output, "File size: {}", format_megabytes(bytes))?,
                    None => writeln!(self.output, "File size: unknown")?,
                }
                Ok(SessionOutcome::Done(report))
            }
            Err(e) => {
                writeln!(self.output, "\n✗ Error cutting media: {}", e)?;
                Ok(SessionOutcome::Failed(e))
            }
        }
    }

    /// Print a prompt and read one trimmed line
    fn prompt(&mut self, text: &str) -> Result<String, DomainError> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(DomainError::InputClosed);
        }
        Ok(line.trim().to_string())
    }
}
