// Domain models - Core types and data structures

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::errors::DomainError;
use crate::utils::time::format_time;

/// A position in a media file, in seconds. Always finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TimePoint(f64);

impl TimePoint {
    /// Zero seconds
    pub const ZERO: TimePoint = TimePoint(0.0);

    /// Create a time point, rejecting NaN, infinities and negative values
    pub fn new(seconds: f64) -> Result<Self, DomainError> {
        if !seconds.is_finite() {
            return Err(DomainError::validation(format!(
                "Time must be a finite number of seconds, got {}",
                seconds
            )));
        }
        if seconds < 0.0 {
            return Err(DomainError::validation("Time cannot be negative"));
        }
        Ok(Self(seconds))
    }

    /// Seconds as a float
    pub fn as_seconds(&self) -> f64 {
        self.0
    }

    /// Convert to Duration
    pub fn to_duration(&self) -> Duration {
        Duration::from_secs_f64(self.0)
    }
}

impl fmt::Display for TimePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_time(self.0))
    }
}

/// Segment to extract; `end` is strictly after `start`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeRange {
    start: TimePoint,
    end: TimePoint,
}

impl TimeRange {
    /// Create a new range
    pub fn new(start: TimePoint, end: TimePoint) -> Result<Self, DomainError> {
        if end <= start {
            return Err(DomainError::validation(
                "End time must be greater than start time.",
            ));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> TimePoint {
        self.start
    }

    pub fn end(&self) -> TimePoint {
        self.end
    }

    /// Length of the segment
    pub fn duration(&self) -> TimePoint {
        // end > start and both are finite, so the difference is positive
        TimePoint(self.end.0 - self.start.0)
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

/// How a bare number without colons is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeGrammar {
    /// `10` means ten seconds
    Seconds,
    /// `10` means ten minutes, kept for forms that predate the seconds grammar
    LegacyMinutes,
}

/// How the cut process treats the compressed streams
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodingPolicy {
    /// Repackage streams without decoding
    StreamCopy,
    /// Always re-encode to a fixed codec pair
    Reencode {
        video_codec: String,
        audio_codec: String,
    },
}

/// A source file and whatever is known about its length
#[derive(Debug, Clone, PartialEq)]
pub struct MediaHandle {
    pub path: PathBuf,
    pub duration: Option<TimePoint>,
}

impl MediaHandle {
    /// Handle with unknown duration
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            duration: None,
        }
    }

    /// Attach the probed duration
    pub fn with_duration(mut self, duration: Option<TimePoint>) -> Self {
        self.duration = duration;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// A single trim request, consumed once by the cut port
#[derive(Debug, Clone, PartialEq)]
pub struct CutJob {
    pub source: MediaHandle,
    pub range: TimeRange,
    pub destination: PathBuf,
    pub encoding: EncodingPolicy,
}

impl CutJob {
    pub fn new(
        source: MediaHandle,
        range: TimeRange,
        destination: impl Into<PathBuf>,
        encoding: EncodingPolicy,
    ) -> Self {
        Self {
            source,
            range,
            destination: destination.into(),
            encoding,
        }
    }
}

/// Result of a successful cut
#[derive(Debug, Clone, PartialEq)]
pub struct CutReport {
    pub output_path: PathBuf,
    /// Output size, if the file could be inspected after the cut
    pub bytes: Option<u64>,
}
