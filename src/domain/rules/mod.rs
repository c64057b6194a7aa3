// Domain rules - Business logic and policies

use std::path::Path;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::utils::time::format_time;

/// Bounds checks for user-supplied start and end times
///
/// Every check against the total duration is skipped when the duration is
/// unknown.
pub struct RangeRules;

impl RangeRules {
    /// Validate a start time against the media duration
    ///
    /// Negative starts cannot reach here; `TimePoint::new` rejects them.
    pub fn check_start(start: TimePoint, total: Option<TimePoint>) -> Result<(), DomainError> {
        if let Some(total) = total {
            if start >= total {
                return Err(DomainError::validation(format!(
                    "Start time cannot be greater than or equal to media duration ({}).",
                    total
                )));
            }
        }
        Ok(())
    }

    /// Validate an end time against the chosen start and the media duration
    pub fn check_end(
        start: TimePoint,
        end: TimePoint,
        total: Option<TimePoint>,
    ) -> Result<(), DomainError> {
        if end <= start {
            return Err(DomainError::validation(
                "End time must be greater than start time.",
            ));
        }
        if let Some(total) = total {
            if end > total {
                return Err(DomainError::validation(format!(
                    "End time cannot be greater than media duration ({}).",
                    total
                )));
            }
        }
        Ok(())
    }

    /// Run both checks and build the range
    pub fn range(
        start: TimePoint,
        end: TimePoint,
        total: Option<TimePoint>,
    ) -> Result<TimeRange, DomainError> {
        Self::check_start(start, total)?;
        Self::check_end(start, end, total)?;
        TimeRange::new(start, end)
    }
}

/// Allow-list of file extensions accepted from uploads and URLs
#[derive(Debug, Clone)]
pub struct ExtensionPolicy {
    allowed: Vec<String>,
}

impl ExtensionPolicy {
    pub fn new<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            allowed: allowed
                .into_iter()
                .map(|ext| ext.as_ref().trim_start_matches('.').to_lowercase())
                .collect(),
        }
    }

    pub fn allowed(&self) -> &[String] {
        &self.allowed
    }

    /// Check a file name's extension, case-insensitively
    pub fn check(&self, file_name: &str) -> Result<(), DomainError> {
        let extension = Path::new(file_name)
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase());

        match extension {
            Some(ext) if self.allowed.iter().any(|allowed| *allowed == ext) => Ok(()),
            _ => Err(DomainError::validation(format!(
                "Unsupported file type for '{}'. Allowed extensions: {}",
                file_name,
                self.allowed.join(", ")
            ))),
        }
    }
}

impl Default for ExtensionPolicy {
    fn default() -> Self {
        Self::new(["mp3", "mp4"])
    }
}

/// Output file naming strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingPolicy {
    /// `{stem}_cut_{start}_to_{end}{ext}` with `:` replaced by `-`
    TimeRange,
    /// `cut_{basename}`, time range ignored
    CutPrefix,
}

impl NamingPolicy {
    /// Derive the output file name for a source path and range
    pub fn name(&self, input: &Path, range: &TimeRange) -> String {
        match self {
            NamingPolicy::TimeRange => {
                let stem = input
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let suffix = input
                    .extension()
                    .map(|ext| format!(".{}", ext.to_string_lossy()))
                    .unwrap_or_default();
                let start = format_time(range.start().as_seconds()).replace(':', "-");
                let end = format_time(range.end().as_seconds()).replace(':', "-");

                format!("{}_cut_{}_to_{}{}", stem, start, end, suffix)
            }
            NamingPolicy::CutPrefix => {
                let basename = input
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                format!("cut_{}", basename)
            }
        }
    }
}

/// The set of policies an entry point commits to
///
/// The two surfaces differ on purpose in how bare numbers are read, how
/// outputs are named and whether streams are re-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceProfile {
    pub grammar: TimeGrammar,
    pub naming: NamingPolicy,
    pub encoding: EncodingPolicy,
}

impl SurfaceProfile {
    /// Interactive terminal: seconds grammar, range-based names, stream copy
    pub fn cli() -> Self {
        Self {
            grammar: TimeGrammar::Seconds,
            naming: NamingPolicy::TimeRange,
            encoding: EncodingPolicy::StreamCopy,
        }
    }

    /// Web form: legacy minutes grammar, `cut_` prefix, fixed re-encode
    pub fn web(video_codec: impl Into<String>, audio_codec: impl Into<String>) -> Self {
        Self {
            grammar: TimeGrammar::LegacyMinutes,
            naming: NamingPolicy::CutPrefix,
            encoding: EncodingPolicy::Reencode {
                video_codec: video_codec.into(),
                audio_codec: audio_codec.into(),
            },
        }
    }
}
