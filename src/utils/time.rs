//! Time parsing and formatting utilities

use crate::domain::errors::DomainError;
use crate::domain::model::{TimeGrammar, TimePoint};

/// Hint printed after a rejected time string
pub const FORMAT_HINT: &str =
    "Please use format: seconds (10), minutes:seconds (1:30), or hours:minutes:seconds (1:30:45)";

/// Time parser for the accepted time grammars
#[derive(Debug, Clone, Copy)]
pub struct TimeParser {
    grammar: TimeGrammar,
}

impl TimeParser {
    /// Create a new time parser
    pub fn new(grammar: TimeGrammar) -> Self {
        Self { grammar }
    }

    pub fn grammar(&self) -> TimeGrammar {
        self.grammar
    }
}

impl Default for TimeParser {
    fn default() -> Self {
        Self::new(TimeGrammar::Seconds)
    }
}

impl TimeParser {
    /// Parse time string to a time point
    ///
    /// Accepted shapes, tried in order:
    /// - a bare decimal (`90.5`), read as seconds or minutes depending on the grammar
    /// - `M:S`
    /// - `H:M:S`
    pub fn parse(&self, time_str: &str) -> Result<TimePoint, DomainError> {
        let trimmed = time_str.trim();
        let invalid = || DomainError::Format {
            input: trimmed.to_string(),
        };

        if !trimmed.contains(':') {
            if !is_plain_decimal(trimmed) {
                return Err(invalid());
            }
            let value = parse_component(trimmed).ok_or_else(invalid)?;
            let seconds = match self.grammar {
                TimeGrammar::Seconds => value,
                TimeGrammar::LegacyMinutes => value * 60.0,
            };
            return TimePoint::new(seconds).map_err(|_| invalid());
        }

        let parts = trimmed
            .split(':')
            .map(parse_component)
            .collect::<Option<Vec<f64>>>()
            .ok_or_else(invalid)?;

        let seconds = match parts.as_slice() {
            [minutes, seconds] => minutes * 60.0 + seconds,
            [hours, minutes, seconds] => hours * 3600.0 + minutes * 60.0 + seconds,
            _ => return Err(invalid()),
        };

        TimePoint::new(seconds).map_err(|_| invalid())
    }
}

/// `digits` or `digits.digits`; the stricter shape for a time without colons
fn is_plain_decimal(text: &str) -> bool {
    let all_digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    match text.split_once('.') {
        Some((whole, fraction)) => all_digits(whole) && all_digits(fraction),
        None => all_digits(text),
    }
}

/// Parse one unsigned decimal component of a colon form (`12`, `12.5`, `.5`)
///
/// Signs, exponents and `inf`/`nan` are rejected even though `f64::from_str`
/// would take them.
fn parse_component(part: &str) -> Option<f64> {
    if part.is_empty() || part.matches('.').count() > 1 {
        return None;
    }
    if !part.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    if !part.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    part.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Format seconds as `HH:MM:SS.mmm`
pub fn format_time(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let secs = (total_ms % 60_000) / 1000;
    let millis = total_ms % 1000;

    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, secs, millis)
}
