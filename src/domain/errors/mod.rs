// Domain errors - Error types for the domain layer

use thiserror::Error;

/// Domain-specific error types
#[derive(Error, Debug)]
pub enum DomainError {
    /// Time string did not match any accepted grammar
    #[error("Invalid time format: {input}")]
    Format { input: String },

    /// Input rejected by a validation rule
    #[error("{0}")]
    Validation(String),

    /// Duration lookup failed; callers degrade to an unknown duration
    #[error("Could not determine media duration: {0}")]
    ProbeFailure(String),

    /// The external cut process reported failure
    #[error("{detail}")]
    Process { detail: String },

    /// Standard input closed while a prompt was waiting
    #[error("Input closed before the session completed")]
    InputClosed,

    /// Remote source could not be downloaded
    #[error("Download failed: {0}")]
    Fetch(String),

    /// Configuration file or override is invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DomainError {
    /// Build a validation error from any message
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation(message.into())
    }

    /// Whether the error was caused by what the user submitted rather than
    /// by the processing backend
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            DomainError::Format { .. } | DomainError::Validation(_) | DomainError::Fetch(_)
        )
    }
}
