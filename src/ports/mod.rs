// Ports - Interface definitions (contracts)

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::errors::*;
use crate::domain::model::*;

/// A program invocation: executable plus argument vector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: PathBuf,
    pub args: Vec<OsString>,
}

impl CommandSpec {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Arguments as lossy strings, for logging and assertions
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Exit status and captured streams of a finished process
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was killed by a signal
    pub code: Option<i32>,
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Port for running external programs to completion
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Run the command, capturing stdout and stderr
    ///
    /// Errors only when the process could not be started; a non-zero exit is
    /// reported through `CommandOutput::success`.
    async fn run(&self, command: &CommandSpec) -> Result<CommandOutput, DomainError>;
}

/// Port for media duration lookup
#[async_trait]
pub trait ProbePort: Send + Sync {
    /// Container-reported duration, or `None` when it cannot be determined
    async fn duration(&self, file_path: &Path) -> Option<TimePoint>;
}

/// Port for trimming media
#[async_trait]
pub trait CutPort: Send + Sync {
    /// Execute a cut job
    async fn cut(&self, job: &CutJob) -> Result<CutReport, DomainError>;

    /// Check that the cut tool is installed and runnable
    async fn is_available(&self) -> bool;
}

/// Port for retrieving remote media
#[async_trait]
pub trait FetchPort: Send + Sync {
    /// Download `url` to `destination`, returning the written path
    async fn fetch(&self, url: &str, destination: &Path) -> Result<PathBuf, DomainError>;
}
