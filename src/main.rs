//! avcut - interactive audio/video cutter
//!
//! Prompts for a media file, a start time and an end time, then trims that
//! segment with FFmpeg using stream copy.
//!
//! # Usage
//!
//! ```bash
//! avcut
//! avcut --log-level debug --config avcut.toml
//! ```

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use avcut::app::AppContainer;
use avcut::cli::{Cli, Session};
use avcut::config::AppConfig;
use avcut::domain::errors::DomainError;
use avcut::domain::rules::SurfaceProfile;
use avcut::utils::logging::{init_logging, LogLevel};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tokio::spawn(async {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!("\n\nOperation cancelled by user.");
            std::process::exit(1);
        }
    });

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!("Session aborted: {:#}", e);
            println!("\nUnexpected error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let (config, source) = AppConfig::load(&cli.overrides())?;
    init_logging(&config.log, LogLevel::Warn)?;
    source.log();
    info!("Starting avcut interactive session");

    let output_dir = match &config.output.dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("Cannot determine the working directory")?,
    };

    let container = AppContainer::new(&config);
    let interactor = container.cut_interactor();

    let session = Session::new(
        io::stdin().lock(),
        io::stdout(),
        &interactor,
        SurfaceProfile::cli(),
        output_dir,
    );

    match session.run().await {
        Ok(outcome) => {
            info!(?outcome, "Session finished");
            Ok(ExitCode::from(outcome.exit_code()))
        }
        Err(DomainError::InputClosed) => {
            println!();
            info!("Input closed before the session finished");
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}
