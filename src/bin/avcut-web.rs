//! avcut-web - browser front-end for the audio/video cutter
//!
//! Serves a single form that accepts an upload or a URL together with a
//! start and end time, and answers with the trimmed file.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use avcut::app::AppContainer;
use avcut::cli::WebCli;
use avcut::config::AppConfig;
use avcut::utils::logging::{init_logging, LogLevel};
use avcut::web;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = WebCli::parse();
    let (config, source) = AppConfig::load(&cli.overrides())?;
    init_logging(&config.log, LogLevel::Info)?;
    source.log();

    // Held until shutdown so a generated scratch directory outlives the server
    let (scratch_dir, _scratch_guard) = match &config.web.scratch_dir {
        Some(dir) => {
            tokio::fs::create_dir_all(dir)
                .await
                .with_context(|| format!("Cannot create scratch directory {}", dir.display()))?;
            (dir.clone(), None)
        }
        None => {
            let temp = tempfile::Builder::new()
                .prefix("avcut-")
                .tempdir()
                .context("Cannot create a temporary scratch directory")?;
            (temp.path().to_path_buf(), Some(temp))
        }
    };
    info!(scratch = %scratch_dir.display(), "Using scratch directory");

    let container = AppContainer::new(&config);
    if !container.cut_interactor().tool_available().await {
        error!(ffmpeg = %config.tools.ffmpeg.display(), "FFmpeg is not installed or not found; cuts will fail");
    }

    let app = web::router(
        container.submit_interactor(&scratch_dir),
        config.web.max_upload_bytes(),
    );

    let listener = tokio::net::TcpListener::bind(config.web.bind)
        .await
        .with_context(|| format!("Cannot listen on {}", config.web.bind))?;
    info!(address = %config.web.bind, "avcut-web listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Web server failed")?;

    info!("avcut-web stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Cannot listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
