use std::path::PathBuf;
use std::sync::Arc;

use crate::adapters::{FFmpegAdapter, FFprobeAdapter, HttpFetchAdapter, ProcessExecutor};
use crate::app::{cut_interactor::CutInteractor, submit_interactor::SubmitInteractor};
use crate::config::AppConfig;
use crate::ports::{CommandExecutor, CutPort, FetchPort, ProbePort};

/// Wires adapters to interactors from a resolved configuration
pub struct AppContainer {
    config: AppConfig,
    cut_interactor: Arc<CutInteractor>,
    fetch_port: Arc<dyn FetchPort>,
}

impl AppContainer {
    pub fn new(config: &AppConfig) -> Self {
        let executor: Arc<dyn CommandExecutor> = Arc::new(ProcessExecutor::new());
        let probe_port = Arc::new(FFprobeAdapter::new(
            &config.tools.ffprobe,
            Arc::clone(&executor),
        ));
        let cut_port = Arc::new(FFmpegAdapter::new(
            &config.tools.ffmpeg,
            Arc::clone(&executor),
        ));

        let cut_interactor = Arc::new(CutInteractor::new(
            probe_port as Arc<dyn ProbePort>,
            cut_port as Arc<dyn CutPort>,
        ));

        Self {
            config: config.clone(),
            cut_interactor,
            fetch_port: Arc::new(HttpFetchAdapter::new(
                config.web.max_download_bytes(),
                config.web.download_timeout(),
            )),
        }
    }

    pub fn cut_interactor(&self) -> Arc<CutInteractor> {
        Arc::clone(&self.cut_interactor)
    }

    /// Submit handler bound to a scratch directory owned by the caller
    pub fn submit_interactor(&self, scratch_dir: impl Into<PathBuf>) -> Arc<SubmitInteractor> {
        Arc::new(SubmitInteractor::new(
            self.cut_interactor(),
            Arc::clone(&self.fetch_port),
            scratch_dir,
            self.config.web.extension_policy(),
            self.config.web.profile(),
        ))
    }
}
