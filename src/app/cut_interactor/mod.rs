// Cut interactor - Probe and cut operations shared by both front-ends

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Interactor for duration lookup and cut execution
pub struct CutInteractor {
    probe_port: Arc<dyn ProbePort>,
    cut_port: Arc<dyn CutPort>,
}

impl CutInteractor {
    /// Create new cut interactor with injected ports
    pub fn new(probe_port: Arc<dyn ProbePort>, cut_port: Arc<dyn CutPort>) -> Self {
        Self {
            probe_port,
            cut_port,
        }
    }

    /// Best-effort duration lookup; always yields a handle
    pub async fn open(&self, path: &Path) -> MediaHandle {
        let duration = self.probe_port.duration(path).await;
        MediaHandle::new(path).with_duration(duration)
    }

    /// Run a cut job
    pub async fn cut(&self, job: &CutJob) -> Result<CutReport, DomainError> {
        let report = self.cut_port.cut(job).await?;
        info!(output = %report.output_path.display(), "Cut job finished");
        Ok(report)
    }

    /// Whether the cut tool can be started
    pub async fn tool_available(&self) -> bool {
        self.cut_port.is_available().await
    }
}

#[cfg(test)]
pub mod testing {
    //! In-memory ports for interactor and front-end tests

    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    /// Probe that always answers with a fixed duration
    pub struct FixedProbe(pub Option<f64>);

    #[async_trait]
    impl ProbePort for FixedProbe {
        async fn duration(&self, _file_path: &Path) -> Option<TimePoint> {
            self.0.and_then(|s| TimePoint::new(s).ok())
        }
    }

    /// Cut port that records jobs and returns a canned result
    pub struct RecordingCutter {
        pub fail_with: Option<String>,
        pub available: bool,
        pub jobs: Mutex<Vec<CutJob>>,
    }

    impl RecordingCutter {
        pub fn succeeding() -> Self {
            Self {
                fail_with: None,
                available: true,
                jobs: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(detail: &str) -> Self {
            Self {
                fail_with: Some(detail.to_string()),
                ..Self::succeeding()
            }
        }

        pub fn jobs(&self) -> Vec<CutJob> {
            self.jobs.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CutPort for RecordingCutter {
        async fn cut(&self, job: &CutJob) -> Result<CutReport, DomainError> {
            self.jobs.lock().unwrap().push(job.clone());
            match &self.fail_with {
                Some(detail) => Err(DomainError::Process {
                    detail: detail.clone(),
                }),
                None => Ok(CutReport {
                    output_path: job.destination.clone(),
                    bytes: Some(3 * 1024 * 1024),
                }),
            }
        }

        async fn is_available(&self) -> bool {
            self.available
        }
    }

    pub fn interactor(
        duration: Option<f64>,
        cutter: Arc<RecordingCutter>,
    ) -> CutInteractor {
        CutInteractor::new(
            Arc::new(FixedProbe(duration)),
            cutter as Arc<dyn CutPort>,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    #[tokio::test]
    async fn test_open_attaches_duration() {
        let cutter = Arc::new(RecordingCutter::succeeding());
        let handle = interactor(Some(95.5), cutter.clone())
            .open(Path::new("talk.mp3"))
            .await;
        assert_eq!(handle.duration.map(|d| d.as_seconds()), Some(95.5));

        let handle = interactor(None, cutter).open(Path::new("talk.mp3")).await;
        assert!(handle.duration.is_none());
    }

    #[tokio::test]
    async fn test_cut_delegates_to_port() {
        let cutter = Arc::new(RecordingCutter::failing("boom"));
        let job = CutJob::new(
            MediaHandle::new("a.mp4"),
            TimeRange::new(TimePoint::ZERO, TimePoint::new(1.0).unwrap()).unwrap(),
            "out.mp4",
            EncodingPolicy::StreamCopy,
        );
        let err = interactor(None, cutter.clone()).cut(&job).await.unwrap_err();
        assert_eq!(err.to_string(), "boom");
        assert_eq!(cutter.jobs(), vec![job]);
    }
}
