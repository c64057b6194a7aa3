// Submit interactor - Single-shot form submission for the web front-end

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use crate::adapters::fetch_http::url_file_name;
use crate::app::cut_interactor::CutInteractor;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::ports::*;
use crate::utils::time::TimeParser;

/// An uploaded file as received from the form
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Raw form fields
#[derive(Debug, Clone, Default)]
pub struct SubmitRequest {
    pub url: Option<String>,
    pub upload: Option<Upload>,
    pub start: String,
    pub end: String,
    pub use_end_of_file: bool,
}

/// Where the media for a submission comes from
#[derive(Debug)]
enum Source<'a> {
    Remote { url: &'a str, file_name: String },
    Uploaded { file_name: String, bytes: &'a [u8] },
}

impl Source<'_> {
    fn file_name(&self) -> &str {
        match self {
            Source::Remote { file_name, .. } | Source::Uploaded { file_name, .. } => file_name,
        }
    }
}

/// Interactor handling one web submission end to end
pub struct SubmitInteractor {
    cut_interactor: Arc<CutInteractor>,
    fetch_port: Arc<dyn FetchPort>,
    scratch_dir: PathBuf,
    extensions: ExtensionPolicy,
    profile: SurfaceProfile,
}

impl SubmitInteractor {
    pub fn new(
        cut_interactor: Arc<CutInteractor>,
        fetch_port: Arc<dyn FetchPort>,
        scratch_dir: impl Into<PathBuf>,
        extensions: ExtensionPolicy,
        profile: SurfaceProfile,
    ) -> Self {
        Self {
            cut_interactor,
            fetch_port,
            scratch_dir: scratch_dir.into(),
            extensions,
            profile,
        }
    }

    pub fn scratch_dir(&self) -> &Path {
        &self.scratch_dir
    }

    /// Validate, fetch or store, probe and cut
    pub async fn submit(&self, request: SubmitRequest) -> Result<CutReport, DomainError> {
        let source = select_source(&request)?;
        self.extensions.check(source.file_name())?;

        let parser = TimeParser::new(self.profile.grammar);
        let start = parser.parse(&request.start)?;
        let requested_end = if request.use_end_of_file {
            None
        } else {
            Some(parser.parse(&request.end)?)
        };

        let input = self.materialise(&source).await?;
        let handle = self.cut_interactor.open(&input).await;

        let end = match requested_end {
            Some(end) => end,
            None => handle.duration.ok_or_else(|| {
                DomainError::validation(
                    "Cannot cut to the end of the file: media duration is unknown",
                )
            })?,
        };
        let range = RangeRules::range(start, end, handle.duration)?;

        let destination = self
            .scratch_dir
            .join(self.profile.naming.name(handle.path(), &range));
        let job = CutJob::new(handle, range, destination, self.profile.encoding.clone());

        info!(range = %job.range, output = %job.destination.display(), "Processing web submission");
        self.cut_interactor.cut(&job).await
    }

    /// Put the source media into the scratch directory
    async fn materialise(&self, source: &Source<'_>) -> Result<PathBuf, DomainError> {
        tokio::fs::create_dir_all(&self.scratch_dir).await?;
        let destination = self.scratch_dir.join(source.file_name());

        match source {
            Source::Remote { url, .. } => self.fetch_port.fetch(url, &destination).await,
            Source::Uploaded { bytes, .. } => {
                tokio::fs::write(&destination, bytes).await?;
                Ok(destination)
            }
        }
    }
}

/// A non-empty URL takes priority over an upload
fn select_source(request: &SubmitRequest) -> Result<Source<'_>, DomainError> {
    let url = request
        .url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty());

    if let Some(url) = url {
        if request.upload.is_some() {
            warn!("Both a URL and an upload were submitted; using the URL");
        }
        return Ok(Source::Remote {
            url,
            file_name: url_file_name(url)?,
        });
    }

    match &request.upload {
        Some(upload) => {
            // Only the final component is kept so uploads cannot escape the scratch directory
            let file_name = Path::new(&upload.file_name)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .filter(|name| !name.is_empty())
                .ok_or_else(|| DomainError::validation("Uploaded file has no name"))?;
            Ok(Source::Uploaded {
                file_name,
                bytes: &upload.bytes,
            })
        }
        None => Err(DomainError::validation(
            "Please upload a file or provide a URL",
        )),
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use crate::app::cut_interactor::testing::*;

    struct Fixture {
        interactor: SubmitInteractor,
        cutter: Arc<RecordingCutter>,
        fetcher: Arc<RecordingFetcher>,
        _scratch: tempfile::TempDir,
    }

    fn fixture(duration: Option<f64>) -> Fixture {
        let scratch = tempfile::tempdir().unwrap();
        let cutter = Arc::new(RecordingCutter::succeeding());
        let fetcher = Arc::new(RecordingFetcher::default());
        let interactor = SubmitInteractor::new(
            Arc::new(interactor(duration, cutter.clone())),
            fetcher.clone() as Arc<dyn FetchPort>,
            scratch.path(),
            ExtensionPolicy::default(),
            SurfaceProfile::web("libx264", "aac"),
        );
        Fixture {
            interactor,
            cutter,
            fetcher,
            _scratch: scratch,
        }
    }

    fn upload(name: &str) -> Option<Upload> {
        Some(Upload {
            file_name: name.to_string(),
            bytes: b"uploaded media".to_vec(),
        })
    }

    #[tokio::test]
    async fn test_upload_is_cut_with_web_policies() {
        let f = fixture(Some(1200.0));
        let report = f
            .interactor
            .submit(SubmitRequest {
                upload: upload("song.mp3"),
                start: "1".into(),
                end: "2:30".into(),
                ..Default::default()
            })
            .await
            .unwrap();

        let scratch = f.interactor.scratch_dir();
        assert_eq!(report.output_path, scratch.join("cut_song.mp3"));
        assert!(scratch.join("song.mp3").is_file());

        let jobs = f.cutter.jobs();
        assert_eq!(jobs.len(), 1);
        // A bare number is read as minutes on the web form
        assert_eq!(jobs[0].range.start().as_seconds(), 60.0);
        assert_eq!(jobs[0].range.end().as_seconds(), 150.0);
        assert!(matches!(jobs[0].encoding, EncodingPolicy::Reencode { .. }));
        assert!(f.fetcher.urls().is_empty());
    }

    #[tokio::test]
    async fn test_url_wins_over_upload() {
        let f = fixture(Some(600.0));
        let report = f
            .interactor
            .submit(SubmitRequest {
                url: Some(" https://media.example.com/shows/ep1.mp4 ".into()),
                upload: upload("local.mp3"),
                start: "0:10".into(),
                end: "0:20".into(),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(f.fetcher.urls(), ["https://media.example.com/shows/ep1.mp4"]);
        assert_eq!(
            report.output_path,
            f.interactor.scratch_dir().join("cut_ep1.mp4")
        );
        assert!(!f.interactor.scratch_dir().join("local.mp3").exists());
    }

    #[tokio::test]
    async fn test_disallowed_extension_rejected_before_any_work() {
        let f = fixture(Some(600.0));

        let err = f
            .interactor
            .submit(SubmitRequest {
                upload: upload("holiday.mov"),
                start: "0".into(),
                end: "1".into(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = f
            .interactor
            .submit(SubmitRequest {
                url: Some("https://media.example.com/holiday.mov".into()),
                start: "0".into(),
                end: "1".into(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(err.is_input_error());

        assert!(f.fetcher.urls().is_empty());
        assert!(f.cutter.jobs().is_empty());
        assert!(!f.interactor.scratch_dir().join("holiday.mov").exists());
    }

    #[tokio::test]
    async fn test_use_end_of_file_takes_probed_duration() {
        let f = fixture(Some(245.5));
        f.interactor
            .submit(SubmitRequest {
                upload: upload("talk.mp4"),
                start: "2".into(),
                end: "garbage is ignored".into(),
                use_end_of_file: true,
                ..Default::default()
            })
            .await
            .unwrap();

        let jobs = f.cutter.jobs();
        assert_eq!(jobs[0].range.end().as_seconds(), 245.5);
    }

    #[tokio::test]
    async fn test_use_end_of_file_requires_known_duration() {
        let f = fixture(None);
        let err = f
            .interactor
            .submit(SubmitRequest {
                upload: upload("talk.mp4"),
                start: "0".into(),
                use_end_of_file: true,
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(err.to_string().contains("duration is unknown"));
        assert!(f.cutter.jobs().is_empty());
    }

    #[tokio::test]
    async fn test_out_of_range_and_malformed_times() {
        let f = fixture(Some(120.0));

        let beyond = f
            .interactor
            .submit(SubmitRequest {
                upload: upload("a.mp4"),
                start: "1".into(),
                end: "3".into(), // three minutes, past the two-minute file
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(beyond, DomainError::Validation(_)));

        let malformed = f
            .interactor
            .submit(SubmitRequest {
                upload: upload("a.mp4"),
                start: "soon".into(),
                end: "1".into(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(malformed, DomainError::Format { .. }));
        assert!(f.cutter.jobs().is_empty());
    }

    #[tokio::test]
    async fn test_missing_source() {
        let f = fixture(None);
        let err = f
            .interactor
            .submit(SubmitRequest {
                url: Some("   ".into()),
                start: "0".into(),
                end: "1".into(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Please upload a file or provide a URL");
    }

    #[tokio::test]
    async fn test_upload_name_cannot_escape_scratch() {
        let f = fixture(None);
        let report = f
            .interactor
            .submit(SubmitRequest {
                upload: upload("../../etc/clip.mp4"),
                start: "0".into(),
                end: "1".into(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(
            report.output_path,
            f.interactor.scratch_dir().join("cut_clip.mp4")
        );
    }
}
