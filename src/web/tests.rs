use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;

use super::*;
use crate::app::cut_interactor::testing::FixedProbe;
use crate::app::submit_interactor::testing::RecordingFetcher;
use crate::app::CutInteractor;
use crate::domain::model::*;
use crate::domain::rules::{ExtensionPolicy, SurfaceProfile};
use crate::ports::{CutPort, FetchPort};

const BOUNDARY: &str = "avcut-test-boundary";

/// Cut port that writes a small output file so the handler can serve it
#[derive(Default)]
struct WritingCutter {
    jobs: Mutex<Vec<CutJob>>,
}

#[async_trait]
impl CutPort for WritingCutter {
    async fn cut(&self, job: &CutJob) -> Result<CutReport, DomainError> {
        self.jobs.lock().unwrap().push(job.clone());
        tokio::fs::write(&job.destination, b"trimmed").await?;
        Ok(CutReport {
            output_path: job.destination.clone(),
            bytes: Some(7),
        })
    }

    async fn is_available(&self) -> bool {
        true
    }
}

struct Server {
    addr: SocketAddr,
    cutter: Arc<WritingCutter>,
    scratch: tempfile::TempDir,
}

async fn serve(duration: Option<f64>, max_upload_bytes: usize) -> Server {
    let scratch = tempfile::tempdir().unwrap();
    let cutter = Arc::new(WritingCutter::default());
    let cut_interactor = Arc::new(CutInteractor::new(
        Arc::new(FixedProbe(duration)),
        cutter.clone() as Arc<dyn CutPort>,
    ));
    let submit = Arc::new(SubmitInteractor::new(
        cut_interactor,
        Arc::new(RecordingFetcher::default()) as Arc<dyn FetchPort>,
        scratch.path(),
        ExtensionPolicy::default(),
        SurfaceProfile::web("libx264", "aac"),
    ));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(submit, max_upload_bytes))
            .await
            .unwrap();
    });

    Server {
        addr,
        cutter,
        scratch,
    }
}

/// Hand-built multipart body; `file` is `(file_name, contents)`
fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, contents)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(contents);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

async fn post_cut(addr: SocketAddr, body: Vec<u8>) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("http://{addr}/cut"))
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(body)
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_index_serves_form() {
    let server = serve(None, 1024 * 1024).await;
    let response = reqwest::get(format!("http://{}/", server.addr)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let page = response.text().await.unwrap();
    assert!(page.contains("<form id=\"cut-form\">"));
    assert!(page.contains("name=\"use_end\""));
}

#[tokio::test]
async fn test_upload_returns_attachment() {
    let server = serve(Some(600.0), 1024 * 1024).await;
    let body = multipart_body(
        &[("start", "1"), ("end", "2:30"), ("url", "")],
        Some(("talk.mp4", b"fake media")),
    );
    let response = post_cut(server.addr, body).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "video/mp4");
    assert_eq!(
        response.headers()["content-disposition"],
        "attachment; filename=\"cut_talk.mp4\""
    );
    assert_eq!(response.bytes().await.unwrap().as_ref(), b"trimmed");

    let jobs = server.cutter.jobs.lock().unwrap().clone();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].range.start().as_seconds(), 60.0);
    assert_eq!(jobs[0].range.end().as_seconds(), 150.0);
    assert_eq!(
        jobs[0].destination,
        PathBuf::from(server.scratch.path()).join("cut_talk.mp4")
    );
}

#[tokio::test]
async fn test_use_end_cuts_to_duration() {
    let server = serve(Some(200.0), 1024 * 1024).await;
    let body = multipart_body(
        &[("start", "0:30"), ("end", ""), ("use_end", "on")],
        Some(("song.mp3", b"fake media")),
    );
    let response = post_cut(server.addr, body).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "audio/mpeg");
    let jobs = server.cutter.jobs.lock().unwrap().clone();
    assert_eq!(jobs[0].range.end().as_seconds(), 200.0);
}

#[tokio::test]
async fn test_unsupported_extension_is_bad_request() {
    let server = serve(Some(600.0), 1024 * 1024).await;
    let body = multipart_body(
        &[("start", "0"), ("end", "1")],
        Some(("clip.mov", b"fake media")),
    );
    let response = post_cut(server.addr, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.text().await.unwrap().contains("Unsupported file type"));
    assert!(server.cutter.jobs.lock().unwrap().is_empty());
    assert!(!server.scratch.path().join("clip.mov").exists());
}

#[tokio::test]
async fn test_missing_source_is_bad_request() {
    let server = serve(None, 1024 * 1024).await;
    let body = multipart_body(&[("start", "0"), ("end", "1")], None);
    let response = post_cut(server.addr, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.text().await.unwrap(),
        "Please upload a file or provide a URL"
    );
}

#[tokio::test]
async fn test_oversized_upload_is_rejected() {
    let server = serve(None, 64).await;
    let contents = vec![0u8; 4096];
    let body = multipart_body(&[("start", "0"), ("end", "1")], Some(("big.mp4", &contents)));
    let response = post_cut(server.addr, body).await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(server.cutter.jobs.lock().unwrap().is_empty());
}

#[test]
fn test_content_type() {
    assert_eq!(content_type(Path::new("a/cut_x.MP3")), "audio/mpeg");
    assert_eq!(content_type(Path::new("cut_x.mp4")), "video/mp4");
    assert_eq!(content_type(Path::new("cut_x")), "application/octet-stream");
}
