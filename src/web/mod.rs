//! Web front-end
//!
//! `GET /` serves the form and `POST /cut` runs one submission, answering
//! with the cut file as an attachment or with the error text.

use std::path::Path;
use std::sync::Arc;

use axum::extract::multipart::{Multipart, MultipartError};
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tracing::{info, warn};

use crate::app::SubmitInteractor;
use crate::domain::errors::DomainError;

pub mod form;
pub mod page;

/// Build the application router
pub fn router(submit: Arc<SubmitInteractor>, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/cut", post(cut))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(submit)
}

async fn index() -> Html<&'static str> {
    Html(page::INDEX_HTML)
}

async fn cut(
    State(submit): State<Arc<SubmitInteractor>>,
    multipart: Multipart,
) -> Result<Response, WebError> {
    let request = form::read_submission(multipart).await?;
    let report = submit.submit(request).await?;

    let body = tokio::fs::read(&report.output_path).await.map_err(DomainError::from)?;
    let file_name = report
        .output_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "cut".to_string());
    info!(output = %report.output_path.display(), bytes = body.len(), "Serving cut file");

    Ok((
        [
            (header::CONTENT_TYPE, content_type(&report.output_path).to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name.replace('"', "")),
            ),
        ],
        body,
    )
        .into_response())
}

/// MIME type for a cut output
fn content_type(path: &Path) -> &'static str {
    match path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .as_deref()
    {
        Some("mp3") => "audio/mpeg",
        Some("mp4") => "video/mp4",
        _ => "application/octet-stream",
    }
}

/// Errors surfaced by the HTTP handlers
#[derive(Debug)]
pub enum WebError {
    Form(MultipartError),
    Submit(DomainError),
}

impl From<MultipartError> for WebError {
    fn from(e: MultipartError) -> Self {
        WebError::Form(e)
    }
}

impl From<DomainError> for WebError {
    fn from(e: DomainError) -> Self {
        WebError::Submit(e)
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            WebError::Form(e) => {
                warn!("Rejected form data: {}", e);
                (e.status(), e.body_text()).into_response()
            }
            WebError::Submit(e) => {
                let status = if e.is_input_error() {
                    StatusCode::BAD_REQUEST
                } else {
                    StatusCode::INTERNAL_SERVER_ERROR
                };
                warn!(status = status.as_u16(), "Submission failed: {}", e);
                (status, e.to_string()).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests;
