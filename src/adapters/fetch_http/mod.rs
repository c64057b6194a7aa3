//! HTTP download adapter for remote media sources

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

use crate::domain::errors::*;
use crate::ports::*;

/// Downloads remote media with `reqwest`, streaming to disk
#[derive(Debug, Clone)]
pub struct HttpFetchAdapter {
    client: reqwest::Client,
    max_bytes: u64,
    timeout: Duration,
}

impl HttpFetchAdapter {
    /// Adapter refusing bodies over `max_bytes` and requests slower than `timeout`
    pub fn new(max_bytes: u64, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            max_bytes,
            timeout,
        }
    }

    fn too_large(&self, url: &str) -> DomainError {
        DomainError::Fetch(format!(
            "{} exceeds the {} byte download limit",
            url, self.max_bytes
        ))
    }
}

/// Final path segment of a URL, used as the downloaded file's name
pub fn url_file_name(url: &str) -> Result<String, DomainError> {
    let parsed = reqwest::Url::parse(url)
        .map_err(|e| DomainError::validation(format!("Invalid URL '{}': {}", url, e)))?;

    parsed
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .map(str::to_owned)
        .ok_or_else(|| DomainError::validation(format!("URL '{}' does not name a file", url)))
}

#[async_trait]
impl FetchPort for HttpFetchAdapter {
    async fn fetch(&self, url: &str, destination: &Path) -> Result<PathBuf, DomainError> {
        info!(%url, destination = %destination.display(), "Downloading remote media");

        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| DomainError::Fetch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DomainError::Fetch(format!(
                "HTTP {}: {}",
                response.status(),
                url
            )));
        }
        if response.content_length().is_some_and(|len| len > self.max_bytes) {
            return Err(self.too_large(url));
        }

        let mut file = tokio::fs::File::create(destination).await?;
        let mut downloaded: u64 = 0;
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| DomainError::Fetch(e.to_string()))?;
            downloaded += chunk.len() as u64;
            if downloaded > self.max_bytes {
                drop(file);
                if let Err(e) = tokio::fs::remove_file(destination).await {
                    warn!(error = %e, "Could not remove partial download");
                }
                return Err(self.too_large(url));
            }
            file.write_all(&chunk).await?;
        }
        file.flush().await?;

        info!(bytes = downloaded, "Download finished");
        Ok(destination.to_path_buf())
    }
}
