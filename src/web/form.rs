// Multipart form decoding for the cut endpoint

use axum::extract::multipart::{Multipart, MultipartError};
use tracing::debug;

use crate::app::{SubmitRequest, Upload};

/// Read every known field of the cut form
///
/// Unknown fields are skipped. A file part without a name or content counts
/// as no upload, which is what browsers send for an empty file input.
pub async fn read_submission(mut multipart: Multipart) -> Result<SubmitRequest, MultipartError> {
    let mut request = SubmitRequest::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                if !file_name.is_empty() && !bytes.is_empty() {
                    debug!(file_name = %file_name, bytes = bytes.len(), "Received upload");
                    request.upload = Some(Upload {
                        file_name,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            "url" => request.url = Some(field.text().await?),
            "start" => request.start = field.text().await?,
            "end" => request.end = field.text().await?,
            "use_end" => request.use_end_of_file = is_checked(&field.text().await?),
            other => debug!(field = other, "Ignoring unknown form field"),
        }
    }

    Ok(request)
}

/// Checkbox and boolean spellings accepted for `use_end`
pub fn is_checked(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "on" | "true" | "1"
    )
}
