//! Domain methods for the Pydrop API client.
//!
//! Response types come from `pydrop_core::models` so the client and server
//! agree on the wire shape.

use crate::{api_prefix, ApiClient, UploadError};
use anyhow::{Context, Result};
use bytes::Bytes;
use pydrop_core::models::FileResponse;
use std::sync::Arc;
use uuid::Uuid;

/// Upload body chunk size. Small enough that progress callbacks fire
/// several times for files near the size limit.
const UPLOAD_CHUNK_SIZE: usize = 64 * 1024;

/// Error body shape returned by the API on failure.
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    error: String,
}

impl ApiClient {
    /// Upload a `.py` file, streaming the body in chunks and reporting
    /// progress (0-100) through `on_progress` as each chunk is handed to
    /// the transport.
    ///
    /// Server rejections surface the server's own error message; transport
    /// failures become [`UploadError::Network`].
    pub async fn upload_file(
        &self,
        file_name: &str,
        data: Vec<u8>,
        on_progress: Arc<dyn Fn(u8) + Send + Sync>,
    ) -> std::result::Result<FileResponse, UploadError> {
        let total = data.len();
        let chunks: Vec<Bytes> = data
            .chunks(UPLOAD_CHUNK_SIZE.max(1))
            .map(Bytes::copy_from_slice)
            .collect();

        let progress = on_progress.clone();
        let mut sent = 0usize;
        let stream = futures::stream::iter(chunks.into_iter().map(move |chunk| {
            sent += chunk.len();
            let percent = if total == 0 {
                100
            } else {
                ((sent as f64 / total as f64) * 100.0).round() as u8
            };
            progress(percent.min(100));
            Ok::<Bytes, std::io::Error>(chunk)
        }));

        let body = reqwest::Body::wrap_stream(stream);
        let part = reqwest::multipart::Part::stream_with_length(body, total as u64)
            .file_name(file_name.to_string())
            .mime_str("text/x-python")
            .map_err(UploadError::Network)?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let url = self.build_url(&format!("{}/files", api_prefix()));
        let request = self.apply_auth(self.client().post(&url).multipart(form));

        let response = request.send().await.map_err(UploadError::Network)?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|b| b.error)
                .unwrap_or_else(|_| {
                    if text.is_empty() {
                        format!("Upload failed with status {}", status.as_u16())
                    } else {
                        text
                    }
                });
            return Err(UploadError::Server {
                status: status.as_u16(),
                message,
            });
        }

        on_progress(100);
        response.json::<FileResponse>().await.map_err(UploadError::Network)
    }

    /// List the authenticated user's files, newest first.
    pub async fn list_files(&self) -> Result<Vec<FileResponse>> {
        let url = self.build_url(&format!("{}/files", api_prefix()));
        let request = self.apply_auth(self.client().get(&url));

        let response = request.send().await.context("Failed to send request")?;
        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow::anyhow!(
                "API request failed with status {}: {}",
                status,
                error_text
            ));
        }

        response
            .json()
            .await
            .context("Failed to parse response as JSON")
    }

    /// Fetch a single file's metadata by id.
    pub async fn get_file(&self, id: Uuid) -> Result<FileResponse> {
        let url = self.build_url(&format!("{}/files/{}", api_prefix(), id));
        let request = self.apply_auth(self.client().get(&url));

        let response = request.send().await.context("Failed to send request")?;
        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow::anyhow!(
                "API request failed with status {}: {}",
                status,
                error_text
            ));
        }

        response
            .json()
            .await
            .context("Failed to parse response as JSON")
    }

    /// Download a file's bytes by id.
    pub async fn download_file(&self, id: Uuid) -> Result<Vec<u8>> {
        let url = self.build_url(&format!("{}/files/{}/content", api_prefix(), id));
        let request = self.apply_auth(self.client().get(&url));

        let response = request.send().await.context("Failed to send request")?;
        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow::anyhow!(
                "API request failed with status {}: {}",
                status,
                error_text
            ));
        }

        let bytes = response
            .bytes()
            .await
            .context("Failed to read response body")?;
        Ok(bytes.to_vec())
    }
}
