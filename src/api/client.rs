use iced::futures::channel::mpsc;
use iced::futures::{SinkExt, Stream, StreamExt};
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client, Response};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tokio_util::io::ReaderStream;
use url::Url;

use super::envelope::{self, AdsPayload, StatusPayload};
use crate::error::ApiError;
use crate::media::scan::content_type;
use crate::state::data::{Asset, DeleteReceipt, StatusSummary, UploadReceipt};
use crate::state::upload::percent;

/// Upload bodies are read from disk and handed to the transport in pieces this big
const UPLOAD_CHUNK: usize = 64 * 1024;

/// Fallback when the server fails without saying why
const UNKNOWN_ERROR: &str = "Unknown error";

/// Events emitted while a single file uploads
#[derive(Debug, Clone, PartialEq)]
pub enum UploadEvent {
    /// Percentage of the body handed to the transport so far
    Progress(f32),
    /// The request settled; always the last event
    Finished(Result<UploadReceipt, ApiError>),
}

/// HTTP client bound to one ad server
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base: Url,
}

impl ApiClient {
    /// `base` must end with a slash (see `Config::server_base`)
    pub fn new(base: Url) -> Self {
        tracing::info!("🌐 Talking to ad server at {base}");
        Self {
            http: Client::new(),
            base,
        }
    }

    /// Build an endpoint URL; each segment is percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Resolve a URL the server handed out (usually an absolute path) against the base
    pub fn resolve(&self, url: &str) -> Result<Url, ApiError> {
        self.base
            .join(url)
            .map_err(|e| ApiError::InvalidUrl(format!("{url}: {e}")))
    }

    /// `GET /api/ads/file/<filename>`
    pub fn file_url(&self, filename: &str) -> Result<Url, ApiError> {
        self.endpoint(&["api", "ads", "file", filename])
    }

    /// `GET /api/ads`
    pub async fn list_ads(&self) -> Result<Vec<Asset>, ApiError> {
        let url = self.endpoint(&["api", "ads"])?;
        tracing::debug!("GET {url}");

        let response = self.http.get(url).send().await?;
        let payload: AdsPayload = read_envelope(response, UNKNOWN_ERROR).await?;
        Ok(payload.ads)
    }

    /// `GET /api/status`
    pub async fn status(&self) -> Result<StatusSummary, ApiError> {
        let url = self.endpoint(&["api", "status"])?;
        tracing::debug!("GET {url}");

        let response = self.http.get(url).send().await?;
        let payload: StatusPayload = read_envelope(response, UNKNOWN_ERROR).await?;
        Ok(payload.status)
    }

    /// `DELETE /api/ads/<filename>`
    pub async fn delete_ad(&self, filename: &str) -> Result<DeleteReceipt, ApiError> {
        let url = self.endpoint(&["api", "ads", filename])?;
        tracing::info!("🗑️  DELETE {url}");

        let response = self.http.delete(url).send().await?;
        read_envelope(response, UNKNOWN_ERROR).await
    }

    /// Raw bytes of a served file (thumbnails, image previews)
    pub async fn fetch_file(&self, url: Url) -> Result<Vec<u8>, ApiError> {
        tracing::debug!("GET {url}");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Server(format!("HTTP {status}")));
        }

        Ok(response.bytes().await?.to_vec())
    }

    /// Upload one file as `multipart/form-data` to `POST /api/upload`.
    ///
    /// The stream yields progress as the body is consumed and ends with
    /// exactly one `Finished`.
    pub fn upload(&self, path: PathBuf) -> impl Stream<Item = UploadEvent> + Send + 'static {
        let client = self.clone();

        iced::stream::channel(16, move |mut output: mpsc::Sender<UploadEvent>| async move {
            let result = client.send_upload(&path, output.clone()).await;

            match &result {
                Ok(_) => tracing::info!("📤 Uploaded {}", path.display()),
                Err(error) => tracing::warn!("Upload of {} failed: {error}", path.display()),
            }

            let _ = output.send(UploadEvent::Finished(result)).await;
        })
    }

    async fn send_upload(
        &self,
        path: &Path,
        mut progress: mpsc::Sender<UploadEvent>,
    ) -> Result<UploadReceipt, ApiError> {
        let url = self.endpoint(&["api", "upload"])?;
        let file = tokio::fs::File::open(path)
            .await
            .map_err(|e| ApiError::file(path, e))?;
        let total = file
            .metadata()
            .await
            .map_err(|e| ApiError::file(path, e))?
            .len();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        tracing::debug!("POST {url} ({name}, {total} bytes)");

        // Only one chunk of the file is held in memory at a time
        let mut sent = 0u64;
        let body = ReaderStream::with_capacity(file, UPLOAD_CHUNK).map(move |chunk| {
            if let Ok(bytes) = &chunk {
                sent += bytes.len() as u64;
                if let Some(percent) = percent(sent, total) {
                    // Progress is best effort: a full channel just skips an update
                    let _ = progress.try_send(UploadEvent::Progress(percent));
                }
            }
            chunk
        });

        let part = Part::stream_with_length(Body::wrap_stream(body), total)
            .file_name(name)
            .mime_str(content_type(path))?;
        let form = Form::new().part("file", part);

        let response = self.http.post(url).multipart(form).send().await?;
        read_envelope(response, "Upload failed").await
    }
}

async fn read_envelope<T: DeserializeOwned>(
    response: Response,
    fallback: &str,
) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.bytes().await?;
    tracing::debug!("← {status} ({} bytes)", body.len());

    envelope::decode(&body, fallback)
}
