//! Source image fetching
//!
//! Menu images are downloaded from their dataset URL before being
//! re-uploaded to the bucket.

use async_trait::async_trait;
use foodie_client::{ClientError, InputFile};
use thiserror::Error;

/// Fallback content type when neither the response nor the name tells
const OCTET_STREAM: &str = "application/octet-stream";

/// Image fetch error
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to fetch image: {status} {reason}")]
    Status { status: u16, reason: String },
}

/// Why an image could not be re-hosted
#[derive(Debug, Error)]
pub enum RehostError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] ImageError),

    #[error("upload failed: {0}")]
    Upload(#[from] ClientError),
}

/// Downloaded image bytes
#[derive(Debug, Clone)]
pub struct FetchedImage {
    pub data: Vec<u8>,
    /// `Content-Type` reported by the source, if any
    pub content_type: Option<String>,
}

impl FetchedImage {
    /// Turn the download into an upload named after the source URL
    pub fn into_input_file(self, source_url: &str) -> InputFile {
        let name = file_name_for(source_url);
        let mime_type = mime_type_for(&name, self.content_type.as_deref());
        InputFile::new(name, mime_type, self.data)
    }
}

/// Source of image bytes
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedImage, ImageError>;
}

/// Fetches images over HTTP(S)
#[derive(Debug, Clone, Default)]
pub struct HttpImageFetcher {
    client: reqwest::Client,
}

impl HttpImageFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedImage, ImageError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ImageError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let data = response.bytes().await?.to_vec();

        Ok(FetchedImage { data, content_type })
    }
}

/// Upload name for an image URL: its last path segment, or a timestamped
/// `.jpg` name when the path has none.
pub fn file_name_for(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    match path.rsplit('/').next() {
        Some(segment) if !segment.is_empty() && !segment.contains(':') => segment.to_string(),
        _ => format!("file-{}.jpg", chrono::Utc::now().timestamp_millis()),
    }
}

/// Content type for an upload: the source's, else guessed from the name
pub fn mime_type_for(name: &str, content_type: Option<&str>) -> String {
    content_type
        .map(str::trim)
        .filter(|ct| !ct.is_empty())
        .map(str::to_string)
        .or_else(|| mime_guess::from_path(name).first().map(|m| m.essence_str().to_string()))
        .unwrap_or_else(|| OCTET_STREAM.to_string())
}
