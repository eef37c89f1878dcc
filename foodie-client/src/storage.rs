//! File storage API
//!
//! Uploads above [`CHUNK_SIZE`] are sent in consecutive chunks, each tagged
//! with `Content-Range`; chunks after the first carry `X-Appwrite-ID` so the
//! backend appends them to the same file.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};

use crate::types::{FileList, InputFile, Query, StoredFile};
use crate::{ClientResult, HttpClient};

/// Maximum bytes per upload request (5 MiB)
pub const CHUNK_SIZE: usize = 5 * 1024 * 1024;

/// File storage operations
#[async_trait]
pub trait Storage: Send + Sync {
    async fn list_files(&self, bucket_id: &str, queries: &[Query]) -> ClientResult<FileList>;

    async fn create_file(
        &self,
        bucket_id: &str,
        file_id: &str,
        file: InputFile,
    ) -> ClientResult<StoredFile>;

    async fn delete_file(&self, bucket_id: &str, file_id: &str) -> ClientResult<()>;

    /// Public URL serving the file inline
    fn file_view_url(&self, bucket_id: &str, file_id: &str) -> String;
}

fn files_path(bucket_id: &str) -> String {
    format!("storage/buckets/{bucket_id}/files")
}

fn file_part(file: &InputFile, chunk: Vec<u8>) -> ClientResult<Part> {
    Ok(Part::bytes(chunk)
        .file_name(file.name.clone())
        .mime_str(&file.mime_type)?)
}

impl HttpClient {
    async fn upload_chunked(
        &self,
        bucket_id: &str,
        file_id: &str,
        file: &InputFile,
    ) -> ClientResult<StoredFile> {
        let total = file.size();
        let mut uploaded_id: Option<String> = None;
        let mut last: Option<StoredFile> = None;

        for (index, chunk) in file.data.chunks(CHUNK_SIZE).enumerate() {
            let start = index * CHUNK_SIZE;
            let end = start + chunk.len() - 1;

            let form = Form::new()
                .text("fileId", file_id.to_string())
                .part("file", file_part(file, chunk.to_vec())?);

            let mut request = self
                .request(reqwest::Method::POST, &files_path(bucket_id))
                .header(reqwest::header::CONTENT_RANGE, format!("bytes {start}-{end}/{total}"))
                .multipart(form);
            if let Some(id) = &uploaded_id {
                request = request.header("x-appwrite-id", id);
            }

            let stored: StoredFile = self.send(request).await?;
            tracing::debug!(
                file_id = %stored.id,
                chunk = index + 1,
                chunks_total = stored.chunks_total,
                "Uploaded file chunk"
            );
            uploaded_id = Some(stored.id.clone());
            last = Some(stored);
        }

        last.ok_or_else(|| crate::ClientError::Validation("empty file".to_string()))
    }
}

#[async_trait]
impl Storage for HttpClient {
    async fn list_files(&self, bucket_id: &str, queries: &[Query]) -> ClientResult<FileList> {
        self.get(&files_path(bucket_id), &Query::to_params(queries))
            .await
    }

    async fn create_file(
        &self,
        bucket_id: &str,
        file_id: &str,
        file: InputFile,
    ) -> ClientResult<StoredFile> {
        if file.size() > CHUNK_SIZE {
            return self.upload_chunked(bucket_id, file_id, &file).await;
        }

        let part = file_part(&file, file.data.clone())?;
        let form = Form::new()
            .text("fileId", file_id.to_string())
            .part("file", part);
        let request = self
            .request(reqwest::Method::POST, &files_path(bucket_id))
            .multipart(form);
        self.send(request).await
    }

    async fn delete_file(&self, bucket_id: &str, file_id: &str) -> ClientResult<()> {
        self.delete(&format!("{}/{file_id}", files_path(bucket_id)))
            .await
    }

    fn file_view_url(&self, bucket_id: &str, file_id: &str) -> String {
        format!(
            "{}/{}/{file_id}/view?project={}",
            self.endpoint(),
            files_path(bucket_id),
            self.project_id()
        )
    }
}
