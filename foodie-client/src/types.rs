//! Wire types for the backend API

use serde::{Deserialize, Serialize};

/// A stored document: backend metadata plus the caller's fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document<T = serde_json::Value> {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "$collectionId", default)]
    pub collection_id: String,
    #[serde(rename = "$databaseId", default)]
    pub database_id: String,
    #[serde(flatten)]
    pub data: T,
}

/// Document listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentList<T = serde_json::Value> {
    pub total: u64,
    pub documents: Vec<Document<T>>,
}

/// Stored file metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredFile {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "bucketId", default)]
    pub bucket_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "mimeType", default)]
    pub mime_type: String,
    #[serde(rename = "sizeOriginal", default)]
    pub size: u64,
    #[serde(rename = "chunksTotal", default)]
    pub chunks_total: u32,
    #[serde(rename = "chunksUploaded", default)]
    pub chunks_uploaded: u32,
}

/// File listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileList {
    pub total: u64,
    pub files: Vec<StoredFile>,
}

/// Current account (session owner)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountInfo {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// File contents to upload
#[derive(Debug, Clone)]
pub struct InputFile {
    pub name: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl InputFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            data,
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// List query, sent as `queries[]=<json>`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Query {
    method: &'static str,
    values: Vec<serde_json::Value>,
}

impl Query {
    /// Limit the number of returned entries
    pub fn limit(n: u32) -> Self {
        Self {
            method: "limit",
            values: vec![n.into()],
        }
    }

    pub(crate) fn to_params(queries: &[Query]) -> Vec<(&'static str, String)> {
        queries
            .iter()
            .map(|q| {
                // Serializing a struct of plain fields cannot fail
                ("queries[]", serde_json::to_string(q).unwrap_or_default())
            })
            .collect()
    }
}
