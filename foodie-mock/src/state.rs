//! In-memory backend state
//!
//! Documents are keyed by `(database, collection)`, files by bucket.
//! Failure switches let tests break a whole collection or bucket, or one
//! entry in it.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use serde_json::{Map, Value};

/// Stored file
#[derive(Debug, Clone)]
pub struct MockFile {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    pub data: Vec<u8>,
    pub chunks_total: u32,
    pub chunks_uploaded: u32,
}

impl MockFile {
    pub fn to_json(&self, bucket_id: &str) -> Value {
        serde_json::json!({
            "$id": self.id,
            "bucketId": bucket_id,
            "name": self.name,
            "mimeType": self.mime_type,
            "sizeOriginal": self.data.len(),
            "chunksTotal": self.chunks_total,
            "chunksUploaded": self.chunks_uploaded,
        })
    }
}

/// Image served under `/images/{name}`
#[derive(Debug, Clone)]
pub struct MockImage {
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

#[derive(Debug, Default)]
struct Inner {
    documents: HashMap<(String, String), Vec<Map<String, Value>>>,
    files: HashMap<String, Vec<MockFile>>,
    images: HashMap<String, MockImage>,
    failing_deletes: HashSet<String>,
    /// `(collection or bucket, entry id)`
    failing_entry_deletes: HashSet<(String, String)>,
    failing_creates: HashSet<String>,
    sessions: HashMap<String, Value>,
    next_id: u64,
}

impl Inner {
    fn delete_fails(&self, target: &str, id: &str) -> bool {
        self.failing_deletes.contains(target)
            || self
                .failing_entry_deletes
                .contains(&(target.to_string(), id.to_string()))
    }
}

/// Shared mock state
#[derive(Debug, Default)]
pub struct MockState {
    inner: Mutex<Inner>,
}

/// Outcome of a write against the mock store
#[derive(Debug)]
pub enum WriteError {
    Injected,
    NotFound,
    Conflict,
}

impl MockState {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A panicking handler must not wedge every later request
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // ========== Test setup ==========

    /// Serve an image under `/images/{name}`
    pub fn put_image(&self, name: &str, content_type: Option<&str>, data: Vec<u8>) {
        self.lock().images.insert(
            name.to_string(),
            MockImage {
                content_type: content_type.map(str::to_string),
                data,
            },
        );
    }

    /// Make every delete in this collection or bucket fail
    pub fn fail_deletes_in(&self, target: &str) {
        self.lock().failing_deletes.insert(target.to_string());
    }

    /// Make deleting one document or file fail; its siblings still delete
    pub fn fail_delete_of(&self, target: &str, id: &str) {
        self.lock()
            .failing_entry_deletes
            .insert((target.to_string(), id.to_string()));
    }

    /// Make every create in this collection or bucket fail
    pub fn fail_creates_in(&self, target: &str) {
        self.lock().failing_creates.insert(target.to_string());
    }

    /// Clear all injected failures
    pub fn heal(&self) {
        let mut inner = self.lock();
        inner.failing_deletes.clear();
        inner.failing_entry_deletes.clear();
        inner.failing_creates.clear();
    }

    /// Accept `jwt` as a session for the given account
    pub fn add_session(&self, jwt: &str, account_id: &str, name: &str, email: &str) {
        self.lock().sessions.insert(
            jwt.to_string(),
            serde_json::json!({ "$id": account_id, "name": name, "email": email }),
        );
    }

    // ========== Inspection ==========

    pub fn documents(&self, database_id: &str, collection_id: &str) -> Vec<Value> {
        self.lock()
            .documents
            .get(&(database_id.to_string(), collection_id.to_string()))
            .map(|docs| docs.iter().cloned().map(Value::Object).collect())
            .unwrap_or_default()
    }

    pub fn files(&self, bucket_id: &str) -> Vec<MockFile> {
        self.lock().files.get(bucket_id).cloned().unwrap_or_default()
    }

    // ========== Store operations ==========

    fn generate_id(inner: &mut Inner) -> String {
        inner.next_id += 1;
        format!("mock{:016x}", inner.next_id)
    }

    pub fn list_documents(&self, database_id: &str, collection_id: &str, limit: usize) -> (usize, Vec<Value>) {
        let inner = self.lock();
        let docs = inner
            .documents
            .get(&(database_id.to_string(), collection_id.to_string()));
        match docs {
            Some(docs) => (
                docs.len(),
                docs.iter().take(limit).cloned().map(Value::Object).collect(),
            ),
            None => (0, Vec::new()),
        }
    }

    pub fn create_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        data: Map<String, Value>,
    ) -> Result<Value, WriteError> {
        let mut inner = self.lock();
        if inner.failing_creates.contains(collection_id) {
            return Err(WriteError::Injected);
        }
        let id = if document_id == "unique()" {
            Self::generate_id(&mut inner)
        } else {
            document_id.to_string()
        };

        let docs = inner
            .documents
            .entry((database_id.to_string(), collection_id.to_string()))
            .or_default();
        if docs.iter().any(|d| d.get("$id").and_then(Value::as_str) == Some(&id)) {
            return Err(WriteError::Conflict);
        }

        let mut doc = data;
        doc.insert("$id".into(), Value::String(id));
        doc.insert("$collectionId".into(), Value::String(collection_id.to_string()));
        doc.insert("$databaseId".into(), Value::String(database_id.to_string()));
        docs.push(doc.clone());
        Ok(Value::Object(doc))
    }

    /// Insert a document directly, bypassing failure switches
    pub fn insert_document(&self, database_id: &str, collection_id: &str, data: Value) -> String {
        let mut inner = self.lock();
        let id = Self::generate_id(&mut inner);
        let mut doc = match data {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        doc.insert("$id".into(), Value::String(id.clone()));
        inner
            .documents
            .entry((database_id.to_string(), collection_id.to_string()))
            .or_default()
            .push(doc);
        id
    }

    pub fn delete_document(&self, database_id: &str, collection_id: &str, document_id: &str) -> Result<(), WriteError> {
        let mut inner = self.lock();
        if inner.delete_fails(collection_id, document_id) {
            return Err(WriteError::Injected);
        }
        let docs = inner
            .documents
            .get_mut(&(database_id.to_string(), collection_id.to_string()))
            .ok_or(WriteError::NotFound)?;
        let before = docs.len();
        docs.retain(|d| d.get("$id").and_then(Value::as_str) != Some(document_id));
        if docs.len() == before {
            return Err(WriteError::NotFound);
        }
        Ok(())
    }

    pub fn list_files(&self, bucket_id: &str, limit: usize) -> (usize, Vec<Value>) {
        let inner = self.lock();
        match inner.files.get(bucket_id) {
            Some(files) => (
                files.len(),
                files.iter().take(limit).map(|f| f.to_json(bucket_id)).collect(),
            ),
            None => (0, Vec::new()),
        }
    }

    /// Store an upload or one chunk of it.
    ///
    /// `range` is `(start, total)` from `Content-Range`; `append_to` is the
    /// `X-Appwrite-ID` of a file whose earlier chunks are already stored.
    pub fn create_file(
        &self,
        bucket_id: &str,
        file_id: &str,
        mut file: MockFile,
        range: Option<(usize, usize)>,
        append_to: Option<&str>,
    ) -> Result<Value, WriteError> {
        let mut inner = self.lock();
        if inner.failing_creates.contains(bucket_id) {
            return Err(WriteError::Injected);
        }

        let (chunk_start, total) = range.unwrap_or((0, file.data.len()));
        let chunk_len = file.data.len().max(1);
        let chunks_total = total.div_ceil(chunk_len).max(1) as u32;

        if let Some(existing_id) = append_to {
            let files = inner.files.get_mut(bucket_id).ok_or(WriteError::NotFound)?;
            let existing = files
                .iter_mut()
                .find(|f| f.id == existing_id)
                .ok_or(WriteError::NotFound)?;
            if existing.data.len() != chunk_start {
                return Err(WriteError::Conflict);
            }
            existing.data.extend_from_slice(&file.data);
            existing.chunks_uploaded += 1;
            return Ok(existing.to_json(bucket_id));
        }

        file.id = if file_id == "unique()" {
            Self::generate_id(&mut inner)
        } else {
            file_id.to_string()
        };
        file.chunks_total = chunks_total;
        file.chunks_uploaded = 1;

        let files = inner.files.entry(bucket_id.to_string()).or_default();
        if files.iter().any(|f| f.id == file.id) {
            return Err(WriteError::Conflict);
        }
        let json = file.to_json(bucket_id);
        files.push(file);
        Ok(json)
    }

    pub fn file(&self, bucket_id: &str, file_id: &str) -> Option<MockFile> {
        self.lock()
            .files
            .get(bucket_id)
            .and_then(|files| files.iter().find(|f| f.id == file_id).cloned())
    }

    pub fn delete_file(&self, bucket_id: &str, file_id: &str) -> Result<(), WriteError> {
        let mut inner = self.lock();
        if inner.delete_fails(bucket_id, file_id) {
            return Err(WriteError::Injected);
        }
        let files = inner.files.get_mut(bucket_id).ok_or(WriteError::NotFound)?;
        let before = files.len();
        files.retain(|f| f.id != file_id);
        if files.len() == before {
            return Err(WriteError::NotFound);
        }
        Ok(())
    }

    pub fn image(&self, name: &str) -> Option<MockImage> {
        self.lock().images.get(name).cloned()
    }

    pub fn account(&self, jwt: &str) -> Option<Value> {
        self.lock().sessions.get(jwt).cloned()
    }
}
