//! Document store API

use async_trait::async_trait;
use serde::Serialize;

use crate::types::{Document, DocumentList, Query};
use crate::{ClientResult, HttpClient};

/// Document store operations
#[async_trait]
pub trait Databases: Send + Sync {
    async fn list_documents(
        &self,
        database_id: &str,
        collection_id: &str,
        queries: &[Query],
    ) -> ClientResult<DocumentList>;

    async fn create_document<B: Serialize + Sync>(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        data: &B,
    ) -> ClientResult<Document>;

    async fn delete_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> ClientResult<()>;
}

fn documents_path(database_id: &str, collection_id: &str) -> String {
    format!("databases/{database_id}/collections/{collection_id}/documents")
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateDocumentRequest<'a, B> {
    document_id: &'a str,
    data: &'a B,
}

#[async_trait]
impl Databases for HttpClient {
    async fn list_documents(
        &self,
        database_id: &str,
        collection_id: &str,
        queries: &[Query],
    ) -> ClientResult<DocumentList> {
        self.get(
            &documents_path(database_id, collection_id),
            &Query::to_params(queries),
        )
        .await
    }

    async fn create_document<B: Serialize + Sync>(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        data: &B,
    ) -> ClientResult<Document> {
        let request = CreateDocumentRequest { document_id, data };
        self.post(&documents_path(database_id, collection_id), &request)
            .await
    }

    async fn delete_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> ClientResult<()> {
        let path = format!(
            "{}/{document_id}",
            documents_path(database_id, collection_id)
        );
        self.delete(&path).await
    }
}
