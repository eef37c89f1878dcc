// foodie-client/tests/client_integration.rs
// Client against the in-memory mock backend

use foodie_client::storage::CHUNK_SIZE;
use foodie_client::{ClientConfig, ClientError, Databases, HttpClient, InputFile, Query, Storage, id};
use foodie_mock::MockServer;

fn client(server: &MockServer) -> HttpClient {
    ClientConfig::new(server.endpoint(), "test-project")
        .with_api_key("secret")
        .build_http_client()
        .unwrap()
}

#[tokio::test]
async fn test_document_lifecycle() {
    let server = MockServer::start().await.unwrap();
    let client = client(&server);

    let doc_id = id::unique();
    let created = client
        .create_document("db", "categories", &doc_id, &serde_json::json!({"name": "Burgers"}))
        .await
        .unwrap();
    assert_eq!(created.id, doc_id);
    assert_eq!(created.data["name"], "Burgers");

    let list = client.list_documents("db", "categories", &[]).await.unwrap();
    assert_eq!(list.total, 1);
    assert_eq!(list.documents[0].id, doc_id);

    client.delete_document("db", "categories", &doc_id).await.unwrap();
    let list = client.list_documents("db", "categories", &[]).await.unwrap();
    assert_eq!(list.total, 0);
}

#[tokio::test]
async fn test_list_respects_limit() {
    let server = MockServer::start().await.unwrap();
    for i in 0..5 {
        server
            .state()
            .insert_document("db", "menu", serde_json::json!({ "name": format!("item {i}") }));
    }
    let client = client(&server);

    let page = client
        .list_documents("db", "menu", &[Query::limit(2)])
        .await
        .unwrap();
    assert_eq!(page.total, 5);
    assert_eq!(page.documents.len(), 2);
}

#[tokio::test]
async fn test_delete_missing_document_is_api_error() {
    let server = MockServer::start().await.unwrap();
    let client = client(&server);

    let err = client.delete_document("db", "menu", "nope").await.unwrap_err();
    match err {
        ClientError::Api { status, .. } => assert_eq!(status, 404),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_file_upload_and_view_url() {
    let server = MockServer::start().await.unwrap();
    let client = client(&server);

    let file = InputFile::new("burger.png", "image/png", vec![1, 2, 3, 4]);
    let stored = client.create_file("assets", &id::unique(), file).await.unwrap();
    assert_eq!(stored.name, "burger.png");
    assert_eq!(stored.mime_type, "image/png");
    assert_eq!(stored.size, 4);

    let url = client.file_view_url("assets", &stored.id);
    let body = reqwest::get(&url).await.unwrap().bytes().await.unwrap();
    assert_eq!(body.as_ref(), &[1, 2, 3, 4]);

    let files = client.list_files("assets", &[]).await.unwrap();
    assert_eq!(files.total, 1);

    client.delete_file("assets", &stored.id).await.unwrap();
    assert!(server.state().files("assets").is_empty());
}

#[tokio::test]
async fn test_large_file_is_uploaded_in_chunks() {
    let server = MockServer::start().await.unwrap();
    let client = client(&server);

    let data: Vec<u8> = (0..CHUNK_SIZE * 2 + 10).map(|i| (i % 251) as u8).collect();
    let file = InputFile::new("big.jpg", "image/jpeg", data.clone());
    let stored = client.create_file("assets", &id::unique(), file).await.unwrap();

    assert_eq!(stored.chunks_total, 3);
    assert_eq!(stored.chunks_uploaded, 3);
    let files = server.state().files("assets");
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].data, data);
}

#[tokio::test]
async fn test_account_requires_session() {
    let server = MockServer::start().await.unwrap();
    server.state().add_session("jwt-1", "user-1", "Ada", "ada@example.com");

    let anonymous = ClientConfig::new(server.endpoint(), "test-project")
        .build_http_client()
        .unwrap();
    let err = anonymous.get_account().await.unwrap_err();
    assert_eq!(err.status(), Some(401));

    let signed_in = ClientConfig::new(server.endpoint(), "test-project")
        .with_jwt("jwt-1")
        .build_http_client()
        .unwrap();
    let account = signed_in.get_account().await.unwrap();
    assert_eq!(account.id, "user-1");
    assert_eq!(account.email, "ada@example.com");
}
