use crate::state::{MockFile, MockState, WriteError};
use axum::{
    Json, Router,
    body::Body,
    extract::{Multipart, Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Default page size when no `limit` query is given
const DEFAULT_LIMIT: usize = 25;

/// Upload requests carry chunks of up to 5 MiB plus multipart framing
const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

type ApiResult<T> = Result<T, (StatusCode, Json<Value>)>;

fn api_error(status: StatusCode, kind: &str, message: impl Into<String>) -> (StatusCode, Json<Value>) {
    (
        status,
        Json(serde_json::json!({
            "message": message.into(),
            "code": status.as_u16(),
            "type": kind,
        })),
    )
}

fn write_error(err: WriteError, what: &str) -> (StatusCode, Json<Value>) {
    match err {
        WriteError::Injected => api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "general_unknown",
            format!("Injected failure on {what}"),
        ),
        WriteError::NotFound => {
            api_error(StatusCode::NOT_FOUND, "document_not_found", format!("{what} not found"))
        }
        WriteError::Conflict => api_error(
            StatusCode::CONFLICT,
            "document_already_exists",
            format!("{what} already exists"),
        ),
    }
}

/// Read the `limit` query out of repeated `queries[]` JSON params
fn limit_from(params: &[(String, String)]) -> usize {
    params
        .iter()
        .filter(|(k, _)| k == "queries[]")
        .filter_map(|(_, v)| serde_json::from_str::<Value>(v).ok())
        .find(|q| q["method"] == "limit")
        .and_then(|q| q["values"][0].as_u64())
        .map(|n| n as usize)
        .unwrap_or(DEFAULT_LIMIT)
}

// ========== Documents ==========

async fn list_documents(
    State(state): State<Arc<MockState>>,
    Path((db, collection)): Path<(String, String)>,
    Query(params): Query<Vec<(String, String)>>,
) -> Json<Value> {
    let (total, documents) = state.list_documents(&db, &collection, limit_from(&params));
    Json(serde_json::json!({ "total": total, "documents": documents }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateDocumentRequest {
    document_id: String,
    data: Map<String, Value>,
}

async fn create_document(
    State(state): State<Arc<MockState>>,
    Path((db, collection)): Path<(String, String)>,
    Json(req): Json<CreateDocumentRequest>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let doc = state
        .create_document(&db, &collection, &req.document_id, req.data)
        .map_err(|e| write_error(e, "document"))?;
    tracing::debug!(collection = %collection, id = %doc["$id"], "Document created");
    Ok((StatusCode::CREATED, Json(doc)))
}

async fn delete_document(
    State(state): State<Arc<MockState>>,
    Path((db, collection, id)): Path<(String, String, String)>,
) -> ApiResult<StatusCode> {
    state
        .delete_document(&db, &collection, &id)
        .map_err(|e| write_error(e, "document"))?;
    Ok(StatusCode::NO_CONTENT)
}

// ========== Files ==========

async fn list_files(
    State(state): State<Arc<MockState>>,
    Path(bucket): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> Json<Value> {
    let (total, files) = state.list_files(&bucket, limit_from(&params));
    Json(serde_json::json!({ "total": total, "files": files }))
}

/// Parse `bytes start-end/total`
fn parse_content_range(headers: &HeaderMap) -> Option<(usize, usize)> {
    let raw = headers.get(header::CONTENT_RANGE)?.to_str().ok()?;
    let rest = raw.strip_prefix("bytes ")?;
    let (range, total) = rest.split_once('/')?;
    let (start, _end) = range.split_once('-')?;
    Some((start.parse().ok()?, total.parse().ok()?))
}

async fn create_file(
    State(state): State<Arc<MockState>>,
    Path(bucket): Path<String>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let mut file_id: Option<String> = None;
    let mut file: Option<MockFile> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        api_error(StatusCode::BAD_REQUEST, "general_argument_invalid", format!("Multipart error: {e}"))
    })? {
        let field_name = field.name().map(str::to_string);
        match field_name.as_deref() {
            Some("fileId") => {
                file_id = Some(field.text().await.map_err(|e| {
                    api_error(StatusCode::BAD_REQUEST, "general_argument_invalid", e.to_string())
                })?);
            }
            Some("file") => {
                let name = field.file_name().unwrap_or("upload").to_string();
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field.bytes().await.map_err(|e| {
                    api_error(StatusCode::BAD_REQUEST, "general_argument_invalid", e.to_string())
                })?;
                file = Some(MockFile {
                    id: String::new(),
                    name,
                    mime_type,
                    data: data.to_vec(),
                    chunks_total: 1,
                    chunks_uploaded: 1,
                });
            }
            _ => {}
        }
    }

    let file_id = file_id.ok_or_else(|| {
        api_error(StatusCode::BAD_REQUEST, "general_argument_invalid", "Missing fileId")
    })?;
    let file = file.ok_or_else(|| {
        api_error(StatusCode::BAD_REQUEST, "storage_file_empty", "No file sent")
    })?;

    let append_to = headers.get("x-appwrite-id").and_then(|v| v.to_str().ok());
    let stored = state
        .create_file(&bucket, &file_id, file, parse_content_range(&headers), append_to)
        .map_err(|e| write_error(e, "file"))?;
    tracing::debug!(bucket = %bucket, id = %stored["$id"], "File stored");
    Ok((StatusCode::CREATED, Json(stored)))
}

async fn delete_file(
    State(state): State<Arc<MockState>>,
    Path((bucket, id)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    state
        .delete_file(&bucket, &id)
        .map_err(|e| write_error(e, "file"))?;
    Ok(StatusCode::NO_CONTENT)
}

async fn view_file(
    State(state): State<Arc<MockState>>,
    Path((bucket, id)): Path<(String, String)>,
) -> ApiResult<Response> {
    let file = state
        .file(&bucket, &id)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "storage_file_not_found", "File not found"))?;
    Ok(([(header::CONTENT_TYPE, file.mime_type)], Body::from(file.data)).into_response())
}

// ========== Account ==========

async fn get_account(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
) -> ApiResult<Json<Value>> {
    headers
        .get("x-appwrite-jwt")
        .and_then(|v| v.to_str().ok())
        .and_then(|jwt| state.account(jwt))
        .map(Json)
        .ok_or_else(|| {
            api_error(
                StatusCode::UNAUTHORIZED,
                "general_unauthorized_scope",
                "User (role: guests) missing scope (account)",
            )
        })
}

// ========== Source images ==========

async fn get_image(State(state): State<Arc<MockState>>, Path(name): Path<String>) -> Response {
    match state.image(&name) {
        Some(image) => {
            let mut response = Body::from(image.data).into_response();
            if let Some(ct) = image.content_type
                && let Ok(value) = ct.parse::<axum::http::HeaderValue>()
            {
                response.headers_mut().insert(header::CONTENT_TYPE, value);
            }
            response
        }
        None => (StatusCode::NOT_FOUND, "image not found").into_response(),
    }
}

/// Build the mock router
pub fn router(state: Arc<MockState>) -> Router {
    Router::new()
        .route(
            "/v1/databases/{db}/collections/{collection}/documents",
            get(list_documents).post(create_document),
        )
        .route(
            "/v1/databases/{db}/collections/{collection}/documents/{id}",
            axum::routing::delete(delete_document),
        )
        .route(
            "/v1/storage/buckets/{bucket}/files",
            get(list_files).post(create_file),
        )
        .route(
            "/v1/storage/buckets/{bucket}/files/{id}",
            axum::routing::delete(delete_file),
        )
        .route("/v1/storage/buckets/{bucket}/files/{id}/view", get(view_file))
        .route("/v1/account", get(get_account))
        .route("/images/{name}", get(get_image))
        .layer(axum::extract::DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}
