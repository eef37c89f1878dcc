//! HTTP client for network-based API calls

use crate::config::Credentials;
use crate::{ClientConfig, ClientError, ClientResult};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

/// Error body returned by the backend
#[derive(serde::Deserialize)]
struct ApiErrorResponse {
    message: String,
    #[serde(rename = "type", default)]
    kind: String,
}

/// HTTP client for making requests to the backend
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    endpoint: String,
    project_id: String,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("x-appwrite-project"),
            header_value(&config.project_id)?,
        );
        headers.insert(
            HeaderName::from_static("x-appwrite-response-format"),
            header_value(&config.response_format)?,
        );
        match &config.credentials {
            Credentials::None => {}
            Credentials::ApiKey(key) => {
                headers.insert(HeaderName::from_static("x-appwrite-key"), header_value(key)?);
            }
            Credentials::Jwt(jwt) => {
                headers.insert(HeaderName::from_static("x-appwrite-jwt"), header_value(jwt)?);
            }
        }

        let mut builder = Client::builder().default_headers(headers);
        if let Some(secs) = config.timeout {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            project_id: config.project_id.clone(),
        })
    }

    /// API endpoint (no trailing slash)
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint, path.trim_start_matches('/'))
    }

    pub(crate) fn request(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        self.client.request(method, self.url(path))
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> ClientResult<T> {
        let response = self
            .request(reqwest::Method::GET, path)
            .query(query)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self
            .request(reqwest::Method::POST, path)
            .json(body)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Make a DELETE request, expecting an empty body
    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        let response = self.request(reqwest::Method::DELETE, path).send().await?;
        Self::handle_empty(response).await
    }

    /// Send a prepared request and decode the JSON body
    pub(crate) async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let response = Self::check_status(response).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            ClientError::InvalidResponse(format!("{e}: {}", String::from_utf8_lossy(&bytes)))
        })
    }

    async fn handle_empty(response: reqwest::Response) -> ClientResult<()> {
        Self::check_status(response).await.map(|_| ())
    }

    async fn check_status(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await?;
        // Structured backend error first
        if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&text) {
            return Err(ClientError::Api {
                status: status.as_u16(),
                kind: api_err.kind,
                message: api_err.message,
            });
        }
        match status {
            StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized(text)),
            StatusCode::FORBIDDEN => Err(ClientError::Forbidden(text)),
            StatusCode::NOT_FOUND => Err(ClientError::NotFound(text)),
            StatusCode::BAD_REQUEST => Err(ClientError::Validation(text)),
            _ => Err(ClientError::Internal(format!("{status}: {text}"))),
        }
    }
}

fn header_value(value: &str) -> ClientResult<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| ClientError::Config(format!("invalid header value: {e}")))
}
