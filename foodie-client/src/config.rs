//! Client configuration

/// Response format version requested from the backend
pub const DEFAULT_RESPONSE_FORMAT: &str = "1.5.0";

/// How the client authenticates its requests
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Credentials {
    /// No credentials (public endpoints only)
    #[default]
    None,
    /// Server API key (`X-Appwrite-Key`)
    ApiKey(String),
    /// End-user JWT (`X-Appwrite-JWT`)
    Jwt(String),
}

/// Client configuration for connecting to the backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API endpoint including the version prefix (e.g., "https://cloud.appwrite.io/v1")
    pub endpoint: String,

    /// Project ID (`X-Appwrite-Project`)
    pub project_id: String,

    pub credentials: Credentials,

    /// Request timeout in seconds. `None` waits indefinitely.
    pub timeout: Option<u64>,

    /// Value for `X-Appwrite-Response-Format`
    pub response_format: String,
}

impl ClientConfig {
    /// Create a new client configuration without credentials
    pub fn new(endpoint: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            project_id: project_id.into(),
            credentials: Credentials::None,
            timeout: None,
            response_format: DEFAULT_RESPONSE_FORMAT.to_string(),
        }
    }

    /// Authenticate with a server API key
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.credentials = Credentials::ApiKey(key.into());
        self
    }

    /// Authenticate as an end user with a JWT
    pub fn with_jwt(mut self, jwt: impl Into<String>) -> Self {
        self.credentials = Credentials::Jwt(jwt.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = Some(seconds);
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> super::ClientResult<super::HttpClient> {
        super::HttpClient::new(self)
    }
}
