//! Foodie Client - HTTP client for the catalog backend
//!
//! Typed async access to the backend's document store, file storage and
//! account endpoints (Appwrite REST API, v1).

pub mod account;
pub mod config;
pub mod databases;
pub mod error;
pub mod http;
pub mod id;
pub mod storage;
pub mod types;

pub use config::ClientConfig;
pub use databases::Databases;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use storage::Storage;
pub use types::{AccountInfo, Document, DocumentList, FileList, InputFile, Query, StoredFile};
