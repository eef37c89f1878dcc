//! Foodie Mock - in-memory stand-in for the catalog backend
//!
//! Speaks the document, storage and account endpoints the seeder and the
//! session provider use, plus `/images/{name}` as a source for menu images.

pub mod api;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

pub use state::{MockFile, MockState};

/// A mock server running on a local port
pub struct MockServer {
    addr: SocketAddr,
    state: Arc<MockState>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl MockServer {
    /// Start a server with empty state on an ephemeral port
    pub async fn start() -> std::io::Result<Self> {
        Self::start_with(Arc::new(MockState::new()), "127.0.0.1:0").await
    }

    /// Start a server with the given state and bind address
    pub async fn start_with(state: Arc<MockState>, bind: &str) -> std::io::Result<Self> {
        let listener = tokio::net::TcpListener::bind(bind).await?;
        let addr = listener.local_addr()?;
        let app = api::router(state.clone());

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("Mock server error: {e}");
            }
        });
        tracing::info!("Mock backend listening on {addr}");

        Ok(Self {
            addr,
            state,
            handle: Some(handle),
        })
    }

    /// API endpoint, including the `/v1` prefix
    pub fn endpoint(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// URL of an image registered with [`MockState::put_image`]
    pub fn image_url(&self, name: &str) -> String {
        format!("http://{}/images/{name}", self.addr)
    }

    pub fn state(&self) -> &MockState {
        &self.state
    }

    /// Wait until the server task ends
    pub async fn join(mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        if let Some(handle) = &self.handle {
            handle.abort();
        }
    }
}
