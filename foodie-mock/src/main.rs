//! foodie-mock — local backend for seeding dry runs
//!
//! Binds `MOCK_ADDR` (default 127.0.0.1:8090). Point the seeder at
//! `http://<addr>/v1` with any project/key values.

use std::sync::Arc;

use foodie_mock::{MockServer, MockState};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "foodie_mock=debug,tower_http=info".into()),
        )
        .init();

    let bind = std::env::var("MOCK_ADDR").unwrap_or_else(|_| "127.0.0.1:8090".into());
    let server = MockServer::start_with(Arc::new(MockState::new()), &bind).await?;
    tracing::info!("Endpoint: {}", server.endpoint());

    server.join().await;
    Ok(())
}
