//! Seeder error types
//!
//! Only failures that abort a run live here. Image re-hosting, unknown
//! customizations and failed link documents are logged and skipped.

use foodie_client::ClientError;
use thiserror::Error;

/// Fatal seeding error
#[derive(Debug, Error)]
pub enum SeedError {
    /// Backend client could not be built
    #[error("Client setup failed: {0}")]
    Setup(#[source] ClientError),

    /// Listing or deleting existing entries failed
    #[error("Failed to clear {target}: {source}")]
    Wipe {
        target: String,
        #[source]
        source: ClientError,
    },

    #[error("Failed to create category '{name}': {source}")]
    CreateCategory {
        name: String,
        #[source]
        source: ClientError,
    },

    #[error("Failed to create customization '{name}': {source}")]
    CreateCustomization {
        name: String,
        #[source]
        source: ClientError,
    },

    /// A menu item references a category that was not created
    #[error("Category not found: {category} (menu item '{item}')")]
    CategoryNotFound { item: String, category: String },

    #[error("Failed to create menu item '{name}': {source}")]
    CreateMenuItem {
        name: String,
        #[source]
        source: ClientError,
    },
}

/// Result type for seeding operations
pub type SeedResult<T> = Result<T, SeedError>;
