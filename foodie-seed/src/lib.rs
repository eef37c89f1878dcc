//! Foodie Seed - catalog seeder
//!
//! Wipes the catalog collections and image bucket, then recreates categories,
//! customizations, menu items and their links from a [`shared::Dataset`].

pub mod config;
pub mod error;
pub mod images;
pub mod logger;
pub mod seeder;

pub use config::{CollectionIds, ConfigError, SeedConfig};
pub use error::{SeedError, SeedResult};
pub use images::{FetchedImage, HttpImageFetcher, ImageError, ImageFetcher};
pub use seeder::{CatalogSeeder, IdMap, SeedReport, SeedTargets};

use shared::Dataset;

/// Seed the backend described by `config` with `dataset`
///
/// Builds an API-key client and an HTTP image fetcher, then runs
/// [`CatalogSeeder::seed`].
pub async fn seed(config: &SeedConfig, dataset: &Dataset) -> SeedResult<SeedReport> {
    let client = config
        .client_config()
        .build_http_client()
        .map_err(SeedError::Setup)?;
    let images = HttpImageFetcher::default();

    CatalogSeeder::new(&client, &images, SeedTargets::from(config))
        .with_page_size(config.page_size)
        .seed(dataset)
        .await
}
