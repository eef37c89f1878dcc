//! Catalog seeding pipeline
//!
//! A run is a fixed sequence of stages:
//!
//! 1. wipe every target collection, then the bucket
//! 2. create categories          → category map
//! 3. create customizations      → customization map
//! 4. create menu items and links (reads both maps)
//!
//! The backend assigns IDs at creation, so each map must be complete before
//! the stage that reads it starts. Creation is strictly sequential in dataset
//! order. Deletions inside one listed page run concurrently and fail fast.

use std::collections::{BTreeMap, HashMap};

use foodie_client::{ClientError, Databases, Query, Storage, id};
use futures::future::try_join_all;
use serde::Serialize;
use shared::{Category, Customization, Dataset, MenuCustomizationCreate, MenuItem, MenuItemCreate};
use tracing::{error, info, warn};

use crate::config::{CollectionIds, DEFAULT_PAGE_SIZE, SeedConfig};
use crate::error::{SeedError, SeedResult};
use crate::images::{ImageFetcher, RehostError};

/// Name → document ID, built by one stage and read by later ones
pub type IdMap = HashMap<String, String>;

/// Where the seeder writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedTargets {
    pub database_id: String,
    pub collections: CollectionIds,
    pub bucket_id: String,
}

impl From<&SeedConfig> for SeedTargets {
    fn from(config: &SeedConfig) -> Self {
        Self {
            database_id: config.database_id.clone(),
            collections: config.collections.clone(),
            bucket_id: config.bucket_id.clone(),
        }
    }
}

/// Output of the menu stage
#[derive(Debug, Default)]
pub struct MenuOutcome {
    pub menu: IdMap,
    pub links_created: usize,
    pub images_rehosted: usize,
    pub image_fallbacks: usize,
    pub skipped_customizations: usize,
    pub failed_links: usize,
}

/// Summary of a successful run
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    /// Entries removed per collection / bucket ID
    pub wiped: BTreeMap<String, usize>,
    pub categories: usize,
    pub customizations: usize,
    pub menu_items: usize,
    pub links: usize,
    pub images_rehosted: usize,
    pub image_fallbacks: usize,
    pub skipped_customizations: usize,
    pub failed_links: usize,
}

/// Seeds a catalog backend from a [`Dataset`]
pub struct CatalogSeeder<'a, B, F> {
    backend: &'a B,
    images: &'a F,
    targets: SeedTargets,
    page_size: u32,
}

impl<'a, B, F> CatalogSeeder<'a, B, F>
where
    B: Databases + Storage,
    F: ImageFetcher,
{
    pub fn new(backend: &'a B, images: &'a F, targets: SeedTargets) -> Self {
        Self {
            backend,
            images,
            targets,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Entries listed per page while wiping
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Wipe the targets and recreate the catalog from `dataset`.
    ///
    /// Destructive: anything already in the target collections or bucket is
    /// deleted. On error the backend is left partially seeded.
    pub async fn seed(&self, dataset: &Dataset) -> SeedResult<SeedReport> {
        info!(
            categories = dataset.categories.len(),
            customizations = dataset.customizations.len(),
            menu = dataset.menu.len(),
            "Starting seeding process"
        );

        let result = self.run(dataset).await;
        match &result {
            Ok(report) => info!(
                categories = report.categories,
                customizations = report.customizations,
                menu_items = report.menu_items,
                links = report.links,
                image_fallbacks = report.image_fallbacks,
                "Seeding complete"
            ),
            Err(e) => error!(error = %e, "Seeding failed"),
        }
        result
    }

    async fn run(&self, dataset: &Dataset) -> SeedResult<SeedReport> {
        let wiped = self.wipe().await?;
        let categories = self.create_categories(&dataset.categories).await?;
        let customizations = self.create_customizations(&dataset.customizations).await?;
        let menu = self
            .create_menu(&dataset.menu, &categories, &customizations)
            .await?;

        Ok(SeedReport {
            wiped,
            categories: categories.len(),
            customizations: customizations.len(),
            menu_items: menu.menu.len(),
            links: menu.links_created,
            images_rehosted: menu.images_rehosted,
            image_fallbacks: menu.image_fallbacks,
            skipped_customizations: menu.skipped_customizations,
            failed_links: menu.failed_links,
        })
    }

    // ========== Stage 1: wipe ==========

    /// Clear the four collections, then the bucket
    pub async fn wipe(&self) -> SeedResult<BTreeMap<String, usize>> {
        let collections = &self.targets.collections;
        let mut wiped = BTreeMap::new();

        for collection_id in [
            &collections.categories,
            &collections.customizations,
            &collections.menu,
            &collections.menu_customizations,
        ] {
            let removed = self.clear_collection(collection_id).await?;
            wiped.insert(collection_id.clone(), removed);
        }

        let removed = self.clear_storage().await?;
        wiped.insert(self.targets.bucket_id.clone(), removed);

        Ok(wiped)
    }

    async fn clear_collection(&self, collection_id: &str) -> SeedResult<usize> {
        let database_id = &self.targets.database_id;
        let wipe_error = |source: ClientError| {
            error!(collection = %collection_id, error = %source, "Error clearing collection");
            SeedError::Wipe {
                target: collection_id.to_string(),
                source,
            }
        };

        info!(collection = %collection_id, "Clearing collection");
        let mut removed = 0;
        loop {
            let page = self
                .backend
                .list_documents(database_id, collection_id, &[Query::limit(self.page_size)])
                .await
                .map_err(wipe_error)?;
            let count = page.documents.len();
            if count == 0 {
                break;
            }

            try_join_all(page.documents.iter().map(|doc| {
                self.backend
                    .delete_document(database_id, collection_id, &doc.id)
            }))
            .await
            .map_err(wipe_error)?;

            removed += count;
            if page.total <= count as u64 {
                break;
            }
        }

        info!(collection = %collection_id, removed, "Cleared collection");
        Ok(removed)
    }

    async fn clear_storage(&self) -> SeedResult<usize> {
        let bucket_id = &self.targets.bucket_id;
        let wipe_error = |source: ClientError| {
            error!(bucket = %bucket_id, error = %source, "Error clearing storage");
            SeedError::Wipe {
                target: bucket_id.to_string(),
                source,
            }
        };

        info!(bucket = %bucket_id, "Clearing storage");
        let mut removed = 0;
        loop {
            let page = self
                .backend
                .list_files(bucket_id, &[Query::limit(self.page_size)])
                .await
                .map_err(wipe_error)?;
            let count = page.files.len();
            if count == 0 {
                break;
            }

            try_join_all(
                page.files
                    .iter()
                    .map(|file| self.backend.delete_file(bucket_id, &file.id)),
            )
            .await
            .map_err(wipe_error)?;

            removed += count;
            if page.total <= count as u64 {
                break;
            }
        }

        info!(bucket = %bucket_id, removed, "Cleared storage");
        Ok(removed)
    }

    // ========== Stage 2: categories ==========

    pub async fn create_categories(&self, categories: &[Category]) -> SeedResult<IdMap> {
        info!(count = categories.len(), "Creating categories");
        let mut map = IdMap::with_capacity(categories.len());

        for category in categories {
            let doc = self
                .backend
                .create_document(
                    &self.targets.database_id,
                    &self.targets.collections.categories,
                    &id::unique(),
                    category,
                )
                .await
                .map_err(|source| {
                    error!(category = %category.name, error = %source, "Error creating category");
                    SeedError::CreateCategory {
                        name: category.name.clone(),
                        source,
                    }
                })?;

            info!(category = %category.name, id = %doc.id, "Created category");
            map.insert(category.name.clone(), doc.id);
        }

        Ok(map)
    }

    // ========== Stage 3: customizations ==========

    pub async fn create_customizations(&self, customizations: &[Customization]) -> SeedResult<IdMap> {
        info!(count = customizations.len(), "Creating customizations");
        let mut map = IdMap::with_capacity(customizations.len());

        for customization in customizations {
            let doc = self
                .backend
                .create_document(
                    &self.targets.database_id,
                    &self.targets.collections.customizations,
                    &id::unique(),
                    customization,
                )
                .await
                .map_err(|source| {
                    error!(
                        customization = %customization.name,
                        error = %source,
                        "Error creating customization"
                    );
                    SeedError::CreateCustomization {
                        name: customization.name.clone(),
                        source,
                    }
                })?;

            info!(customization = %customization.name, id = %doc.id, "Created customization");
            map.insert(customization.name.clone(), doc.id);
        }

        Ok(map)
    }

    // ========== Stage 4: menu items and links ==========

    pub async fn create_menu(
        &self,
        items: &[MenuItem],
        categories: &IdMap,
        customizations: &IdMap,
    ) -> SeedResult<MenuOutcome> {
        info!(count = items.len(), "Creating menu items");
        let mut outcome = MenuOutcome::default();

        for item in items {
            info!(item = %item.name, "Processing menu item");

            let Some(category_id) = categories.get(&item.category_name) else {
                error!(item = %item.name, category = %item.category_name, "Category not found");
                return Err(SeedError::CategoryNotFound {
                    item: item.name.clone(),
                    category: item.category_name.clone(),
                });
            };

            let image_url = match self.rehost_image(&item.image_url).await {
                Ok(url) => {
                    outcome.images_rehosted += 1;
                    url
                }
                Err(e) => {
                    warn!(
                        item = %item.name,
                        url = %item.image_url,
                        error = %e,
                        "Image re-hosting failed, using original URL"
                    );
                    outcome.image_fallbacks += 1;
                    item.image_url.clone()
                }
            };

            let payload = MenuItemCreate::from_item(item, category_id, image_url);
            let doc = self
                .backend
                .create_document(
                    &self.targets.database_id,
                    &self.targets.collections.menu,
                    &id::unique(),
                    &payload,
                )
                .await
                .map_err(|source| {
                    error!(item = %item.name, error = %source, "Error creating menu item");
                    SeedError::CreateMenuItem {
                        name: item.name.clone(),
                        source,
                    }
                })?;
            info!(item = %item.name, id = %doc.id, "Created menu item");
            outcome.menu.insert(item.name.clone(), doc.id.clone());

            self.link_customizations(item, &doc.id, customizations, &mut outcome)
                .await;
        }

        Ok(outcome)
    }

    /// Create one join document per resolvable customization. Never fails.
    async fn link_customizations(
        &self,
        item: &MenuItem,
        menu_id: &str,
        customizations: &IdMap,
        outcome: &mut MenuOutcome,
    ) {
        for name in &item.customizations {
            let Some(customization_id) = customizations.get(name) else {
                warn!(item = %item.name, customization = %name, "Customization not found, skipping");
                outcome.skipped_customizations += 1;
                continue;
            };

            let link = MenuCustomizationCreate {
                menu: menu_id.to_string(),
                customizations: customization_id.clone(),
            };
            let created = self
                .backend
                .create_document(
                    &self.targets.database_id,
                    &self.targets.collections.menu_customizations,
                    &id::unique(),
                    &link,
                )
                .await;

            match created {
                Ok(_) => {
                    info!(item = %item.name, customization = %name, "Created menu customization");
                    outcome.links_created += 1;
                }
                Err(e) => {
                    warn!(
                        item = %item.name,
                        customization = %name,
                        error = %e,
                        "Error creating menu customization, skipping"
                    );
                    outcome.failed_links += 1;
                }
            }
        }
    }

    /// Download a source image, upload it under a fresh ID and return its view URL
    async fn rehost_image(&self, source_url: &str) -> Result<String, RehostError> {
        info!(url = %source_url, "Uploading image");
        let image = self.images.fetch(source_url).await?;
        let file = image.into_input_file(source_url);

        let stored = self
            .backend
            .create_file(&self.targets.bucket_id, &id::unique(), file)
            .await?;
        let url = self.backend.file_view_url(&self.targets.bucket_id, &stored.id);
        info!(url = %url, "Uploaded image");
        Ok(url)
    }
}
