//! Shared types for the Foodie catalog tooling
//!
//! Catalog entity models and the seed dataset, used by the seeder and
//! its tests.

pub mod dataset;
pub mod models;

// Re-exports
pub use dataset::{Dataset, DatasetError, DatasetIssue};
pub use models::{
    Category, Customization, CustomizationKind, MenuCustomizationCreate, MenuItem, MenuItemCreate,
};
