//! Data models
//!
//! Seed entries mirror the dataset file. `*Create` payloads are the
//! document bodies written to the backend.

pub mod category;
pub mod customization;
pub mod menu;

// Re-exports
pub use category::*;
pub use customization::*;
pub use menu::*;
