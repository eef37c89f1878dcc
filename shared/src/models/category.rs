//! Category Model

use serde::{Deserialize, Serialize};

/// Category entry
///
/// Stored as-is in the categories collection. Menu items refer to it by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub description: String,
}
