//! Seeder configuration
//!
//! Everything comes from the environment (a `.env` file is loaded first by
//! the binary). Backend identifiers have no defaults: seeding the wrong
//! project is worse than refusing to start.

use foodie_client::ClientConfig;
use thiserror::Error;

/// Default number of entries listed per page while wiping
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Configuration error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Collection IDs written by the seeder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionIds {
    pub categories: String,
    pub customizations: String,
    pub menu: String,
    pub menu_customizations: String,
}

/// Seeder configuration
#[derive(Debug, Clone)]
pub struct SeedConfig {
    /// API endpoint including the version prefix
    pub endpoint: String,
    pub project_id: String,
    /// Server API key with documents and files scopes
    pub api_key: String,
    pub database_id: String,
    pub collections: CollectionIds,
    /// Bucket holding re-hosted menu images
    pub bucket_id: String,
    /// Per-request timeout in seconds; unset means wait indefinitely
    pub timeout: Option<u64>,
    /// Page size used when listing entries to delete
    pub page_size: u32,
}

impl SeedConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };
        let parsed = |name: &'static str| -> Result<Option<u64>, ConfigError> {
            match lookup(name).filter(|v| !v.trim().is_empty()) {
                None => Ok(None),
                Some(value) => value
                    .trim()
                    .parse()
                    .map(Some)
                    .map_err(|_| ConfigError::Invalid { name, value }),
            }
        };

        let page_size = match parsed("SEED_PAGE_SIZE")? {
            None => DEFAULT_PAGE_SIZE,
            Some(0) => {
                return Err(ConfigError::Invalid {
                    name: "SEED_PAGE_SIZE",
                    value: "0".into(),
                });
            }
            Some(n) => u32::try_from(n).map_err(|_| ConfigError::Invalid {
                name: "SEED_PAGE_SIZE",
                value: n.to_string(),
            })?,
        };

        Ok(Self {
            endpoint: required("APPWRITE_ENDPOINT")?,
            project_id: required("APPWRITE_PROJECT_ID")?,
            api_key: required("APPWRITE_API_KEY")?,
            database_id: required("APPWRITE_DATABASE_ID")?,
            collections: CollectionIds {
                categories: required("APPWRITE_CATEGORIES_COLLECTION_ID")?,
                customizations: required("APPWRITE_CUSTOMIZATIONS_COLLECTION_ID")?,
                menu: required("APPWRITE_MENU_COLLECTION_ID")?,
                menu_customizations: required("APPWRITE_MENU_CUSTOMIZATIONS_COLLECTION_ID")?,
            },
            bucket_id: required("APPWRITE_BUCKET_ID")?,
            timeout: parsed("APPWRITE_TIMEOUT_SECS")?,
            page_size,
        })
    }

    /// Backend client configuration authenticated with the API key
    pub fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::new(&self.endpoint, &self.project_id).with_api_key(&self.api_key);
        match self.timeout {
            Some(secs) => config.with_timeout(secs),
            None => config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base_env() -> HashMap<&'static str, String> {
        [
            ("APPWRITE_ENDPOINT", "http://localhost/v1"),
            ("APPWRITE_PROJECT_ID", "foodie"),
            ("APPWRITE_API_KEY", "key"),
            ("APPWRITE_DATABASE_ID", "db"),
            ("APPWRITE_CATEGORIES_COLLECTION_ID", "categories"),
            ("APPWRITE_CUSTOMIZATIONS_COLLECTION_ID", "customizations"),
            ("APPWRITE_MENU_COLLECTION_ID", "menu"),
            ("APPWRITE_MENU_CUSTOMIZATIONS_COLLECTION_ID", "menu_customizations"),
            ("APPWRITE_BUCKET_ID", "assets"),
        ]
        .into_iter()
        .map(|(k, v)| (k, v.to_string()))
        .collect()
    }

    fn load(env: &HashMap<&'static str, String>) -> Result<SeedConfig, ConfigError> {
        SeedConfig::from_lookup(|name| env.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&base_env()).unwrap();
        assert_eq!(config.collections.menu_customizations, "menu_customizations");
        assert_eq!(config.timeout, None);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_missing_variable_is_named() {
        let mut env = base_env();
        env.remove("APPWRITE_BUCKET_ID");
        assert_eq!(load(&env).unwrap_err(), ConfigError::Missing("APPWRITE_BUCKET_ID"));

        let mut env = base_env();
        env.insert("APPWRITE_API_KEY", "  ".into());
        assert_eq!(load(&env).unwrap_err(), ConfigError::Missing("APPWRITE_API_KEY"));
    }

    #[test]
    fn test_optional_numbers() {
        let mut env = base_env();
        env.insert("APPWRITE_TIMEOUT_SECS", "15".into());
        env.insert("SEED_PAGE_SIZE", "25".into());
        let config = load(&env).unwrap();
        assert_eq!(config.timeout, Some(15));
        assert_eq!(config.page_size, 25);

        env.insert("SEED_PAGE_SIZE", "0".into());
        assert!(matches!(load(&env), Err(ConfigError::Invalid { name: "SEED_PAGE_SIZE", .. })));

        env.insert("SEED_PAGE_SIZE", "ten".into());
        assert!(matches!(load(&env), Err(ConfigError::Invalid { name: "SEED_PAGE_SIZE", .. })));
    }
}
