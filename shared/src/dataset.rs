//! Seed dataset
//!
//! The catalog the seeder writes: categories, customizations and menu items.
//! A default dataset ships with the crate; other files can be loaded at runtime.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Category, Customization, MenuItem};

const EMBEDDED_DATASET: &str = include_str!("../data/dummy_data.json");

/// Dataset loading error
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid dataset: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Full seed dataset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub customizations: Vec<Customization>,
    #[serde(default)]
    pub menu: Vec<MenuItem>,
}

/// Reference problem found by [`Dataset::validate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetIssue {
    /// A menu item names a category that is not in the dataset
    UnknownCategory { item: String, category: String },
    /// A menu item names a customization that is not in the dataset
    UnknownCustomization { item: String, customization: String },
    /// Two entries of the same kind share a name; the later one wins in lookups
    DuplicateName { kind: &'static str, name: String },
}

impl std::fmt::Display for DatasetIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetIssue::UnknownCategory { item, category } => {
                write!(f, "menu item '{item}' references unknown category '{category}'")
            }
            DatasetIssue::UnknownCustomization {
                item,
                customization,
            } => write!(
                f,
                "menu item '{item}' references unknown customization '{customization}'"
            ),
            DatasetIssue::DuplicateName { kind, name } => {
                write!(f, "duplicate {kind} name '{name}'")
            }
        }
    }
}

impl Dataset {
    /// The dataset bundled with this crate
    pub fn embedded() -> Result<Self, DatasetError> {
        Self::from_json_str(EMBEDDED_DATASET)
    }

    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a dataset from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_json_str(&raw)?;
        tracing::debug!(
            path = %path.display(),
            categories = dataset.categories.len(),
            customizations = dataset.customizations.len(),
            menu = dataset.menu.len(),
            "Dataset loaded"
        );
        Ok(dataset)
    }

    /// Number of (menu item, customization) pairs that resolve to a
    /// customization present in this dataset.
    pub fn resolvable_links(&self) -> usize {
        let names: HashSet<&str> = self.customizations.iter().map(|c| c.name.as_str()).collect();
        self.menu
            .iter()
            .flat_map(|item| item.customizations.iter())
            .filter(|name| names.contains(name.as_str()))
            .count()
    }

    /// Check cross references between entries.
    ///
    /// Diagnostic only. The seeder still treats an unknown category as fatal
    /// and an unknown customization as a skip.
    pub fn validate(&self) -> Vec<DatasetIssue> {
        let mut issues = Vec::new();

        let categories = collect_names("category", self.categories.iter().map(|c| &c.name), &mut issues);
        let customizations = collect_names(
            "customization",
            self.customizations.iter().map(|c| &c.name),
            &mut issues,
        );
        collect_names("menu item", self.menu.iter().map(|m| &m.name), &mut issues);

        for item in &self.menu {
            if !categories.contains(item.category_name.as_str()) {
                issues.push(DatasetIssue::UnknownCategory {
                    item: item.name.clone(),
                    category: item.category_name.clone(),
                });
            }
            for name in &item.customizations {
                if !customizations.contains(name.as_str()) {
                    issues.push(DatasetIssue::UnknownCustomization {
                        item: item.name.clone(),
                        customization: name.clone(),
                    });
                }
            }
        }

        issues
    }
}

fn collect_names<'a>(
    kind: &'static str,
    names: impl Iterator<Item = &'a String>,
    issues: &mut Vec<DatasetIssue>,
) -> HashSet<&'a str> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name.as_str()) {
            issues.push(DatasetIssue::DuplicateName {
                kind,
                name: name.clone(),
            });
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample() -> Dataset {
        Dataset::from_json_str(
            r#"{
                "categories": [{"name": "Burgers", "description": "Grilled"}],
                "customizations": [
                    {"name": "Fries", "price": 35, "type": "side"},
                    {"name": "Bacon", "price": 30, "type": "topping"}
                ],
                "menu": [{
                    "name": "Cheeseburger",
                    "description": "Classic",
                    "image_url": "https://img.example.com/burger.png",
                    "price": 25.99,
                    "rating": 4.5,
                    "calories": 550,
                    "protein": 25,
                    "category_name": "Burgers",
                    "customizations": ["Fries", "Bacon", "Ketchup"]
                }]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_embedded_dataset_is_consistent() {
        let dataset = Dataset::embedded().unwrap();
        assert!(!dataset.categories.is_empty());
        assert!(!dataset.customizations.is_empty());
        assert!(!dataset.menu.is_empty());
        assert!(dataset.validate().is_empty(), "{:?}", dataset.validate());
    }

    #[test]
    fn test_validate_reports_unknown_customization() {
        let issues = sample().validate();
        assert_eq!(
            issues,
            vec![DatasetIssue::UnknownCustomization {
                item: "Cheeseburger".into(),
                customization: "Ketchup".into(),
            }]
        );
    }

    #[test]
    fn test_validate_reports_unknown_category_and_duplicates() {
        let mut dataset = sample();
        dataset.menu[0].category_name = "Pizzas".into();
        dataset.categories.push(dataset.categories[0].clone());

        let issues = dataset.validate();
        assert!(issues.contains(&DatasetIssue::UnknownCategory {
            item: "Cheeseburger".into(),
            category: "Pizzas".into(),
        }));
        assert!(issues.contains(&DatasetIssue::DuplicateName {
            kind: "category",
            name: "Burgers".into(),
        }));
    }

    #[test]
    fn test_resolvable_links_skips_unknown_names() {
        assert_eq!(sample().resolvable_links(), 2);
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"categories":[{{"name":"Bowls","description":"Rice"}}]}}"#).unwrap();

        let dataset = Dataset::from_path(file.path()).unwrap();
        assert_eq!(dataset.categories.len(), 1);
        assert!(dataset.menu.is_empty());
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = Dataset::from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }

    #[test]
    fn test_malformed_json() {
        let err = Dataset::from_json_str("{\"categories\": [").unwrap_err();
        assert!(matches!(err, DatasetError::Parse(_)));
    }
}
