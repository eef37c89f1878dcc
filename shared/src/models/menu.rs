//! Menu Item Model
//!
//! Numeric fields keep the dataset's JSON number as written, so an integer
//! stays an integer on the wire and fractions or negatives load unchanged.

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Menu item entry as it appears in the dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub description: String,
    /// Source image; re-hosted into the bucket during seeding
    pub image_url: String,
    pub price: Number,
    pub rating: Number,
    pub calories: Number,
    pub protein: Number,
    /// Category reference (by name)
    pub category_name: String,
    /// Customization references (by name)
    #[serde(default)]
    pub customizations: Vec<String>,
}

/// Menu document payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub price: Number,
    pub rating: Number,
    pub calories: Number,
    pub protein: Number,
    /// Category document ID
    pub categories: String,
}

impl MenuItemCreate {
    /// Build the stored document from a dataset entry, a resolved category ID
    /// and the image URL to keep.
    pub fn from_item(item: &MenuItem, category_id: &str, image_url: impl Into<String>) -> Self {
        Self {
            name: item.name.clone(),
            description: item.description.clone(),
            image_url: image_url.into(),
            price: item.price.clone(),
            rating: item.rating.clone(),
            calories: item.calories.clone(),
            protein: item.protein.clone(),
            categories: category_id.to_string(),
        }
    }
}

/// Menu ↔ customization join document payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuCustomizationCreate {
    /// Menu document ID
    pub menu: String,
    /// Customization document ID
    pub customizations: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_payload_uses_category_id() {
        let item: MenuItem = serde_json::from_str(
            r#"{
                "name": "Bean Burrito",
                "description": "Beans, rice and salsa",
                "image_url": "https://img.example.com/burrito.png",
                "price": 20.99,
                "rating": 4.2,
                "calories": 480,
                "protein": 18,
                "category_name": "Burritos",
                "customizations": ["Jalapeños"]
            }"#,
        )
        .unwrap();

        let doc = MenuItemCreate::from_item(&item, "cat-1", "https://cdn.example.com/view");
        let json = serde_json::to_value(&doc).unwrap();

        assert_eq!(json["categories"], "cat-1");
        assert_eq!(json["image_url"], "https://cdn.example.com/view");
        assert!(json.get("category_name").is_none());
        assert!(json.get("customizations").is_none());
    }

    #[test]
    fn test_customizations_default_to_empty() {
        let item: MenuItem = serde_json::from_str(
            r#"{"name":"Water","description":"","image_url":"","price":1,
                "rating":5,"calories":0,"protein":0,"category_name":"Drinks"}"#,
        )
        .unwrap();
        assert!(item.customizations.is_empty());
    }

    #[test]
    fn test_numbers_keep_their_form() {
        let item: MenuItem = serde_json::from_str(
            r#"{"name":"Side Salad","description":"Greens","image_url":"",
                "price":25,"rating":4.5,"calories":120.5,"protein":-3.2,
                "category_name":"Bowls"}"#,
        )
        .unwrap();

        let doc = MenuItemCreate::from_item(&item, "cat-1", "");
        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains(r#""price":25,"#), "{json}");
        assert!(json.contains(r#""rating":4.5,"#), "{json}");
        assert!(json.contains(r#""calories":120.5,"#), "{json}");
        assert!(json.contains(r#""protein":-3.2,"#), "{json}");
    }
}
