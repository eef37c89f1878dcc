//! Customization Model

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Kind of customization
///
/// Open set: values the app does not know yet are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CustomizationKind {
    Topping,
    Side,
    Size,
    Crust,
    Other(String),
}

impl CustomizationKind {
    pub fn as_str(&self) -> &str {
        match self {
            CustomizationKind::Topping => "topping",
            CustomizationKind::Side => "side",
            CustomizationKind::Size => "size",
            CustomizationKind::Crust => "crust",
            CustomizationKind::Other(kind) => kind,
        }
    }
}

impl From<String> for CustomizationKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "topping" => CustomizationKind::Topping,
            "side" => CustomizationKind::Side,
            "size" => CustomizationKind::Size,
            "crust" => CustomizationKind::Crust,
            _ => CustomizationKind::Other(value),
        }
    }
}

impl From<CustomizationKind> for String {
    fn from(value: CustomizationKind) -> Self {
        match value {
            CustomizationKind::Other(kind) => kind,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for CustomizationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Customization entry (topping, side, size, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customization {
    pub name: String,
    /// Sent as written in the dataset (`25` stays an integer)
    pub price: Number,
    #[serde(rename = "type")]
    pub kind: CustomizationKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_kinds_parse() {
        let c: Customization =
            serde_json::from_str(r#"{"name":"Fries","price":35,"type":"side"}"#).unwrap();
        assert_eq!(c.kind, CustomizationKind::Side);
        assert_eq!(c.price, Number::from(35));
    }

    #[test]
    fn test_unknown_kind_round_trips() {
        let c: Customization =
            serde_json::from_str(r#"{"name":"Mint Dip","price":12,"type":"dip"}"#).unwrap();
        assert_eq!(c.kind, CustomizationKind::Other("dip".into()));

        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["type"], "dip");
    }

    #[test]
    fn test_price_keeps_integer_form() {
        let c: Customization =
            serde_json::from_str(r#"{"name":"Large","price":40,"type":"size"}"#).unwrap();
        let json = serde_json::to_string(&c).unwrap();
        assert!(json.contains(r#""price":40,"#), "{json}");

        let c: Customization =
            serde_json::from_str(r#"{"name":"Dip","price":12.5,"type":"dip"}"#).unwrap();
        assert_eq!(c.price.as_f64(), Some(12.5));
    }
}
