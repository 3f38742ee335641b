use indexmap::IndexMap;
use partnorm_attrs::RawAttributes;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::price::PriceTier;

/// One catalog part: a row of the vendor table plus its fetched `extra` data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub lcsc: String,
    pub category: String,
    pub subcategory: String,
    pub mfr: String,
    pub package: String,
    pub joints: u32,
    pub manufacturer: String,
    pub basic: bool,
    pub description: String,
    pub datasheet: String,
    pub stock: u64,
    #[serde(default)]
    pub price: Vec<PriceTier>,
    #[serde(default)]
    pub extra: Extra,
}

/// Detail data from the marketplace API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Extra {
    #[serde(default, deserialize_with = "attributes_or_empty")]
    pub attributes: RawAttributes,
    #[serde(default)]
    pub images: Vec<Value>,
    #[serde(default)]
    pub url: Option<String>,
}

/// The marketplace encodes "no attributes" as an empty JSON list.
fn attributes_or_empty<'de, D>(deserializer: D) -> Result<RawAttributes, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Attributes {
        Map(IndexMap<String, Value>),
        List(Vec<Value>),
        Null(()),
    }

    Ok(match Attributes::deserialize(deserializer)? {
        Attributes::Map(map) => map,
        Attributes::List(_) | Attributes::Null(()) => RawAttributes::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn component_json(attributes: Value) -> Value {
        json!({
            "lcsc": "C25804",
            "category": "Resistors",
            "subcategory": "Chip Resistor - Surface Mount",
            "mfr": "0603WAF1002T5E",
            "package": "0603",
            "joints": 2,
            "manufacturer": "UNI-ROYAL(Uniroyal Elec)",
            "basic": true,
            "description": "",
            "datasheet": "",
            "stock": 1000,
            "extra": {"attributes": attributes}
        })
    }

    #[test]
    fn test_list_attributes_are_empty() {
        let component: Component = serde_json::from_value(component_json(json!([]))).unwrap();
        assert!(component.extra.attributes.is_empty());
        assert!(component.price.is_empty());
        assert_eq!(component.extra.url, None);

        let component: Component = serde_json::from_value(component_json(json!(null))).unwrap();
        assert!(component.extra.attributes.is_empty());
    }

    #[test]
    fn test_map_attributes_keep_order() {
        let component: Component = serde_json::from_str(
            &component_json(json!({})).to_string().replace(
                r#""attributes":{}"#,
                r#""attributes":{"Tolerance":"±1%","Resistance":"10kΩ"}"#,
            ),
        )
        .unwrap();
        assert_eq!(
            component.extra.attributes.keys().collect::<Vec<_>>(),
            ["Tolerance", "Resistance"]
        );
    }

    #[test]
    fn test_missing_extra() {
        let mut value = component_json(json!({}));
        value.as_object_mut().unwrap().remove("extra");
        let component: Component = serde_json::from_value(value).unwrap();
        assert_eq!(component.extra, Extra::default());
    }
}
