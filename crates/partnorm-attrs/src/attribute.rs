use std::fmt;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use partnorm_units::{Dimension, Magnitude, format_magnitude};
use regex::{Captures, Regex};
use serde::de::{self, Deserializer};
use serde::ser::{SerializeTuple, Serializer};
use serde::{Deserialize, Serialize};

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

/// One named sub-value of a [`NormalizedAttribute`].
///
/// Serialized as the two element array `[value, dimension]`, e.g.
/// `[10000, "resistance"]`, `["NaN", "voltage"]` or `["0603", "string"]`.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Quantity(Magnitude, Dimension),
    Text(String),
}

impl AttributeValue {
    pub fn dimension(&self) -> Dimension {
        match self {
            AttributeValue::Quantity(_, dimension) => *dimension,
            AttributeValue::Text(_) => Dimension::String,
        }
    }

    pub fn magnitude(&self) -> Option<Magnitude> {
        match self {
            AttributeValue::Quantity(magnitude, _) => Some(*magnitude),
            AttributeValue::Text(_) => None,
        }
    }

    pub fn is_nan(&self) -> bool {
        matches!(self, AttributeValue::Quantity(Magnitude::NotANumber, _))
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Quantity(magnitude, dimension) => {
                f.write_str(&format_magnitude(*magnitude, *dimension))
            }
            AttributeValue::Text(text) => f.write_str(text),
        }
    }
}

impl Serialize for AttributeValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut tuple = serializer.serialize_tuple(2)?;
        match self {
            AttributeValue::Quantity(magnitude, dimension) => {
                tuple.serialize_element(magnitude)?;
                tuple.serialize_element(dimension)?;
            }
            AttributeValue::Text(text) => {
                tuple.serialize_element(text)?;
                tuple.serialize_element(&Dimension::String)?;
            }
        }
        tuple.end()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireValue {
    Magnitude(Magnitude),
    Text(String),
}

impl<'de> Deserialize<'de> for AttributeValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (value, dimension) = <(WireValue, Dimension)>::deserialize(deserializer)?;
        match (value, dimension) {
            (WireValue::Text(text), Dimension::String) => Ok(AttributeValue::Text(text)),
            (WireValue::Magnitude(magnitude), Dimension::String) => {
                Ok(AttributeValue::Text(magnitude.to_string()))
            }
            (WireValue::Magnitude(magnitude), dimension) => {
                Ok(AttributeValue::Quantity(magnitude, dimension))
            }
            (WireValue::Text(text), dimension) => Err(de::Error::custom(format!(
                "expected a number for a {} value, got '{}'",
                dimension, text
            ))),
        }
    }
}

/// The canonical, display-ready form of one attribute.
///
/// Every sub-value a parser declares is present in `values`, unreadable ones
/// carry [`Magnitude::NotANumber`], so consumers see a stable shape per
/// attribute kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedAttribute {
    /// Display template referencing sub-values as `${name}`.
    pub format: String,
    /// Name of the headline sub-value used for sorting and filtering.
    #[serde(alias = "default")]
    pub primary: String,
    pub values: IndexMap<String, AttributeValue>,
}

impl NormalizedAttribute {
    pub fn new(format: impl Into<String>, primary: impl Into<String>) -> Self {
        Self {
            format: format.into(),
            primary: primary.into(),
            values: IndexMap::new(),
        }
    }

    /// A single sub-value rendered on its own.
    pub fn scalar(name: &str, magnitude: Magnitude, dimension: Dimension) -> Self {
        Self::new(format!("${{{}}}", name), name).with(name, magnitude, dimension)
    }

    pub fn with(mut self, name: impl Into<String>, magnitude: Magnitude, dimension: Dimension) -> Self {
        self.values
            .insert(name.into(), AttributeValue::Quantity(magnitude, dimension));
        self
    }

    pub fn with_text(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.values.insert(name.into(), AttributeValue::Text(text.into()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.values.get(name)
    }

    pub fn magnitude(&self, name: &str) -> Option<Magnitude> {
        self.get(name).and_then(AttributeValue::magnitude)
    }

    pub fn primary_value(&self) -> Option<&AttributeValue> {
        self.get(&self.primary)
    }

    /// True when every numeric sub-value is the NaN marker.
    pub fn is_blank(&self) -> bool {
        self.values
            .values()
            .all(|value| matches!(value, AttributeValue::Quantity(Magnitude::NotANumber, _)))
    }

    /// Substitute the template placeholders, e.g. `"2R5 @ 1 A, 10 V"`.
    ///
    /// Placeholders naming an unknown sub-value are left untouched.
    pub fn render(&self) -> String {
        PLACEHOLDER
            .replace_all(&self.format, |caps: &Captures| match self.values.get(&caps[1]) {
                Some(value) => value.to_string(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_wire_layout() {
        let attribute = NormalizedAttribute::new("${Vgs} @ ${Id}", "Vgs")
            .with("Vgs", Magnitude::Number(2.5), Dimension::Voltage)
            .with("Id", Magnitude::NotANumber, Dimension::Current);

        assert_eq!(
            serde_json::to_value(&attribute).unwrap(),
            serde_json::json!({
                "format": "${Vgs} @ ${Id}",
                "primary": "Vgs",
                "values": {
                    "Vgs": [2.5, "voltage"],
                    "Id": ["NaN", "current"]
                }
            })
        );
    }

    #[test]
    fn test_accepts_default_alias() {
        let attribute: NormalizedAttribute = serde_json::from_str(
            r#"{"format": "${Id 1}, ${Id 2}", "default": "Id 1",
                "values": {"Id 1": [1, "current"], "Id 2": ["NaN", "current"]}}"#,
        )
        .unwrap();
        assert_eq!(attribute.primary, "Id 1");
        assert_eq!(attribute.magnitude("Id 1"), Some(Magnitude::Number(1.0)));
        assert!(attribute.get("Id 2").unwrap().is_nan());
        // Keys keep their input order.
        assert_eq!(attribute.values.keys().collect::<Vec<_>>(), ["Id 1", "Id 2"]);
    }

    #[test]
    fn test_text_values() {
        let attribute: NormalizedAttribute = serde_json::from_str(
            r#"{"format": "${default}", "primary": "default", "values": {"default": ["NaN", "string"]}}"#,
        )
        .unwrap();
        assert_eq!(attribute.get("default"), Some(&AttributeValue::Text("NaN".into())));

        let bad = serde_json::from_str::<AttributeValue>(r#"["ten", "voltage"]"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_render() {
        let attribute = NormalizedAttribute::new("${Rds} @ ${Id}, ${Vgs} ${missing}", "Rds")
            .with("Rds", Magnitude::Number(2.5), Dimension::Resistance)
            .with("Id", Magnitude::Number(1.0), Dimension::Current)
            .with("Vgs", Magnitude::NotANumber, Dimension::Voltage);
        assert_eq!(attribute.render(), "2R5 @ 1 A, - ${missing}");

        let text = NormalizedAttribute::new("${default}", "default").with_text("default", "0603");
        assert_eq!(text.render(), "0603");
        assert!(!text.is_blank());
    }
}
