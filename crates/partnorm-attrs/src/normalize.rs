use std::collections::BTreeMap;

use indexmap::IndexMap;
use indexmap::map::Entry;
use log::debug;
use serde_json::Value;

use crate::raw::{is_placeholder_value, raw_text};
use crate::{
    NormalizedAttribute, ValueParser, dispatch_with, extract_from_description, normalize_key,
    parser_for,
};

/// The raw attribute bag of one component, in vendor order.
pub type RawAttributes = IndexMap<String, Value>;

/// Re-key a raw attribute bag by canonical key.
///
/// When several raw spellings collapse onto one key the first non-placeholder
/// value wins.
pub fn canonical_slots(raw: &RawAttributes) -> IndexMap<String, Value> {
    let mut slots: IndexMap<String, Value> = IndexMap::with_capacity(raw.len());
    for (name, value) in raw {
        match slots.entry(normalize_key(name)) {
            Entry::Vacant(slot) => {
                slot.insert(value.clone());
            }
            Entry::Occupied(mut slot) => {
                if is_placeholder_value(slot.get()) && !is_placeholder_value(value) {
                    slot.insert(value.clone());
                }
            }
        }
    }
    slots
}

/// Fill canonical slots from description-derived values.
///
/// Only absent or placeholder slots are written; structured vendor data always
/// wins.
pub fn weak_update(slots: &mut IndexMap<String, Value>, extracted: BTreeMap<String, String>) {
    for (name, text) in extracted {
        let key = normalize_key(&name);
        let fill = slots.get(&key).is_none_or(is_placeholder_value);
        if fill {
            debug!("Filling '{}' from description: '{}'", key, text);
            slots.insert(key, Value::String(text));
        }
    }
}

/// Per-run adjustments to [`normalize_attributes_with`].
pub trait NormalizeHooks {
    /// Parser for a canonical key.
    fn parser_for(&self, key: &str) -> ValueParser {
        parser_for(key)
    }

    /// Whether a canonical key makes it into the output.
    fn keeps(&self, _key: &str) -> bool {
        true
    }
}

/// The dispatch table as is, every key kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHooks;

impl NormalizeHooks for DefaultHooks {}

/// Normalize one component's attribute bag.
///
/// `description`, when given, supplies values for attributes the bag leaves
/// blank. The result is keyed by canonical key in first-seen order.
pub fn normalize_attributes(
    raw: &RawAttributes,
    description: Option<&str>,
) -> IndexMap<String, NormalizedAttribute> {
    normalize_attributes_with(raw, RawAttributes::new(), description, &DefaultHooks)
}

/// [`normalize_attributes`] with `extra` canonical slots set over the bag and
/// `hooks` choosing parsers and filtering keys.
pub fn normalize_attributes_with<H: NormalizeHooks + ?Sized>(
    raw: &RawAttributes,
    extra: RawAttributes,
    description: Option<&str>,
    hooks: &H,
) -> IndexMap<String, NormalizedAttribute> {
    let mut slots = canonical_slots(raw);
    slots.extend(extra);
    if let Some(description) = description {
        weak_update(&mut slots, extract_from_description(description));
    }

    slots
        .into_iter()
        .filter(|(key, _)| hooks.keeps(key))
        .map(|(key, value)| {
            let attribute = dispatch_with(hooks.parser_for(&key), &key, &raw_text(&value));
            (key, attribute)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys;
    use serde_json::json;

    fn bag(value: Value) -> RawAttributes {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_first_real_value_wins() {
        let slots = canonical_slots(&bag(json!({
            "DC Resistance (DCR) (Max)": "-",
            "DCR( Ω Max )": "120mΩ",
            "DC Resistance": "150mΩ",
        })));
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[keys::DC_RESISTANCE], json!("120mΩ"));
    }

    #[test]
    fn test_decoded_bag_keeps_vendor_order() {
        let decoded: Value = serde_json::from_str(
            r#"{"Rated Voltage": "-", "Voltage Rated (DC)": "50V", "Allowable Voltage": "16V"}"#,
        )
        .unwrap();
        let slots = canonical_slots(&bag(decoded));
        assert_eq!(slots[keys::ALLOWABLE_VOLTAGE], json!("50V"));
    }

    #[test]
    fn test_weak_update_keeps_vendor_values() {
        let mut slots = canonical_slots(&bag(json!({
            "Resistance": "10kΩ",
            "Tolerance": "",
        })));
        weak_update(
            &mut slots,
            BTreeMap::from([
                ("Resistance".to_string(), "22kOhms".to_string()),
                ("Tolerance".to_string(), "±5%".to_string()),
                ("Power".to_string(), "1/8W".to_string()),
            ]),
        );
        assert_eq!(slots[keys::RESISTANCE], json!("10kΩ"));
        assert_eq!(slots[keys::TOLERANCE], json!("±5%"));
        assert_eq!(slots[keys::POWER], json!("1/8W"));
    }
}
