use partnorm_attrs::keys;
use partnorm_attrs::{
    AttributeValue, DefaultHooks, Magnitude, NormalizeHooks, RawAttributes, ValueParser,
    dispatch, dispatch_value, dispatch_with, normalize_attributes, normalize_attributes_with,
};
use serde_json::json;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn unknown_key_passes_text_through() {
    init_logger();
    let (key, attribute) = dispatch("Mounting type", " SMD, 0603 ");
    assert_eq!(key, "Mounting type");
    assert_eq!(attribute.format, "${default}");
    assert_eq!(attribute.primary, "default");
    assert_eq!(
        attribute.get("default"),
        Some(&AttributeValue::Text(" SMD, 0603 ".to_string()))
    );
}

#[test]
fn known_key_uses_its_parser() {
    let (_, attribute) = dispatch(keys::RESISTANCE, "4k7");
    assert_eq!(attribute.magnitude("resistance"), Some(Magnitude::Number(4700.0)));

    let (_, garbage) = dispatch(keys::RESISTANCE, "about ten");
    assert!(garbage.is_blank());
}

#[test]
fn contract_violation_falls_back_to_text() {
    init_logger();
    let (key, attribute) = dispatch(keys::JUNCTION_TEMPERATURE, "150");
    assert_eq!(key, keys::JUNCTION_TEMPERATURE);
    assert_eq!(
        attribute.get("default"),
        Some(&AttributeValue::Text("150".to_string()))
    );

    let (_, range) = dispatch(keys::JUNCTION_TEMPERATURE, "-55℃~+150℃");
    assert_eq!(
        range.get("default"),
        Some(&AttributeValue::Text("-55℃~+150℃".to_string()))
    );

    let (_, accepted) = dispatch(keys::JUNCTION_TEMPERATURE, "150℃");
    assert_eq!(accepted.magnitude("temperature"), Some(Magnitude::Number(150.0)));
}

#[test]
fn forced_text_parser() {
    let attribute = dispatch_with(ValueParser::Text, keys::RESISTANCE, "10kΩ");
    assert_eq!(attribute.get("default"), Some(&AttributeValue::Text("10kΩ".into())));
}

#[test]
fn json_values() {
    let (_, pins) = dispatch_value(keys::NUMBER_OF_PINS, &json!(16));
    assert_eq!(pins.magnitude("count"), Some(Magnitude::Number(16.0)));

    let (_, empty) = dispatch_value(keys::CAPACITANCE, &json!(null));
    assert!(empty.is_blank());

    let (_, listed) = dispatch_value("Channel type", &json!(["N", "P"]));
    assert_eq!(listed.render(), "N, P");
}

#[test]
fn attribute_bag_with_description_fallback() -> anyhow::Result<()> {
    let raw: RawAttributes = serde_json::from_value(json!({
        "Resistance": "-",
        "Tolerance": "±1%",
        "Mounting Type": "SMD",
    }))?;
    let normalized = normalize_attributes(
        &raw,
        Some("Chip Resistor - Surface Mount 4.7KOhms ±5% 1/10W Thick Film Resistors 0603"),
    );

    let resistance = &normalized[keys::RESISTANCE];
    assert_eq!(resistance.magnitude("resistance"), Some(Magnitude::Number(4700.0)));

    // The vendor's tolerance wins over the title.
    assert_eq!(normalized[keys::TOLERANCE].render(), "±1%");

    let power = &normalized[keys::POWER];
    assert_eq!(power.magnitude("power"), Some(Magnitude::Number(0.1)));

    assert_eq!(normalized["Mounting type"].render(), "SMD");
    Ok(())
}

#[test]
fn attribute_bag_without_description() {
    let raw: RawAttributes = serde_json::from_value(json!({"Resistance": "-"})).unwrap();
    let normalized = normalize_attributes(&raw, None);
    assert_eq!(normalized.len(), 1);
    assert!(normalized[keys::RESISTANCE].is_blank());
}

struct RawResistanceNoTolerance;

impl NormalizeHooks for RawResistanceNoTolerance {
    fn parser_for(&self, key: &str) -> ValueParser {
        if key == keys::RESISTANCE {
            ValueParser::Text
        } else {
            partnorm_attrs::parser_for(key)
        }
    }

    fn keeps(&self, key: &str) -> bool {
        key != keys::TOLERANCE
    }
}

#[test]
fn hooks_override_parsers_and_filter_keys() -> anyhow::Result<()> {
    let raw: RawAttributes = serde_json::from_value(json!({
        "Resistance": "10kΩ",
        "Tolerance": "±1%",
        "Package": "-",
    }))?;
    let extra: RawAttributes = serde_json::from_value(json!({"Package": "0603"}))?;
    let normalized = normalize_attributes_with(&raw, extra, None, &RawResistanceNoTolerance);

    assert_eq!(
        normalized.keys().map(String::as_str).collect::<Vec<_>>(),
        [keys::RESISTANCE, keys::PACKAGE]
    );
    assert_eq!(
        normalized[keys::RESISTANCE].get("default"),
        Some(&AttributeValue::Text("10kΩ".to_string()))
    );
    assert_eq!(normalized[keys::PACKAGE].render(), "0603");

    let defaults = normalize_attributes_with(&raw, RawAttributes::new(), None, &DefaultHooks);
    assert_eq!(defaults, normalize_attributes(&raw, None));
    Ok(())
}
