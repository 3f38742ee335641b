//! Canonical key to value parser table.

use std::collections::HashMap;
use std::panic::{AssertUnwindSafe, catch_unwind};

use log::warn;
use once_cell::sync::Lazy;
use serde_json::Value;

use crate::keys::*;
use crate::parsers;
use crate::raw::raw_text;
use crate::{AttributeError, NormalizedAttribute};

/// The value dialect a canonical key is parsed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueParser {
    Text,
    Resistance,
    Impedance,
    Voltage,
    Current,
    Power,
    Capacitance,
    Inductance,
    Frequency,
    Charge,
    Count,
    RdsOn,
    VgsThreshold,
    ForwardVoltage,
    ClampingVoltage,
    ChargeAtVoltage,
    CapacityAtVoltage,
    Esr,
    ImpedanceAtFrequency,
    RippleCurrent,
    VceOn,
    DrainCurrent,
    CollectorCurrent,
    DrainSourceVoltage,
    PowerDissipation,
    VceBreakdown,
    VoltageRange,
    TemperatureRange,
    Size,
    Temperature,
}

impl ValueParser {
    pub fn parse(self, value: &str) -> Result<NormalizedAttribute, AttributeError> {
        let attribute = match self {
            ValueParser::Text => parsers::string_attribute(value),
            ValueParser::Resistance => parsers::resistance_attribute(value),
            ValueParser::Impedance => parsers::impedance_attribute(value),
            ValueParser::Voltage => parsers::voltage_attribute(value),
            ValueParser::Current => parsers::current_attribute(value),
            ValueParser::Power => parsers::power_attribute(value),
            ValueParser::Capacitance => parsers::capacitance_attribute(value),
            ValueParser::Inductance => parsers::inductance_attribute(value),
            ValueParser::Frequency => parsers::frequency_attribute(value),
            ValueParser::Charge => parsers::charge_attribute(value),
            ValueParser::Count => parsers::count_attribute(value),
            ValueParser::RdsOn => parsers::rds_on_max_at_ids_at_vgs(value),
            ValueParser::VgsThreshold => parsers::vgs_threshold(value),
            ValueParser::ForwardVoltage => parsers::forward_voltage(value),
            ValueParser::ClampingVoltage => parsers::clamping_voltage(value),
            ValueParser::ChargeAtVoltage => parsers::charge_at_voltage(value),
            ValueParser::CapacityAtVoltage => parsers::capacity_at_voltage(value),
            ValueParser::Esr => parsers::esr(value),
            ValueParser::ImpedanceAtFrequency => parsers::impedance_at_frequency(value),
            ValueParser::RippleCurrent => parsers::ripple_current(value),
            ValueParser::VceOn => parsers::vce_on_max(value),
            ValueParser::DrainCurrent => parsers::continuous_transistor_current(value, "Id"),
            ValueParser::CollectorCurrent => parsers::continuous_transistor_current(value, "Ic"),
            ValueParser::DrainSourceVoltage => parsers::drain_to_source_voltage(value),
            ValueParser::PowerDissipation => parsers::power_dissipation(value),
            ValueParser::VceBreakdown => parsers::vce_breakdown(value),
            ValueParser::VoltageRange => parsers::voltage_range(value),
            ValueParser::TemperatureRange => parsers::temperature_range(value),
            ValueParser::Size => parsers::size_mm(value),
            ValueParser::Temperature => return parsers::temperature_attribute(value),
        };
        Ok(attribute)
    }
}

const TABLE: &[(ValueParser, &[&str])] = &[
    (ValueParser::Resistance, &[RESISTANCE, DC_RESISTANCE]),
    (
        ValueParser::Impedance,
        &[IMPEDANCE, BALANCE_PORT_IMPEDANCE, UNBALANCE_PORT_IMPEDANCE],
    ),
    (
        ValueParser::Voltage,
        &[ALLOWABLE_VOLTAGE, REVERSE_VOLTAGE, REVERSE_STANDOFF_VOLTAGE],
    ),
    (
        ValueParser::Current,
        &[
            RATED_CURRENT,
            RECTIFIED_CURRENT,
            OUTPUT_CURRENT,
            SATURATION_CURRENT,
            PEAK_PULSE_CURRENT,
        ],
    ),
    (ValueParser::Power, &[POWER, PEAK_PULSE_POWER]),
    (ValueParser::Capacitance, &[CAPACITANCE]),
    (ValueParser::Inductance, &[INDUCTANCE]),
    (ValueParser::Frequency, &[FREQUENCY]),
    (ValueParser::Charge, &[REVERSE_RECOVERY_CHARGE]),
    (
        ValueParser::Count,
        &[
            NUMBER_OF_PINS,
            NUMBER_OF_RESISTORS,
            NUMBER_OF_CAPACITORS,
            NUMBER_OF_CHANNELS,
            NUMBER_OF_OUTPUTS,
            NUMBER_OF_POSITIONS,
            NUMBER_OF_ROWS,
            MOQ,
        ],
    ),
    (ValueParser::RdsOn, &[RDS_ON]),
    (ValueParser::VgsThreshold, &[GATE_THRESHOLD_VOLTAGE]),
    (ValueParser::ForwardVoltage, &[FORWARD_VOLTAGE_AT_CURRENT]),
    (ValueParser::ClampingVoltage, &[CLAMPING_VOLTAGE]),
    (ValueParser::ChargeAtVoltage, &[GATE_CHARGE]),
    (ValueParser::CapacityAtVoltage, &[CAPACITY]),
    (ValueParser::Esr, &[ESR]),
    (ValueParser::ImpedanceAtFrequency, &[IMPEDANCE_AT_FREQUENCY]),
    (ValueParser::RippleCurrent, &[RIPPLE_CURRENT]),
    (ValueParser::VceOn, &[VCE_ON]),
    (ValueParser::DrainCurrent, &[CONTINUOUS_DRAIN_CURRENT]),
    (ValueParser::CollectorCurrent, &[COLLECTOR_CURRENT]),
    (ValueParser::DrainSourceVoltage, &[DRAIN_SOURCE_VOLTAGE]),
    (ValueParser::PowerDissipation, &[POWER_DISSIPATION]),
    (ValueParser::VceBreakdown, &[VCE_BREAKDOWN]),
    (
        ValueParser::VoltageRange,
        &[
            BREAKDOWN_VOLTAGE,
            ZENER_VOLTAGE,
            FORWARD_VOLTAGE,
            SUPPLY_VOLTAGE,
            INPUT_VOLTAGE,
            OUTPUT_VOLTAGE,
        ],
    ),
    (ValueParser::TemperatureRange, &[OPERATING_TEMPERATURE]),
    (ValueParser::Size, &[SIZE]),
    (
        ValueParser::Temperature,
        &[MAX_OPERATING_TEMPERATURE, JUNCTION_TEMPERATURE],
    ),
    (
        ValueParser::Text,
        &[
            TOLERANCE,
            TEMPERATURE_COEFFICIENT,
            PACKAGE,
            BASIC_EXTENDED,
            INSERTION_LOSS,
        ],
    ),
];

static PARSERS: Lazy<HashMap<&'static str, ValueParser>> = Lazy::new(|| {
    TABLE
        .iter()
        .flat_map(|&(parser, keys)| keys.iter().map(move |&key| (key, parser)))
        .collect()
});

/// Parser registered for a canonical key, [`ValueParser::Text`] when none is.
pub fn parser_for(canonical_key: &str) -> ValueParser {
    PARSERS
        .get(canonical_key)
        .copied()
        .unwrap_or(ValueParser::Text)
}

/// Run `parser`, replacing a rejected or panicking parse with the verbatim
/// string attribute.
pub fn dispatch_with(parser: ValueParser, key: &str, value: &str) -> NormalizedAttribute {
    match catch_unwind(AssertUnwindSafe(|| parser.parse(value))) {
        Ok(Ok(attribute)) => attribute,
        Ok(Err(e)) => {
            warn!("Keeping '{}' = '{}' as text: {}", key, value, e);
            parsers::string_attribute(value)
        }
        Err(panic_payload) => {
            let panic_msg = if let Some(s) = panic_payload.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = panic_payload.downcast_ref::<String>() {
                s.clone()
            } else {
                "unknown panic".to_string()
            };
            warn!(
                "{:?} parser panicked on '{}' = '{}': {}",
                parser, key, value, panic_msg
            );
            parsers::string_attribute(value)
        }
    }
}

/// Parse `value` with the parser registered for `canonical_key`.
pub fn dispatch(canonical_key: &str, value: &str) -> (String, NormalizedAttribute) {
    let attribute = dispatch_with(parser_for(canonical_key), canonical_key, value);
    (canonical_key.to_string(), attribute)
}

/// [`dispatch`] for a JSON value straight from the attribute bag.
pub fn dispatch_value(canonical_key: &str, value: &Value) -> (String, NormalizedAttribute) {
    dispatch(canonical_key, &raw_text(value))
}
