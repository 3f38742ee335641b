//! Canonical attribute names and the normalizer that maps vendor spellings
//! onto them.
//!
//! Vendor data revisions renamed attributes many times ("DC Resistance (DCR)
//! (Max)", "DCR( Ω Max )", "DC Resistance"). [`normalize_key`] folds them onto
//! one spelling so the dispatch table only has to know the canonical form.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

pub const RESISTANCE: &str = "Resistance";
pub const DC_RESISTANCE: &str = "DC Resistance";
pub const IMPEDANCE: &str = "Impedance";
pub const BALANCE_PORT_IMPEDANCE: &str = "Balance Port Impedance";
pub const UNBALANCE_PORT_IMPEDANCE: &str = "Unbalance Port Impedance";
pub const IMPEDANCE_AT_FREQUENCY: &str = "Impedance @ Frequency";
pub const ESR: &str = "Equivalent Series Resistance (ESR)";

pub const ALLOWABLE_VOLTAGE: &str = "Allowable Voltage";
pub const REVERSE_VOLTAGE: &str = "Reverse Voltage (Vr)";
pub const REVERSE_STANDOFF_VOLTAGE: &str = "Reverse Stand-Off Voltage (Vrwm)";
pub const BREAKDOWN_VOLTAGE: &str = "Breakdown Voltage";
pub const ZENER_VOLTAGE: &str = "Zener Voltage";
pub const FORWARD_VOLTAGE: &str = "Forward Voltage";
pub const SUPPLY_VOLTAGE: &str = "Supply Voltage";
pub const INPUT_VOLTAGE: &str = "Input Voltage";
pub const OUTPUT_VOLTAGE: &str = "Output Voltage";
pub const FORWARD_VOLTAGE_AT_CURRENT: &str = "Forward Voltage (Vf @ If)";
pub const CLAMPING_VOLTAGE: &str = "Clamping Voltage";
pub const DRAIN_SOURCE_VOLTAGE: &str = "Drain to Source Voltage (Vdss)";
pub const VCE_BREAKDOWN: &str = "Collector-Emitter Breakdown Voltage (Vces)";
pub const VCE_ON: &str = "Vce(on) (Max) @ Vge, Ic";
pub const GATE_THRESHOLD_VOLTAGE: &str = "Gate Threshold Voltage (Vgs(th) @ Id)";

pub const RATED_CURRENT: &str = "Rated Current";
pub const RECTIFIED_CURRENT: &str = "Average Rectified Current (Io)";
pub const OUTPUT_CURRENT: &str = "Output Current";
pub const SATURATION_CURRENT: &str = "Saturation Current (Isat)";
pub const PEAK_PULSE_CURRENT: &str = "Peak Pulse Current (Ipp)";
pub const RIPPLE_CURRENT: &str = "Ripple Current";
pub const CONTINUOUS_DRAIN_CURRENT: &str = "Continuous Drain Current (Id)";
pub const COLLECTOR_CURRENT: &str = "Collector Current (Ic)";

pub const POWER: &str = "Power";
pub const PEAK_PULSE_POWER: &str = "Peak Pulse Power (Ppp)";
pub const POWER_DISSIPATION: &str = "Power Dissipation (Pd)";

pub const RDS_ON: &str = "Rds On (Max) @ Id, Vgs";
pub const GATE_CHARGE: &str = "Total Gate Charge (Qg @ Vgs)";
pub const REVERSE_RECOVERY_CHARGE: &str = "Reverse Recovery Charge (Qrr)";

pub const CAPACITANCE: &str = "Capacitance";
pub const CAPACITY: &str = "Capacity";
pub const INDUCTANCE: &str = "Inductance";
pub const FREQUENCY: &str = "Frequency";

pub const OPERATING_TEMPERATURE: &str = "Operating Temperature";
pub const MAX_OPERATING_TEMPERATURE: &str = "Max Operating Temperature";
pub const JUNCTION_TEMPERATURE: &str = "Junction Temperature (Tj)";

pub const SIZE: &str = "Size (mm)";

pub const NUMBER_OF_PINS: &str = "Number of Pins";
pub const NUMBER_OF_RESISTORS: &str = "Number of Resistors";
pub const NUMBER_OF_CAPACITORS: &str = "Number of Capacitors";
pub const NUMBER_OF_CHANNELS: &str = "Number of Channels";
pub const NUMBER_OF_OUTPUTS: &str = "Number of Outputs";
pub const NUMBER_OF_POSITIONS: &str = "Number of Positions";
pub const NUMBER_OF_ROWS: &str = "Number of Rows";
pub const MOQ: &str = "MOQ";

pub const INSERTION_LOSS: &str = "Insertion Loss (dB Max)";
pub const TOLERANCE: &str = "Tolerance";
pub const TEMPERATURE_COEFFICIENT: &str = "Temperature Coefficient";
pub const PACKAGE: &str = "Package";
pub const BASIC_EXTENDED: &str = "Basic/Extended";

/// Every canonical key. Each one is a fixed point of [`normalize_key`].
pub const CANONICAL: &[&str] = &[
    RESISTANCE,
    DC_RESISTANCE,
    IMPEDANCE,
    BALANCE_PORT_IMPEDANCE,
    UNBALANCE_PORT_IMPEDANCE,
    IMPEDANCE_AT_FREQUENCY,
    ESR,
    ALLOWABLE_VOLTAGE,
    REVERSE_VOLTAGE,
    REVERSE_STANDOFF_VOLTAGE,
    BREAKDOWN_VOLTAGE,
    ZENER_VOLTAGE,
    FORWARD_VOLTAGE,
    SUPPLY_VOLTAGE,
    INPUT_VOLTAGE,
    OUTPUT_VOLTAGE,
    FORWARD_VOLTAGE_AT_CURRENT,
    CLAMPING_VOLTAGE,
    DRAIN_SOURCE_VOLTAGE,
    VCE_BREAKDOWN,
    VCE_ON,
    GATE_THRESHOLD_VOLTAGE,
    RATED_CURRENT,
    RECTIFIED_CURRENT,
    OUTPUT_CURRENT,
    SATURATION_CURRENT,
    PEAK_PULSE_CURRENT,
    RIPPLE_CURRENT,
    CONTINUOUS_DRAIN_CURRENT,
    COLLECTOR_CURRENT,
    POWER,
    PEAK_PULSE_POWER,
    POWER_DISSIPATION,
    RDS_ON,
    GATE_CHARGE,
    REVERSE_RECOVERY_CHARGE,
    CAPACITANCE,
    CAPACITY,
    INDUCTANCE,
    FREQUENCY,
    OPERATING_TEMPERATURE,
    MAX_OPERATING_TEMPERATURE,
    JUNCTION_TEMPERATURE,
    SIZE,
    NUMBER_OF_PINS,
    NUMBER_OF_RESISTORS,
    NUMBER_OF_CAPACITORS,
    NUMBER_OF_CHANNELS,
    NUMBER_OF_OUTPUTS,
    NUMBER_OF_POSITIONS,
    NUMBER_OF_ROWS,
    MOQ,
    INSERTION_LOSS,
    TOLERANCE,
    TEMPERATURE_COEFFICIENT,
    PACKAGE,
    BASIC_EXTENDED,
];

/// Historic spellings, lowercase with single spaces.
const REWRITES: &[(&str, &str)] = &[
    ("dc resistance (dcr) (max)", DC_RESISTANCE),
    ("dc resistance (dcr)", DC_RESISTANCE),
    ("dcr( ω max )", DC_RESISTANCE),
    ("dcr (ω max)", DC_RESISTANCE),
    ("dcr", DC_RESISTANCE),
    ("rated voltage", ALLOWABLE_VOLTAGE),
    ("voltage - rated", ALLOWABLE_VOLTAGE),
    ("voltage rating", ALLOWABLE_VOLTAGE),
    ("voltage - dc reverse (vr) (max)", REVERSE_VOLTAGE),
    ("reverse voltage", REVERSE_VOLTAGE),
    ("voltage - reverse standoff (typ)", REVERSE_STANDOFF_VOLTAGE),
    ("reverse stand-off voltage", REVERSE_STANDOFF_VOLTAGE),
    ("voltage - breakdown (min)", BREAKDOWN_VOLTAGE),
    ("breakdown voltage (min)", BREAKDOWN_VOLTAGE),
    ("voltage - zener (nom) (vz)", ZENER_VOLTAGE),
    ("zener voltage (nom)", ZENER_VOLTAGE),
    ("voltage - forward (vf) (typ)", FORWARD_VOLTAGE),
    ("voltage - supply", SUPPLY_VOLTAGE),
    ("operating voltage", SUPPLY_VOLTAGE),
    ("voltage - input", INPUT_VOLTAGE),
    ("voltage - input (max)", INPUT_VOLTAGE),
    ("voltage - output", OUTPUT_VOLTAGE),
    ("voltage - forward (vf) (max) @ if", FORWARD_VOLTAGE_AT_CURRENT),
    ("forward voltage (vf@if)", FORWARD_VOLTAGE_AT_CURRENT),
    ("clamping voltage (vc)", CLAMPING_VOLTAGE),
    ("voltage - clamping (max) @ ipp", CLAMPING_VOLTAGE),
    ("drain source voltage (vdss)", DRAIN_SOURCE_VOLTAGE),
    ("drain to source voltage(vdss)", DRAIN_SOURCE_VOLTAGE),
    ("drain source voltage", DRAIN_SOURCE_VOLTAGE),
    ("voltage - collector emitter breakdown (max)", VCE_BREAKDOWN),
    ("collector-emitter breakdown voltage", VCE_BREAKDOWN),
    ("vce(on) (max) @ vge,ic", VCE_ON),
    ("gate threshold voltage (vgs(th)@id)", GATE_THRESHOLD_VOLTAGE),
    ("vgs(th) (max) @ id", GATE_THRESHOLD_VOLTAGE),
    ("current rating", RATED_CURRENT),
    ("current - rated", RATED_CURRENT),
    ("current - rectified", RECTIFIED_CURRENT),
    ("average rectified current", RECTIFIED_CURRENT),
    ("current - output", OUTPUT_CURRENT),
    ("current - saturation (isat)", SATURATION_CURRENT),
    ("peak pulse current (ipp)@10/1000us", PEAK_PULSE_CURRENT),
    ("current - peak pulse (10/1000µs)", PEAK_PULSE_CURRENT),
    ("ripple current @ frequency", RIPPLE_CURRENT),
    ("current - continuous drain (id) @ 25°c", CONTINUOUS_DRAIN_CURRENT),
    ("continuous drain current", CONTINUOUS_DRAIN_CURRENT),
    ("drain current (id)", CONTINUOUS_DRAIN_CURRENT),
    ("current - collector (ic) (max)", COLLECTOR_CURRENT),
    ("collector current", COLLECTOR_CURRENT),
    ("power - max", POWER),
    ("power rating", POWER),
    ("power - peak pulse", PEAK_PULSE_POWER),
    ("peak pulse power", PEAK_PULSE_POWER),
    ("power dissipation", POWER_DISSIPATION),
    ("power dissipation (max)", POWER_DISSIPATION),
    ("power dissipation-max (ta=25°c)", POWER_DISSIPATION),
    ("rds on (max) @ id, vgs", RDS_ON),
    ("rds on(max)@id,vgs", RDS_ON),
    ("drain source on resistance (rds(on)@vgs,id)", RDS_ON),
    ("gate charge (qg) (max) @ vgs", GATE_CHARGE),
    ("total gate charge (qg@vgs)", GATE_CHARGE),
    ("reverse recovery charge", REVERSE_RECOVERY_CHARGE),
    ("equivalent series resistance", ESR),
    ("esr (equivalent series resistance)", ESR),
    ("esr", ESR),
    ("impedance @ freq", IMPEDANCE_AT_FREQUENCY),
    ("operating temperature range", OPERATING_TEMPERATURE),
    ("operating temperature (range)", OPERATING_TEMPERATURE),
    ("temperature - operating", OPERATING_TEMPERATURE),
    ("junction temperature", JUNCTION_TEMPERATURE),
    ("operating temperature (max)", MAX_OPERATING_TEMPERATURE),
    ("size", SIZE),
    ("size(mm)", SIZE),
    ("dimensions", SIZE),
    ("pin count", NUMBER_OF_PINS),
    ("number of pins (total)", NUMBER_OF_PINS),
    ("no. of pins", NUMBER_OF_PINS),
    ("number of contacts", NUMBER_OF_POSITIONS),
    ("insertion loss ( db max )", INSERTION_LOSS),
    ("insertion loss (db max)", INSERTION_LOSS),
    ("tolerance (%)", TOLERANCE),
    ("package / case", PACKAGE),
];

/// Keys starting with one of these collapse onto the given canonical key.
const PREFIX_REWRITES: &[(&str, &str)] = &[
    ("voltage rated", ALLOWABLE_VOLTAGE),
    ("capacitance @ ", CAPACITANCE),
];

/// Unit words vendors append to a key name.
const DECORATIONS: &[&str] = &["(watts)", "(ohms)", "(ohm)", "(volts)"];

const TYPOS: &[(&str, &str)] = &[
    ("temperture", "temperature"),
    ("voltge", "voltage"),
    ("resistence", "resistance"),
    ("capacitence", "capacitance"),
    ("tolerence", "tolerance"),
];

static ACRONYMS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    ["MHz", "GHz", "kHz", "Hz", "MOQ", "DC", "AC", "ESR", "DCR", "LED", "dB"]
        .into_iter()
        .map(|acronym| {
            let pattern = format!(r"\b{}\b", regex::escape(&acronym.to_lowercase()));
            (Regex::new(&pattern).unwrap(), acronym)
        })
        .collect()
});

static EXACT: Lazy<HashMap<String, &'static str>> = Lazy::new(|| {
    let mut table: HashMap<String, &'static str> = REWRITES
        .iter()
        .map(|(from, to)| (from.to_string(), *to))
        .collect();
    for &key in CANONICAL {
        table.insert(key.to_lowercase(), key);
    }
    table
});

/// Lowercase, strip decorations, collapse whitespace and fix known typos until
/// nothing changes.
fn clean(raw: &str) -> String {
    let mut key = raw.to_lowercase();
    loop {
        let mut next = key.clone();
        for decoration in DECORATIONS {
            next = next.replace(decoration, " ");
        }
        for (typo, fix) in TYPOS {
            next = next.replace(typo, fix);
        }
        next = next.split_whitespace().collect::<Vec<_>>().join(" ");
        if next == key {
            return key;
        }
        key = next;
    }
}

/// Restore acronyms and capitalize the first letter.
fn recapitalize(key: &str) -> String {
    let mut key = key.to_string();
    for (pattern, acronym) in ACRONYMS.iter() {
        key = pattern.replace_all(&key, *acronym).into_owned();
    }
    let mut chars = key.chars();
    match chars.next() {
        Some(first) if first.is_ascii_lowercase() => {
            first.to_ascii_uppercase().to_string() + chars.as_str()
        }
        _ => key,
    }
}

/// Map a vendor attribute name onto its canonical key.
///
/// Known names come back in the canonical spelling of [`CANONICAL`]. Unknown
/// names are lowercased, get their acronyms back and pass through.
/// `normalize_key(normalize_key(k)) == normalize_key(k)` for every input.
pub fn normalize_key(raw: &str) -> String {
    let key = clean(raw);

    if let Some(canonical) = EXACT.get(&key) {
        return canonical.to_string();
    }
    if let Some((_, canonical)) = PREFIX_REWRITES
        .iter()
        .find(|(prefix, _)| key.starts_with(prefix))
    {
        return canonical.to_string();
    }
    recapitalize(&key)
}
