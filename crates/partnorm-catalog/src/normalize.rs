use std::panic::{AssertUnwindSafe, catch_unwind};

use indexmap::IndexMap;
use log::{debug, warn};
use partnorm_attrs::keys::{BASIC_EXTENDED, PACKAGE};
use partnorm_attrs::{NormalizedAttribute, RawAttributes, normalize_attributes_with};
use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;

use crate::component::Component;
use crate::error::CatalogError;
use crate::price::PriceTier;
use crate::profile::NormalizeProfile;

const LCSC_ORIGIN: &str = "https://lcsc.com";

/// A component ready for export: identity columns plus normalized attributes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedComponent {
    pub lcsc: String,
    pub category: String,
    pub subcategory: String,
    pub mfr: String,
    pub joints: u32,
    pub manufacturer: String,
    pub basic: bool,
    pub description: String,
    pub datasheet: String,
    pub stock: u64,
    pub price: Vec<PriceTier>,
    /// First product image, if any.
    pub image: Option<Value>,
    pub url: Option<String>,
    pub attributes: IndexMap<String, NormalizedAttribute>,
}

/// Outcome of a batch run. Failures never stop the batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub components: Vec<NormalizedComponent>,
    pub failures: Vec<CatalogError>,
}

/// Table columns that double as attributes.
pub fn pull_extra_attributes(component: &Component) -> RawAttributes {
    let kind = if component.basic { "Basic" } else { "Extended" };
    IndexMap::from([
        (BASIC_EXTENDED.to_string(), Value::from(kind)),
        (PACKAGE.to_string(), Value::from(component.package.clone())),
    ])
}

/// LCSC codes are `C` followed by the numeric part id.
fn check_lcsc(lcsc: &str) -> Result<(), String> {
    match lcsc.strip_prefix('C') {
        Some(digits) if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => Ok(()),
        _ => Err(format!("'{}' is not an LCSC part code", lcsc)),
    }
}

fn absolute_url(url: &str) -> String {
    if url.starts_with('/') {
        format!("{}{}", LCSC_ORIGIN, url)
    } else {
        url.to_string()
    }
}

fn normalized_attributes(
    component: &Component,
    profile: &NormalizeProfile,
) -> IndexMap<String, NormalizedAttribute> {
    let extra = if profile.extra_attributes {
        pull_extra_attributes(component)
    } else {
        RawAttributes::new()
    };
    let description = profile
        .description_fallback
        .then_some(component.description.as_str());
    normalize_attributes_with(&component.extra.attributes, extra, description, profile)
}

fn build(component: &Component, profile: &NormalizeProfile) -> NormalizedComponent {
    NormalizedComponent {
        lcsc: component.lcsc.clone(),
        category: component.category.clone(),
        subcategory: component.subcategory.clone(),
        mfr: component.mfr.clone(),
        joints: component.joints,
        manufacturer: component.manufacturer.clone(),
        basic: component.basic,
        description: component.description.clone(),
        datasheet: component.datasheet.clone(),
        stock: component.stock,
        price: component.price.clone(),
        image: component.extra.images.first().cloned(),
        url: component.extra.url.as_deref().map(absolute_url),
        attributes: normalized_attributes(component, profile),
    }
}

/// Normalize one component. Any failure carries the component's LCSC code.
pub fn normalize_component(
    component: &Component,
    profile: &NormalizeProfile,
) -> Result<NormalizedComponent, CatalogError> {
    let failed = |reason: String| CatalogError::Normalize {
        lcsc: component.lcsc.clone(),
        reason,
    };

    check_lcsc(&component.lcsc).map_err(failed)?;

    catch_unwind(AssertUnwindSafe(|| build(component, profile))).map_err(|panic_payload| {
        let panic_msg = if let Some(s) = panic_payload.downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic".to_string()
        };
        failed(panic_msg)
    })
}

/// Normalize a whole catalog on the rayon pool.
///
/// Successful components keep their input order.
pub fn normalize_catalog(components: &[Component], profile: &NormalizeProfile) -> BatchReport {
    let results: Vec<_> = components
        .par_iter()
        .map(|component| normalize_component(component, profile))
        .collect();

    let mut report = BatchReport::default();
    for result in results {
        match result {
            Ok(component) => report.components.push(component),
            Err(e) => {
                warn!("{}", e);
                report.failures.push(e);
            }
        }
    }

    debug!(
        "Normalized {} components, {} failed",
        report.components.len(),
        report.failures.len()
    );
    report
}
