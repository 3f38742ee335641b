use std::io;

use serde::Deserialize;

use crate::component::{Component, Extra};
use crate::error::CatalogError;
use crate::price::parse_price;

const LCSC_COLUMN: &str = "LCSC Part";

#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(rename = "LCSC Part")]
    lcsc: String,
    #[serde(rename = "First Category")]
    category: String,
    #[serde(rename = "Second Category")]
    subcategory: String,
    #[serde(rename = "MFR.Part")]
    mfr: String,
    #[serde(rename = "Package")]
    package: String,
    #[serde(rename = "Solder Joint")]
    joints: u32,
    #[serde(rename = "Manufacturer")]
    manufacturer: String,
    #[serde(rename = "Library Type")]
    library_type: String,
    #[serde(rename = "Description")]
    description: String,
    #[serde(rename = "Datasheet")]
    datasheet: String,
    #[serde(rename = "Stock")]
    stock: u64,
    #[serde(rename = "Price")]
    price: String,
}

/// Parse the vendor's catalog table.
///
/// Rows come back in file order with an empty `extra`; the detail data is
/// fetched separately. A `Library Type` of `base` marks a basic part.
pub fn load_catalog_csv<R: io::Read>(reader: R) -> Result<Vec<Component>, CatalogError> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader.headers()?.clone();
    let lcsc_index = headers.iter().position(|header| header == LCSC_COLUMN);

    let mut components = Vec::new();
    for result in reader.records() {
        let record = result?;
        let line = record.position().map_or(0, |position| position.line());
        let lcsc = lcsc_index
            .and_then(|index| record.get(index))
            .map(|code| code.trim().to_string())
            .filter(|code| !code.is_empty());

        let row: CatalogRow =
            record
                .deserialize(Some(&headers))
                .map_err(|e| CatalogError::Row {
                    line,
                    lcsc: lcsc.clone(),
                    reason: e.to_string(),
                })?;
        let price = parse_price(&row.price).map_err(|source| CatalogError::Price {
            lcsc: row.lcsc.clone(),
            source,
        })?;

        components.push(Component {
            lcsc: row.lcsc,
            category: row.category,
            subcategory: row.subcategory,
            mfr: row.mfr,
            package: row.package,
            joints: row.joints,
            manufacturer: row.manufacturer,
            basic: row.library_type.trim().eq_ignore_ascii_case("base"),
            description: row.description,
            datasheet: row.datasheet,
            stock: row.stock,
            price,
            extra: Extra::default(),
        });
    }

    Ok(components)
}
