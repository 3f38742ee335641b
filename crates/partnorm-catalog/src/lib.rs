//! Catalog-level plumbing around the attribute normalizer.
//!
//! A catalog is the vendor's CSV table ([`load_catalog_csv`]) joined with the
//! per-part `extra` data fetched from the marketplace. [`normalize_catalog`]
//! turns every [`Component`] into a [`NormalizedComponent`] in parallel,
//! collecting failures instead of aborting the run.

pub mod component;
pub mod error;
pub mod normalize;
pub mod price;
pub mod profile;
pub mod table;

pub use component::{Component, Extra};
pub use error::CatalogError;
pub use normalize::{
    BatchReport, NormalizedComponent, normalize_catalog, normalize_component,
    pull_extra_attributes,
};
pub use price::{PriceError, PriceTier, parse_price};
pub use profile::{NormalizeProfile, ProfileError};
pub use table::load_catalog_csv;
