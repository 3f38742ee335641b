use crate::price::PriceError;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalog CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid catalog row at line {line} ({}): {reason}", .lcsc.as_deref().unwrap_or("unknown part"))]
    Row {
        line: u64,
        lcsc: Option<String>,
        reason: String,
    },

    #[error("Invalid price for {lcsc}: {source}")]
    Price { lcsc: String, source: PriceError },

    #[error("Failed to normalize {lcsc}: {reason}")]
    Normalize { lcsc: String, reason: String },
}

impl CatalogError {
    /// LCSC code of the part the error belongs to, when known.
    pub fn lcsc(&self) -> Option<&str> {
        match self {
            CatalogError::Csv(_) => None,
            CatalogError::Row { lcsc, .. } => lcsc.as_deref(),
            CatalogError::Price { lcsc, .. } | CatalogError::Normalize { lcsc, .. } => Some(lcsc),
        }
    }
}
