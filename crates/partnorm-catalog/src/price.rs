use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One quantity break: `price` per unit when ordering `q_from..=q_to` pieces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceTier {
    pub q_from: u64,
    /// `None` for the open-ended last tier.
    pub q_to: Option<u64>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PriceError {
    #[error("Malformed price tier '{0}', expected '<from>-<to>:<price>'")]
    MalformedTier(String),
    #[error("Invalid quantity '{0}'")]
    InvalidQuantity(String),
    #[error("Invalid unit price '{0}'")]
    InvalidPrice(String),
}

fn parse_quantity(quantity: &str) -> Result<u64, PriceError> {
    quantity
        .trim()
        .parse()
        .map_err(|_| PriceError::InvalidQuantity(quantity.to_string()))
}

fn parse_tier(tier: &str) -> Result<PriceTier, PriceError> {
    let (range, price) = tier
        .split_once(':')
        .ok_or_else(|| PriceError::MalformedTier(tier.to_string()))?;
    let (q_from, q_to) = range
        .split_once('-')
        .ok_or_else(|| PriceError::MalformedTier(tier.to_string()))?;

    let q_to = match q_to.trim() {
        "" => None,
        q_to => Some(parse_quantity(q_to)?),
    };
    let price = Decimal::from_str(price.trim())
        .or_else(|_| Decimal::from_scientific(price.trim()))
        .map_err(|_| PriceError::InvalidPrice(price.to_string()))?;

    Ok(PriceTier {
        q_from: parse_quantity(q_from)?,
        q_to,
        price,
    })
}

/// Parse the vendor's price column, e.g. `"1-9:0.0052,10-99:0.0041,100-:0.003"`.
///
/// Tiers come back sorted by `q_from`. An empty column means no pricing.
pub fn parse_price(prices: &str) -> Result<Vec<PriceTier>, PriceError> {
    let mut tiers = prices
        .split(',')
        .filter(|tier| !tier.trim().is_empty())
        .map(parse_tier)
        .collect::<Result<Vec<_>, _>>()?;
    tiers.sort_by_key(|tier| tier.q_from);
    Ok(tiers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_price() {
        let tiers = parse_price("10-99:0.0041,1-9:0.0052,100-:0.003").unwrap();
        assert_eq!(
            tiers,
            vec![
                PriceTier { q_from: 1, q_to: Some(9), price: dec!(0.0052) },
                PriceTier { q_from: 10, q_to: Some(99), price: dec!(0.0041) },
                PriceTier { q_from: 100, q_to: None, price: dec!(0.003) },
            ]
        );
    }

    #[test]
    fn test_empty_price() {
        assert_eq!(parse_price("").unwrap(), vec![]);
        assert_eq!(parse_price("  ").unwrap(), vec![]);
        assert_eq!(parse_price("1-:0.5,").unwrap().len(), 1);
    }

    #[test]
    fn test_wire_names() {
        let tier = PriceTier { q_from: 100, q_to: None, price: dec!(0.25) };
        assert_eq!(
            serde_json::to_value(&tier).unwrap(),
            serde_json::json!({"qFrom": 100, "qTo": null, "price": 0.25})
        );
    }

    #[test]
    fn test_malformed_price() {
        assert_eq!(
            parse_price("1-9"),
            Err(PriceError::MalformedTier("1-9".to_string()))
        );
        assert_eq!(
            parse_price("a-9:0.5"),
            Err(PriceError::InvalidQuantity("a".to_string()))
        );
        assert_eq!(
            parse_price("1-9:cheap"),
            Err(PriceError::InvalidPrice("cheap".to_string()))
        );
    }
}
