use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What kind of object the decoded code was printed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceType {
    Product,
    Transfer,
    Order,
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceType::Product => f.write_str("Product"),
            SourceType::Transfer => f.write_str("Transfer"),
            SourceType::Order => f.write_str("Order"),
        }
    }
}

impl FromStr for SourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match super::normalize(s).as_str() {
            "PRODUCT" => Ok(SourceType::Product),
            "TRANSFER" => Ok(SourceType::Transfer),
            "ORDER" => Ok(SourceType::Order),
            _ => Err(format!("invalid source type: {s}")),
        }
    }
}

/// The decoded content of one physical scan, as handed over by the decoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCapturePayload {
    pub product_id: String,
    pub batch_number: String,
    pub source_type: SourceType,
}

impl RawCapturePayload {
    pub fn new(
        product_id: impl Into<String>,
        batch_number: impl Into<String>,
        source_type: SourceType,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            batch_number: batch_number.into(),
            source_type,
        }
    }
}
