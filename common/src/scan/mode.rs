use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The business purpose of a scan, selected before the session starts.
///
/// The mode decides which follow-up actions a verified scan offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScanMode {
    Inventory,
    Transfer,
    Receipt,
    Shipping,
    Verification,
}

impl ScanMode {
    pub const ALL: [ScanMode; 5] = [
        ScanMode::Inventory,
        ScanMode::Transfer,
        ScanMode::Receipt,
        ScanMode::Shipping,
        ScanMode::Verification,
    ];
}

impl fmt::Display for ScanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScanMode::Inventory => "Inventory",
            ScanMode::Transfer => "Transfer",
            ScanMode::Receipt => "Receipt",
            ScanMode::Shipping => "Shipping",
            ScanMode::Verification => "Verification",
        };
        f.write_str(name)
    }
}

impl FromStr for ScanMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match super::normalize(s).as_str() {
            "INVENTORY" => Ok(ScanMode::Inventory),
            "TRANSFER" => Ok(ScanMode::Transfer),
            "RECEIPT" => Ok(ScanMode::Receipt),
            "SHIPPING" => Ok(ScanMode::Shipping),
            "VERIFICATION" | "VERIFY" => Ok(ScanMode::Verification),
            _ => Err(format!("invalid scan mode: {s}")),
        }
    }
}
