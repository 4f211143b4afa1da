use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The physical capture technique used for a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScanTechnology {
    QrCode,
    Barcode,
    Rfid,
    Manual,
}

impl fmt::Display for ScanTechnology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScanTechnology::QrCode => "QR Code",
            ScanTechnology::Barcode => "Barcode",
            ScanTechnology::Rfid => "RFID",
            ScanTechnology::Manual => "Manual",
        };
        f.write_str(name)
    }
}

impl FromStr for ScanTechnology {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match super::normalize(s).as_str() {
            "QR_CODE" | "QR" | "QRCODE" => Ok(ScanTechnology::QrCode),
            "BARCODE" => Ok(ScanTechnology::Barcode),
            "RFID" => Ok(ScanTechnology::Rfid),
            "MANUAL" => Ok(ScanTechnology::Manual),
            _ => Err(format!("invalid scan technology: {s}")),
        }
    }
}
