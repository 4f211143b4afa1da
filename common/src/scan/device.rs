use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which way the requested camera input points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    Front,
    Rear,
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Facing::Front => f.write_str("front"),
            Facing::Rear => f.write_str("rear"),
        }
    }
}

impl FromStr for Facing {
    type Err = String;

    /// Accepts the browser-style aliases too: `user` is the front camera,
    /// `environment` (or `back`) the rear one.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match super::normalize(s).as_str() {
            "FRONT" | "USER" => Ok(Facing::Front),
            "REAR" | "BACK" | "ENVIRONMENT" => Ok(Facing::Rear),
            _ => Err(format!("invalid camera facing: {s}")),
        }
    }
}
