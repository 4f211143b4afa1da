use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::action::ScanAction;
use super::mode::ScanMode;
use super::result::ScanResult;
use super::technology::ScanTechnology;

/// Aggregates over a scan history.
///
/// Every result counts once in `total`, once in either `verified` or
/// `failed`, once under its technology and once under its mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanMetrics {
    pub total: usize,
    pub verified: usize,
    pub failed: usize,
    pub by_technology: BTreeMap<ScanTechnology, usize>,
    pub by_mode: BTreeMap<ScanMode, usize>,
    pub by_action: BTreeMap<ScanAction, usize>,
}

impl ScanMetrics {
    pub fn record(&mut self, result: &ScanResult, actions: &BTreeSet<ScanAction>) {
        self.total += 1;
        if result.is_verified() {
            self.verified += 1;
        } else {
            self.failed += 1;
        }
        *self.by_technology.entry(result.technology()).or_default() += 1;
        *self.by_mode.entry(result.mode()).or_default() += 1;
        for action in actions {
            *self.by_action.entry(*action).or_default() += 1;
        }
    }

    pub fn technology_count(&self, technology: ScanTechnology) -> usize {
        self.by_technology.get(&technology).copied().unwrap_or(0)
    }

    pub fn mode_count(&self, mode: ScanMode) -> usize {
        self.by_mode.get(&mode).copied().unwrap_or(0)
    }

    pub fn action_count(&self, action: ScanAction) -> usize {
        self.by_action.get(&action).copied().unwrap_or(0)
    }

    /// Share of verified scans, `0.0` on an empty history.
    pub fn verification_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.verified as f64 / self.total as f64
    }
}
