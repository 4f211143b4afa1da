//! # Scan History Ledger
//!
//! Append-only, capture-time ordered history of every scan that reached a
//! verification outcome, plus the metrics derived from it.
//!
//! Entries and metrics sit behind the same lock, so every observer sees
//! metrics that match the entries exactly.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use tracing::debug;

use shelfscan_common::scan::metrics::ScanMetrics;
use shelfscan_common::scan::mode::ScanMode;
use shelfscan_common::scan::result::ScanResult;
use shelfscan_common::scan::technology::ScanTechnology;

use crate::router;

#[derive(Default)]
struct LedgerState {
    entries: Vec<Arc<ScanResult>>,
    metrics: ScanMetrics,
}

#[derive(Default)]
pub struct ScanLedger {
    state: RwLock<LedgerState>,
}

impl ScanLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a ledger with results recorded elsewhere (fixtures, an import).
    pub fn with_history(results: impl IntoIterator<Item = ScanResult>) -> Self {
        let ledger = Self::new();
        for result in results {
            ledger.append(result);
        }
        ledger
    }

    /// Inserts `result` after every entry captured at or before it.
    ///
    /// In-order appends, the normal case, are a plain push.
    pub fn append(&self, result: ScanResult) {
        let actions = router::actions_for(&result);
        let mut state = self.write();

        let captured_at = result.captured_at();
        let in_order = state
            .entries
            .last()
            .is_none_or(|last| last.captured_at() <= captured_at);

        state.metrics.record(&result, &actions);
        debug!("Ledger append {} ({} entries)", result.id(), state.entries.len() + 1);

        if in_order {
            state.entries.push(Arc::new(result));
        } else {
            let at = state
                .entries
                .partition_point(|entry| entry.captured_at() <= captured_at);
            state.entries.insert(at, Arc::new(result));
        }
    }

    pub fn len(&self) -> usize {
        self.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().entries.is_empty()
    }

    /// Most recently captured entry.
    pub fn latest(&self) -> Option<Arc<ScanResult>> {
        self.read().entries.last().cloned()
    }

    /// Snapshot of the entries matching `filter`, newest first.
    ///
    /// The snapshot is taken now; later appends do not show up in it.
    pub fn query(&self, filter: ScanFilter) -> ScanQuery {
        ScanQuery {
            snapshot: self.read().entries.clone(),
            filter,
        }
    }

    pub fn metrics(&self) -> ScanMetrics {
        self.read().metrics.clone()
    }

    fn read(&self) -> RwLockReadGuard<'_, LedgerState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, LedgerState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Criteria for [`ScanLedger::query`]. Unset criteria match everything.
#[derive(Debug, Clone, Default)]
pub struct ScanFilter {
    technology: Option<ScanTechnology>,
    mode: Option<ScanMode>,
    verified: Option<bool>,
    text: Option<String>,
    since: Option<DateTime<Utc>>,
    until: Option<DateTime<Utc>>,
}

impl ScanFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn technology(mut self, technology: ScanTechnology) -> Self {
        self.technology = Some(technology);
        self
    }

    pub fn mode(mut self, mode: ScanMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn verified(mut self, verified: bool) -> Self {
        self.verified = Some(verified);
        self
    }

    /// Case-insensitive match on id, product id, location or operator.
    pub fn text(mut self, needle: impl Into<String>) -> Self {
        let needle = needle.into();
        self.text = (!needle.trim().is_empty()).then_some(needle);
        self
    }

    /// Inclusive lower bound on the capture time.
    pub fn since(mut self, at: DateTime<Utc>) -> Self {
        self.since = Some(at);
        self
    }

    /// Inclusive upper bound on the capture time.
    pub fn until(mut self, at: DateTime<Utc>) -> Self {
        self.until = Some(at);
        self
    }

    pub fn matches(&self, result: &ScanResult) -> bool {
        self.technology.is_none_or(|t| result.technology() == t)
            && self.mode.is_none_or(|m| result.mode() == m)
            && self.verified.is_none_or(|v| result.is_verified() == v)
            && self.since.is_none_or(|at| result.captured_at() >= at)
            && self.until.is_none_or(|at| result.captured_at() <= at)
            && self
                .text
                .as_deref()
                .is_none_or(|needle| result.matches_text(needle.trim()))
    }
}

/// Result of a ledger query. Iterate as often as needed; each call to
/// [`ScanQuery::iter`] starts over from the newest entry.
pub struct ScanQuery {
    snapshot: Vec<Arc<ScanResult>>,
    filter: ScanFilter,
}

impl ScanQuery {
    pub fn iter(&self) -> impl Iterator<Item = &ScanResult> + '_ {
        self.snapshot
            .iter()
            .rev()
            .map(Arc::as_ref)
            .filter(|result| self.filter.matches(result))
    }

    pub fn count(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}
