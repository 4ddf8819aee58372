//! ---
//! wk_section: "01-shared-primitives"
//! wk_subsection: "module"
//! wk_type: "source"
//! wk_scope: "code"
//! wk_description: "Shared primitives and utilities for the wrapper crates."
//! wk_version: "v0.1.0"
//! wk_owner: "tbd"
//! ---
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;

/// Aggregated timing statistics for one callable label.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LedgerEntry {
    /// Number of recorded calls.
    pub calls: u64,
    /// Sum of elapsed time across all recorded calls.
    pub total: Duration,
    /// Shortest recorded elapsed time.
    pub min: Duration,
    /// Longest recorded elapsed time.
    pub max: Duration,
}

impl LedgerEntry {
    fn first(elapsed: Duration) -> Self {
        Self {
            calls: 1,
            total: elapsed,
            min: elapsed,
            max: elapsed,
        }
    }

    fn absorb(&mut self, elapsed: Duration) {
        self.calls += 1;
        self.total = self.total.saturating_add(elapsed);
        self.min = self.min.min(elapsed);
        self.max = self.max.max(elapsed);
    }

    /// Mean elapsed time across recorded calls.
    pub fn mean(&self) -> Duration {
        if self.calls == 0 {
            return Duration::ZERO;
        }
        self.total / self.calls as u32
    }
}

/// Thread-safe per-label timing aggregation.
///
/// Intended as a handler sink for the timing wrapper: every `(label, elapsed)`
/// pair is folded into the entry for that label.
#[derive(Debug, Default)]
pub struct TimingLedger {
    entries: Mutex<BTreeMap<String, LedgerEntry>>,
}

impl TimingLedger {
    /// Create an empty ledger behind an [`Arc`], ready to share with handlers.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Fold one timing observation into the ledger.
    pub fn record(&self, label: &str, elapsed: Duration) {
        let mut entries = self.entries.lock();
        match entries.get_mut(label) {
            Some(entry) => entry.absorb(elapsed),
            None => {
                entries.insert(label.to_owned(), LedgerEntry::first(elapsed));
            }
        }
    }

    /// Snapshot the entry for a label, if any call was recorded.
    pub fn entry(&self, label: &str) -> Option<LedgerEntry> {
        self.entries.lock().get(label).copied()
    }

    /// Snapshot all entries keyed by label.
    pub fn snapshot(&self) -> BTreeMap<String, LedgerEntry> {
        self.entries.lock().clone()
    }

    /// Serialise the current snapshot to a pretty-printed JSON file.
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let snapshot = self.snapshot();
        let mut file = File::create(path)?;
        let json = serde_json::to_vec_pretty(&snapshot)
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))?;
        file.write_all(&json)?;
        Ok(())
    }

    /// Build a recorder closure suitable as a timing handler.
    pub fn recorder(self: &Arc<Self>) -> impl FnMut(&str, Duration) + Send + 'static {
        let ledger = Arc::clone(self);
        move |label, elapsed| ledger.record(label, elapsed)
    }
}
