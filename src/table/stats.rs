//! Table counters.
//!
//! Lookups only borrow the table, so the counters are atomics. They are
//! observational: nothing in the lookup path reads them.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Snapshot of how much work a table has done.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableStats {
    /// Successful builds of the combined regex.
    pub compilations: usize,
    /// Lookups that reached the matcher (including ones that found nothing).
    pub lookups: usize,
    /// Lookups resolved by re-testing entries one at a time.
    pub fallback_resolutions: usize,
}

#[derive(Debug, Default)]
pub(crate) struct Counters {
    compilations: AtomicUsize,
    lookups: AtomicUsize,
    fallback_resolutions: AtomicUsize,
}

impl Counters {
    pub fn record_compilation(&self) {
        self.compilations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_lookup(&self) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fallback(&self) {
        self.fallback_resolutions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> TableStats {
        TableStats {
            compilations: self.compilations.load(Ordering::Relaxed),
            lookups: self.lookups.load(Ordering::Relaxed),
            fallback_resolutions: self.fallback_resolutions.load(Ordering::Relaxed),
        }
    }
}
