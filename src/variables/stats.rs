//! Variable Statistics Module
//!
//! Counts what the store has done during a session.

use std::cell::Cell;

use serde::Serialize;

// == Variable Stats ==
/// Operation counters for a [`VariableStore`](crate::variables::VariableStore).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VariableStats {
    /// Values forwarded to a host setter
    pub writes: u64,
    /// Host getter calls
    pub reads: u64,
    /// Reads for which the host held no value
    pub empty_reads: u64,
    /// Int writes redirected to Decimal because they overflowed
    pub decimal_fallbacks: u64,
    /// Operations ignored because the type has no host kind
    pub unsupported: u64,
    /// Entries dropped by prefix clearing
    pub cleared: u64,
    /// Current number of tracked entries
    pub tracked_entries: usize,
}

impl VariableStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_write(&mut self) {
        self.writes += 1;
    }

    pub fn record_decimal_fallback(&mut self) {
        self.decimal_fallbacks += 1;
    }

    pub fn record_unsupported(&mut self) {
        self.unsupported += 1;
    }

    pub fn record_cleared(&mut self, count: usize) {
        self.cleared += count as u64;
    }

    pub fn set_tracked_entries(&mut self, count: usize) {
        self.tracked_entries = count;
    }
}

// == Read Counters ==
/// Counters bumped by reads, which only borrow the store immutably.
#[derive(Debug, Default)]
pub(crate) struct ReadCounters {
    reads: Cell<u64>,
    empty_reads: Cell<u64>,
    unsupported: Cell<u64>,
}

impl ReadCounters {
    /// Records a host read; `found` is false when the host returned nothing.
    pub fn record_read(&self, found: bool) {
        self.reads.set(self.reads.get() + 1);
        if !found {
            self.empty_reads.set(self.empty_reads.get() + 1);
        }
    }

    pub fn record_unsupported(&self) {
        self.unsupported.set(self.unsupported.get() + 1);
    }

    /// Adds these counters to `stats`.
    pub fn merge_into(&self, stats: &mut VariableStats) {
        stats.reads += self.reads.get();
        stats.empty_reads += self.empty_reads.get();
        stats.unsupported += self.unsupported.get();
    }
}
