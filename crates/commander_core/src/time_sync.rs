use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

/// Latest timestamp reported by the autopilot.
///
/// Clones share the same cell: the inbound task writes it, the tick task and
/// command builders read it. Reads before the first sync return 0.
#[derive(Debug, Clone, Default)]
pub struct TimeSyncTracker {
    timestamp: Arc<AtomicU64>,
}

impl TimeSyncTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&self, timestamp: u64) {
        self.timestamp.store(timestamp, Ordering::Release);
    }

    pub fn read(&self) -> u64 {
        self.timestamp.load(Ordering::Acquire)
    }

    pub fn is_synced(&self) -> bool {
        self.read() != 0
    }
}

#[cfg(test)]
#[path = "tests/time_sync_tests.rs"]
mod tests;
