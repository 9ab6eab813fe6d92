//! Type definitions for the queue system
//!
//! Snapshot structures reported by [`BlockingQueue`](crate::queue::BlockingQueue).

/// Point-in-time counters for a blocking queue
///
/// Every field is read under the queue lock in a single critical section,
/// so `len == total_added - total_removed` always holds for one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueueStats {
    /// Number of items currently queued
    pub len: usize,
    /// Successful `add` calls since creation
    pub total_added: u64,
    /// Items handed out by any removal discipline
    pub total_removed: u64,
    /// Blocked waits that ended through interruption or lock poisoning
    pub interruptions: u64,
}

impl QueueStats {
    /// Items that were added but not yet removed, derived from the counters
    pub fn outstanding(&self) -> u64 {
        self.total_added - self.total_removed
    }
}
