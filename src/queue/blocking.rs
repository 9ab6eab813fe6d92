//! BlockingQueue implementation
//!
//! An unbounded FIFO shared between producer and consumer threads. A single
//! mutex guards the item sequence together with its counters, and one
//! condition variable bound to that mutex carries the "item available"
//! signal. Consumers pick one of three removal disciplines:
//!
//! - [`BlockingQueue::remove`] waits in bounded slices until an item arrives
//! - [`BlockingQueue::remove_timeout`] waits at most once, for a given duration
//! - [`BlockingQueue::remove_no_wait`] never waits
//!
//! Neither discipline fails outward. A blocked wait that is interrupted
//! (see [`BlockingQueue::interrupt`]) or that wakes to a poisoned lock is
//! logged and counted, then the operation carries on.

use crate::queue::config::QueueConfig;
use crate::queue::types::QueueStats;
use std::collections::VecDeque;
use std::sync::{Condvar, LockResult, Mutex, MutexGuard, WaitTimeoutResult};
use std::time::Duration;

/// State guarded by the queue lock
#[derive(Debug)]
struct QueueState<T> {
    items: VecDeque<T>,
    total_added: u64,
    total_removed: u64,
    interruptions: u64,
    /// Bumped by `interrupt()`; a waiter that sees it move was interrupted
    interrupt_epoch: u64,
}

impl<T> QueueState<T> {
    fn new() -> Self {
        Self {
            items: VecDeque::new(),
            total_added: 0,
            total_removed: 0,
            interruptions: 0,
            interrupt_epoch: 0,
        }
    }

    /// Non-blocking head removal, the building block of every discipline
    fn pop(&mut self) -> Option<T> {
        let item = self.items.pop_front();
        if item.is_some() {
            self.total_removed += 1;
        }
        item
    }
}

/// Thread-safe unbounded FIFO queue with blocking, timed and non-blocking removal
///
/// Share it between threads with `Arc<BlockingQueue<T>>` or a scoped borrow;
/// every operation takes `&self`.
///
/// # Example
///
/// ```rust
/// use handoff::queue::BlockingQueue;
/// use std::sync::Arc;
/// use std::thread;
/// use std::time::Duration;
///
/// let queue = Arc::new(BlockingQueue::new());
///
/// let producer = {
///     let queue = Arc::clone(&queue);
///     thread::spawn(move || {
///         for i in 0..3 {
///             queue.add(i);
///         }
///     })
/// };
///
/// assert_eq!(queue.remove(), 0);
/// assert_eq!(queue.remove(), 1);
/// assert_eq!(queue.remove_timeout(Duration::from_secs(5)), Some(2));
/// producer.join().unwrap();
///
/// assert_eq!(queue.remove_no_wait(), None);
/// ```
#[derive(Debug)]
pub struct BlockingQueue<T> {
    state: Mutex<QueueState<T>>,
    available: Condvar,
    config: QueueConfig,
}

/// How a single wait on the condition variable ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WaitOutcome {
    Woken,
    TimedOut,
    Interrupted,
}

impl<T> BlockingQueue<T> {
    /// Create an empty queue with the default configuration
    pub fn new() -> Self {
        Self::with_config(QueueConfig::default())
    }

    /// Create an empty queue with the given name and wait slice
    pub fn with_config(config: QueueConfig) -> Self {
        log::trace!(
            "queue '{}': created (default wait {:?})",
            config.name(),
            config.default_wait()
        );
        Self {
            state: Mutex::new(QueueState::new()),
            available: Condvar::new(),
            config,
        }
    }

    /// Create an empty queue with the default name and the given wait slice
    ///
    /// A zero duration falls back to [`DEFAULT_WAIT`](crate::queue::config::DEFAULT_WAIT).
    pub fn with_default_wait(default_wait: Duration) -> Self {
        let config = QueueConfig::default()
            .with_default_wait(default_wait)
            .unwrap_or_default();
        Self::with_config(config)
    }

    pub fn name(&self) -> &str {
        self.config.name()
    }

    /// Wait slice used by each iteration of [`remove`](Self::remove)
    pub fn default_wait(&self) -> Duration {
        self.config.default_wait()
    }

    pub fn config(&self) -> &QueueConfig {
        &self.config
    }

    /// Current number of queued items
    ///
    /// A snapshot only: other threads may change it as soon as the lock is released.
    pub fn size(&self) -> usize {
        self.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().items.is_empty()
    }

    /// Append an item to the tail and wake one waiting consumer
    ///
    /// Never blocks beyond acquiring the lock.
    pub fn add(&self, item: T) {
        let mut state = self.lock();
        state.items.push_back(item);
        state.total_added += 1;
        // Signal only once the item is visible to whoever takes the lock next.
        self.available.notify_one();
    }

    /// Remove the head item, waiting as long as it takes
    ///
    /// Waits in slices of [`default_wait`](Self::default_wait) and re-checks
    /// after every slice, so a lost wake-up costs at most one slice. An
    /// interrupted wait is logged and the loop continues; this never returns
    /// without an item.
    pub fn remove(&self) -> T {
        let mut state = self.lock();
        loop {
            if let Some(item) = state.pop() {
                return item;
            }
            let (guard, outcome) = self.wait_slice(state, self.config.default_wait());
            state = guard;
            match outcome {
                WaitOutcome::Interrupted => log::debug!(
                    "queue '{}': interrupted while waiting in remove(), retrying",
                    self.name()
                ),
                WaitOutcome::TimedOut => log::trace!(
                    "queue '{}': wait slice elapsed with no item, re-checking",
                    self.name()
                ),
                WaitOutcome::Woken => {}
            }
        }
    }

    /// Remove the head item, waiting at most `timeout` for one to arrive
    ///
    /// Makes one attempt, waits once for up to `timeout`, then makes exactly
    /// one more attempt and returns its result. Spurious wake-ups keep waiting
    /// for the rest of the same cycle. An interruption ends the wait early
    /// and is otherwise indistinguishable from a timeout.
    pub fn remove_timeout(&self, timeout: Duration) -> Option<T> {
        let mut state = self.lock();
        if let Some(item) = state.pop() {
            return Some(item);
        }

        let epoch = state.interrupt_epoch;
        let result = self
            .available
            .wait_timeout_while(state, timeout, |s| {
                s.items.is_empty() && s.interrupt_epoch == epoch
            });
        let poisoned = result.is_err();
        let (mut state, _) = self.recover_wait(result);

        if poisoned || state.interrupt_epoch != epoch {
            state.interruptions += 1;
            log::debug!(
                "queue '{}': interrupted while waiting in remove_timeout({:?})",
                self.name(),
                timeout
            );
        }
        state.pop()
    }

    /// Remove the head item if there is one, without waiting
    pub fn remove_no_wait(&self) -> Option<T> {
        self.lock().pop()
    }

    /// Remove every queued item in FIFO order, without waiting
    pub fn drain_no_wait(&self) -> Vec<T> {
        let mut state = self.lock();
        let drained: Vec<T> = state.items.drain(..).collect();
        state.total_removed += drained.len() as u64;
        drained
    }

    /// Interrupt every thread currently blocked in a removal on this queue
    ///
    /// `remove()` callers log the interruption and keep waiting;
    /// `remove_timeout()` callers stop waiting and make their final attempt.
    /// Threads that start waiting afterwards are unaffected.
    pub fn interrupt(&self) {
        let mut state = self.lock();
        state.interrupt_epoch = state.interrupt_epoch.wrapping_add(1);
        self.available.notify_all();
        log::trace!("queue '{}': interrupt delivered to waiters", self.name());
    }

    /// Counters snapshot taken in one critical section
    pub fn stats(&self) -> QueueStats {
        let state = self.lock();
        QueueStats {
            len: state.items.len(),
            total_added: state.total_added,
            total_removed: state.total_removed,
            interruptions: state.interruptions,
        }
    }

    /// Acquire the lock, recovering the guard if a panicking thread poisoned it
    ///
    /// Every critical section leaves the state consistent before running
    /// anything that can panic, so the recovered data is sound.
    fn lock(&self) -> MutexGuard<'_, QueueState<T>> {
        self.state.lock().unwrap_or_else(|poisoned| {
            log::warn!(
                "queue '{}': lock poisoned by a panicked thread, recovering",
                self.name()
            );
            poisoned.into_inner()
        })
    }

    /// One bounded wait, classified by how it ended
    fn wait_slice<'a>(
        &self,
        state: MutexGuard<'a, QueueState<T>>,
        slice: Duration,
    ) -> (MutexGuard<'a, QueueState<T>>, WaitOutcome) {
        let epoch = state.interrupt_epoch;
        let result = self.available.wait_timeout(state, slice);
        let poisoned = result.is_err();
        let (mut state, timeout) = self.recover_wait(result);

        if poisoned || state.interrupt_epoch != epoch {
            state.interruptions += 1;
            (state, WaitOutcome::Interrupted)
        } else if timeout.timed_out() {
            (state, WaitOutcome::TimedOut)
        } else {
            (state, WaitOutcome::Woken)
        }
    }

    fn recover_wait<'a>(
        &self,
        result: LockResult<(MutexGuard<'a, QueueState<T>>, WaitTimeoutResult)>,
    ) -> (MutexGuard<'a, QueueState<T>>, WaitTimeoutResult) {
        result.unwrap_or_else(|poisoned| {
            log::warn!(
                "queue '{}': lock poisoned while waiting, recovering",
                self.name()
            );
            poisoned.into_inner()
        })
    }
}

impl<T> Default for BlockingQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
