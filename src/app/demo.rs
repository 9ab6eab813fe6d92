//! Step-by-step walk-through of the queue operations
//!
//! Each step checks its expected outcome; a mismatch aborts the walk-through
//! with a verification error.

use crate::app::{AppError, AppResult};
use crate::queue::{BlockingQueue, QueueConfig};
use std::thread;
use std::time::{Duration, Instant};

/// Timed wait used by the empty `remove_timeout` step
pub const DEMO_TIMEOUT: Duration = Duration::from_millis(50);

fn check(condition: bool, step: &str) -> AppResult<()> {
    if condition {
        Ok(())
    } else {
        Err(AppError::verification(format!("demo step '{}' did not hold", step)))
    }
}

/// Run the walk-through and return one line per step
pub fn run_demo(config: &QueueConfig) -> AppResult<Vec<String>> {
    let queue: BlockingQueue<String> = BlockingQueue::with_config(config.clone());
    let mut lines = Vec::new();

    log::info!("Running demo on queue '{}'", queue.name());

    let result = queue.remove_no_wait();
    lines.push(format!("remove_no_wait() on empty queue -> {:?}", result));
    check(result.is_none(), "remove_no_wait on empty queue")?;

    queue.add("a".to_string());
    lines.push(format!("add(\"a\"); size() -> {}", queue.size()));
    check(queue.size() == 1, "size after add")?;

    let result = queue.remove_no_wait();
    lines.push(format!(
        "remove_no_wait() -> {:?}; size() -> {}",
        result,
        queue.size()
    ));
    check(result.as_deref() == Some("a") && queue.size() == 0, "remove_no_wait returns head")?;

    let start = Instant::now();
    let result = queue.remove_timeout(DEMO_TIMEOUT);
    let elapsed = start.elapsed();
    lines.push(format!(
        "remove_timeout({:?}) on empty queue -> {:?} after {:?}",
        DEMO_TIMEOUT, result, elapsed
    ));
    check(result.is_none() && elapsed >= DEMO_TIMEOUT, "timed removal waits out")?;

    let received = thread::scope(|scope| {
        let queue = &queue;
        for producer in 1..=2 {
            scope.spawn(move || queue.add(format!("from-producer-{}", producer)));
        }
        let consumer = scope.spawn(move || [queue.remove(), queue.remove()]);
        consumer.join()
    })
    .map_err(|_| AppError::WorkerPanicked {
        role: "consumer",
        index: 0,
    })?;
    lines.push(format!(
        "two producers add concurrently; remove() x2 -> {:?}",
        received
    ));
    let mut sorted = received.clone();
    sorted.sort();
    check(
        sorted == ["from-producer-1", "from-producer-2"] && queue.size() == 0,
        "both concurrent items received once",
    )?;

    let stats = queue.stats();
    lines.push(format!(
        "stats: added {}, removed {}, size {}",
        stats.total_added, stats.total_removed, stats.len
    ));

    Ok(lines)
}
