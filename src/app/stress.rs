//! Concurrency stress run
//!
//! P producer threads each append N tagged items while C consumer threads
//! drain with the unbounded `remove()`. Afterwards every item must have been
//! received exactly once, each consumer must have seen every producer's
//! items in append order, and the queue must be empty.

use crate::app::{AppError, AppResult};
use crate::queue::{BlockingQueue, ConfigError, ConfigResult, QueueConfig, QueueStats};
use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};

pub const DEFAULT_PRODUCERS: usize = 4;
pub const DEFAULT_ITEMS_PER_PRODUCER: usize = 1000;
pub const DEFAULT_CONSUMERS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StressSettings {
    pub producers: usize,
    pub items_per_producer: usize,
    pub consumers: usize,
}

impl StressSettings {
    pub fn new(producers: usize, items_per_producer: usize, consumers: usize) -> ConfigResult<Self> {
        for (field, value) in [
            ("producers", producers),
            ("items-per-producer", items_per_producer),
            ("consumers", consumers),
        ] {
            if value == 0 {
                return Err(ConfigError::invalid(field, "must be greater than 0"));
            }
        }
        Ok(Self {
            producers,
            items_per_producer,
            consumers,
        })
    }

    pub fn total_items(&self) -> usize {
        self.producers * self.items_per_producer
    }
}

impl Default for StressSettings {
    fn default() -> Self {
        Self {
            producers: DEFAULT_PRODUCERS,
            items_per_producer: DEFAULT_ITEMS_PER_PRODUCER,
            consumers: DEFAULT_CONSUMERS,
        }
    }
}

/// Work travelling through the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum StressMessage {
    Item { producer: usize, seq: usize },
    /// Stand-in for items a failed producer never appended
    Filler,
}

/// Outcome of a verified stress run
#[derive(Debug, Clone)]
pub struct StressReport {
    pub settings: StressSettings,
    pub elapsed: Duration,
    /// Items received by each consumer, by consumer index
    pub per_consumer: Vec<usize>,
    pub stats: QueueStats,
}

impl fmt::Display for StressReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "stress: {} producers x {} items, {} consumers",
            self.settings.producers, self.settings.items_per_producer, self.settings.consumers
        )?;
        writeln!(
            f,
            "  delivered {} items exactly once in {:?}",
            self.stats.total_removed, self.elapsed
        )?;
        writeln!(f, "  per consumer: {:?}", self.per_consumer)?;
        write!(
            f,
            "  final size {}, interruptions {}",
            self.stats.len, self.stats.interruptions
        )
    }
}

/// Claim one unit of outstanding work, false once none is left
///
/// Each successful claim is backed by an item that has been or will be added,
/// so the consumer's following `remove()` always returns.
fn claim(remaining: &AtomicUsize) -> bool {
    remaining
        .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1))
        .is_ok()
}

/// Run the stress scenario on a fresh queue and verify the result
pub fn run_stress(config: &QueueConfig, settings: &StressSettings) -> AppResult<StressReport> {
    let queue = BlockingQueue::with_config(config.clone());
    let remaining = AtomicUsize::new(settings.total_items());

    log::info!(
        "Starting stress run on queue '{}': {} producers x {} items, {} consumers",
        queue.name(),
        settings.producers,
        settings.items_per_producer,
        settings.consumers
    );

    let start = Instant::now();
    let received = thread::scope(|scope| -> AppResult<Vec<Vec<StressMessage>>> {
        let queue = &queue;
        let remaining = &remaining;

        let producers: Vec<_> = (0..settings.producers)
            .map(|producer| {
                let items = settings.items_per_producer;
                scope.spawn(move || {
                    for seq in 0..items {
                        queue.add(StressMessage::Item { producer, seq });
                    }
                    log::debug!("producer {} appended {} items", producer, items);
                })
            })
            .collect();

        let consumers: Vec<_> = (0..settings.consumers)
            .map(|index| {
                scope.spawn(move || {
                    let mut received = Vec::new();
                    while claim(remaining) {
                        received.push(queue.remove());
                    }
                    log::debug!("consumer {} received {} items", index, received.len());
                    received
                })
            })
            .collect();

        let mut producer_failure = None;
        for (index, handle) in producers.into_iter().enumerate() {
            if handle.join().is_err() && producer_failure.is_none() {
                producer_failure = Some(AppError::WorkerPanicked {
                    role: "producer",
                    index,
                });
            }
        }
        if producer_failure.is_some() {
            // Unblock consumers still waiting on items that will never come.
            let shortfall = settings.total_items() as u64 - queue.stats().total_added;
            for _ in 0..shortfall {
                queue.add(StressMessage::Filler);
            }
        }

        let mut results = Vec::with_capacity(settings.consumers);
        let mut consumer_failure = None;
        for (index, handle) in consumers.into_iter().enumerate() {
            match handle.join() {
                Ok(received) => results.push(received),
                Err(_) => {
                    consumer_failure.get_or_insert(AppError::WorkerPanicked {
                        role: "consumer",
                        index,
                    });
                }
            }
        }

        match producer_failure.or(consumer_failure) {
            Some(error) => Err(error),
            None => Ok(results),
        }
    })?;
    let elapsed = start.elapsed();

    verify(settings, &received)?;

    let stats = queue.stats();
    if stats.len != 0 {
        return Err(AppError::verification(format!(
            "{} items left in the queue after the run",
            stats.len
        )));
    }

    let report = StressReport {
        settings: *settings,
        elapsed,
        per_consumer: received.iter().map(Vec::len).collect(),
        stats,
    };
    log::info!(
        "Stress run verified: {} items in {:?}",
        report.stats.total_removed,
        report.elapsed
    );
    Ok(report)
}

/// Exactly-once delivery and per-producer order within each consumer
fn verify(settings: &StressSettings, received: &[Vec<StressMessage>]) -> AppResult<()> {
    let mut seen = HashSet::with_capacity(settings.total_items());
    let mut duplicates = 0usize;

    for (consumer, messages) in received.iter().enumerate() {
        let mut last_seq: Vec<Option<usize>> = vec![None; settings.producers];
        for message in messages {
            let StressMessage::Item { producer, seq } = *message else {
                return Err(AppError::verification(format!(
                    "consumer {} received a filler message",
                    consumer
                )));
            };
            if producer >= settings.producers || seq >= settings.items_per_producer {
                return Err(AppError::verification(format!(
                    "consumer {} received unknown item {}/{}",
                    consumer, producer, seq
                )));
            }
            if let Some(prev) = last_seq[producer] {
                if seq <= prev {
                    return Err(AppError::verification(format!(
                        "consumer {} saw producer {} item {} after item {}",
                        consumer, producer, seq, prev
                    )));
                }
            }
            last_seq[producer] = Some(seq);
            if !seen.insert((producer, seq)) {
                duplicates += 1;
            }
        }
    }

    let missing = settings.total_items() - seen.len();
    if duplicates > 0 || missing > 0 {
        return Err(AppError::verification(format!(
            "{} duplicated and {} missing items out of {}",
            duplicates,
            missing,
            settings.total_items()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(producer: usize, seq: usize) -> StressMessage {
        StressMessage::Item { producer, seq }
    }

    #[test]
    fn test_settings_validation() {
        assert!(StressSettings::new(1, 1, 1).is_ok());
        match StressSettings::new(2, 0, 2) {
            Err(ConfigError::InvalidValue { field, .. }) => {
                assert_eq!(field, "items-per-producer")
            }
            other => panic!("Expected InvalidValue error, got {:?}", other),
        }
        assert_eq!(StressSettings::new(3, 7, 1).unwrap().total_items(), 21);
    }

    #[test]
    fn test_small_stress_run_verifies() {
        let config = QueueConfig::from_millis("stress-test", 10).unwrap();
        let settings = StressSettings::new(3, 200, 3).unwrap();

        let report = run_stress(&config, &settings).unwrap();

        assert_eq!(report.per_consumer.len(), 3);
        assert_eq!(report.per_consumer.iter().sum::<usize>(), 600);
        assert_eq!(report.stats.total_added, 600);
        assert_eq!(report.stats.total_removed, 600);
        assert_eq!(report.stats.len, 0);
        assert!(report.to_string().contains("delivered 600 items exactly once"));
    }

    #[test]
    fn test_more_consumers_than_items() {
        let config = QueueConfig::from_millis("sparse", 10).unwrap();
        let settings = StressSettings::new(1, 2, 6).unwrap();

        let report = run_stress(&config, &settings).unwrap();
        assert_eq!(report.per_consumer.iter().sum::<usize>(), 2);
    }

    #[test]
    fn test_verify_detects_duplicates_and_gaps() {
        let settings = StressSettings::new(1, 3, 2).unwrap();
        let received = vec![vec![item(0, 0), item(0, 1)], vec![item(0, 1)]];

        let error = verify(&settings, &received).unwrap_err();
        assert!(error.to_string().contains("1 duplicated and 1 missing"));
    }

    #[test]
    fn test_verify_detects_reordering() {
        let settings = StressSettings::new(1, 2, 1).unwrap();
        let received = vec![vec![item(0, 1), item(0, 0)]];

        let error = verify(&settings, &received).unwrap_err();
        assert!(error.to_string().contains("after item 1"));
    }

    #[test]
    fn test_verify_rejects_filler() {
        let settings = StressSettings::new(1, 1, 1).unwrap();
        let received = vec![vec![StressMessage::Filler]];
        assert!(verify(&settings, &received).is_err());
    }
}
