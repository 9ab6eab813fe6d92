//! Queue integration tests through the public API
//!
//! Producers and consumers run on spawned threads sharing the queue via Arc.

use handoff::queue::api::{BlockingQueue, QueueConfig};
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

#[test]
fn test_pipeline_of_two_queues() {
    // Stage 1 doubles numbers from `input` into `output`; a None item ends the stage
    let input: Arc<BlockingQueue<Option<u64>>> = Arc::new(BlockingQueue::with_config(
        QueueConfig::from_millis("input", 10).unwrap(),
    ));
    let output: Arc<BlockingQueue<u64>> = Arc::new(BlockingQueue::with_config(
        QueueConfig::from_millis("output", 10).unwrap(),
    ));

    let stage = {
        let input = Arc::clone(&input);
        let output = Arc::clone(&output);
        thread::spawn(move || {
            while let Some(n) = input.remove() {
                output.add(n * 2);
            }
        })
    };

    for n in 1..=100 {
        input.add(Some(n));
    }
    input.add(None);
    stage.join().unwrap();

    let results = output.drain_no_wait();
    assert_eq!(results, (1..=100).map(|n| n * 2).collect::<Vec<_>>());
    assert!(input.is_empty());
}

#[test]
fn test_producers_and_consumers_on_spawned_threads() {
    const PRODUCERS: usize = 3;
    const ITEMS: usize = 300;

    let queue = Arc::new(BlockingQueue::with_default_wait(Duration::from_millis(10)));

    let producers: Vec<_> = (0..PRODUCERS)
        .map(|p| {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                for i in 0..ITEMS {
                    queue.add(format!("{}-{}", p, i));
                }
            })
        })
        .collect();

    let consumers: Vec<_> = (0..PRODUCERS)
        .map(|_| {
            let queue = Arc::clone(&queue);
            thread::spawn(move || (0..ITEMS).map(|_| queue.remove()).collect::<Vec<_>>())
        })
        .collect();

    for producer in producers {
        producer.join().unwrap();
    }
    let all: Vec<String> = consumers
        .into_iter()
        .flat_map(|c| c.join().unwrap())
        .collect();

    let unique: HashSet<&String> = all.iter().collect();
    assert_eq!(all.len(), PRODUCERS * ITEMS);
    assert_eq!(unique.len(), PRODUCERS * ITEMS);
    assert_eq!(queue.size(), 0);
}

#[test]
fn test_timed_removal_as_polling_loop() {
    let queue = Arc::new(BlockingQueue::new());

    let producer = {
        let queue = Arc::clone(&queue);
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(80));
            queue.add("done");
        })
    };

    // Caller interprets None as "try again later"
    let deadline = Instant::now() + Duration::from_secs(10);
    let mut empty_polls = 0;
    let item = loop {
        match queue.remove_timeout(Duration::from_millis(20)) {
            Some(item) => break Some(item),
            None if Instant::now() < deadline => empty_polls += 1,
            None => break None,
        }
    };
    producer.join().unwrap();

    assert_eq!(item, Some("done"));
    assert!(empty_polls >= 1);
}

#[test]
fn test_interrupt_is_invisible_to_callers() {
    let queue: Arc<BlockingQueue<u8>> = Arc::new(BlockingQueue::new());

    let timed = {
        let queue = Arc::clone(&queue);
        thread::spawn(move || queue.remove_timeout(Duration::from_secs(60)))
    };

    let deadline = Instant::now() + Duration::from_secs(10);
    while !timed.is_finished() && Instant::now() < deadline {
        queue.interrupt();
        thread::sleep(Duration::from_millis(10));
    }

    assert_eq!(timed.join().unwrap(), None);
    let stats = queue.stats();
    assert!(stats.interruptions >= 1);
    assert_eq!(stats.total_removed, 0);
}
