//! Test helpers shared by the integration tests

#![allow(dead_code)]

use std::time::Duration;

use uptime_monitoring::{
    persistence::{NullStore, TargetStore},
    probe::Prober,
    registry::TargetRegistry,
    scheduler::Scheduler,
    stats::StatsAggregator,
};

/// Probe timeout short enough that unreachable targets fail fast in tests
pub const TEST_PROBE_TIMEOUT: Duration = Duration::from_millis(500);

/// Create a prober with the test timeout
pub fn test_prober() -> Prober {
    Prober::new(TEST_PROBE_TIMEOUT)
}

/// Create a scheduler over a fresh aggregator
pub fn test_scheduler(interval: Duration) -> (Scheduler, StatsAggregator) {
    let stats = StatsAggregator::new();
    let scheduler = Scheduler::new(test_prober(), stats.clone(), interval);
    (scheduler, stats)
}

/// Create a registry without persistence
///
/// The interval is long by default so that only the immediate probe on add
/// fires during a test.
pub fn test_registry(interval: Duration) -> TargetRegistry {
    test_registry_with_store(interval, Box::new(NullStore))
}

/// Create a registry backed by a specific store
pub fn test_registry_with_store(
    interval: Duration,
    store: Box<dyn TargetStore>,
) -> TargetRegistry {
    let stats = StatsAggregator::new();
    let scheduler = Scheduler::new(test_prober(), stats.clone(), interval);
    TargetRegistry::new(scheduler, stats, store)
}
