//! Lifecycle management for the per-target monitor actors
//!
//! The scheduler keeps exactly one [`MonitorHandle`] per monitored URL. It is
//! driven by the [`TargetRegistry`](crate::registry::TargetRegistry): adding a
//! target starts its actor, removing it stops the actor again.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::{Result, anyhow};
use tracing::{debug, warn};

use crate::actors::target_monitor::MonitorHandle;
use crate::probe::Prober;
use crate::stats::{StatsAggregator, domain_of};

/// Default time between two probes of the same target
pub const DEFAULT_INTERVAL_MS: u64 = 1000;

/// Owns one recurring monitor actor per target URL
pub struct Scheduler {
    monitors: HashMap<String, MonitorHandle>,
    prober: Prober,
    stats: StatsAggregator,
    interval: Duration,
}

impl Scheduler {
    pub fn new(prober: Prober, stats: StatsAggregator, interval: Duration) -> Self {
        Self {
            monitors: HashMap::new(),
            prober,
            stats,
            interval,
        }
    }

    /// Start monitoring a URL; no-op if it is already monitored
    ///
    /// The spawned actor probes the target immediately, then on every
    /// interval tick until stopped.
    pub fn start(&mut self, url: &str) {
        if self.monitors.contains_key(url) {
            debug!("already monitoring {url}");
            return;
        }

        let Some(domain) = domain_of(url) else {
            // the registry validates before starting, so this only fires for
            // callers bypassing it
            warn!("cannot derive a domain from {url}, not scheduling");
            return;
        };

        debug!("starting monitor for {url} (domain {domain})");

        let handle = MonitorHandle::spawn(
            url.to_string(),
            domain,
            self.prober.clone(),
            self.stats.clone(),
            self.interval,
        );
        self.monitors.insert(url.to_string(), handle);
    }

    /// Stop monitoring a URL; no-op if it is not monitored
    ///
    /// Waits for the actor to exit, so once this returns no further stats
    /// writes for this target can occur.
    pub async fn stop(&mut self, url: &str) {
        if let Some(handle) = self.monitors.remove(url) {
            debug!("stopping monitor for {url}");
            handle.shutdown().await;
        }
    }

    /// Trigger an immediate probe of a monitored URL and wait for the result
    /// to be recorded
    pub async fn check_now(&self, url: &str) -> Result<()> {
        let handle = self
            .monitors
            .get(url)
            .ok_or_else(|| anyhow!("{url} is not monitored"))?;
        handle.check_now().await
    }

    pub fn is_monitoring(&self, url: &str) -> bool {
        self.monitors.contains_key(url)
    }

    pub fn active_count(&self) -> usize {
        self.monitors.len()
    }

    /// Stop every monitor, waiting for each actor to exit
    pub async fn shutdown_all(&mut self) {
        debug!("stopping {} monitors", self.monitors.len());
        for (_, handle) in self.monitors.drain() {
            handle.shutdown().await;
        }
    }
}
