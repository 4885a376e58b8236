//! TargetRegistry - the authoritative set of monitored URLs
//!
//! All add/remove traffic flows through the registry. It validates input,
//! keeps the ordered, duplicate-free URL list, persists it best-effort, and
//! drives the scheduler so that exactly the registered targets are monitored.

use std::fmt;

use tracing::{info, warn};
use url::Url;

use crate::persistence::TargetStore;
use crate::scheduler::Scheduler;
use crate::stats::StatsAggregator;

/// Result type alias for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors that can occur when changing the target set
#[derive(Debug, PartialEq, Eq)]
pub enum RegistryError {
    /// The URL is empty or not syntactically well-formed
    InvalidUrl(String),

    /// The exact URL is already registered
    AlreadyExists(String),

    /// The URL is not registered
    NotFound(String),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::InvalidUrl(url) => write!(f, "invalid URL: {}", url),
            RegistryError::AlreadyExists(url) => write!(f, "already monitored: {}", url),
            RegistryError::NotFound(url) => write!(f, "not monitored: {}", url),
        }
    }
}

impl std::error::Error for RegistryError {}

/// One monitored target: the URL and its statistics key
#[derive(Debug, Clone)]
struct Target {
    url: String,
    domain: String,
}

/// Health snapshot row for one target
///
/// Stats are per domain, so targets sharing a host report the same numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetHealth {
    pub domain: String,
    pub url: String,
    pub availability: u8,
    pub avg_latency_ms: Option<u64>,
}

/// Authoritative, ordered set of monitored targets
///
/// Owns the scheduler, the stats aggregator and the durable store; everything
/// the monitoring engine mutates hangs off this one object.
pub struct TargetRegistry {
    targets: Vec<Target>,
    scheduler: Scheduler,
    stats: StatsAggregator,
    store: Box<dyn TargetStore>,
}

impl TargetRegistry {
    pub fn new(scheduler: Scheduler, stats: StatsAggregator, store: Box<dyn TargetStore>) -> Self {
        Self {
            targets: Vec::new(),
            scheduler,
            stats,
            store,
        }
    }

    /// Restore persisted targets and start monitoring them
    ///
    /// A missing or unreadable store yields an empty set; malformed entries
    /// are skipped. Nothing here is fatal.
    pub async fn bootstrap(&mut self) {
        let urls = match self.store.load().await {
            Ok(urls) => urls,
            Err(e) => {
                warn!("failed to load persisted targets: {e}");
                return;
            }
        };

        for url in urls {
            if let Err(e) = self.register(&url) {
                warn!("skipping persisted target: {e}");
            }
        }

        info!("restored {} monitored targets", self.targets.len());
    }

    /// Validate a URL and derive its statistics key
    fn validate(url: &str) -> RegistryResult<String> {
        if url.trim().is_empty() {
            return Err(RegistryError::InvalidUrl(url.to_string()));
        }

        let parsed = Url::parse(url).map_err(|_| RegistryError::InvalidUrl(url.to_string()))?;

        match parsed.host_str() {
            Some(host) => Ok(host.to_string()),
            None => Err(RegistryError::InvalidUrl(url.to_string())),
        }
    }

    /// Validate, insert and start monitoring - without persisting
    fn register(&mut self, url: &str) -> RegistryResult<()> {
        let domain = Self::validate(url)?;

        if self.targets.iter().any(|t| t.url == url) {
            return Err(RegistryError::AlreadyExists(url.to_string()));
        }

        self.targets.push(Target {
            url: url.to_string(),
            domain,
        });
        self.scheduler.start(url);
        Ok(())
    }

    /// Add a target: validate, persist, start monitoring
    pub async fn add(&mut self, url: &str) -> RegistryResult<()> {
        self.register(url)?;
        self.persist().await;
        info!("now monitoring {url}");
        Ok(())
    }

    /// Remove a target: persist, stop monitoring
    ///
    /// Waits for the target's monitor to exit; its domain bucket in the stats
    /// stays behind (shared with any remaining targets on the same host).
    pub async fn remove(&mut self, url: &str) -> RegistryResult<()> {
        let index = self
            .targets
            .iter()
            .position(|t| t.url == url)
            .ok_or_else(|| RegistryError::NotFound(url.to_string()))?;

        self.targets.remove(index);
        self.persist().await;
        self.scheduler.stop(url).await;
        info!("stopped monitoring {url}");
        Ok(())
    }

    /// Write the current list to the store; failures are logged, not returned
    async fn persist(&self) {
        let urls = self.list();
        if let Err(e) = self.store.save(&urls).await {
            warn!("failed to persist target list: {e}");
        }
    }

    /// Registered URLs in insertion order
    pub fn list(&self) -> Vec<String> {
        self.targets.iter().map(|t| t.url.clone()).collect()
    }

    /// Join the target list with the per-domain stats
    ///
    /// This is the sole read model for the health/export surface.
    pub async fn snapshot_all(&self) -> Vec<TargetHealth> {
        let mut entries = Vec::with_capacity(self.targets.len());

        for target in &self.targets {
            let stats = self.stats.snapshot(&target.domain).await;
            entries.push(TargetHealth {
                domain: target.domain.clone(),
                url: target.url.clone(),
                availability: stats.availability(),
                avg_latency_ms: stats.avg_latency_ms(),
            });
        }

        entries
    }

    /// Access to the scheduler, e.g. for triggering immediate probes
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Stop all monitors; called on process shutdown
    pub async fn shutdown(&mut self) {
        self.scheduler.shutdown_all().await;
    }
}
