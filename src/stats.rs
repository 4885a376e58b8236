//! Per-domain availability statistics
//!
//! Statistics are keyed by the *domain* (URL host), not the full URL. Two
//! targets on the same host share one bucket, so their checks blend into a
//! single availability figure. This mirrors the behavior of the service this
//! was built around and is intentional, not a bug.
//!
//! Buckets are created lazily on first check and never destroyed. Removing
//! the last target of a domain leaves its counters in place; a target added
//! later for the same host inherits them. Acceptable staleness.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use url::Url;

use crate::probe::ProbeResult;

/// Running counters for one domain
///
/// `latency_sum_ms` only accumulates over successful checks, so the average
/// latency is undefined until at least one check succeeds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DomainStats {
    pub total_checks: u64,
    pub successful_checks: u64,
    pub latency_sum_ms: u64,
}

impl DomainStats {
    pub fn record(&mut self, result: &ProbeResult) {
        self.total_checks += 1;
        if result.is_up() {
            self.successful_checks += 1;
            self.latency_sum_ms += result.latency_ms.unwrap_or(0);
        }
    }

    /// Percentage of checks that succeeded, rounded; 0 when nothing was checked
    pub fn availability(&self) -> u8 {
        if self.total_checks == 0 {
            return 0;
        }
        (self.successful_checks as f64 / self.total_checks as f64 * 100.0).round() as u8
    }

    /// Average latency over successful checks, rounded; `None` before the
    /// first success
    pub fn avg_latency_ms(&self) -> Option<u64> {
        if self.successful_checks == 0 {
            return None;
        }
        Some((self.latency_sum_ms as f64 / self.successful_checks as f64).round() as u64)
    }
}

/// Shared store of per-domain counters
///
/// Cheaply cloneable; all clones share the same map. A single lock guards the
/// map, so every `record` is atomic and every `snapshot` observes a consistent
/// counter triple - concurrent monitors sharing a domain cannot lose updates
/// or produce torn reads.
#[derive(Clone, Default)]
pub struct StatsAggregator {
    domains: Arc<RwLock<HashMap<String, DomainStats>>>,
}

impl StatsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one probe result into the domain's counters
    pub async fn record(&self, domain: &str, result: &ProbeResult) {
        let mut domains = self.domains.write().await;
        domains.entry(domain.to_string()).or_default().record(result);
    }

    /// Copy of the domain's counters; zeroed stats for unknown domains
    pub async fn snapshot(&self, domain: &str) -> DomainStats {
        let domains = self.domains.read().await;
        domains.get(domain).copied().unwrap_or_default()
    }
}

/// Extract the statistics key (host) from a URL
pub fn domain_of(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()?
        .host_str()
        .map(|host| host.to_string())
}
