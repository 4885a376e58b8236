//! Single health check against a target URL
//!
//! A probe is one outbound GET request. The result is always a value, never an
//! error: transport failures, timeouts and non-2xx responses all collapse into
//! [`ProbeOutcome::Down`]. Retry behavior lives in the scheduler's periodic
//! re-invocation, not here.

use std::time::{Duration, Instant};

use tracing::{debug, trace};

/// Outcome of a single probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    Up,
    Down,
}

/// Result of one probe: outcome plus wall-clock latency
///
/// Latency is only present for successful probes. A failed or timed-out
/// request carries no meaningful latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeResult {
    pub outcome: ProbeOutcome,
    pub latency_ms: Option<u64>,
}

impl ProbeResult {
    pub fn up(latency_ms: u64) -> Self {
        Self {
            outcome: ProbeOutcome::Up,
            latency_ms: Some(latency_ms),
        }
    }

    pub fn down() -> Self {
        Self {
            outcome: ProbeOutcome::Down,
            latency_ms: None,
        }
    }

    pub fn is_up(&self) -> bool {
        self.outcome == ProbeOutcome::Up
    }
}

/// Performs health checks over HTTP
///
/// The client is built once with a fixed timeout and reused across requests.
#[derive(Clone)]
pub struct Prober {
    client: reqwest::Client,
}

impl Prober {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
        }
    }

    /// Check a single URL
    ///
    /// A 2xx response within the timeout is `Up` with the elapsed time;
    /// anything else is `Down`.
    pub async fn probe(&self, url: &str) -> ProbeResult {
        trace!("probing {url}");

        let start = Instant::now();

        match self.client.get(url).send().await {
            Ok(response) if response.status().is_success() => {
                ProbeResult::up(start.elapsed().as_millis() as u64)
            }
            Ok(response) => {
                debug!("{url}: unexpected status code {}", response.status());
                ProbeResult::down()
            }
            Err(e) => {
                debug!("{url}: request failed: {e}");
                ProbeResult::down()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_up_result_carries_latency() {
        let result = ProbeResult::up(42);
        assert!(result.is_up());
        assert_eq!(result.latency_ms, Some(42));
    }

    #[test]
    fn test_down_result_has_no_latency() {
        let result = ProbeResult::down();
        assert!(!result.is_up());
        assert_eq!(result.latency_ms, None);
    }
}
