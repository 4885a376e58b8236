//! TargetMonitorActor - recurring probes for a single URL
//!
//! Each monitored target runs one of these actors. The actor probes the URL
//! immediately on spawn, then once per interval, and records every result in
//! the shared stats aggregator under the target's domain.
//!
//! Ticks for one target never overlap: the probe is awaited inside the actor
//! loop, and ticks that would have fired while a probe was still outstanding
//! are skipped instead of bursting afterwards.

use std::time::Duration;

use anyhow::Result;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, instrument};

use crate::probe::Prober;
use crate::stats::StatsAggregator;

use super::messages::MonitorCommand;

/// Actor that monitors a single target URL
pub struct TargetMonitorActor {
    /// Target URL to probe
    url: String,

    /// Statistics key derived from the URL (host component)
    domain: String,

    /// Shared prober (reused HTTP client)
    prober: Prober,

    /// Shared per-domain counters
    stats: StatsAggregator,

    /// Command receiver for control messages
    command_rx: mpsc::Receiver<MonitorCommand>,

    /// Time between two probes
    interval_duration: Duration,
}

impl TargetMonitorActor {
    fn new(
        url: String,
        domain: String,
        prober: Prober,
        stats: StatsAggregator,
        command_rx: mpsc::Receiver<MonitorCommand>,
        interval_duration: Duration,
    ) -> Self {
        Self {
            url,
            domain,
            prober,
            stats,
            command_rx,
            interval_duration,
        }
    }

    /// Run the actor's main loop
    ///
    /// Runs until a Shutdown command is received or the command channel is
    /// closed (dropping the handle without calling `shutdown` also ends the
    /// actor). The first tick fires immediately, so a freshly added target
    /// shows up in the stats without waiting a full interval.
    #[instrument(skip(self), fields(url = %self.url))]
    async fn run(mut self) {
        debug!("starting target monitor");

        let mut ticker = interval(self.interval_duration);
        // skip-on-overlap: a probe outlasting the interval must not cause
        // a burst of catch-up probes
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.perform_check().await;
                }

                cmd = self.command_rx.recv() => {
                    match cmd {
                        Some(MonitorCommand::CheckNow { respond_to }) => {
                            debug!("received CheckNow command");
                            self.perform_check().await;
                            let _ = respond_to.send(());
                        }

                        Some(MonitorCommand::Shutdown) => {
                            debug!("received shutdown command");
                            break;
                        }

                        // every handle is gone, nothing can command this
                        // actor anymore
                        None => {
                            debug!("command channel closed, shutting down");
                            break;
                        }
                    }
                }
            }
        }

        debug!("target monitor stopped");
    }

    /// One tick: probe the target and record the result under its domain
    async fn perform_check(&self) {
        let result = self.prober.probe(&self.url).await;
        self.stats.record(&self.domain, &result).await;

        debug!(
            "{} is {:?}, latency: {}",
            self.url,
            result.outcome,
            result
                .latency_ms
                .map_or_else(|| String::from("N/A"), |l| format!("{l}ms")),
        );
    }
}

/// Handle for controlling a TargetMonitorActor
pub struct MonitorHandle {
    sender: mpsc::Sender<MonitorCommand>,
    task: JoinHandle<()>,
    url: String,
}

impl MonitorHandle {
    /// Spawn a new monitor actor for a target
    pub fn spawn(
        url: String,
        domain: String,
        prober: Prober,
        stats: StatsAggregator,
        interval_duration: Duration,
    ) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel(32);

        let actor = TargetMonitorActor::new(
            url.clone(),
            domain,
            prober,
            stats,
            cmd_rx,
            interval_duration,
        );

        let task = tokio::spawn(actor.run());

        Self {
            sender: cmd_tx,
            task,
            url,
        }
    }

    /// Trigger an immediate probe and wait for its result to be recorded
    pub async fn check_now(&self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(MonitorCommand::CheckNow { respond_to: tx })
            .await?;

        rx.await?;
        Ok(())
    }

    /// Shut down the monitor and wait for the actor to exit
    ///
    /// An in-flight probe is allowed to finish and record its result, but
    /// once this returns the actor is gone: no stats write for this target
    /// can happen afterwards.
    pub async fn shutdown(self) {
        let _ = self.sender.send(MonitorCommand::Shutdown).await;
        let _ = self.task.await;
    }

    /// Get the monitored URL
    pub fn url(&self) -> &str {
        &self.url
    }
}
