//! Per-target monitoring actors
//!
//! Every monitored URL gets its own actor: an independent async task that
//! probes the target on a fixed interval and folds the results into the
//! shared [`StatsAggregator`](crate::stats::StatsAggregator).
//!
//! ## Communication Patterns
//!
//! 1. **Commands**: each actor has an mpsc command channel for control messages
//! 2. **Request/Response**: oneshot channels for synchronous probes
//!
//! The [`Scheduler`](crate::scheduler::Scheduler) owns one
//! [`MonitorHandle`](target_monitor::MonitorHandle) per URL and drives the
//! actor lifecycle from registry changes.

pub mod messages;
pub mod target_monitor;
