//! Message types for actor communication

use tokio::sync::oneshot;

/// Commands that can be sent to a TargetMonitorActor
#[derive(Debug)]
pub enum MonitorCommand {
    /// Trigger an immediate probe (bypassing the interval timer)
    ///
    /// Used for testing and manual refresh operations. The response is sent
    /// once the probe has completed and its result has been recorded.
    CheckNow {
        /// Channel to signal completion
        respond_to: oneshot::Sender<()>,
    },

    /// Gracefully shut down the monitor
    ///
    /// The actor finishes any in-flight probe and then exits.
    Shutdown,
}
