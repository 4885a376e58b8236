//! API shared state

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::registry::TargetRegistry;

/// Shared state passed to all API handlers
///
/// Management calls take the write lock, the read path (health/export) only
/// the read lock. Unrelated monitors never contend here: probes write to the
/// stats aggregator, which has its own lock.
#[derive(Clone)]
pub struct ApiState {
    pub registry: Arc<RwLock<TargetRegistry>>,
}

impl ApiState {
    pub fn new(registry: TargetRegistry) -> Self {
        Self {
            registry: Arc::new(RwLock::new(registry)),
        }
    }
}
