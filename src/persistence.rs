//! Durable copy of the monitored target list
//!
//! The in-memory registry is authoritative while the process runs; the store
//! only exists so the target list survives restarts. Reads and writes are
//! best-effort: the caller logs failures and carries on.

use std::fmt;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while loading or saving the target list
#[derive(Debug)]
pub enum StoreError {
    /// File access failed
    Io(std::io::Error),

    /// The stored list could not be (de)serialized
    Serialization(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(err) => write!(f, "I/O error: {}", err),
            StoreError::Serialization(msg) => {
                write!(f, "target list serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Storage abstraction for the ordered target list
#[async_trait]
pub trait TargetStore: Send + Sync {
    /// Load the persisted target list; an absent store yields an empty list
    async fn load(&self) -> StoreResult<Vec<String>>;

    /// Replace the persisted target list
    async fn save(&self, urls: &[String]) -> StoreResult<()>;
}

/// JSON file store
///
/// The file holds a plain JSON array of URL strings, written in full after
/// every change.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl TargetStore for JsonFileStore {
    async fn load(&self) -> StoreResult<Vec<String>> {
        if !self.path.exists() {
            debug!("{} does not exist, starting empty", self.path.display());
            return Ok(vec![]);
        }

        let content = tokio::fs::read_to_string(&self.path).await?;
        let urls = serde_json::from_str(&content)?;
        Ok(urls)
    }

    async fn save(&self, urls: &[String]) -> StoreResult<()> {
        let content = serde_json::to_string_pretty(urls)?;
        tokio::fs::write(&self.path, content).await?;
        debug!("persisted {} targets to {}", urls.len(), self.path.display());
        Ok(())
    }
}

/// Store that persists nothing
///
/// Used in tests and when running without durability.
pub struct NullStore;

#[async_trait]
impl TargetStore for NullStore {
    async fn load(&self) -> StoreResult<Vec<String>> {
        Ok(vec![])
    }

    async fn save(&self, _urls: &[String]) -> StoreResult<()> {
        Ok(())
    }
}
