//! Request and response payloads for the management API

use serde::{Deserialize, Serialize, Serializer};

use crate::registry::TargetHealth;

/// Body of add-endpoint / remove-endpoint requests
#[derive(Debug, Deserialize)]
pub struct EndpointRequest {
    pub url: String,
}

/// Generic success response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// One row of the health snapshot
///
/// `avgLatency` is a number once the domain has seen a successful check and
/// the string `"N/A"` before that.
#[derive(Debug, Serialize)]
pub struct HealthEntry {
    pub domain: String,
    pub url: String,
    pub availability: u8,
    #[serde(rename = "avgLatency", serialize_with = "serialize_avg_latency")]
    pub avg_latency_ms: Option<u64>,
}

fn serialize_avg_latency<S>(value: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(latency) => serializer.serialize_u64(*latency),
        None => serializer.serialize_str("N/A"),
    }
}

impl From<TargetHealth> for HealthEntry {
    fn from(health: TargetHealth) -> Self {
        Self {
            domain: health.domain,
            url: health.url,
            availability: health.availability,
            avg_latency_ms: health.avg_latency_ms,
        }
    }
}
