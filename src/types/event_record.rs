use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One received webhook delivery, as persisted in the event log.
///
/// The wire format is fixed: `{"type": ..., "received_at": ..., "payload": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(rename = "type")]
    pub event_type: String,
    /// Capture time (RFC 3339, UTC), not the provider's own timestamp.
    pub received_at: String,
    /// Raw provider payload, not validated beyond being well-formed JSON.
    pub payload: Value,
}
