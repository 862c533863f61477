use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, header},
};
use chrono::Utc;
use tracing::{info, warn};

use crate::{
    error::ApiError,
    signature,
    state::AppState,
    types::{DeliveryAck, EventRecord},
};

const EVENT_TYPE_HEADER: &str = "x-github-event";
const SIGNATURE_HEADER: &str = "x-hub-signature-256";

/// Accepts one provider delivery: gate on content type, verify the
/// signature when a secret is configured, parse, append, acknowledge.
///
/// The acknowledgement is sent only after the record is durably appended;
/// on any failure the provider's own retry policy is the recovery path.
pub async fn delivery_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<DeliveryAck>, ApiError> {
    require_json_content_type(&headers)?;

    if let Some(secret) = &state.webhook_secret {
        let provided = headers
            .get(SIGNATURE_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        if !signature::verify_signature(secret, &body, provided) {
            warn!("rejected delivery with missing or invalid signature");
            return Err(ApiError::Unauthorized(
                "missing or invalid webhook signature".to_string(),
            ));
        }
    }

    let payload: serde_json::Value = serde_json::from_slice(&body)
        .map_err(|err| ApiError::BadRequest(format!("malformed payload: {err}")))?;

    let event_type = headers
        .get(EVENT_TYPE_HEADER)
        .and_then(|v| v.to_str().ok())
        .or_else(|| payload.get("type").and_then(|v| v.as_str()))
        .unwrap_or("unknown")
        .to_string();

    let record = EventRecord {
        event_type,
        received_at: Utc::now().to_rfc3339(),
        payload,
    };

    state.store.append(&record).await?;

    info!(event_type = %record.event_type, "delivery recorded");

    Ok(Json(DeliveryAck::received()))
}

fn require_json_content_type(headers: &HeaderMap) -> Result<(), ApiError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    let essence = content_type.split(';').next().unwrap_or("").trim();

    if essence.eq_ignore_ascii_case("application/json") {
        Ok(())
    } else {
        Err(ApiError::UnsupportedMediaType(format!(
            "expected application/json, got {content_type:?}"
        )))
    }
}
