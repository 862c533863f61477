use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("slack webhook request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("slack returned status {status}")]
    Status { status: u16 },
}

/// Posts caller-supplied summary strings to a Slack incoming webhook.
///
/// The webhook URL and timeout are injected at construction. Message
/// formatting is the caller's concern; this type only transports the string.
pub struct SlackNotifier {
    webhook_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct SlackMessage<'a> {
    text: &'a str,
    mrkdwn: bool,
}

impl SlackNotifier {
    pub fn new(webhook_url: String, timeout: Duration) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            webhook_url,
            client,
        })
    }

    /// Sends one message, at most once. Transport errors and non-success
    /// statuses are surfaced to the caller; there is no internal retry.
    pub async fn send(&self, message: &str) -> Result<(), NotifyError> {
        let payload = SlackMessage {
            text: message,
            mrkdwn: true,
        };

        let response = self
            .client
            .post(&self.webhook_url)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            debug!("slack notification sent");
            Ok(())
        } else {
            warn!(status = %status, "slack webhook request failed");
            Err(NotifyError::Status {
                status: status.as_u16(),
            })
        }
    }
}
