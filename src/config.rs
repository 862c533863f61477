use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub events_file: PathBuf,
    pub webhook_secret: Option<String>,
    pub slack_webhook_url: Option<String>,
    pub slack_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(value) = std::env::var("BRIDGE_BIND_ADDR")
            && !value.trim().is_empty()
        {
            config.bind_addr = value;
        }
        if let Ok(value) = std::env::var("BRIDGE_EVENTS_FILE")
            && !value.trim().is_empty()
        {
            config.events_file = PathBuf::from(value);
        }
        if let Ok(value) = std::env::var("GITHUB_WEBHOOK_SECRET")
            && !value.is_empty()
        {
            config.webhook_secret = Some(value);
        }
        if let Ok(value) = std::env::var("SLACK_WEBHOOK_URL")
            && !value.trim().is_empty()
        {
            config.slack_webhook_url = Some(value);
        }
        if let Ok(value) = std::env::var("BRIDGE_SLACK_TIMEOUT_MS")
            && let Ok(parsed) = value.parse::<u64>()
        {
            config.slack_timeout = Duration::from_millis(parsed.max(1));
        }

        config
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            events_file: PathBuf::from("data/github_events.jsonl"),
            webhook_secret: None,
            slack_webhook_url: None,
            slack_timeout: Duration::from_millis(2_000),
        }
    }
}
