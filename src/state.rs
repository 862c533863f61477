use std::sync::Arc;

use crate::store::EventLog;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<EventLog>,
    pub webhook_secret: Option<String>,
}
