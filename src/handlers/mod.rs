pub mod delivery;

use axum::{Router, routing::post};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/webhook/github", post(delivery::delivery_handler))
        .with_state(state)
}
