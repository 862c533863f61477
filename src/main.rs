use std::net::SocketAddr;
use std::sync::Arc;

use bridge::{config::Config, handlers, state::AppState, store::EventLog};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = Config::from_env();
    info!(
        bind_addr = %config.bind_addr,
        events_file = %config.events_file.display(),
        signature_verification = config.webhook_secret.is_some(),
        "configuration loaded"
    );

    let store = Arc::new(EventLog::open(config.events_file.clone()).await?);
    let state = AppState {
        store,
        webhook_secret: config.webhook_secret.clone(),
    };

    let app = handlers::router(state);

    let addr: SocketAddr = config.bind_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "listening for webhook deliveries");
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,bridge=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
