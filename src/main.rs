use std::sync::Arc;

use backon::{ExponentialBuilder, Retryable};
use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use wyr_backend::db::{self, SqliteQuestionStore};
use wyr_backend::server::router::{PollState, poll_router};
use wyr_backend::{Config, ErrorKind, PollError, PollService};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.database_url,
        listen_addr = %cfg.listen_addr,
        loglevel = %cfg.loglevel,
        max_connections = cfg.max_connections
    );

    let retry_policy = ExponentialBuilder::default()
        .with_max_times(cfg.connect_retries)
        .with_jitter();
    let pool = (|| db::connect(&cfg))
        .retry(retry_policy)
        .when(|e: &PollError| e.kind() == ErrorKind::StorageUnavailable)
        .notify(|e: &PollError, dur| {
            warn!(error = %e, retry_in = ?dur, "database not reachable, retrying");
        })
        .await?;

    let store = SqliteQuestionStore::new(pool);
    store.init_schema().await?;
    info!("question schema ready");

    let service = PollService::new(Arc::new(store.clone()));
    let app = poll_router(PollState::new(service), &cfg);

    let listener = TcpListener::bind(cfg.listen_addr.as_str()).await?;
    info!("HTTP server listening on {}", cfg.listen_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(wyr_backend::server::shutdown_signal())
        .await?;

    store.pool().close().await;
    info!("Server shut down");
    Ok(())
}
