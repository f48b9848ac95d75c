use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header::CONTENT_TYPE},
    routing::{get, post},
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::config::Config;
use crate::handlers::question::{
    flag_handler, health_handler, random_question_handler, submit_handler, vote_handler,
};
use crate::service::PollService;

#[derive(Clone)]
pub struct PollState {
    pub service: PollService,
}

impl PollState {
    pub fn new(service: PollService) -> Self {
        Self { service }
    }
}

pub fn poll_router(state: PollState, cfg: &Config) -> Router {
    Router::new()
        .route("/api/questions", post(submit_handler))
        .route("/api/questions/random", get(random_question_handler))
        .route("/api/questions/{id}/vote/{option}", post(vote_handler))
        .route("/api/questions/{id}/flag", post(flag_handler))
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::max(cfg.body_limit_bytes))
        .layer(cors_layer(&cfg.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    if origins.is_empty() {
        return cors.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            HeaderValue::from_str(origin)
                .inspect_err(|e| warn!(origin = %origin, error = %e, "ignoring invalid CORS origin"))
                .ok()
        })
        .collect();
    cors.allow_origin(AllowOrigin::list(allowed))
}
