use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::{Value, json};

use crate::error::PollError;
use crate::middleware::submission::Submission;
use crate::server::router::PollState;
use crate::types::question::{FlagResponse, QuestionView, SubmitResponse, VoteResult};

/// GET /api/questions/random
pub async fn random_question_handler(
    State(state): State<PollState>,
) -> Result<Json<QuestionView>, PollError> {
    Ok(Json(state.service.random_question().await?))
}

/// POST /api/questions/{id}/vote/{option}
pub async fn vote_handler(
    State(state): State<PollState>,
    Path((id, option)): Path<(String, String)>,
) -> Result<Json<VoteResult>, PollError> {
    Ok(Json(state.service.vote(&id, &option).await?))
}

/// POST /api/questions
pub async fn submit_handler(
    State(state): State<PollState>,
    Submission(body): Submission,
) -> Result<(StatusCode, Json<SubmitResponse>), PollError> {
    let created = state.service.submit(&body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// POST /api/questions/{id}/flag
pub async fn flag_handler(
    State(state): State<PollState>,
    Path(id): Path<String>,
) -> Result<Json<FlagResponse>, PollError> {
    Ok(Json(state.service.flag(&id).await?))
}

/// GET /health -> 200 when storage answers, 503 otherwise.
pub async fn health_handler(State(state): State<PollState>) -> Result<Json<Value>, PollError> {
    state.service.health().await?;
    Ok(Json(json!({ "status": "ok" })))
}
