use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

use crate::db::schema::DISTINCT_OPTIONS_CONSTRAINT;

// SQLite primary result codes that mean "try again later".
const SQLITE_BUSY: i32 = 5;
const SQLITE_LOCKED: i32 = 6;

#[derive(Debug, ThisError)]
pub enum PollError {
    #[error("question id must be a positive integer")]
    InvalidId,

    #[error("vote option must be A or B")]
    InvalidOption,

    #[error("option text must be non-empty and at most 500 characters")]
    InvalidOptionText,

    #[error("request body is not valid JSON: {0}")]
    MalformedBody(String),

    #[error("both options are the same")]
    DuplicateOptions,

    #[error("question not found")]
    NotFound,

    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[source] SqlxError),

    #[error("storage failure: {0}")]
    StorageFailure(#[source] SqlxError),
}

/// Coarse error categories exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    DuplicateOptions,
    StorageUnavailable,
    StorageFailure,
}

impl PollError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PollError::InvalidId
            | PollError::InvalidOption
            | PollError::InvalidOptionText
            | PollError::MalformedBody(_) => ErrorKind::InvalidInput,
            PollError::NotFound => ErrorKind::NotFound,
            PollError::DuplicateOptions => ErrorKind::DuplicateOptions,
            PollError::StorageUnavailable(_) => ErrorKind::StorageUnavailable,
            PollError::StorageFailure(_) => ErrorKind::StorageFailure,
        }
    }
}

impl From<SqlxError> for PollError {
    fn from(e: SqlxError) -> Self {
        if let SqlxError::Database(db) = &e
            && db.message().contains(DISTINCT_OPTIONS_CONSTRAINT)
        {
            return PollError::DuplicateOptions;
        }
        if is_unavailable(&e) {
            PollError::StorageUnavailable(e)
        } else {
            PollError::StorageFailure(e)
        }
    }
}

fn is_unavailable(e: &SqlxError) -> bool {
    match e {
        SqlxError::PoolTimedOut
        | SqlxError::PoolClosed
        | SqlxError::Io(_)
        | SqlxError::Tls(_)
        | SqlxError::WorkerCrashed => true,
        SqlxError::Database(db) => is_busy_code(db.code().as_deref()),
        _ => false,
    }
}

/// Extended SQLite codes carry the primary code in the low byte.
fn is_busy_code(code: Option<&str>) -> bool {
    code.and_then(|c| c.parse::<i32>().ok())
        .map(|c| matches!(c & 0xff, SQLITE_BUSY | SQLITE_LOCKED))
        .unwrap_or(false)
}

impl IntoResponse for PollError {
    fn into_response(self) -> axum::response::Response {
        let (status, code, message) = match &self {
            PollError::InvalidId => (
                StatusCode::BAD_REQUEST,
                "INVALID_ID",
                "Question id must be a positive integer.",
            ),
            PollError::InvalidOption => (
                StatusCode::BAD_REQUEST,
                "INVALID_OPTION",
                "Vote option must be A or B.",
            ),
            PollError::InvalidOptionText => (
                StatusCode::BAD_REQUEST,
                "INVALID_OPTION_TEXT",
                "Both options are required and must be at most 500 characters.",
            ),
            PollError::MalformedBody(_) => (
                StatusCode::BAD_REQUEST,
                "MALFORMED_BODY",
                "Request body must be a JSON object.",
            ),
            PollError::DuplicateOptions => (
                StatusCode::BAD_REQUEST,
                "DUPLICATE_OPTIONS",
                "Both options cannot be the same.",
            ),
            PollError::NotFound => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "Question not found.",
            ),
            PollError::StorageUnavailable(e) => {
                error!(error = %e, "storage unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "STORAGE_UNAVAILABLE",
                    "The service is temporarily unavailable.",
                )
            }
            PollError::StorageFailure(e) => {
                error!(error = %e, "storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred.",
                )
            }
        };
        let body = ApiErrorBody {
            code: code.to_string(),
            message: message.to_string(),
        };
        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
