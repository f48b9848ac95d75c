use axum::{
    Json,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::error::PollError;
use crate::types::question::SubmitRequest;

/// JSON body of a question submission.
///
/// Oversized bodies keep axum's 413; every other rejection becomes a
/// `MALFORMED_BODY` error in the service's error envelope.
pub struct Submission(pub SubmitRequest);

impl<S> FromRequest<S> for Submission
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<SubmitRequest>::from_request(req, state).await {
            Ok(Json(body)) => Ok(Submission(body)),
            Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                Err(rejection.into_response())
            }
            Err(rejection) => Err(PollError::MalformedBody(rejection.body_text()).into_response()),
        }
    }
}
