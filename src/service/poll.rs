use std::sync::Arc;

use tracing::{debug, info};

use crate::error::PollError;
use crate::service::repository::QuestionRepository;
use crate::service::validation::{NewQuestion, QuestionId, VoteOption};
use crate::types::question::{
    FlagResponse, QuestionView, SubmitRequest, SubmitResponse, VoteResult,
};

/// The four poll operations. Raw inputs are validated here before the repository
/// is called, so a rejected request never touches storage.
#[derive(Clone)]
pub struct PollService {
    repo: Arc<dyn QuestionRepository>,
}

impl PollService {
    pub fn new(repo: Arc<dyn QuestionRepository>) -> Self {
        Self { repo }
    }

    pub async fn random_question(&self) -> Result<QuestionView, PollError> {
        let row = self.repo.pick_random_unflagged().await?;
        debug!(question_id = row.id, "random question served");
        Ok(row.into())
    }

    pub async fn vote(&self, raw_id: &str, raw_option: &str) -> Result<VoteResult, PollError> {
        let id: QuestionId = raw_id.parse()?;
        let option: VoteOption = raw_option.parse()?;
        let row = self.repo.increment_vote(id, option).await?;
        Ok(row.into())
    }

    pub async fn submit(&self, req: &SubmitRequest) -> Result<SubmitResponse, PollError> {
        let question = NewQuestion::parse(&req.option_a, &req.option_b)?;
        let row = self.repo.insert(&question).await?;
        info!(question_id = row.id, "question created");
        Ok(row.into())
    }

    pub async fn flag(&self, raw_id: &str) -> Result<FlagResponse, PollError> {
        let id: QuestionId = raw_id.parse()?;
        let flagged = self.repo.flag(id).await?;
        info!(question_id = %flagged, "question flagged");
        Ok(FlagResponse {
            id: flagged.get(),
            message: "Question flagged".to_string(),
        })
    }

    pub async fn health(&self) -> Result<(), PollError> {
        self.repo.ping().await
    }
}
