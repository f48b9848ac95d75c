use async_trait::async_trait;

use crate::db::DbQuestion;
use crate::error::PollError;
use crate::service::validation::{NewQuestion, QuestionId, VoteOption};

/// Storage seam for question records.
///
/// Every write is a single conditional statement in the store. A missing row and a
/// flagged row are both reported as `PollError::NotFound`.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Uniformly random pick among unflagged questions.
    async fn pick_random_unflagged(&self) -> Result<DbQuestion, PollError>;

    /// Add one vote to `option` unless the question is flagged. Returns the updated row.
    async fn increment_vote(
        &self,
        id: QuestionId,
        option: VoteOption,
    ) -> Result<DbQuestion, PollError>;

    async fn insert(&self, question: &NewQuestion) -> Result<DbQuestion, PollError>;

    /// Unflagged -> flagged. A second call for the same id yields `NotFound`.
    async fn flag(&self, id: QuestionId) -> Result<QuestionId, PollError>;

    /// Cheap round-trip used by the health check.
    async fn ping(&self) -> Result<(), PollError>;
}
