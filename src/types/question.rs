use serde::{Deserialize, Serialize};

use crate::db::DbQuestion;
use crate::service::percentages::percentages;

/// A question as shown to a voter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionView {
    pub id: i64,
    pub option_a: String,
    pub option_b: String,
    pub option_a_votes: u64,
    pub option_b_votes: u64,
    pub option_a_percentage: u8,
    pub option_b_percentage: u8,
}

/// Counters after a successful vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteResult {
    pub id: i64,
    pub option_a_votes: u64,
    pub option_b_votes: u64,
    pub option_a_percentage: u8,
    pub option_b_percentage: u8,
}

/// Body of `POST /api/questions`. Missing fields read as empty text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    #[serde(default)]
    pub option_a: String,
    #[serde(default)]
    pub option_b: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub id: i64,
    pub option_a: String,
    pub option_b: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagResponse {
    pub id: i64,
    pub message: String,
}

/// The store forbids negative counters, so the clamp only guards decoding.
fn votes(raw: i64) -> u64 {
    u64::try_from(raw).unwrap_or(0)
}

impl From<DbQuestion> for QuestionView {
    fn from(q: DbQuestion) -> Self {
        let (a, b) = (votes(q.option_a_votes), votes(q.option_b_votes));
        let (pct_a, pct_b) = percentages(a, b);
        Self {
            id: q.id,
            option_a: q.option_a,
            option_b: q.option_b,
            option_a_votes: a,
            option_b_votes: b,
            option_a_percentage: pct_a,
            option_b_percentage: pct_b,
        }
    }
}

impl From<DbQuestion> for VoteResult {
    fn from(q: DbQuestion) -> Self {
        let (a, b) = (votes(q.option_a_votes), votes(q.option_b_votes));
        let (pct_a, pct_b) = percentages(a, b);
        Self {
            id: q.id,
            option_a_votes: a,
            option_b_votes: b,
            option_a_percentage: pct_a,
            option_b_percentage: pct_b,
        }
    }
}

impl From<DbQuestion> for SubmitResponse {
    fn from(q: DbQuestion) -> Self {
        Self {
            id: q.id,
            option_a: q.option_a,
            option_b: q.option_b,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn row(a: i64, b: i64) -> DbQuestion {
        DbQuestion {
            id: 4,
            option_a: "Cats".into(),
            option_b: "Dogs".into(),
            option_a_votes: a,
            option_b_votes: b,
            is_flagged: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn question_view_uses_camel_case() {
        let view = QuestionView::from(row(1, 3));
        assert_eq!(
            serde_json::to_value(&view).unwrap(),
            json!({
                "id": 4,
                "optionA": "Cats",
                "optionB": "Dogs",
                "optionAVotes": 1,
                "optionBVotes": 3,
                "optionAPercentage": 25,
                "optionBPercentage": 75,
            })
        );
    }

    #[test]
    fn vote_result_carries_no_texts() {
        let value = serde_json::to_value(VoteResult::from(row(1, 0))).unwrap();
        assert!(value.get("optionA").is_none());
        assert_eq!(value["optionAPercentage"], 100);
        assert_eq!(value["optionBPercentage"], 0);
    }

    #[test]
    fn submit_request_defaults_missing_fields() {
        let req: SubmitRequest = serde_json::from_value(json!({ "optionA": "Cats" })).unwrap();
        assert_eq!(req.option_a, "Cats");
        assert_eq!(req.option_b, "");
    }
}
