use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{common::QuestionStatus, db::question::Question};

/// A question as submitted by an audience member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSubmission {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

/// A question as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDescription {
    pub id: String,
    pub text: String,
    pub author: String,
    pub score: i64,
    pub status: QuestionStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Question> for QuestionDescription {
    fn from(question: Question) -> Self {
        Self {
            id: question.id.to_string(),
            text: question.question.text,
            author: question.question.author,
            score: question.question.score,
            status: question.question.status,
            created_at: question.question.created_at,
        }
    }
}

/// A request to add or remove one vote.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRequest {
    /// `true` to add a vote, `false` to take one back.
    pub increment: bool,
}

impl VoteRequest {
    /// The score adjustment this request asks for.
    pub fn delta(&self) -> i64 {
        if self.increment {
            1
        } else {
            -1
        }
    }
}

/// The score of a question after a vote was applied.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteResult {
    pub score: i64,
}
