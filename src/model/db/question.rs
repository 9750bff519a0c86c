use std::ops::{Deref, DerefMut};

use chrono::{DateTime, Utc};
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use serde::{Deserialize, Serialize};

use crate::model::{common::QuestionStatus, mongodb::Id};

/// Core audience question data, as stored in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionCore {
    /// The panel this question was asked in.
    pub panel_id: Id,
    pub text: String,
    pub author: String,
    /// Net audience votes.
    pub score: i64,
    pub status: QuestionStatus,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl QuestionCore {
    /// A freshly submitted question: unscored and awaiting moderation.
    pub fn new(panel_id: Id, text: String, author: String) -> Self {
        Self {
            panel_id,
            text,
            author,
            score: 0,
            status: QuestionStatus::Pending,
            created_at: Utc::now(),
        }
    }
}

/// A question without an ID.
pub type NewQuestion = QuestionCore;

/// A question from the database, with its unique ID.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "_id")]
    pub id: Id,
    #[serde(flatten)]
    pub question: QuestionCore,
}

impl Deref for Question {
    type Target = QuestionCore;

    fn deref(&self) -> &Self::Target {
        &self.question
    }
}

impl DerefMut for Question {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.question
    }
}
