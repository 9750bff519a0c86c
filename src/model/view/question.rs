use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{api::question::QuestionDescription, common::QuestionStatus};

/// Prefix marking an ID minted on the client before the server confirmed the record.
pub const MINTED_ID_PREFIX: &str = "new-";

/// Identifier of a question held in view state.
///
/// On the wire both regimes are plain strings; minted IDs are recognised by
/// [`MINTED_ID_PREFIX`].
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuestionId {
    /// Assigned by the server; opaque and stable.
    Confirmed(String),
    /// Minted locally; the suffix after [`MINTED_ID_PREFIX`].
    Minted(String),
}

impl QuestionId {
    /// Mint a local ID from a creation time.
    pub fn minted(at: DateTime<Utc>) -> Self {
        Self::Minted(at.timestamp_millis().to_string())
    }

    /// Whether the server has yet to confirm this ID.
    pub fn is_minted(&self) -> bool {
        matches!(self, Self::Minted(_))
    }
}

impl Display for QuestionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Confirmed(id) => write!(f, "{id}"),
            Self::Minted(suffix) => write!(f, "{MINTED_ID_PREFIX}{suffix}"),
        }
    }
}

impl From<String> for QuestionId {
    fn from(id: String) -> Self {
        match id.strip_prefix(MINTED_ID_PREFIX) {
            Some(suffix) => Self::Minted(suffix.to_string()),
            None => Self::Confirmed(id),
        }
    }
}

impl From<&str> for QuestionId {
    fn from(id: &str) -> Self {
        id.to_string().into()
    }
}

impl From<QuestionId> for String {
    fn from(id: QuestionId) -> Self {
        id.to_string()
    }
}

impl FromStr for QuestionId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.into())
    }
}

/// A question as held in the audience view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    pub author: String,
    pub score: i64,
    pub status: QuestionStatus,
    pub created_at: DateTime<Utc>,
    /// Whether this session has voted on the question. Never persisted.
    #[serde(skip)]
    pub voted: bool,
}

impl Question {
    /// A question this session just submitted, before the server assigned its ID.
    pub fn submitted(id: QuestionId, text: String, author: String, at: DateTime<Utc>) -> Self {
        Self {
            id,
            text,
            author,
            score: 0,
            status: QuestionStatus::Pending,
            created_at: at,
            voted: false,
        }
    }

    /// Apply or take back this session's vote.
    pub(crate) fn cast(&mut self, adding: bool) {
        self.score += if adding { 1 } else { -1 };
        self.voted = adding;
    }
}

impl From<QuestionDescription> for Question {
    fn from(desc: QuestionDescription) -> Self {
        Self {
            id: desc.id.into(),
            text: desc.text,
            author: desc.author,
            score: desc.score,
            status: desc.status,
            created_at: desc.created_at,
            voted: false,
        }
    }
}
