use serde::{Deserialize, Serialize};

/// Moderation states of an audience question.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionStatus {
    /// Freshly submitted, awaiting the moderator.
    #[default]
    Pending,
    /// Accepted by the moderator for the panel to answer.
    Approved,
    /// Hidden by the moderator.
    Rejected,
}

