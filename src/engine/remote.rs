use std::time::Duration;

use thiserror::Error;

use crate::model::view::{Panel, QuestionId};

/// Ways a call to the [`RemoteStore`] can fail.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The store answered, but did not accept the write.
    #[error("the store declined the request")]
    Declined,
    /// No answer arrived within the configured bound.
    #[error("no answer from the store within {0:?}")]
    Timeout(Duration),
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    /// Any other failure inside the store.
    #[error("{0}")]
    Unexpected(String),
}

/// The backend holding the authoritative panel data.
///
/// Both operations report whether the write was accepted; neither returns the
/// resulting record, so callers keep their own local representation.
#[rocket::async_trait]
pub trait RemoteStore: Send + Sync {
    /// Persist a new question for the given panel.
    async fn submit_question(
        &self,
        panel_id: &str,
        text: &str,
        author: &str,
    ) -> Result<bool, RemoteError>;

    /// Add (`increment`) or take back one vote on the given question.
    async fn set_vote(&self, question_id: &QuestionId, increment: bool)
        -> Result<bool, RemoteError>;
}

/// Where the audience view loads its panel from.
#[rocket::async_trait]
pub trait PanelSource: Send + Sync {
    /// Fetch a panel and its questions, newest first.
    async fn load_panel(&self, panel_id: &str) -> Result<Panel, RemoteError>;
}
