use reqwest::{Client, StatusCode, Url};

use crate::engine::{PanelSource, RemoteError, RemoteStore};
use crate::model::{
    api::{
        panel::PanelDescription,
        question::{QuestionSubmission, VoteRequest},
    },
    view::{Panel, QuestionId},
};

/// Talks to a PanelPulse audience API over HTTP.
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: Client,
    base_url: String,
}

impl HttpStore {
    /// A store for the API rooted at `base_url`, e.g. `http://127.0.0.1:8000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The API URL for the given path segments, each percent-encoded so that
    /// IDs can never change which route is requested.
    fn url(&self, segments: &[&str]) -> Result<Url, RemoteError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            RemoteError::Unexpected(format!("invalid server URL '{}': {e}", self.base_url))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                RemoteError::Unexpected(format!("'{}' cannot be a base URL", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[rocket::async_trait]
impl PanelSource for HttpStore {
    async fn load_panel(&self, panel_id: &str) -> Result<Panel, RemoteError> {
        let response = self
            .client
            .get(self.url(&["panels", panel_id])?)
            .send()
            .await?;
        match response.status() {
            StatusCode::OK => Ok(response.json::<PanelDescription>().await?.into()),
            status => Err(RemoteError::Unexpected(format!(
                "loading panel {panel_id} returned {status}"
            ))),
        }
    }
}

#[rocket::async_trait]
impl RemoteStore for HttpStore {
    async fn submit_question(
        &self,
        panel_id: &str,
        text: &str,
        author: &str,
    ) -> Result<bool, RemoteError> {
        let submission = QuestionSubmission {
            text: text.to_string(),
            author: Some(author.to_string()),
        };
        let response = self
            .client
            .post(self.url(&["panels", panel_id, "questions"])?)
            .json(&submission)
            .send()
            .await?;
        if !response.status().is_success() {
            debug!("Question submission returned {}", response.status());
        }
        Ok(response.status().is_success())
    }

    async fn set_vote(&self, question_id: &QuestionId, increment: bool) -> Result<bool, RemoteError> {
        let question_id = question_id.to_string();
        let response = self
            .client
            .post(self.url(&["questions", &question_id, "vote"])?)
            .json(&VoteRequest { increment })
            .send()
            .await?;
        if !response.status().is_success() {
            debug!("Vote on question {question_id} returned {}", response.status());
        }
        Ok(response.status().is_success())
    }
}
