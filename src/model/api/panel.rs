use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{
    api::question::QuestionDescription,
    db::{
        panel::{NewPanel, Panel},
        question::Question,
    },
};

/// A panel as specified by a moderator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelSpec {
    pub title: String,
    pub moderator: String,
    #[serde(default)]
    pub panelists: Vec<String>,
    pub starts_at: DateTime<Utc>,
    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,
}

impl From<PanelSpec> for NewPanel {
    fn from(spec: PanelSpec) -> Self {
        Self {
            title: spec.title,
            moderator: spec.moderator,
            panelists: spec.panelists,
            starts_at: spec.starts_at,
            ends_at: spec.ends_at,
        }
    }
}

/// A panel and its questions as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelDescription {
    pub id: String,
    pub title: String,
    pub moderator: String,
    pub panelists: Vec<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    /// Newest first.
    pub questions: Vec<QuestionDescription>,
}

impl PanelDescription {
    pub fn new(panel: Panel, questions: Vec<Question>) -> Self {
        Self {
            id: panel.id.to_string(),
            title: panel.panel.title,
            moderator: panel.panel.moderator,
            panelists: panel.panel.panelists,
            starts_at: panel.panel.starts_at,
            ends_at: panel.panel.ends_at,
            questions: questions.into_iter().map(Into::into).collect(),
        }
    }
}

/// Example data for tests.
#[cfg(test)]
mod examples {
    use super::*;

    impl PanelSpec {
        pub fn example() -> Self {
            let panel = NewPanel::example();
            Self {
                title: panel.title,
                moderator: panel.moderator,
                panelists: panel.panelists,
                starts_at: panel.starts_at,
                ends_at: panel.ends_at,
            }
        }
    }
}
