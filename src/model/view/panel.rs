use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{
    api::panel::PanelDescription,
    view::question::{Question, QuestionId},
};

/// A panel as held in the audience view: display metadata plus its questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Panel {
    pub id: String,
    pub title: String,
    pub moderator: String,
    pub panelists: Vec<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    /// Newest first.
    pub questions: Vec<Question>,
}

impl Panel {
    pub fn question(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|question| &question.id == id)
    }

    pub fn question_mut(&mut self, id: &QuestionId) -> Option<&mut Question> {
        self.questions.iter_mut().find(|question| &question.id == id)
    }

    pub fn contains(&self, id: &QuestionId) -> bool {
        self.question(id).is_some()
    }
}

impl From<PanelDescription> for Panel {
    fn from(desc: PanelDescription) -> Self {
        Self {
            id: desc.id,
            title: desc.title,
            moderator: desc.moderator,
            panelists: desc.panelists,
            starts_at: desc.starts_at,
            ends_at: desc.ends_at,
            questions: desc.questions.into_iter().map(Into::into).collect(),
        }
    }
}
