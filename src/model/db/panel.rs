use std::ops::{Deref, DerefMut};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::mongodb::Id;

/// Core panel data, as stored in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelCore {
    /// Panel title shown to the audience.
    pub title: String,
    /// Name of the moderator running the panel.
    pub moderator: String,
    /// Names of the invited panelists, in speaking order.
    pub panelists: Vec<String>,
    /// Scheduled start.
    pub starts_at: DateTime<Utc>,
    /// Scheduled end, if one was set.
    pub ends_at: Option<DateTime<Utc>>,
}

/// A panel without an ID.
pub type NewPanel = PanelCore;

/// A panel from the database, with its unique ID.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Panel {
    #[serde(rename = "_id")]
    pub id: Id,
    #[serde(flatten)]
    pub panel: PanelCore,
}

impl Deref for Panel {
    type Target = PanelCore;

    fn deref(&self) -> &Self::Target {
        &self.panel
    }
}

impl DerefMut for Panel {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.panel
    }
}
