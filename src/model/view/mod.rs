//! Audience view state: what a single browser session sees and mutates.

mod panel;
mod question;

pub use panel::Panel;
pub use question::{Question, QuestionId, MINTED_ID_PREFIX};
