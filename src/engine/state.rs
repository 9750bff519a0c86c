use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::engine::{
    config::VoteRacePolicy,
    error::{Error, Result},
};
use crate::model::view::{Panel, Question, QuestionId};

/// Everything one audience session knows about the panel it is looking at.
///
/// Transitions are plain synchronous methods so they can be exercised without
/// a remote store; [`super::AudienceEngine`] sequences them around the remote calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelState {
    panel: Option<Panel>,
    /// Contents of the question input.
    draft: String,
    submitting: bool,
    /// Number of unsettled vote calls per question. Survives loads, since
    /// the calls themselves do.
    votes_in_flight: HashMap<QuestionId, usize>,
    /// Bumped by every load; tickets from an earlier load never touch the panel.
    generation: u64,
}

/// A submission that passed validation and is awaiting the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionTicket {
    text: String,
    generation: u64,
}

impl SubmissionTicket {
    /// The trimmed question text.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// An optimistic vote that has been applied locally but not yet settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteTicket {
    pre_image: Question,
    adding: bool,
    generation: u64,
}

impl VoteTicket {
    pub fn question_id(&self) -> &QuestionId {
        &self.pre_image.id
    }

    /// Whether this vote adds to the score (rather than taking a vote back).
    pub fn adding(&self) -> bool {
        self.adding
    }

    /// The question exactly as it was before the optimistic change.
    pub fn pre_image(&self) -> &Question {
        &self.pre_image
    }
}

impl PanelState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the panel with a freshly loaded one. Votes are per page load,
    /// so every question starts unvoted.
    ///
    /// Calls still in flight keep their markers, but settling them no longer
    /// changes the loaded panel.
    pub fn load(&mut self, mut panel: Panel) {
        for question in &mut panel.questions {
            question.voted = false;
        }
        self.panel = Some(panel);
        self.generation += 1;
    }

    /// How many times a panel has been loaded.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn panel(&self) -> Option<&Panel> {
        self.panel.as_ref()
    }

    /// The loaded questions, newest first; empty if no panel is loaded.
    pub fn questions(&self) -> &[Question] {
        self.panel
            .as_ref()
            .map(|panel| panel.questions.as_slice())
            .unwrap_or_default()
    }

    pub fn question(&self, id: &QuestionId) -> Option<&Question> {
        self.panel.as_ref()?.question(id)
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, draft: impl Into<String>) {
        self.draft = draft.into();
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn vote_in_flight(&self, id: &QuestionId) -> bool {
        self.votes_in_flight.get(id).copied().unwrap_or(0) > 0
    }

    /// Check a submission and mark it in flight.
    pub fn begin_submission(&mut self, panel_id: &str, raw_text: &str) -> Result<SubmissionTicket> {
        let text = raw_text.trim();
        if text.is_empty() {
            return Err(Error::Validation(
                "Please enter a question before submitting.".to_string(),
            ));
        }
        match &self.panel {
            Some(panel) if panel.id == panel_id => {}
            _ => return Err(Error::State("The panel has not loaded yet.".to_string())),
        }
        if self.submitting {
            return Err(Error::Info(
                "Your question is already being submitted.".to_string(),
            ));
        }
        self.submitting = true;
        Ok(SubmissionTicket {
            text: text.to_string(),
            generation: self.generation,
        })
    }

    /// Clear the in-flight submission marker, whatever the outcome.
    pub fn finish_submission(&mut self) {
        self.submitting = false;
    }

    /// Record a submission the store accepted: prepend it under a freshly
    /// minted ID and clear the input.
    ///
    /// If the panel was reloaded while the submission was in flight, the
    /// question is not added to the new list; the caller gets an
    /// [`Error::Info`] asking for a reload instead.
    pub fn confirm_submission(
        &mut self,
        ticket: SubmissionTicket,
        author: String,
        at: DateTime<Utc>,
    ) -> Result<QuestionId> {
        self.draft.clear();
        if ticket.generation != self.generation {
            return Err(Error::Info(
                "Question submitted! Reload the panel to see it.".to_string(),
            ));
        }
        let panel = self
            .panel
            .as_mut()
            .ok_or_else(|| Error::State("The panel has not loaded yet.".to_string()))?;
        let id = mint_unique_id(panel, at);
        panel
            .questions
            .insert(0, Question::submitted(id.clone(), ticket.text, author, at));
        Ok(id)
    }

    /// Apply a vote toggle optimistically.
    ///
    /// Returns `Ok(None)` if the question is not in the view, in which case
    /// nothing changed.
    pub fn begin_vote(
        &mut self,
        id: &QuestionId,
        policy: VoteRacePolicy,
    ) -> Result<Option<VoteTicket>> {
        if id.is_minted() {
            return Err(Error::Info(
                "You can't vote on this question until it has been confirmed.".to_string(),
            ));
        }
        let in_flight = self.vote_in_flight(id);
        let Some(question) = self.panel.as_mut().and_then(|panel| panel.question_mut(id)) else {
            return Ok(None);
        };
        if in_flight && policy == VoteRacePolicy::Serialize {
            return Err(Error::Info(
                "Your previous vote on this question is still being recorded.".to_string(),
            ));
        }

        let pre_image = question.clone();
        let adding = !question.voted;
        question.cast(adding);
        *self.votes_in_flight.entry(id.clone()).or_default() += 1;

        Ok(Some(VoteTicket {
            pre_image,
            adding,
            generation: self.generation,
        }))
    }

    /// Settle an optimistic vote. Unconfirmed votes restore the pre-image
    /// verbatim, unless the panel has been reloaded since the vote began.
    /// Returns the question as it now stands.
    pub fn settle_vote(&mut self, ticket: &VoteTicket, confirmed: bool) -> Option<Question> {
        let id = ticket.question_id();
        if let Some(count) = self.votes_in_flight.get_mut(id) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.votes_in_flight.remove(id);
            }
        }

        let question = self.panel.as_mut()?.question_mut(id)?;
        if !confirmed && ticket.generation == self.generation {
            *question = ticket.pre_image.clone();
        }
        Some(question.clone())
    }
}

/// `new-<millis>`, or `new-<millis>-<n>` with the smallest free `n` if
/// another question was minted in the same millisecond.
fn mint_unique_id(panel: &Panel, at: DateTime<Utc>) -> QuestionId {
    let stamp = at.timestamp_millis();
    let mut id = QuestionId::minted(at);
    let mut n = 0;
    while panel.contains(&id) {
        n += 1;
        id = QuestionId::Minted(format!("{stamp}-{n}"));
    }
    id
}
