//! The optimistic interaction engine behind the public audience view.
//!
//! Audience actions are applied to local state straight away and reconciled
//! with the [`RemoteStore`] afterwards: a vote that the store does not accept
//! is rolled back to its exact pre-image, and a submission only appears once
//! the store has accepted it. Every action leaves one [`Notice`] behind.

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use rocket::tokio::time::timeout;

use crate::model::{
    common::author_or,
    view::{Panel, Question, QuestionId},
};

pub mod config;
pub mod error;
pub mod notice;
pub mod remote;
pub mod state;

pub use config::{EngineConfig, VoteRacePolicy};
pub use error::{Error, Result};
pub use notice::{Notice, NoticeLevel};
pub use remote::{PanelSource, RemoteError, RemoteStore};
pub use state::{PanelState, SubmissionTicket, VoteTicket};

/// Drives audience actions for one panel view against a [`RemoteStore`].
///
/// The state lock is never held across a remote call, so concurrent actions
/// interleave only at those suspension points.
pub struct AudienceEngine<S> {
    store: S,
    config: EngineConfig,
    state: Mutex<PanelState>,
    notices: Mutex<Vec<Notice>>,
}

impl<S> AudienceEngine<S>
where
    S: RemoteStore,
{
    pub fn new(store: S, config: EngineConfig) -> Self {
        Self {
            store,
            config,
            state: Mutex::new(PanelState::new()),
            notices: Mutex::new(Vec::new()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Show a freshly loaded panel.
    pub fn load(&self, panel: Panel) {
        info!(
            "Loaded panel {} with {} question(s)",
            panel.id,
            panel.questions.len()
        );
        lock(&self.state).load(panel);
    }

    /// A copy of the current view state.
    pub fn snapshot(&self) -> PanelState {
        lock(&self.state).clone()
    }

    pub fn questions(&self) -> Vec<Question> {
        lock(&self.state).questions().to_vec()
    }

    pub fn question(&self, id: &QuestionId) -> Option<Question> {
        lock(&self.state).question(id).cloned()
    }

    pub fn set_draft(&self, draft: impl Into<String>) {
        lock(&self.state).set_draft(draft);
    }

    /// Drain the notices raised since the last call, oldest first.
    pub fn take_notices(&self) -> Vec<Notice> {
        std::mem::take(&mut *lock(&self.notices))
    }

    /// Submit a question to the loaded panel.
    ///
    /// The question only enters the list once the store accepts it, under a
    /// locally minted ID that cannot be voted on until the panel is reloaded.
    pub async fn submit(
        &self,
        panel_id: &str,
        raw_text: &str,
        author: Option<&str>,
    ) -> Result<QuestionId> {
        let result = self.try_submit(panel_id, raw_text, author).await;
        self.report(result, |_| Some(Notice::success("Question submitted!")))
    }

    async fn try_submit(
        &self,
        panel_id: &str,
        raw_text: &str,
        author: Option<&str>,
    ) -> Result<QuestionId> {
        let ticket = lock(&self.state).begin_submission(panel_id, raw_text)?;
        let _submitting = SubmissionGuard(&self.state);
        let author = author_or(author, self.config.anonymous_author()).to_string();

        debug!("Submitting question to panel {panel_id}");
        self.bounded(self.store.submit_question(panel_id, ticket.text(), &author))
            .await
            .map_err(|source| {
                warn!("Question submission to panel {panel_id} failed: {source}");
                Error::Remote {
                    action: "submit your question",
                    source,
                }
            })?;

        let id = lock(&self.state).confirm_submission(ticket, author, Utc::now())?;
        Ok(id)
    }

    /// Toggle this session's vote on a question.
    ///
    /// Returns the question as it stands once the vote has settled, or `None`
    /// if the question is not in the view.
    pub async fn toggle_vote(&self, question_id: &QuestionId) -> Result<Option<Question>> {
        let result = self.try_toggle_vote(question_id).await;
        self.report(result, |question| {
            question.as_ref().map(|question| {
                if question.voted {
                    Notice::success("Vote recorded.")
                } else {
                    Notice::success("Vote removed.")
                }
            })
        })
    }

    async fn try_toggle_vote(&self, id: &QuestionId) -> Result<Option<Question>> {
        let begun = lock(&self.state).begin_vote(id, self.config.race_policy())?;
        let Some(ticket) = begun else {
            debug!("Ignoring vote on question {id}, which is not in the view");
            return Ok(None);
        };
        let adding = ticket.adding();
        let vote = PendingVote::new(&self.state, ticket);

        debug!("Sending vote on question {id} (adding: {adding})");
        match self.bounded(self.store.set_vote(id, adding)).await {
            Ok(()) => Ok(vote.confirm()),
            Err(source) => {
                warn!("Vote on question {id} failed, rolling back: {source}");
                vote.roll_back();
                Err(Error::Remote {
                    action: "record your vote",
                    source,
                })
            }
        }
    }

    /// Await a remote call for at most the configured timeout, treating a
    /// declined write as a failure.
    async fn bounded<F>(&self, call: F) -> std::result::Result<(), RemoteError>
    where
        F: Future<Output = std::result::Result<bool, RemoteError>>,
    {
        let limit = self.config.remote_timeout();
        match timeout(limit, call).await {
            Ok(Ok(true)) => Ok(()),
            Ok(Ok(false)) => Err(RemoteError::Declined),
            Ok(Err(err)) => Err(err),
            Err(_) => Err(RemoteError::Timeout(limit)),
        }
    }

    /// Queue the notice for an outcome and hand the outcome back.
    fn report<T>(
        &self,
        result: Result<T>,
        on_success: impl FnOnce(&T) -> Option<Notice>,
    ) -> Result<T> {
        let notice = match &result {
            Ok(value) => on_success(value),
            Err(err) => Some(err.notice()),
        };
        if let Some(notice) = notice {
            lock(&self.notices).push(notice);
        }
        result
    }
}

impl<S> AudienceEngine<S>
where
    S: RemoteStore + PanelSource,
{
    /// Fetch the panel from the store and show it, discarding all local state
    /// about its questions. This is the only way changes made by other
    /// audience members, or server IDs for our own submissions, become visible.
    ///
    /// Votes and submissions still in flight settle without touching the
    /// reloaded panel.
    pub async fn reload(&self, panel_id: &str) -> Result<()> {
        let limit = self.config.remote_timeout();
        let fetched = match timeout(limit, self.store.load_panel(panel_id)).await {
            Ok(fetched) => fetched,
            Err(_) => Err(RemoteError::Timeout(limit)),
        };
        let result = fetched
            .map(|panel| self.load(panel))
            .map_err(|source| {
                warn!("Loading panel {panel_id} failed: {source}");
                Error::Remote {
                    action: "load the panel",
                    source,
                }
            });
        self.report(result, |_| None)
    }
}

/// Lock view state, ignoring poisoning: every transition leaves the state consistent.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Clears the submitting flag when the submission ends, however it ends.
struct SubmissionGuard<'a>(&'a Mutex<PanelState>);

impl Drop for SubmissionGuard<'_> {
    fn drop(&mut self) {
        lock(self.0).finish_submission();
    }
}

/// An optimistic vote awaiting the store. Dropping it unsettled (including
/// when the surrounding future is cancelled) rolls the vote back.
struct PendingVote<'a> {
    state: &'a Mutex<PanelState>,
    ticket: Option<VoteTicket>,
}

impl<'a> PendingVote<'a> {
    fn new(state: &'a Mutex<PanelState>, ticket: VoteTicket) -> Self {
        Self {
            state,
            ticket: Some(ticket),
        }
    }

    fn confirm(mut self) -> Option<Question> {
        self.settle(true)
    }

    fn roll_back(mut self) {
        self.settle(false);
    }

    fn settle(&mut self, confirmed: bool) -> Option<Question> {
        let ticket = self.ticket.take()?;
        lock(self.state).settle_vote(&ticket, confirmed)
    }
}

impl Drop for PendingVote<'_> {
    fn drop(&mut self) {
        if let Some(ticket) = &self.ticket {
            warn!(
                "Vote on question {} abandoned before settling, rolling back",
                ticket.question_id()
            );
            self.settle(false);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::time::Duration;

    use rocket::tokio::{self, time::sleep};

    use super::*;

    /// How the scripted store answers its next call.
    #[derive(Debug, Clone, Copy)]
    enum Reply {
        Accept,
        Decline,
        Fail,
        Hang,
        After(Duration, bool),
    }

    /// A store that records every call and answers from a script, accepting
    /// once the script runs out.
    #[derive(Default)]
    struct ScriptedStore {
        replies: Mutex<VecDeque<Reply>>,
        submissions: Mutex<Vec<(String, String, String)>>,
        votes: Mutex<Vec<(QuestionId, bool)>>,
        served: Mutex<Option<Panel>>,
    }

    impl ScriptedStore {
        fn replying(replies: impl IntoIterator<Item = Reply>) -> Self {
            Self {
                replies: Mutex::new(replies.into_iter().collect()),
                ..Self::default()
            }
        }

        fn script(&self, replies: impl IntoIterator<Item = Reply>) {
            lock(&self.replies).extend(replies);
        }

        /// Serve this panel to every load from now on.
        fn serve(&self, panel: Panel) {
            *lock(&self.served) = Some(panel);
        }

        fn submissions(&self) -> Vec<(String, String, String)> {
            lock(&self.submissions).clone()
        }

        fn votes(&self) -> Vec<(QuestionId, bool)> {
            lock(&self.votes).clone()
        }

        async fn answer(&self) -> std::result::Result<bool, RemoteError> {
            let reply = lock(&self.replies).pop_front().unwrap_or(Reply::Accept);
            match reply {
                Reply::Accept => Ok(true),
                Reply::Decline => Ok(false),
                Reply::Fail => Err(RemoteError::Unexpected("connection reset".to_string())),
                Reply::Hang => std::future::pending().await,
                Reply::After(delay, accepted) => {
                    sleep(delay).await;
                    Ok(accepted)
                }
            }
        }
    }

    #[rocket::async_trait]
    impl RemoteStore for ScriptedStore {
        async fn submit_question(
            &self,
            panel_id: &str,
            text: &str,
            author: &str,
        ) -> std::result::Result<bool, RemoteError> {
            lock(&self.submissions).push((
                panel_id.to_string(),
                text.to_string(),
                author.to_string(),
            ));
            self.answer().await
        }

        async fn set_vote(
            &self,
            question_id: &QuestionId,
            increment: bool,
        ) -> std::result::Result<bool, RemoteError> {
            lock(&self.votes).push((question_id.clone(), increment));
            self.answer().await
        }
    }

    #[rocket::async_trait]
    impl PanelSource for ScriptedStore {
        async fn load_panel(&self, panel_id: &str) -> std::result::Result<Panel, RemoteError> {
            if !self.answer().await? {
                return Err(RemoteError::Unexpected(format!("no panel {panel_id}")));
            }
            lock(&self.served)
                .clone()
                .ok_or_else(|| RemoteError::Unexpected(format!("no panel {panel_id}")))
        }
    }

    fn engine_with(
        store: ScriptedStore,
        config: EngineConfig,
        questions: Vec<Question>,
    ) -> AudienceEngine<ScriptedStore> {
        log4rs_test_utils::test_logging::init_logging_once_for(["panelpulse"], None, None);
        let engine = AudienceEngine::new(store, config);
        engine.load(Panel::example(questions));
        engine
    }

    fn engine(store: ScriptedStore, questions: Vec<Question>) -> AudienceEngine<ScriptedStore> {
        engine_with(store, EngineConfig::default(), questions)
    }

    fn vote_state(engine: &AudienceEngine<ScriptedStore>, id: &str) -> (i64, bool) {
        let question = engine.question(&id.into()).unwrap();
        (question.score, question.voted)
    }

    #[rocket::async_test]
    async fn blank_submissions_never_reach_the_store() {
        let engine = engine(ScriptedStore::default(), vec![Question::example("1", 3)]);
        let before = engine.snapshot();

        for text in ["", " ", "\t\n", "   \r\n  "] {
            let result = engine.submit("panel-1", text, Some("Alice")).await;
            assert!(matches!(result, Err(Error::Validation(_))));
        }

        assert!(engine.store().submissions().is_empty());
        assert_eq!(engine.snapshot(), before);
        let notices = engine.take_notices();
        assert_eq!(notices.len(), 4);
        assert!(notices.iter().all(|n| n.level == NoticeLevel::Error));
    }

    #[rocket::async_test]
    async fn submitting_without_a_panel_is_a_state_error() {
        log4rs_test_utils::test_logging::init_logging_once_for(["panelpulse"], None, None);
        let engine = AudienceEngine::new(ScriptedStore::default(), EngineConfig::default());

        let result = engine.submit("panel-1", "Anyone there?", None).await;

        assert!(matches!(result, Err(Error::State(_))));
        assert!(engine.store().submissions().is_empty());
        assert!(engine.questions().is_empty());
    }

    #[rocket::async_test]
    async fn accepted_submission_is_prepended() {
        let engine = engine(ScriptedStore::default(), vec![Question::example("1", 3)]);
        engine.set_draft("What's next?");

        let id = engine
            .submit("panel-1", "What's next?", Some("Alice"))
            .await
            .unwrap();

        let questions = engine.questions();
        assert_eq!(questions.len(), 2);
        let head = &questions[0];
        assert_eq!(head.id, id);
        assert_eq!(head.text, "What's next?");
        assert_eq!(head.author, "Alice");
        assert_eq!(head.score, 0);
        assert!(!head.voted);
        assert_ne!(head.id, questions[1].id);

        let state = engine.snapshot();
        assert_eq!(state.draft(), "");
        assert!(!state.is_submitting());
        assert_eq!(
            engine.store().submissions(),
            vec![(
                "panel-1".to_string(),
                "What's next?".to_string(),
                "Alice".to_string()
            )]
        );
        assert_eq!(engine.take_notices(), vec![Notice::success("Question submitted!")]);
    }

    #[rocket::async_test]
    async fn submission_text_is_trimmed_and_author_defaults() {
        let engine = engine(ScriptedStore::default(), vec![]);

        engine.submit("panel-1", "  Slides?  ", Some(" ")).await.unwrap();

        let (_, text, author) = engine.store().submissions().remove(0);
        assert_eq!(text, "Slides?");
        assert_eq!(author, "Anonymous");
        assert_eq!(engine.questions()[0].author, "Anonymous");
    }

    #[rocket::async_test]
    async fn failed_submissions_leave_state_unchanged() {
        for reply in [Reply::Decline, Reply::Fail] {
            let engine = engine(
                ScriptedStore::replying([reply]),
                vec![Question::example("1", 3)],
            );
            engine.set_draft("What's next?");
            let before = engine.snapshot();

            let result = engine.submit("panel-1", "What's next?", None).await;

            assert!(matches!(result, Err(Error::Remote { .. })));
            assert_eq!(engine.snapshot(), before);
            assert_eq!(engine.store().submissions().len(), 1);
            let notices = engine.take_notices();
            assert_eq!(notices[0].level, NoticeLevel::Error);
            assert!(notices[0].message.contains("try again"));
        }
    }

    #[rocket::async_test]
    async fn submission_timeout_discards_and_clears_flag() {
        let config = EngineConfig::default().with_remote_timeout(Duration::from_millis(20));
        let engine = engine_with(ScriptedStore::replying([Reply::Hang]), config, vec![]);

        let result = engine.submit("panel-1", "Hello?", None).await;

        assert!(matches!(
            result,
            Err(Error::Remote {
                source: RemoteError::Timeout(_),
                ..
            })
        ));
        assert!(engine.questions().is_empty());
        assert!(!engine.snapshot().is_submitting());
    }

    #[rocket::async_test]
    async fn double_submit_is_guarded() {
        let store =
            ScriptedStore::replying([Reply::After(Duration::from_millis(30), true)]);
        let engine = engine(store, vec![]);

        let (first, second) = tokio::join!(
            engine.submit("panel-1", "First", None),
            engine.submit("panel-1", "Second", None),
        );

        assert!(first.is_ok());
        assert!(matches!(second, Err(Error::Info(_))));
        assert_eq!(engine.store().submissions().len(), 1);
        assert_eq!(engine.questions().len(), 1);
    }

    #[rocket::async_test]
    async fn vote_round_trip() {
        let engine = engine(ScriptedStore::default(), vec![Question::example("1", 5)]);
        let id = QuestionId::from("1");

        engine.toggle_vote(&id).await.unwrap();
        assert_eq!(vote_state(&engine, "1"), (6, true));

        engine.toggle_vote(&id).await.unwrap();
        assert_eq!(vote_state(&engine, "1"), (5, false));

        assert_eq!(engine.store().votes(), vec![(id.clone(), true), (id, false)]);
        assert_eq!(
            engine.take_notices(),
            vec![Notice::success("Vote recorded."), Notice::success("Vote removed.")]
        );
    }

    #[rocket::async_test]
    async fn declined_or_failed_votes_roll_back() {
        for reply in [Reply::Decline, Reply::Fail] {
            let engine = engine(
                ScriptedStore::replying([reply]),
                vec![Question::example("1", 5)],
            );

            let result = engine.toggle_vote(&"1".into()).await;

            assert!(matches!(result, Err(Error::Remote { .. })));
            assert_eq!(engine.question(&"1".into()), Some(Question::example("1", 5)));
            assert!(!engine.snapshot().vote_in_flight(&"1".into()));
        }
    }

    #[rocket::async_test]
    async fn vote_timeout_forces_rollback() {
        let config = EngineConfig::default().with_remote_timeout(Duration::from_millis(20));
        let engine = engine_with(
            ScriptedStore::replying([Reply::Hang]),
            config,
            vec![Question::example("1", 5)],
        );

        let result = engine.toggle_vote(&"1".into()).await;

        assert!(matches!(
            result,
            Err(Error::Remote {
                source: RemoteError::Timeout(_),
                ..
            })
        ));
        assert_eq!(vote_state(&engine, "1"), (5, false));
    }

    #[rocket::async_test]
    async fn unconfirmed_questions_cannot_be_voted_on() {
        let engine = engine(ScriptedStore::default(), vec![Question::example("1", 3)]);
        let id = engine.submit("panel-1", "Fresh one", None).await.unwrap();
        engine.take_notices();

        let result = engine.toggle_vote(&id).await;

        assert!(matches!(result, Err(Error::Info(_))));
        assert!(engine.store().votes().is_empty());
        let fresh = engine.question(&id).unwrap();
        assert_eq!((fresh.score, fresh.voted), (0, false));
        assert_eq!(engine.take_notices()[0].level, NoticeLevel::Info);
    }

    #[rocket::async_test]
    async fn votes_on_unknown_questions_do_nothing() {
        let engine = engine(ScriptedStore::default(), vec![Question::example("1", 3)]);
        let before = engine.snapshot();

        let result = engine.toggle_vote(&"404".into()).await.unwrap();

        assert!(result.is_none());
        assert_eq!(engine.snapshot(), before);
        assert!(engine.store().votes().is_empty());
        assert!(engine.take_notices().is_empty());
    }

    #[rocket::async_test]
    async fn overlapping_votes_are_dropped_by_default() {
        let store = ScriptedStore::replying([Reply::After(Duration::from_millis(30), true)]);
        let engine = engine(store, vec![Question::example("1", 5)]);
        let id = QuestionId::from("1");

        let (first, second) = tokio::join!(engine.toggle_vote(&id), engine.toggle_vote(&id));

        assert!(first.is_ok());
        assert!(matches!(second, Err(Error::Info(_))));
        assert_eq!(engine.store().votes(), vec![(id, true)]);
        assert_eq!(vote_state(&engine, "1"), (6, true));
    }

    #[rocket::async_test]
    async fn overlapping_votes_race_when_allowed() {
        let store = ScriptedStore::replying([
            Reply::After(Duration::from_millis(40), true),
            Reply::After(Duration::from_millis(10), false),
        ]);
        let config = EngineConfig::default().with_race_policy(VoteRacePolicy::Race);
        let engine = engine_with(store, config, vec![Question::example("1", 5)]);
        let id = QuestionId::from("1");

        let (first, second) = tokio::join!(engine.toggle_vote(&id), engine.toggle_vote(&id));

        assert!(first.is_ok());
        assert!(matches!(second, Err(Error::Remote { .. })));
        assert_eq!(
            engine.store().votes(),
            vec![(id.clone(), true), (id, false)]
        );
        // The second toggle rolled back to its own pre-image, which already
        // held the first optimistic vote.
        assert_eq!(vote_state(&engine, "1"), (6, true));
    }

    #[rocket::async_test]
    async fn abandoned_votes_roll_back() {
        let engine = engine(
            ScriptedStore::replying([Reply::Hang]),
            vec![Question::example("1", 5)],
        );

        let cancelled = tokio::time::timeout(
            Duration::from_millis(20),
            engine.toggle_vote(&"1".into()),
        )
        .await;

        assert!(cancelled.is_err());
        assert_eq!(vote_state(&engine, "1"), (5, false));
        assert!(!engine.snapshot().vote_in_flight(&"1".into()));
    }

    #[rocket::async_test]
    async fn audience_session() {
        let store = ScriptedStore::default();
        let engine = engine(store, vec![Question::example("1", 3)]);

        // Ask a question.
        engine
            .submit("panel-1", "What's next?", Some("Alice"))
            .await
            .unwrap();
        let questions = engine.questions();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].text, "What's next?");
        assert_eq!(questions[1], Question::example("1", 3));

        // Vote on the existing question.
        engine.toggle_vote(&"1".into()).await.unwrap();
        assert_eq!(vote_state(&engine, "1"), (4, true));

        // Try to take the vote back, but the store refuses.
        engine.store().script([Reply::Decline]);
        let result = engine.toggle_vote(&"1".into()).await;
        assert!(result.is_err());
        assert_eq!(vote_state(&engine, "1"), (4, true));
    }

    #[rocket::async_test]
    async fn reload_replaces_the_view() {
        let engine = engine(ScriptedStore::default(), vec![Question::example("1", 3)]);
        engine.toggle_vote(&"1".into()).await.unwrap();
        engine.take_notices();
        let fresh = Panel::example(vec![Question::example("2", 0), Question::example("1", 9)]);
        engine.store().serve(fresh.clone());

        engine.reload("panel-1").await.unwrap();

        assert_eq!(engine.snapshot().panel(), Some(&fresh));
        assert_eq!(vote_state(&engine, "1"), (9, false));
        assert!(engine.take_notices().is_empty());
    }

    #[rocket::async_test]
    async fn reload_failures_keep_the_view() {
        let config = EngineConfig::default().with_remote_timeout(Duration::from_millis(20));
        let store = ScriptedStore::replying([Reply::Hang, Reply::Fail]);
        store.serve(Panel::example(vec![]));
        let engine = engine_with(store, config, vec![Question::example("1", 3)]);
        let before = engine.snapshot();

        let timed_out = engine.reload("panel-1").await;
        assert!(matches!(
            timed_out,
            Err(Error::Remote {
                source: RemoteError::Timeout(_),
                ..
            })
        ));
        let failed = engine.reload("panel-1").await;
        assert!(matches!(failed, Err(Error::Remote { .. })));

        assert_eq!(engine.snapshot(), before);
        let notices = engine.take_notices();
        assert_eq!(notices.len(), 2);
        assert!(notices.iter().all(|n| n.level == NoticeLevel::Error));
        assert!(notices[0].message.contains("load the panel"));
    }

    #[rocket::async_test]
    async fn reload_during_a_pending_vote_keeps_fresh_data() {
        let store = ScriptedStore::replying([Reply::After(Duration::from_millis(40), false)]);
        store.serve(Panel::example(vec![Question::example("1", 10)]));
        let engine = engine(store, vec![Question::example("1", 5)]);
        let id = QuestionId::from("1");

        let (vote, reload) = tokio::join!(engine.toggle_vote(&id), async {
            sleep(Duration::from_millis(10)).await;
            let reloaded = engine.reload("panel-1").await;
            // The first call is still out, so the view holds back another vote.
            let repeat = engine.toggle_vote(&id).await;
            (reloaded, repeat)
        });

        assert!(matches!(vote, Err(Error::Remote { .. })));
        let (reloaded, repeat) = reload;
        assert!(reloaded.is_ok());
        assert!(matches!(repeat, Err(Error::Info(_))));
        assert_eq!(vote_state(&engine, "1"), (10, false));
        assert!(!engine.snapshot().vote_in_flight(&id));
        assert_eq!(engine.store().votes(), vec![(id, true)]);
    }

    #[rocket::async_test]
    async fn submission_accepted_during_reload_waits_for_the_next_one() {
        let store = ScriptedStore::replying([Reply::After(Duration::from_millis(40), true)]);
        let fresh = Panel::example(vec![Question::example("1", 4)]);
        store.serve(fresh.clone());
        let engine = engine(store, vec![Question::example("1", 3)]);

        let (submitted, reloaded) = tokio::join!(
            engine.submit("panel-1", "What's next?", None),
            async {
                sleep(Duration::from_millis(10)).await;
                engine.reload("panel-1").await
            }
        );

        assert!(reloaded.is_ok());
        assert!(matches!(submitted, Err(Error::Info(_))));
        assert_eq!(engine.snapshot().panel(), Some(&fresh));
        assert!(!engine.snapshot().is_submitting());
        assert_eq!(engine.store().submissions().len(), 1);
    }
}
