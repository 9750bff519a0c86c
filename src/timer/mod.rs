//! Per-speaker countdown shown to the moderator and panelists.

use std::future::Future;

use chrono::{DateTime, Duration, Utc};

mod expiry;

pub use expiry::ExpiryTask;

/// Where a [`SpeakerTimer`] is in its lifecycle.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TimerState {
    /// Not started, or reset.
    Idle,
    /// Counting down since the given instant.
    Running { since: DateTime<Utc> },
    Paused,
}

/// Speaking time allotted to one panelist.
///
/// All queries take the current time explicitly, so the countdown itself is
/// plain arithmetic over the time spent in `Running` stretches.
#[derive(Debug)]
pub struct SpeakerTimer {
    speaker: String,
    allotted: Duration,
    /// Time used by completed running stretches.
    used: Duration,
    state: TimerState,
    expiry: Option<ExpiryTask<()>>,
}

impl SpeakerTimer {
    pub fn new(speaker: impl Into<String>, allotted: Duration) -> Self {
        Self {
            speaker: speaker.into(),
            allotted,
            used: Duration::zero(),
            state: TimerState::Idle,
            expiry: None,
        }
    }

    pub fn speaker(&self) -> &str {
        &self.speaker
    }

    pub fn allotted(&self) -> Duration {
        self.allotted
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Start or resume the countdown. Does nothing if already running.
    pub fn start(&mut self, now: DateTime<Utc>) {
        if let TimerState::Running { .. } = self.state {
            return;
        }
        debug!("Timer for {} started", self.speaker);
        self.state = TimerState::Running { since: now };
    }

    /// Pause the countdown, cancelling any armed expiry. Does nothing unless running.
    pub fn pause(&mut self, now: DateTime<Utc>) {
        let TimerState::Running { since } = self.state else {
            return;
        };
        self.used = self.used + stretch(since, now);
        self.state = TimerState::Paused;
        self.disarm();
        debug!("Timer for {} paused", self.speaker);
    }

    /// Back to the full allotment, cancelling any armed expiry.
    pub fn reset(&mut self) {
        self.used = Duration::zero();
        self.state = TimerState::Idle;
        self.disarm();
    }

    /// Total speaking time used so far.
    pub fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        match self.state {
            TimerState::Running { since } => self.used + stretch(since, now),
            TimerState::Idle | TimerState::Paused => self.used,
        }
    }

    /// Time left, never negative.
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        (self.allotted - self.elapsed(now)).max(Duration::zero())
    }

    /// Time spoken past the allotment, never negative.
    pub fn overtime(&self, now: DateTime<Utc>) -> Duration {
        (self.elapsed(now) - self.allotted).max(Duration::zero())
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.elapsed(now) >= self.allotted
    }

    /// When the allotment runs out, if the timer is running.
    pub fn expires_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self.state {
            TimerState::Running { .. } => Some(now + self.remaining(now)),
            TimerState::Idle | TimerState::Paused => None,
        }
    }

    /// Run `on_expiry` when the running countdown reaches zero. Replaces any
    /// previously armed task; returns false (arming nothing) unless running.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn arm_expiry<Fut>(&mut self, now: DateTime<Utc>, on_expiry: Fut) -> bool
    where
        Fut: Future<Output = ()> + Send + 'static,
    {
        let Some(deadline) = self.expires_at(now) else {
            return false;
        };
        self.disarm();
        self.expiry = Some(ExpiryTask::at(deadline, on_expiry));
        true
    }

    fn disarm(&mut self) {
        if let Some(expiry) = self.expiry.take() {
            expiry.abort();
        }
    }
}

impl Drop for SpeakerTimer {
    fn drop(&mut self) {
        self.disarm();
    }
}

/// Length of a running stretch; clock skew never counts negatively.
fn stretch(since: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    (now - since).max(Duration::zero())
}
