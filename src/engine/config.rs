use std::time::Duration;

use rocket::figment::{self, Figment};
use serde::Deserialize;

use crate::model::common::ANONYMOUS_AUTHOR;

/// How the engine treats a second vote on a question whose first vote is still in flight.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteRacePolicy {
    /// Drop the repeated attempt with an info notice until the first settles.
    #[default]
    Serialize,
    /// Let both calls race; the last response to settle wins locally.
    Race,
}

/// Engine settings, typically read from the `engine` table of `Rocket.toml`
/// or `ROCKET_ENGINE={...}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    remote_timeout_ms: u64,
    anonymous_author: String,
    race_policy: VoteRacePolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            remote_timeout_ms: 10_000,
            anonymous_author: ANONYMOUS_AUTHOR.to_string(),
            race_policy: VoteRacePolicy::default(),
        }
    }
}

impl EngineConfig {
    /// Extract the `engine` section of the given figment, defaulting anything missing.
    pub fn from_figment(figment: &Figment) -> Result<Self, figment::Error> {
        figment.focus("engine").extract()
    }

    /// Upper bound on any single remote call; on expiry the call counts as failed.
    pub fn remote_timeout(&self) -> Duration {
        Duration::from_millis(self.remote_timeout_ms)
    }

    /// Author shown for questions submitted without a name.
    pub fn anonymous_author(&self) -> &str {
        &self.anonymous_author
    }

    pub fn race_policy(&self) -> VoteRacePolicy {
        self.race_policy
    }

    pub fn with_remote_timeout(mut self, timeout: Duration) -> Self {
        self.remote_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn with_race_policy(mut self, policy: VoteRacePolicy) -> Self {
        self.race_policy = policy;
        self
    }
}
