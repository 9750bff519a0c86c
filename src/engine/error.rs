use thiserror::Error;

use crate::engine::{
    notice::{Notice, NoticeLevel},
    remote::RemoteError,
};

pub type Result<T> = std::result::Result<T, Error>;

/// Why an audience action did not go through.
///
/// Every variant leaves the view state consistent and has already been turned
/// into a [`Notice`] by the time the caller sees it.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or empty input.
    #[error("{0}")]
    Validation(String),
    /// The action needs context that has not been loaded.
    #[error("{0}")]
    State(String),
    /// A benign short-circuit, such as voting on a question that is not confirmed yet.
    #[error("{0}")]
    Info(String),
    /// The remote store failed or declined; any optimistic change was reverted.
    #[error("Could not {action}. Please try again.")]
    Remote {
        action: &'static str,
        #[source]
        source: RemoteError,
    },
}

impl Error {
    pub fn notice_level(&self) -> NoticeLevel {
        match self {
            Self::Info(_) => NoticeLevel::Info,
            Self::Validation(_) | Self::State(_) | Self::Remote { .. } => NoticeLevel::Error,
        }
    }

    /// The toast shown to the audience member for this error.
    pub fn notice(&self) -> Notice {
        match self.notice_level() {
            NoticeLevel::Info => Notice::info(self.to_string()),
            _ => Notice::error(self.to_string()),
        }
    }
}
