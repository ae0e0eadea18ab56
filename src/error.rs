//! Error types shared by every stage of a run

use thiserror::Error;

use crate::directory::NotificationId;

/// Everything that can end a run early.
///
/// None of these are retried; the first one raised is the run's outcome.
#[derive(Debug, Error)]
pub enum Error {
    /// Command line could not be parsed
    #[error(transparent)]
    FlagParse(#[from] clap::Error),

    /// No usable `-id` was given
    #[error("id is required")]
    MissingId,

    /// An external command could not be launched or exited unsuccessfully
    #[error("{command}: {reason}")]
    Process { command: String, reason: String },

    /// The listing command printed something that is not a notification list
    #[error("failed to decode notification list: {0}")]
    Decode(#[from] serde_json::Error),

    /// The caller gave up waiting for the notification list
    #[error("cancelled while waiting for the notification list")]
    Cancelled,

    /// The daemon reported no notification groups at all
    #[error("no notifications")]
    NoNotifications,

    /// No notification with this id is on screen
    #[error("notification {0} not found")]
    NotFound(NotificationId),

    /// The menu answered with a line that is not one of the offered actions
    #[error("action not found for {0:?}")]
    ActionNotFound(String),

    /// Configuration could not be loaded or is unusable
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn process(command: impl Into<String>, reason: impl ToString) -> Self {
        Error::Process {
            command: command.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
