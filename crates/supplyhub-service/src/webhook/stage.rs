//! Pipeline stages, used for structured logging.

use std::fmt;

/// A gate in the webhook pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookStage {
    Verify,
    Parse,
    LocateUser,
    Dedupe,
    Mutate,
    Notify,
    Done,
}

impl WebhookStage {
    /// Stage name as logged.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verify => "verify",
            Self::Parse => "parse",
            Self::LocateUser => "locate_user",
            Self::Dedupe => "dedupe",
            Self::Mutate => "mutate",
            Self::Notify => "notify",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for WebhookStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
