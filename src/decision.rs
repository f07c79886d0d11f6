use std::fmt;

use crate::error::Error;

/// Prefix of every message explaining a blocked anonymous download.
pub const ANONYMOUS_BLOCKED_PREFIX: &str =
    "Anonymous users are not allowed to download from repository: ";

/// Prefix of the message produced when a request could not be evaluated.
pub const PROCESSING_ERROR_PREFIX: &str = "Error processing download request: ";

/// Whether a download may continue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Continue handling the download
    Proceed,
    /// Reject the download and surface the message
    Stop,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Proceed => write!(f, "proceed"),
            Outcome::Stop => write!(f, "stop"),
        }
    }
}

/// The result of evaluating a download request.
///
/// A proceeding decision carries an empty message. A stopping decision
/// always carries a message naming why, using repository keys exactly as
/// they were supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    outcome: Outcome,
    message: String,
    blocked_key: Option<String>,
}

impl Decision {
    /// Lets the download continue.
    pub fn proceed() -> Self {
        Self {
            outcome: Outcome::Proceed,
            message: String::new(),
            blocked_key: None,
        }
    }

    /// Stops an anonymous download from `repo_key`.
    pub fn anonymous_blocked(repo_key: &str) -> Self {
        Self {
            outcome: Outcome::Stop,
            message: format!("{}{}", ANONYMOUS_BLOCKED_PREFIX, repo_key),
            blocked_key: Some(repo_key.to_string()),
        }
    }

    /// Stops a download that could not be evaluated.
    ///
    /// Used whenever the request cannot be read, so that unparseable input
    /// never proceeds.
    pub fn fail_closed(err: &Error) -> Self {
        let cause = match err.cause() {
            "" => "Unknown error",
            cause => cause,
        };
        Self {
            outcome: Outcome::Stop,
            message: format!("{}{}", PROCESSING_ERROR_PREFIX, cause),
            blocked_key: None,
        }
    }

    /// Returns the outcome.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Returns the message; empty when the download proceeds.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the repository key that stopped the download, as supplied.
    ///
    /// `None` for proceeding decisions and for requests that could not be read.
    pub fn blocked_key(&self) -> Option<&str> {
        self.blocked_key.as_deref()
    }

    /// Returns `true` if the download may continue.
    pub fn is_proceed(&self) -> bool {
        self.outcome == Outcome::Proceed
    }

    /// Returns `true` if the download must be rejected.
    pub fn is_stop(&self) -> bool {
        self.outcome == Outcome::Stop
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.outcome)
        } else {
            write!(f, "{}: {}", self.outcome, self.message)
        }
    }
}
