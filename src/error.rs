use std::fmt;

/// Errors that can occur while evaluating a download request.
///
/// None of these ever escape the hook boundary: [`crate::Decision::fail_closed`]
/// turns any of them into a `STOP`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The request payload could not be read as a before-download request
    MalformedRequest {
        /// What went wrong while reading the payload
        cause: String,
    },
    /// A policy document was unusable
    InvalidPolicy {
        /// Why the policy was rejected
        reason: String,
    },
}

impl Error {
    /// Creates a malformed-request error.
    pub fn malformed(cause: impl Into<String>) -> Self {
        Error::MalformedRequest {
            cause: cause.into(),
        }
    }

    /// Creates an invalid-policy error.
    pub fn invalid_policy(reason: impl Into<String>) -> Self {
        Error::InvalidPolicy {
            reason: reason.into(),
        }
    }

    /// Returns the underlying cause without the category prefix.
    pub fn cause(&self) -> &str {
        match self {
            Error::MalformedRequest { cause } => cause,
            Error::InvalidPolicy { reason } => reason,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MalformedRequest { cause } => write!(f, "Malformed request: {}", cause),
            Error::InvalidPolicy { reason } => write!(f, "Invalid policy: {}", reason),
        }
    }
}

impl std::error::Error for Error {}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::malformed(err.to_string())
    }
}
