//! Before-download response envelope returned to the host.

use serde::{Deserialize, Deserializer, Serialize};

use crate::decision::{Decision, Outcome};
use crate::error::Error;
use crate::request::RepoPath;
use crate::wire::{self, EnumRepr};

/// Informational message the host logs when a download is allowed.
pub const ALLOWED_MESSAGE: &str = "Download request allowed";

/// Instruction telling the host how to continue.
///
/// Serialized by name; read from either the numeric code or the name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionStatus {
    /// Not set
    #[default]
    Unspecified,
    /// Continue handling the download
    Proceed,
    /// Reject the download
    Stop,
    /// Continue but log the message as a warning
    Warn,
    /// A value this crate does not know about
    Unrecognized,
}

impl ActionStatus {
    /// Looks up a status by its numeric code.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => ActionStatus::Unspecified,
            1 => ActionStatus::Proceed,
            2 => ActionStatus::Stop,
            3 => ActionStatus::Warn,
            _ => ActionStatus::Unrecognized,
        }
    }

    /// Looks up a status by its wire name.
    pub fn from_name(name: &str) -> Self {
        match name {
            "UNSPECIFIED" => ActionStatus::Unspecified,
            "PROCEED" => ActionStatus::Proceed,
            "STOP" => ActionStatus::Stop,
            "WARN" => ActionStatus::Warn,
            _ => ActionStatus::Unrecognized,
        }
    }

    /// Numeric code used by the host.
    pub fn code(self) -> i32 {
        match self {
            ActionStatus::Unspecified => 0,
            ActionStatus::Proceed => 1,
            ActionStatus::Stop => 2,
            ActionStatus::Warn => 3,
            ActionStatus::Unrecognized => -1,
        }
    }
}

impl<'de> Deserialize<'de> for ActionStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match wire::enum_repr(deserializer)? {
            EnumRepr::Unset => ActionStatus::default(),
            EnumRepr::Code(code) => ActionStatus::from_code(code),
            EnumRepr::Name(name) => ActionStatus::from_name(&name),
        })
    }
}

impl From<Outcome> for ActionStatus {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Proceed => ActionStatus::Proceed,
            Outcome::Stop => ActionStatus::Stop,
        }
    }
}

/// The hook's answer to a before-download request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeforeDownloadResponse {
    /// How the host should proceed
    pub status: ActionStatus,
    /// Message for the host log; printed as a warning when stopping
    pub message: String,
    /// The request's repository path, echoed back unchanged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_repo_path: Option<RepoPath>,
}

impl BeforeDownloadResponse {
    /// Maps a decision into the response envelope.
    ///
    /// `repo_path` is echoed back whatever the outcome; the gate never
    /// rewrites the download target. A proceeding decision is reported with
    /// [`ALLOWED_MESSAGE`].
    pub fn from_decision(decision: &Decision, repo_path: Option<&RepoPath>) -> Self {
        let message = match decision.outcome() {
            Outcome::Proceed if decision.message().is_empty() => ALLOWED_MESSAGE.to_string(),
            _ => decision.message().to_string(),
        };

        Self {
            status: decision.outcome().into(),
            message,
            modified_repo_path: repo_path.cloned(),
        }
    }

    /// Builds the fail-closed response for a request that could not be read.
    pub fn from_error(err: &Error) -> Self {
        Self::from_decision(&Decision::fail_closed(err), None)
    }

    /// Serializes the response as the host's JSON.
    ///
    /// # Errors
    ///
    /// Propagates serializer failures; none are expected for this type.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
