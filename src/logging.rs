use std::fmt;

use crate::decision::Decision;
use crate::request::UserContext;
use crate::response::ALLOWED_MESSAGE;

/// Target used when the request carries no repository path.
pub(crate) const UNKNOWN_TARGET: &str = "unknown";

/// Request-scoped logger for the hook.
///
/// `HookLog` is lifetime-bound to the request it was created for and tags
/// every event with the request's `key:path` target, so that log lines from
/// concurrent downloads can be told apart.
#[derive(Debug)]
pub struct HookLog<'a> {
    target: &'a str,
}

impl<'a> HookLog<'a> {
    /// Creates a logger for the given target; empty targets log as `unknown`.
    pub fn new(target: &'a str) -> Self {
        let target = if target.is_empty() {
            UNKNOWN_TARGET
        } else {
            target
        };
        Self { target }
    }

    /// Returns the target this logger tags events with.
    pub fn target(&self) -> &str {
        self.target
    }

    /// Logs an info-level message.
    ///
    /// Use with `format_args!`:
    /// ```
    /// # use download_gate::HookLog;
    /// let log = HookLog::new("libs-local:/org/app.jar");
    /// log.info(format_args!("allowed for {}", "libs-local"));
    /// ```
    pub fn info(&self, args: fmt::Arguments<'_>) {
        tracing::info!(target_path = %self.target, "{}", args);
    }

    /// Logs a warning-level message.
    pub fn warn(&self, args: fmt::Arguments<'_>) {
        tracing::warn!(target_path = %self.target, "{}", args);
    }

    /// Logs an error-level message.
    pub fn error(&self, args: fmt::Arguments<'_>) {
        tracing::error!(target_path = %self.target, "{}", args);
    }

    /// Logs a debug-level message.
    pub fn debug(&self, args: fmt::Arguments<'_>) {
        tracing::debug!(target_path = %self.target, "{}", args);
    }

    /// Logs the requesting user at debug level.
    pub fn user(&self, user: Option<&UserContext>) {
        tracing::debug!(
            target_path = %self.target,
            user_id = ?user.and_then(|u| u.id.as_deref()),
            realm = ?user.and_then(|u| u.realm.as_deref()),
            is_token = user.is_some_and(|u| u.is_token),
            "user context"
        );
    }

    /// Logs the outcome of a decision.
    ///
    /// Every decision produces one event carrying `repo_key`, `anonymous` and
    /// `outcome` fields: `warn` when the download is stopped, `info` otherwise.
    /// `repo_key` is the key that stopped the download, or the requested key
    /// when it proceeds.
    pub fn decision(&self, decision: &Decision, requested_key: Option<&str>, anonymous: bool) {
        let outcome = decision.outcome();
        if decision.is_stop() {
            match decision.blocked_key() {
                Some(key) => tracing::warn!(
                    target_path = %self.target,
                    repo_key = %key,
                    anonymous,
                    %outcome,
                    "Blocked anonymous user download from repository: {} (type: any)",
                    key
                ),
                None => tracing::warn!(
                    target_path = %self.target,
                    repo_key = %requested_key.unwrap_or(UNKNOWN_TARGET),
                    anonymous,
                    %outcome,
                    "{}",
                    decision.message()
                ),
            }
            return;
        }

        let key = requested_key
            .filter(|k| !k.is_empty())
            .unwrap_or(UNKNOWN_TARGET);
        if anonymous {
            tracing::info!(
                target_path = %self.target,
                repo_key = %key,
                anonymous,
                %outcome,
                "Anonymous user download allowed for repository: {}",
                key
            );
        } else {
            tracing::info!(
                target_path = %self.target,
                repo_key = %key,
                anonymous,
                %outcome,
                "{}",
                ALLOWED_MESSAGE
            );
        }
    }
}
