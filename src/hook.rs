//! Host-facing entry points for the before-download hook.
//!
//! The host hands over either a typed [`BeforeDownloadRequest`] or the raw
//! JSON payload. Either way the hook always answers with a
//! [`BeforeDownloadResponse`]; failures to read the payload stop the download.

use crate::{
    error::Error,
    gate::DownloadGate,
    identity::is_anonymous,
    logging::HookLog,
    request::BeforeDownloadRequest,
    response::BeforeDownloadResponse,
};

/// Parses a raw before-download payload.
///
/// # Errors
///
/// Returns [`Error::MalformedRequest`] if the payload is not JSON or a field
/// has the wrong shape (for example `userContext` given as a string).
pub fn parse_request(raw: &str) -> Result<BeforeDownloadRequest, Error> {
    Ok(serde_json::from_str(raw)?)
}

/// Handles a typed before-download request.
///
/// The request's repository path is echoed back as `modifiedRepoPath`
/// whatever the outcome.
///
/// # Examples
///
/// ```
/// use download_gate::{before_download, ActionStatus, BeforeDownloadRequest, DownloadGate};
/// use download_gate::{DownloadMetadata, RepoPath, UserContext};
///
/// let request = BeforeDownloadRequest {
///     metadata: Some(DownloadMetadata {
///         repo_path: Some(RepoPath::new("remote-local-repo", "/org/app.jar")),
///         ..DownloadMetadata::default()
///     }),
///     user_context: Some(UserContext::with_id("anonymous")),
///     ..BeforeDownloadRequest::default()
/// };
///
/// let response = before_download(&DownloadGate::default(), &request);
/// assert_eq!(response.status, ActionStatus::Stop);
/// assert_eq!(response.modified_repo_path, request.repo_path().cloned());
/// ```
pub fn before_download(
    gate: &DownloadGate,
    request: &BeforeDownloadRequest,
) -> BeforeDownloadResponse {
    let repo_path = request.repo_path();
    let log = HookLog::new(repo_path.map(|p| p.id.as_str()).unwrap_or_default());

    let user = request.user_context.as_ref();
    log.user(user);

    let decision = gate.evaluate(request);
    log.decision(&decision, request.requested_repo_key(), is_anonymous(user));

    BeforeDownloadResponse::from_decision(&decision, repo_path)
}

/// Handles a raw JSON before-download payload.
///
/// A payload that cannot be read stops the download with
/// `Error processing download request: <cause>`.
///
/// # Examples
///
/// ```
/// use download_gate::{before_download_json, ActionStatus, DownloadGate};
///
/// let gate = DownloadGate::default();
///
/// let response = before_download_json(&gate, r#"{
///     "metadata": {"repoPath": {"key": "c1", "path": "/a", "id": "c1:/a"}},
///     "userContext": {"id": "anonymous", "realm": "anonymous"}
/// }"#);
/// assert_eq!(response.status, ActionStatus::Proceed);
///
/// let response = before_download_json(&gate, "not json");
/// assert_eq!(response.status, ActionStatus::Stop);
/// assert!(response.message.starts_with("Error processing download request: "));
/// ```
pub fn before_download_json(gate: &DownloadGate, raw: &str) -> BeforeDownloadResponse {
    match parse_request(raw) {
        Ok(request) => before_download(gate, &request),
        Err(err) => {
            let response = BeforeDownloadResponse::from_error(&err);
            HookLog::new("").error(format_args!("hook error: {}", response.message));
            response
        }
    }
}
