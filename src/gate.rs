use crate::{
    decision::Decision,
    identity::is_anonymous,
    policy::DownloadPolicy,
    request::{BeforeDownloadRequest, UserContext},
};

/// The download access gate.
///
/// `DownloadGate` decides whether a download may proceed. It is a pure
/// function of its inputs: it performs no I/O and holds no mutable state, so a
/// single gate can be shared by any number of concurrent request handlers.
///
/// Only anonymous requesters are ever stopped. For them, the requested
/// repository key and then the original repository key (when a virtual
/// repository resolves to a backing one) are checked against the
/// [`DownloadPolicy`]; the first key that matches stops the download.
///
/// # Examples
///
/// ```
/// use download_gate::{DownloadGate, UserContext};
///
/// let gate = DownloadGate::default();
/// let anonymous = UserContext::new("anonymous", "anonymous");
///
/// let decision = gate.decide(Some(&anonymous), Some("virtual-repo"), Some("my-local-repo"));
/// assert!(decision.is_stop());
/// assert!(decision.message().contains("my-local-repo"));
///
/// let decision = gate.decide(Some(&anonymous), Some("c1"), None);
/// assert!(decision.is_proceed());
/// ```
#[derive(Debug, Clone, Default)]
pub struct DownloadGate {
    policy: DownloadPolicy,
}

impl DownloadGate {
    /// Creates a gate enforcing `policy`.
    pub fn new(policy: DownloadPolicy) -> Self {
        Self { policy }
    }

    /// Returns the policy this gate enforces.
    pub fn policy(&self) -> &DownloadPolicy {
        &self.policy
    }

    /// Decides whether a download may proceed.
    ///
    /// Absent identity means anonymous. Absent or empty repository keys are
    /// skipped; with nothing to check the download proceeds.
    pub fn decide(
        &self,
        user: Option<&UserContext>,
        requested_key: Option<&str>,
        original_key: Option<&str>,
    ) -> Decision {
        if !is_anonymous(user) {
            return Decision::proceed();
        }

        collect_repo_keys(requested_key, original_key)
            .into_iter()
            .find(|key| self.policy.block_match(key))
            .map(Decision::anonymous_blocked)
            .unwrap_or_else(Decision::proceed)
    }

    /// Decides on a typed before-download request.
    pub fn evaluate(&self, request: &BeforeDownloadRequest) -> Decision {
        self.decide(
            request.user_context.as_ref(),
            request.requested_repo_key(),
            request.original_repo_key(),
        )
    }
}

/// Collects the repository keys to check, requested key first.
///
/// Absent and empty keys are skipped.
pub fn collect_repo_keys<'a>(
    requested_key: Option<&'a str>,
    original_key: Option<&'a str>,
) -> Vec<&'a str> {
    [requested_key, original_key]
        .into_iter()
        .flatten()
        .filter(|key| !key.is_empty())
        .collect()
}
