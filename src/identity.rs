use crate::request::UserContext;

/// Id and realm the host assigns to unauthenticated requests.
pub const ANONYMOUS: &str = "anonymous";

/// Prefix of per-session anonymous ids, e.g. `anonymous@10.0.0.7`.
pub const ANONYMOUS_ID_PREFIX: &str = "anonymous@";

/// Returns `true` when the requester must be treated as anonymous.
///
/// A requester is anonymous when any of the following holds:
/// - no user context was supplied,
/// - its id is absent or empty,
/// - its id is exactly `anonymous` or starts with `anonymous@`,
/// - its realm is exactly `anonymous`.
///
/// Identity fields are compared case-sensitively.
///
/// # Examples
///
/// ```
/// use download_gate::{is_anonymous, UserContext};
///
/// assert!(is_anonymous(None));
/// assert!(is_anonymous(Some(&UserContext::with_id("anonymous@10.0.0.7"))));
/// assert!(!is_anonymous(Some(&UserContext::new("alice", "internal"))));
/// ```
pub fn is_anonymous(user: Option<&UserContext>) -> bool {
    let Some(user) = user else {
        return true;
    };

    let id_is_anonymous = match user.id.as_deref() {
        None | Some("") => true,
        Some(id) => id == ANONYMOUS || id.starts_with(ANONYMOUS_ID_PREFIX),
    };

    id_is_anonymous || user.realm.as_deref() == Some(ANONYMOUS)
}
