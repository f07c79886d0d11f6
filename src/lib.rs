//! Pre-download access control for artifact repositories.
//!
//! This crate implements a before-download hook that keeps anonymous users
//! out of repositories whose names mark them as local:
//! - **Anonymity**: a requester is anonymous when it has no identity, an empty
//!   id, an `anonymous` id or realm, or an id starting with `anonymous@`
//! - **Repository policy**: an anonymous download is stopped when the
//!   requested repository key, or the original key behind a virtual
//!   repository, contains `local` (ignoring case) and is not exempt (`c1`)
//! - **Fail closed**: a request payload that cannot be read stops the download
//!
//! # Core Types
//!
//! - [`DownloadGate`]: Pure decision function over identity and repository keys
//! - [`DownloadPolicy`]: Blocked substring and exempt repository keys
//! - [`Decision`]: `Proceed` or `Stop` with a human-readable reason
//! - [`BeforeDownloadRequest`] / [`BeforeDownloadResponse`]: Host envelope
//!
//! # Examples
//!
//! ```
//! use download_gate::{DownloadGate, UserContext};
//!
//! let gate = DownloadGate::default();
//!
//! let anonymous = UserContext::with_id("anonymous");
//! let decision = gate.decide(Some(&anonymous), Some("my-local-repo"), None);
//! assert!(decision.is_stop());
//! assert_eq!(
//!     decision.message(),
//!     "Anonymous users are not allowed to download from repository: my-local-repo"
//! );
//!
//! let user = UserContext::new("authenticated-user", "internal");
//! assert!(gate.decide(Some(&user), Some("my-local-repo"), None).is_proceed());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod decision;
mod error;
mod gate;
mod hook;
mod identity;
mod logging;
mod policy;
mod request;
mod response;
mod wire;

pub use decision::{Decision, Outcome, ANONYMOUS_BLOCKED_PREFIX, PROCESSING_ERROR_PREFIX};
pub use error::Error;
pub use gate::{collect_repo_keys, DownloadGate};
pub use hook::{before_download, before_download_json, parse_request};
pub use identity::{is_anonymous, ANONYMOUS, ANONYMOUS_ID_PREFIX};
pub use logging::HookLog;
pub use policy::{DownloadPolicy, DEFAULT_BLOCKED_SUBSTRING, DEFAULT_EXEMPT_KEY};
pub use request::{BeforeDownloadRequest, DownloadMetadata, Header, RepoPath, RepoType, UserContext};
pub use response::{ActionStatus, BeforeDownloadResponse, ALLOWED_MESSAGE};
