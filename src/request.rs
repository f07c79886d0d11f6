//! Before-download request payload as delivered by the host.
//!
//! Field names follow the host's camelCase JSON. Every field is optional on
//! the wire; missing values take their defaults so that absent data is treated
//! as input rather than as a parse failure.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::wire::{self, EnumRepr};

/// The full before-download request handed to the hook.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BeforeDownloadRequest {
    /// Download metadata, if the host supplied any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<DownloadMetadata>,
    /// Request headers, read-only
    #[serde(deserialize_with = "wire::null_as_default")]
    pub headers: HashMap<String, Header>,
    /// The user the request is made on behalf of
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_context: Option<UserContext>,
}

impl BeforeDownloadRequest {
    /// Returns the requested repository path, if present.
    pub fn repo_path(&self) -> Option<&RepoPath> {
        self.metadata.as_ref()?.repo_path.as_ref()
    }

    /// Returns the original repository path behind a virtual repository.
    pub fn original_repo_path(&self) -> Option<&RepoPath> {
        self.metadata.as_ref()?.original_repo_path.as_ref()
    }

    /// Key of the requested repository.
    pub fn requested_repo_key(&self) -> Option<&str> {
        self.repo_path().map(|p| p.key.as_str())
    }

    /// Key of the original repository for virtual-repo indirection.
    pub fn original_repo_key(&self) -> Option<&str> {
        self.original_repo_path().map(|p| p.key.as_str())
    }
}

/// Immutable metadata describing the download.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DownloadMetadata {
    /// The requested repository path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_path: Option<RepoPath>,
    /// The backing repository path when a virtual repository is involved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_repo_path: Option<RepoPath>,
    /// File name taken from the path
    #[serde(deserialize_with = "wire::string")]
    pub name: String,
    /// HEAD request
    #[serde(deserialize_with = "wire::boolean")]
    pub head_only: bool,
    /// Checksum request
    #[serde(deserialize_with = "wire::boolean")]
    pub checksum: bool,
    /// Recursive request
    #[serde(deserialize_with = "wire::boolean")]
    pub recursive: bool,
    /// When a modification occurred
    #[serde(deserialize_with = "wire::int64")]
    pub modification_time: i64,
    /// Directory listing request
    #[serde(deserialize_with = "wire::boolean")]
    pub directory_request: bool,
    /// Metadata request
    #[serde(deserialize_with = "wire::boolean")]
    pub metadata: bool,
    /// Last modification time
    #[serde(deserialize_with = "wire::int64")]
    pub last_modified: i64,
    /// `If-Modified-Since` value
    #[serde(deserialize_with = "wire::int64")]
    pub if_modified_since: i64,
    /// Base URL of the servlet context
    #[serde(deserialize_with = "wire::string")]
    pub servlet_context_url: String,
    /// The request URI
    #[serde(deserialize_with = "wire::string")]
    pub uri: String,
    /// Client address
    #[serde(deserialize_with = "wire::string")]
    pub client_address: String,
    /// Resource path inside a requested archive
    #[serde(deserialize_with = "wire::string")]
    pub zip_resource_path: String,
    /// Whether this is an archive resource request
    #[serde(deserialize_with = "wire::boolean")]
    pub zip_resource_request: bool,
    /// Whether the host should turn HEAD into GET
    #[serde(deserialize_with = "wire::boolean")]
    pub replace_head_request_with_get: bool,
    /// Type of the requested repository
    pub repo_type: RepoType,
}

/// A repository path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RepoPath {
    /// Repository key
    #[serde(deserialize_with = "wire::string")]
    pub key: String,
    /// Path inside the repository
    #[serde(deserialize_with = "wire::string")]
    pub path: String,
    /// `key:path` combination
    #[serde(deserialize_with = "wire::string")]
    pub id: String,
    /// Whether the path is the repository root
    #[serde(deserialize_with = "wire::boolean")]
    pub is_root: bool,
    /// Whether the path is a folder
    #[serde(deserialize_with = "wire::boolean")]
    pub is_folder: bool,
}

impl RepoPath {
    /// Creates a repo path for `key` and `path`, deriving the `key:path` id.
    pub fn new(key: impl Into<String>, path: impl Into<String>) -> Self {
        let key = key.into();
        let path = path.into();
        let id = format!("{}:{}", key, path);
        let is_root = path.is_empty() || path == "/";
        Self {
            key,
            path,
            id,
            is_root,
            is_folder: is_root,
        }
    }
}

/// A single request header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Header {
    /// Header values in arrival order
    #[serde(deserialize_with = "wire::null_as_default")]
    pub value: Vec<String>,
}

/// Identity of the requester.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserContext {
    /// Username or token subject
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "wire::optional_string"
    )]
    pub id: Option<String>,
    /// Whether the context comes from an access token
    #[serde(deserialize_with = "wire::boolean")]
    pub is_token: bool,
    /// Realm the user authenticated against
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "wire::optional_string"
    )]
    pub realm: Option<String>,
}

impl UserContext {
    /// Creates a user context with an id and realm.
    pub fn new(id: impl Into<String>, realm: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            is_token: false,
            realm: Some(realm.into()),
        }
    }

    /// Creates a user context with only an id.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }
}

/// Repository type reported by the host.
///
/// Serialized by name. On input both the numeric code and the name are
/// accepted; unknown values read as [`RepoType::Unrecognized`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RepoType {
    /// Not reported
    #[default]
    RepoTypeUnspecified,
    /// Local repository
    RepoTypeLocal,
    /// Remote (proxy) repository
    RepoTypeRemote,
    /// Federated repository
    RepoTypeFederated,
    /// A value this crate does not know about
    Unrecognized,
}

impl RepoType {
    /// Looks up a repository type by its numeric code.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => RepoType::RepoTypeUnspecified,
            1 => RepoType::RepoTypeLocal,
            2 => RepoType::RepoTypeRemote,
            3 => RepoType::RepoTypeFederated,
            _ => RepoType::Unrecognized,
        }
    }

    /// Looks up a repository type by its wire name.
    pub fn from_name(name: &str) -> Self {
        match name {
            "REPO_TYPE_UNSPECIFIED" => RepoType::RepoTypeUnspecified,
            "REPO_TYPE_LOCAL" => RepoType::RepoTypeLocal,
            "REPO_TYPE_REMOTE" => RepoType::RepoTypeRemote,
            "REPO_TYPE_FEDERATED" => RepoType::RepoTypeFederated,
            _ => RepoType::Unrecognized,
        }
    }

    /// Numeric code used by the host.
    pub fn code(self) -> i32 {
        match self {
            RepoType::RepoTypeUnspecified => 0,
            RepoType::RepoTypeLocal => 1,
            RepoType::RepoTypeRemote => 2,
            RepoType::RepoTypeFederated => 3,
            RepoType::Unrecognized => -1,
        }
    }
}

impl<'de> Deserialize<'de> for RepoType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match wire::enum_repr(deserializer)? {
            EnumRepr::Unset => RepoType::default(),
            EnumRepr::Code(code) => RepoType::from_code(code),
            EnumRepr::Name(name) => RepoType::from_name(&name),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_path_new_derives_id() {
        let path = RepoPath::new("my-local-repo", "/test/artifact");
        assert_eq!(path.id, "my-local-repo:/test/artifact");
        assert!(!path.is_root);
        assert!(!path.is_folder);

        let root = RepoPath::new("c1", "/");
        assert!(root.is_root);
    }

    #[test]
    fn deserializes_camel_case_payload() {
        let raw = r#"{
            "metadata": {
                "repoPath": {
                    "key": "virtual-repo",
                    "path": "a/b.jar",
                    "id": "virtual-repo:a/b.jar"
                },
                "originalRepoPath": {"key": "libs-local", "path": "a/b.jar"},
                "headOnly": true,
                "repoType": "REPO_TYPE_LOCAL"
            },
            "headers": {"Accept": {"value": ["*/*"]}},
            "userContext": {"id": "anonymous", "isToken": false, "realm": "anonymous"}
        }"#;

        let req: BeforeDownloadRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(req.requested_repo_key(), Some("virtual-repo"));
        assert_eq!(req.original_repo_key(), Some("libs-local"));
        let meta = req.metadata.as_ref().unwrap();
        assert!(meta.head_only);
        assert_eq!(meta.repo_type, RepoType::RepoTypeLocal);
        assert_eq!(req.headers["Accept"].value, vec!["*/*".to_string()]);
        assert_eq!(req.user_context.unwrap().id.as_deref(), Some("anonymous"));
    }

    #[test]
    fn missing_fields_take_defaults() {
        let req: BeforeDownloadRequest = serde_json::from_str("{}").unwrap();
        assert!(req.metadata.is_none());
        assert!(req.user_context.is_none());
        assert!(req.headers.is_empty());
        assert_eq!(req.requested_repo_key(), None);

        let ctx: UserContext = serde_json::from_str(r#"{"realm": "internal"}"#).unwrap();
        assert_eq!(ctx.id, None);
        assert!(!ctx.is_token);
    }

    #[test]
    fn unknown_repo_type_is_unrecognized() {
        let meta: DownloadMetadata =
            serde_json::from_str(r#"{"repoType": "REPO_TYPE_DISTRIBUTION"}"#).unwrap();
        assert_eq!(meta.repo_type, RepoType::Unrecognized);
        assert_eq!(meta.repo_type.code(), -1);
    }

    #[test]
    fn repo_type_accepts_codes_and_names() {
        for (raw, expected) in [
            ("1", RepoType::RepoTypeLocal),
            ("2", RepoType::RepoTypeRemote),
            ("\"3\"", RepoType::RepoTypeFederated),
            ("\"REPO_TYPE_REMOTE\"", RepoType::RepoTypeRemote),
            ("-1", RepoType::Unrecognized),
            ("42", RepoType::Unrecognized),
            ("null", RepoType::RepoTypeUnspecified),
        ] {
            let repo_type: RepoType = serde_json::from_str(raw).unwrap();
            assert_eq!(repo_type, expected, "input {}", raw);
        }
        assert_eq!(RepoType::from_code(1).code(), 1);
    }

    #[test]
    fn nulls_read_as_missing_data() {
        let raw = r#"{
            "metadata": {
                "repoPath": {"key": null, "path": null, "id": null, "isRoot": null},
                "originalRepoPath": null,
                "name": null,
                "headOnly": null,
                "lastModified": null,
                "repoType": null
            },
            "headers": null,
            "userContext": {"id": null, "isToken": null, "realm": null}
        }"#;

        let req: BeforeDownloadRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(req.requested_repo_key(), Some(""));
        assert_eq!(req.original_repo_key(), None);
        assert!(req.headers.is_empty());
        let meta = req.metadata.as_ref().unwrap();
        assert_eq!(meta.name, "");
        assert!(!meta.head_only);
        assert_eq!(meta.repo_type, RepoType::RepoTypeUnspecified);
        assert_eq!(req.user_context, Some(UserContext::default()));
    }

    #[test]
    fn scalars_accept_alternate_encodings() {
        let raw = r#"{
            "lastModified": "1700000000000",
            "modificationTime": 1700000000000,
            "ifModifiedSince": "",
            "headOnly": "true",
            "checksum": 0,
            "repoType": 1
        }"#;

        let meta: DownloadMetadata = serde_json::from_str(raw).unwrap();
        assert_eq!(meta.last_modified, 1_700_000_000_000);
        assert_eq!(meta.modification_time, 1_700_000_000_000);
        assert_eq!(meta.if_modified_since, 0);
        assert!(meta.head_only);
        assert!(!meta.checksum);
        assert_eq!(meta.repo_type, RepoType::RepoTypeLocal);
    }

    #[test]
    fn unreadable_shapes_are_rejected() {
        assert!(serde_json::from_str::<RepoPath>(r#"{"key": {"name": "x"}}"#).is_err());
        assert!(serde_json::from_str::<UserContext>(r#"{"id": ["anonymous"]}"#).is_err());
        assert!(serde_json::from_str::<DownloadMetadata>(r#"{"repoType": {}}"#).is_err());
    }

    #[test]
    fn user_context_constructors() {
        let ctx = UserContext::new("alice", "internal");
        assert_eq!(ctx.id.as_deref(), Some("alice"));
        assert_eq!(ctx.realm.as_deref(), Some("internal"));

        let ctx = UserContext::with_id("anonymous");
        assert_eq!(ctx.realm, None);
    }
}
