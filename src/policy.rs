use serde::Deserialize;

use crate::error::Error;

/// Substring that marks a repository as closed to anonymous users.
pub const DEFAULT_BLOCKED_SUBSTRING: &str = "local";

/// Repository key that stays open to anonymous users despite its name.
pub const DEFAULT_EXEMPT_KEY: &str = "c1";

/// The repository-name policy applied to anonymous downloads.
///
/// A repository key is blocked when its lower-cased form contains the
/// blocked substring and it is not one of the exempt keys. Both checks
/// ignore case; the key itself is never rewritten.
///
/// # Examples
///
/// ```
/// use download_gate::DownloadPolicy;
///
/// let policy = DownloadPolicy::default();
/// assert!(policy.block_match("My-Local-Repo"));
/// assert!(!policy.block_match("C1"));
/// assert!(!policy.block_match("remote-repo"));
///
/// let policy = DownloadPolicy::default().exempt("public-local");
/// assert!(!policy.block_match("PUBLIC-LOCAL"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadPolicy {
    blocked_substring: String,
    exemptions: Vec<String>,
}

impl Default for DownloadPolicy {
    fn default() -> Self {
        Self {
            blocked_substring: DEFAULT_BLOCKED_SUBSTRING.to_string(),
            exemptions: vec![DEFAULT_EXEMPT_KEY.to_string()],
        }
    }
}

/// On-the-wire shape of a policy document.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
struct PolicyDocument {
    blocked_substring: Option<String>,
    exempt_repositories: Option<Vec<String>>,
}

impl DownloadPolicy {
    /// Creates a policy that blocks keys containing `substring` and exempts nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPolicy`] if `substring` is empty, since an empty
    /// substring would match every repository.
    pub fn blocking(substring: impl AsRef<str>) -> Result<Self, Error> {
        let substring = substring.as_ref().to_lowercase();
        if substring.is_empty() {
            return Err(Error::invalid_policy(
                "blocked substring must not be empty",
            ));
        }
        Ok(Self {
            blocked_substring: substring,
            exemptions: Vec::new(),
        })
    }

    /// Adds an exempt repository key, deduplicating case-insensitively.
    ///
    /// Returns the updated policy to allow method chaining.
    pub fn exempt(mut self, key: impl AsRef<str>) -> Self {
        let key = key.as_ref().to_lowercase();
        if !self.exemptions.contains(&key) {
            self.exemptions.push(key);
        }
        self
    }

    /// Parses a policy from a JSON settings document.
    ///
    /// Recognised fields are `blockedSubstring` and `exemptRepositories`.
    /// A missing field keeps its default; an explicit empty exemption list
    /// removes the default exemption.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPolicy`] if the document is not valid JSON, has
    /// unknown fields, or sets an empty blocked substring.
    ///
    /// # Examples
    ///
    /// ```
    /// use download_gate::DownloadPolicy;
    ///
    /// let policy = DownloadPolicy::from_json(r#"{"exemptRepositories": ["c1", "docs-local"]}"#)
    ///     .expect("valid policy");
    /// assert!(!policy.block_match("docs-local"));
    /// assert!(policy.block_match("libs-local"));
    /// ```
    pub fn from_json(raw: &str) -> Result<Self, Error> {
        let doc: PolicyDocument =
            serde_json::from_str(raw).map_err(|e| Error::invalid_policy(e.to_string()))?;

        let mut policy = match doc.blocked_substring {
            Some(substring) => Self::blocking(substring)?,
            None => Self {
                blocked_substring: DEFAULT_BLOCKED_SUBSTRING.to_string(),
                exemptions: Vec::new(),
            },
        };

        let exemptions = doc
            .exempt_repositories
            .unwrap_or_else(|| vec![DEFAULT_EXEMPT_KEY.to_string()]);
        for key in exemptions {
            policy = policy.exempt(key);
        }

        Ok(policy)
    }

    /// Returns the lower-cased blocked substring.
    pub fn blocked_substring(&self) -> &str {
        &self.blocked_substring
    }

    /// Returns the lower-cased exempt keys in insertion order.
    pub fn exemptions(&self) -> &[String] {
        &self.exemptions
    }

    /// Returns `true` if `key` is exempt from the policy, ignoring case.
    pub fn is_exempt(&self, key: &str) -> bool {
        let key = key.to_lowercase();
        self.exemptions.iter().any(|e| *e == key)
    }

    /// Returns `true` if an anonymous download from `key` must be stopped.
    pub fn block_match(&self, key: &str) -> bool {
        let lowered = key.to_lowercase();
        lowered.contains(self.blocked_substring.as_str())
            && !self.exemptions.iter().any(|e| *e == lowered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_blocks_local() {
        let policy = DownloadPolicy::default();
        assert_eq!(policy.blocked_substring(), "local");
        assert_eq!(policy.exemptions(), ["c1".to_string()]);

        assert!(policy.block_match("my-local-repo"));
        assert!(policy.block_match("remote-local-repo"));
        assert!(policy.block_match("LOCAL"));
        assert!(policy.block_match("LibsLocalRelease"));
        assert!(!policy.block_match("remote-repo"));
        assert!(!policy.block_match(""));
    }

    #[test]
    fn c1_is_exempt_in_any_case() {
        let policy = DownloadPolicy::default();
        assert!(policy.is_exempt("c1"));
        assert!(policy.is_exempt("C1"));
        assert!(!policy.block_match("C1"));
        assert!(!policy.is_exempt("c1-local"));
        assert!(policy.block_match("c1-local"));
    }

    #[test]
    fn exempt_deduplicates() {
        let policy = DownloadPolicy::default().exempt("C1").exempt("docs-local");
        assert_eq!(
            policy.exemptions(),
            ["c1".to_string(), "docs-local".to_string()]
        );
        assert!(!policy.block_match("Docs-Local"));
    }

    #[test]
    fn blocking_rejects_empty_substring() {
        let err = DownloadPolicy::blocking("").unwrap_err();
        assert!(matches!(err, Error::InvalidPolicy { .. }));
    }

    #[test]
    fn blocking_lowercases_substring() {
        let policy = DownloadPolicy::blocking("Internal").unwrap();
        assert!(policy.block_match("team-internal"));
        assert!(policy.exemptions().is_empty());
    }

    #[test]
    fn from_json_defaults_match_default_policy() {
        let policy = DownloadPolicy::from_json("{}").unwrap();
        assert_eq!(policy, DownloadPolicy::default());
    }

    #[test]
    fn from_json_empty_exemptions_removes_c1() {
        let policy = DownloadPolicy::from_json(r#"{"exemptRepositories": []}"#).unwrap();
        assert!(policy.exemptions().is_empty());
        assert!(!policy.is_exempt("c1"));
        assert_eq!(policy.blocked_substring(), "local");
    }

    #[test]
    fn from_json_rejects_bad_documents() {
        assert!(DownloadPolicy::from_json("not json").is_err());
        assert!(DownloadPolicy::from_json(r#"{"blockedSubstring": ""}"#).is_err());
        assert!(DownloadPolicy::from_json(r#"{"unknown": true}"#).is_err());
    }
}
