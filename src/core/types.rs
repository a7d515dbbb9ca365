//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`BranchName`] - Validated branch name (ASCII alphanumeric)
//! - [`TrackedPath`] - Normalized repository-relative file path
//! - [`RevisionNumber`] - 1-based revision ordinal
//! - [`SyncTarget`] - Checkout target: a revision number or `HEAD`
//! - [`ContentHash`] - SHA-256 of stored revision content
//! - [`UtcTimestamp`] - RFC3339 timestamp
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, preventing entire classes of bugs.
//!
//! # Examples
//!
//! ```
//! use vellum::core::types::{BranchName, RevisionNumber, TrackedPath};
//!
//! // Valid constructions
//! let branch = BranchName::new("newBr1").unwrap();
//! let path = TrackedPath::new("src/main.c").unwrap();
//! let rev = RevisionNumber::new(3).unwrap();
//!
//! // Invalid constructions fail at creation time
//! assert!(BranchName::new("feature/foo").is_err());
//! assert!(TrackedPath::new("../escape.c").is_err());
//! assert!(RevisionNumber::new(0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("invalid file path: {0}")]
    InvalidTrackedPath(String),

    #[error("invalid revision number: {0}")]
    InvalidRevisionNumber(String),

    #[error("invalid revision target: {0}")]
    InvalidRevisionTarget(String),

    #[error("invalid content hash: {0}")]
    InvalidContentHash(String),
}

/// A validated branch name.
///
/// Branch names are one or more ASCII alphanumeric characters. There is no
/// namespacing: `/`, `.`, `-` and every other punctuation character are
/// rejected, which keeps branch names safe to use directly as directory
/// names in the on-disk store.
///
/// # Example
///
/// ```
/// use vellum::core::types::BranchName;
///
/// let name = BranchName::new("newBr1").unwrap();
/// assert_eq!(name.as_str(), "newBr1");
///
/// assert!(BranchName::new("").is_err());
/// assert!(BranchName::new("feature/foo").is_err());
/// assert!(BranchName::new("fix-123").is_err());
/// assert!(BranchName::new("has space").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BranchName(String);

impl BranchName {
    /// Create a new validated branch name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidBranchName` if the name is empty or
    /// contains anything other than ASCII alphanumerics.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(Self(name))
    }

    fn validate(name: &str) -> Result<(), TypeError> {
        if name.is_empty() {
            return Err(TypeError::InvalidBranchName(
                "branch name cannot be empty".into(),
            ));
        }

        if let Some(c) = name.chars().find(|c| !c.is_ascii_alphanumeric()) {
            return Err(TypeError::InvalidBranchName(format!(
                "branch name must be alphanumeric, found {c:?}"
            )));
        }

        Ok(())
    }

    /// Get the branch name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for BranchName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<BranchName> for String {
    fn from(name: BranchName) -> Self {
        name.0
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A normalized, repository-relative path to a tracked file.
///
/// Tracked paths always use `/` separators, never start with `/`, and
/// never contain `.` or `..` components, so the same string can serve as
/// a workspace location, a store key, and a display name.
///
/// Construction normalizes harmless noise (leading `./`, interior `.`
/// components) and rejects anything that could escape the repository
/// root or collide on disk.
///
/// # Example
///
/// ```
/// use vellum::core::types::TrackedPath;
///
/// let path = TrackedPath::new("./src/main.c").unwrap();
/// assert_eq!(path.as_str(), "src/main.c");
///
/// assert!(TrackedPath::new("").is_err());
/// assert!(TrackedPath::new("/etc/passwd").is_err());
/// assert!(TrackedPath::new("../escape.c").is_err());
/// assert!(TrackedPath::new("a//b").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TrackedPath(String);

impl TrackedPath {
    /// Create a new validated tracked path.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidTrackedPath` if the path is empty after
    /// normalization, absolute, contains `..`, empty, or control-character
    /// components, or uses `\` separators.
    pub fn new(path: impl Into<String>) -> Result<Self, TypeError> {
        let raw = path.into();

        if raw.contains('\\') {
            return Err(TypeError::InvalidTrackedPath(
                "path separator must be '/'".into(),
            ));
        }
        if raw.starts_with('/') {
            return Err(TypeError::InvalidTrackedPath(
                "path cannot be absolute".into(),
            ));
        }

        let mut components = Vec::new();
        for component in raw.split('/') {
            if component == "." {
                continue;
            }
            if component.is_empty() {
                return Err(TypeError::InvalidTrackedPath(
                    "path cannot contain empty components".into(),
                ));
            }
            if component == ".." {
                return Err(TypeError::InvalidTrackedPath(
                    "path cannot contain '..'".into(),
                ));
            }
            if component.chars().any(|c| c.is_ascii_control()) {
                return Err(TypeError::InvalidTrackedPath(
                    "path cannot contain control characters".into(),
                ));
            }
            components.push(component);
        }

        if components.is_empty() {
            return Err(TypeError::InvalidTrackedPath("path cannot be empty".into()));
        }

        Ok(Self(components.join("/")))
    }

    /// Create a tracked path from a filesystem path already known to be
    /// relative to the repository root.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidTrackedPath` for non-UTF-8 components or
    /// any path `TrackedPath::new` would reject.
    pub fn from_fs_relative(rel: &std::path::Path) -> Result<Self, TypeError> {
        let mut components = Vec::new();
        for component in rel.components() {
            let part = component
                .as_os_str()
                .to_str()
                .ok_or_else(|| TypeError::InvalidTrackedPath("path is not UTF-8".into()))?;
            components.push(part);
        }
        Self::new(components.join("/"))
    }

    /// Iterate over the path components.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }

    /// The final component (the file name).
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// Resolve this path under a base directory.
    pub fn to_fs_path(&self, base: &std::path::Path) -> std::path::PathBuf {
        let mut out = base.to_path_buf();
        for component in self.components() {
            out.push(component);
        }
        out
    }

    /// A sibling path with `suffix` appended to the file name.
    ///
    /// Used for derived artifacts such as merge suggestions. The suffix is
    /// assumed validated (nonempty, no separators).
    pub fn with_suffix(&self, suffix: &str) -> TrackedPath {
        TrackedPath(format!("{}{}", self.0, suffix))
    }

    /// Get the path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TrackedPath {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<TrackedPath> for String {
    fn from(path: TrackedPath) -> Self {
        path.0
    }
}

impl AsRef<str> for TrackedPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TrackedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A 1-based revision ordinal within one file's history.
///
/// Revisions are dense: a history with head `n` contains exactly
/// revisions `1..=n`.
///
/// # Example
///
/// ```
/// use vellum::core::types::RevisionNumber;
///
/// let rev = RevisionNumber::new(3).unwrap();
/// assert_eq!(rev.get(), 3);
/// assert_eq!(rev.next().get(), 4);
///
/// assert!(RevisionNumber::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct RevisionNumber(u64);

impl RevisionNumber {
    /// The first revision of any history.
    pub const FIRST: RevisionNumber = RevisionNumber(1);

    /// Create a new validated revision number.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidRevisionNumber` for zero.
    pub fn new(n: u64) -> Result<Self, TypeError> {
        if n == 0 {
            return Err(TypeError::InvalidRevisionNumber(
                "revision numbers start at 1".into(),
            ));
        }
        Ok(Self(n))
    }

    /// The raw ordinal.
    pub fn get(self) -> u64 {
        self.0
    }

    /// The revision after this one.
    pub fn next(self) -> RevisionNumber {
        RevisionNumber(self.0 + 1)
    }

    /// The revision before this one, if any.
    pub fn previous(self) -> Option<RevisionNumber> {
        if self.0 > 1 {
            Some(RevisionNumber(self.0 - 1))
        } else {
            None
        }
    }
}

impl TryFrom<u64> for RevisionNumber {
    type Error = TypeError;

    fn try_from(n: u64) -> Result<Self, Self::Error> {
        Self::new(n)
    }
}

impl From<RevisionNumber> for u64 {
    fn from(rev: RevisionNumber) -> Self {
        rev.0
    }
}

impl std::fmt::Display for RevisionNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The target of a checkout: a specific revision or the history head.
///
/// # Example
///
/// ```
/// use vellum::core::types::{RevisionNumber, SyncTarget};
///
/// assert_eq!(SyncTarget::parse("HEAD").unwrap(), SyncTarget::Head);
/// assert_eq!(
///     SyncTarget::parse("3").unwrap(),
///     SyncTarget::Revision(RevisionNumber::new(3).unwrap())
/// );
///
/// // Non-numeric targets are malformed input.
/// assert!(SyncTarget::parse("three").is_err());
/// // Zero and negatives parse as numbers but are never valid revisions.
/// assert!(SyncTarget::parse("0").is_err());
/// assert!(SyncTarget::parse("-2").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncTarget {
    /// The latest revision, whatever its number.
    Head,
    /// A specific revision.
    Revision(RevisionNumber),
}

impl SyncTarget {
    /// Parse a command-line revision argument.
    ///
    /// `HEAD` (exact, case-sensitive) selects the head. Anything else must
    /// be an integer; values below 1 fail with
    /// `TypeError::InvalidRevisionNumber` so callers can report them as
    /// out-of-range rather than malformed.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidRevisionTarget` for non-numeric input and
    /// `TypeError::InvalidRevisionNumber` for integers below 1.
    pub fn parse(raw: &str) -> Result<Self, TypeError> {
        if raw == "HEAD" {
            return Ok(SyncTarget::Head);
        }
        let n: i64 = raw.parse().map_err(|_| {
            TypeError::InvalidRevisionTarget(format!("expected a number or HEAD, got {raw:?}"))
        })?;
        if n < 1 {
            return Err(TypeError::InvalidRevisionNumber(format!(
                "revision numbers start at 1, got {n}"
            )));
        }
        Ok(SyncTarget::Revision(RevisionNumber(n as u64)))
    }
}

impl std::fmt::Display for SyncTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncTarget::Head => write!(f, "HEAD"),
            SyncTarget::Revision(rev) => write!(f, "{rev}"),
        }
    }
}

/// The SHA-256 digest of one revision's content, hex-encoded.
///
/// Stored alongside each revision record and checked on restore to detect
/// bit rot in the compressed blobs.
///
/// # Example
///
/// ```
/// use vellum::core::types::ContentHash;
///
/// let hash = ContentHash::compute(b"hello\n");
/// assert_eq!(hash.as_str().len(), 64);
///
/// // Same bytes, same digest
/// assert_eq!(hash, ContentHash::compute(b"hello\n"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentHash(String);

impl ContentHash {
    /// Compute the digest of raw (uncompressed) content bytes.
    pub fn compute(content: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(content);
        Self(hex::encode(hasher.finalize()))
    }

    /// Create from an existing hex digest string.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidContentHash` unless the string is exactly
    /// 64 hex characters.
    pub fn new(hash: impl Into<String>) -> Result<Self, TypeError> {
        let hash = hash.into().to_ascii_lowercase();
        if hash.len() != 64 {
            return Err(TypeError::InvalidContentHash(format!(
                "expected 64 hex characters, got {}",
                hash.len()
            )));
        }
        if !hash.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TypeError::InvalidContentHash(
                "content hash must be hexadecimal".into(),
            ));
        }
        Ok(Self(hash))
    }

    /// Get the digest as a hex string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ContentHash {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ContentHash> for String {
    fn from(hash: ContentHash) -> Self {
        hash.0
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A UTC timestamp in RFC3339 format.
///
/// # Example
///
/// ```
/// use vellum::core::types::UtcTimestamp;
///
/// let now = UtcTimestamp::now();
/// println!("Current time: {}", now);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtcTimestamp(chrono::DateTime<chrono::Utc>);

impl UtcTimestamp {
    /// Create a timestamp for the current moment.
    pub fn now() -> Self {
        Self(chrono::Utc::now())
    }

    /// Create a timestamp from a chrono DateTime.
    pub fn from_datetime(dt: chrono::DateTime<chrono::Utc>) -> Self {
        Self(dt)
    }

    /// Get the underlying datetime.
    pub fn as_datetime(&self) -> &chrono::DateTime<chrono::Utc> {
        &self.0
    }
}

impl std::fmt::Display for UtcTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod branch_name {
        use super::*;

        #[test]
        fn valid_branch_names() {
            assert!(BranchName::new("main").is_ok());
            assert!(BranchName::new("newBr1").is_ok());
            assert!(BranchName::new("B").is_ok());
            assert!(BranchName::new("release2").is_ok());
            assert!(BranchName::new("0").is_ok());
        }

        #[test]
        fn empty_name_rejected() {
            assert!(BranchName::new("").is_err());
        }

        #[test]
        fn punctuation_rejected() {
            assert!(BranchName::new("feature/foo").is_err());
            assert!(BranchName::new("fix-123").is_err());
            assert!(BranchName::new("with.dot").is_err());
            assert!(BranchName::new("has space").is_err());
            assert!(BranchName::new("under_score").is_err());
        }

        #[test]
        fn control_chars_rejected() {
            assert!(BranchName::new("has\ttab").is_err());
            assert!(BranchName::new("has\nnewline").is_err());
        }

        #[test]
        fn non_ascii_rejected() {
            assert!(BranchName::new("brücke").is_err());
        }

        #[test]
        fn serde_roundtrip() {
            let name = BranchName::new("newBr1").unwrap();
            let json = serde_json::to_string(&name).unwrap();
            let parsed: BranchName = serde_json::from_str(&json).unwrap();
            assert_eq!(name, parsed);
        }

        #[test]
        fn serde_rejects_invalid() {
            assert!(serde_json::from_str::<BranchName>("\"not/valid\"").is_err());
        }
    }

    mod tracked_path {
        use super::*;

        #[test]
        fn valid_paths() {
            assert!(TrackedPath::new("file.c").is_ok());
            assert!(TrackedPath::new("src/main.c").is_ok());
            assert!(TrackedPath::new("a/b/c/d.txt").is_ok());
        }

        #[test]
        fn normalizes_leading_dot_slash() {
            let path = TrackedPath::new("./src/main.c").unwrap();
            assert_eq!(path.as_str(), "src/main.c");
        }

        #[test]
        fn normalizes_interior_dot() {
            let path = TrackedPath::new("src/./main.c").unwrap();
            assert_eq!(path.as_str(), "src/main.c");
        }

        #[test]
        fn empty_rejected() {
            assert!(TrackedPath::new("").is_err());
            assert!(TrackedPath::new(".").is_err());
            assert!(TrackedPath::new("./").is_err());
        }

        #[test]
        fn absolute_rejected() {
            assert!(TrackedPath::new("/etc/passwd").is_err());
        }

        #[test]
        fn parent_traversal_rejected() {
            assert!(TrackedPath::new("../escape.c").is_err());
            assert!(TrackedPath::new("a/../b.c").is_err());
        }

        #[test]
        fn empty_component_rejected() {
            assert!(TrackedPath::new("a//b").is_err());
            assert!(TrackedPath::new("a/b/").is_err());
        }

        #[test]
        fn backslash_rejected() {
            assert!(TrackedPath::new("a\\b.c").is_err());
        }

        #[test]
        fn components_and_file_name() {
            let path = TrackedPath::new("src/sub/main.c").unwrap();
            let parts: Vec<&str> = path.components().collect();
            assert_eq!(parts, vec!["src", "sub", "main.c"]);
            assert_eq!(path.file_name(), "main.c");
        }

        #[test]
        fn to_fs_path_joins_components() {
            let path = TrackedPath::new("src/main.c").unwrap();
            let fs = path.to_fs_path(std::path::Path::new("/repo"));
            assert_eq!(fs, std::path::PathBuf::from("/repo/src/main.c"));
        }

        #[test]
        fn with_suffix_appends() {
            let path = TrackedPath::new("src/main.c").unwrap();
            assert_eq!(path.with_suffix(".suggest").as_str(), "src/main.c.suggest");
        }

        #[test]
        fn from_fs_relative() {
            let rel = std::path::Path::new("src").join("main.c");
            let path = TrackedPath::from_fs_relative(&rel).unwrap();
            assert_eq!(path.as_str(), "src/main.c");
        }

        #[test]
        fn serde_roundtrip() {
            let path = TrackedPath::new("src/main.c").unwrap();
            let json = serde_json::to_string(&path).unwrap();
            let parsed: TrackedPath = serde_json::from_str(&json).unwrap();
            assert_eq!(path, parsed);
        }
    }

    mod revision_number {
        use super::*;

        #[test]
        fn one_based() {
            assert!(RevisionNumber::new(0).is_err());
            assert_eq!(RevisionNumber::new(1).unwrap(), RevisionNumber::FIRST);
        }

        #[test]
        fn next_and_previous() {
            let rev = RevisionNumber::new(2).unwrap();
            assert_eq!(rev.next().get(), 3);
            assert_eq!(rev.previous(), Some(RevisionNumber::FIRST));
            assert_eq!(RevisionNumber::FIRST.previous(), None);
        }

        #[test]
        fn ordering() {
            let r1 = RevisionNumber::new(1).unwrap();
            let r5 = RevisionNumber::new(5).unwrap();
            assert!(r1 < r5);
        }

        #[test]
        fn serde_rejects_zero() {
            assert!(serde_json::from_str::<RevisionNumber>("0").is_err());
            assert!(serde_json::from_str::<RevisionNumber>("1").is_ok());
        }
    }

    mod sync_target {
        use super::*;

        #[test]
        fn head_is_exact() {
            assert_eq!(SyncTarget::parse("HEAD").unwrap(), SyncTarget::Head);
            assert!(SyncTarget::parse("head").is_err());
            assert!(SyncTarget::parse("Head").is_err());
        }

        #[test]
        fn numeric_targets() {
            assert_eq!(
                SyncTarget::parse("7").unwrap(),
                SyncTarget::Revision(RevisionNumber::new(7).unwrap())
            );
        }

        #[test]
        fn non_numeric_is_malformed() {
            assert!(matches!(
                SyncTarget::parse("three"),
                Err(TypeError::InvalidRevisionTarget(_))
            ));
        }

        #[test]
        fn zero_and_negative_are_out_of_range() {
            assert!(matches!(
                SyncTarget::parse("0"),
                Err(TypeError::InvalidRevisionNumber(_))
            ));
            assert!(matches!(
                SyncTarget::parse("-2"),
                Err(TypeError::InvalidRevisionNumber(_))
            ));
        }
    }

    mod content_hash {
        use super::*;

        #[test]
        fn deterministic() {
            let a = ContentHash::compute(b"content\n");
            let b = ContentHash::compute(b"content\n");
            assert_eq!(a, b);
        }

        #[test]
        fn different_content_different_hash() {
            assert_ne!(ContentHash::compute(b"a"), ContentHash::compute(b"b"));
        }

        #[test]
        fn hex_length() {
            assert_eq!(ContentHash::compute(b"").as_str().len(), 64);
        }

        #[test]
        fn parse_normalizes_case() {
            let computed = ContentHash::compute(b"x");
            let upper = computed.as_str().to_ascii_uppercase();
            assert_eq!(ContentHash::new(upper).unwrap(), computed);
        }

        #[test]
        fn invalid_rejected() {
            assert!(ContentHash::new("short").is_err());
            assert!(ContentHash::new("z".repeat(64)).is_err());
        }

        #[test]
        fn serde_roundtrip() {
            let hash = ContentHash::compute(b"content\n");
            let json = serde_json::to_string(&hash).unwrap();
            let parsed: ContentHash = serde_json::from_str(&json).unwrap();
            assert_eq!(hash, parsed);
        }
    }

    mod utc_timestamp {
        use super::*;

        #[test]
        fn now_works() {
            let ts = UtcTimestamp::now();
            assert!(ts.to_string().contains('T'));
        }

        #[test]
        fn serde_roundtrip() {
            let ts = UtcTimestamp::now();
            let json = serde_json::to_string(&ts).unwrap();
            let parsed: UtcTimestamp = serde_json::from_str(&json).unwrap();
            assert_eq!(ts, parsed);
        }
    }
}
