//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`TicketKey`] - Validated issue key (`PROJECT-123`)
//! - [`Oid`] - Git object identifier (SHA)
//! - [`IssueType`] - Issue-tracker type category
//! - [`PriorityTable`] - Fixed issue-type to rank mapping used for ordering
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, preventing entire classes of bugs.
//!
//! # Examples
//!
//! ```
//! use fixnotes::core::types::{IssueType, PriorityTable, TicketKey};
//!
//! let key = TicketKey::new("ABC-123").unwrap();
//! assert_eq!(key.number(), 123);
//!
//! let table = PriorityTable::DUAL_FILE;
//! assert!(table.rank(&IssueType::Task) < table.rank(&IssueType::Bug));
//!
//! assert!(TicketKey::new("ABC").is_err());
//! assert!(TicketKey::new("ABC-x1").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid ticket key: {0}")]
    InvalidTicketKey(String),

    #[error("invalid object id: {0}")]
    InvalidOid(String),
}

/// A validated issue key such as `ABC-123`.
///
/// The key must consist of a non-empty project prefix, a hyphen, and a
/// numeric suffix. The suffix is parsed once at construction and exposed
/// through [`TicketKey::number`] for tie-break ordering.
///
/// # Example
///
/// ```
/// use fixnotes::core::types::TicketKey;
///
/// let key = TicketKey::new("DEV-42").unwrap();
/// assert_eq!(key.as_str(), "DEV-42");
/// assert_eq!(key.number(), 42);
///
/// assert!(TicketKey::new("").is_err());
/// assert!(TicketKey::new("-42").is_err());
/// assert!(TicketKey::new("DEV-").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TicketKey {
    raw: String,
    number: u64,
}

impl TicketKey {
    /// Create a new validated ticket key.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidTicketKey` if the key has no hyphen, an
    /// empty project prefix, or a suffix that is not a decimal number.
    pub fn new(key: impl Into<String>) -> Result<Self, TypeError> {
        let raw = key.into();
        let number = Self::parse_number(&raw)?;
        Ok(Self { raw, number })
    }

    fn parse_number(key: &str) -> Result<u64, TypeError> {
        let (project, rest) = key
            .split_once('-')
            .ok_or_else(|| TypeError::InvalidTicketKey(format!("'{key}' has no '-'")))?;

        if project.is_empty() {
            return Err(TypeError::InvalidTicketKey(format!(
                "'{key}' has an empty project prefix"
            )));
        }

        // Only the segment after the first hyphen counts as the number.
        let digits = rest.split('-').next().unwrap_or_default();
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(TypeError::InvalidTicketKey(format!(
                "'{key}' does not have a numeric suffix"
            )));
        }

        digits
            .parse()
            .map_err(|_| TypeError::InvalidTicketKey(format!("'{key}' suffix is out of range")))
    }

    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The numeric suffix.
    pub fn number(&self) -> u64 {
        self.number
    }
}

impl TryFrom<String> for TicketKey {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<TicketKey> for String {
    fn from(key: TicketKey) -> Self {
        key.raw
    }
}

impl AsRef<str> for TicketKey {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl std::fmt::Display for TicketKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// A Git object identifier (SHA-1 or SHA-256).
///
/// OIDs are normalized to lowercase for consistency.
///
/// # Example
///
/// ```
/// use fixnotes::core::types::Oid;
///
/// let oid = Oid::new("ABC123DEF4567890ABC123DEF4567890ABC12345").unwrap();
/// assert_eq!(oid.as_str(), "abc123def4567890abc123def4567890abc12345");
/// assert_eq!(oid.short(7), "abc123d");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Oid(String);

impl Oid {
    /// Create a new validated object id.
    ///
    /// The OID is normalized to lowercase.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidOid` if the string is not a valid hex OID.
    pub fn new(oid: impl Into<String>) -> Result<Self, TypeError> {
        let oid = oid.into().to_ascii_lowercase();
        Self::validate(&oid)?;
        Ok(Self(oid))
    }

    /// Get an abbreviated form of the OID.
    ///
    /// Returns the first `len` characters. If `len` exceeds the OID length,
    /// returns the full OID.
    pub fn short(&self, len: usize) -> &str {
        let end = len.min(self.0.len());
        &self.0[..end]
    }

    fn validate(oid: &str) -> Result<(), TypeError> {
        // SHA-1 is 40 hex chars, SHA-256 is 64
        if oid.len() != 40 && oid.len() != 64 {
            return Err(TypeError::InvalidOid(format!(
                "expected 40 or 64 hex characters, got {}",
                oid.len()
            )));
        }
        if !oid.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TypeError::InvalidOid(
                "object id must be hexadecimal".into(),
            ));
        }
        Ok(())
    }

    /// Get the OID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Oid {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Oid> for String {
    fn from(oid: Oid) -> Self {
        oid.0
    }
}

impl std::fmt::Display for Oid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Issue type as reported by the tracker.
///
/// Known types get their own variant; anything else is carried verbatim in
/// [`IssueType::Other`] so it can still be displayed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IssueType {
    Epic,
    Task,
    NewFeature,
    /// Matches the tracker's spelling, "Improvment".
    Improvement,
    Bug,
    SubTask,
    Other(String),
}

impl IssueType {
    /// Classify a tracker type name.
    ///
    /// Matching is exact; the tracker's own spelling is authoritative.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Epic" => IssueType::Epic,
            "Task" => IssueType::Task,
            "New Feature" => IssueType::NewFeature,
            "Improvment" => IssueType::Improvement,
            "Bug" => IssueType::Bug,
            "Sub-task" => IssueType::SubTask,
            other => IssueType::Other(other.to_string()),
        }
    }

    /// The tracker's name for this type.
    pub fn name(&self) -> &str {
        match self {
            IssueType::Epic => "Epic",
            IssueType::Task => "Task",
            IssueType::NewFeature => "New Feature",
            IssueType::Improvement => "Improvment",
            IssueType::Bug => "Bug",
            IssueType::SubTask => "Sub-task",
            IssueType::Other(name) => name,
        }
    }

    /// Label shown in notes that omit issue keys ("Bug" reads as "Fix").
    pub fn public_label(&self) -> &str {
        match self {
            IssueType::Bug => "Fix",
            other => other.name(),
        }
    }

    pub fn is_epic(&self) -> bool {
        matches!(self, IssueType::Epic)
    }
}

impl std::fmt::Display for IssueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Fixed mapping from issue type to a numeric rank.
///
/// Ranks drive sort order and the "below Bug" filter for releases with
/// epics. They are never displayed. Two tables exist, one per rendering
/// mode, and they disagree on the absolute values; both are kept as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityTable {
    pub name: &'static str,
    pub epic: u8,
    pub new_feature: u8,
    pub task: u8,
    pub improvement: u8,
    pub bug: u8,
    pub sub_task: u8,
    pub other: u8,
}

impl PriorityTable {
    /// Ranks used by the dual-file (with issue keys) notes.
    pub const DUAL_FILE: PriorityTable = PriorityTable {
        name: "dual-file",
        epic: 3,
        new_feature: 3,
        task: 4,
        improvement: 4,
        bug: 5,
        sub_task: 7,
        other: 7,
    };

    /// Ranks used by the single changelog file and chat message.
    pub const CHAT: PriorityTable = PriorityTable {
        name: "chat",
        epic: 1,
        new_feature: 1,
        task: 2,
        improvement: 2,
        bug: 3,
        sub_task: 5,
        other: 5,
    };

    /// Rank for an issue type. Lower sorts first.
    pub fn rank(&self, issue_type: &IssueType) -> u8 {
        match issue_type {
            IssueType::Epic => self.epic,
            IssueType::NewFeature => self.new_feature,
            IssueType::Task => self.task,
            IssueType::Improvement => self.improvement,
            IssueType::Bug => self.bug,
            IssueType::SubTask => self.sub_task,
            IssueType::Other(_) => self.other,
        }
    }

    /// Rank of "Bug"; releases with epics only list tickets ranked below it.
    pub fn bug_rank(&self) -> u8 {
        self.bug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod ticket_key {
        use super::*;

        #[test]
        fn valid_keys() {
            assert!(TicketKey::new("A-1").is_ok());
            assert!(TicketKey::new("ABCDE-99999").is_ok());
            assert!(TicketKey::new("dev-7").is_ok());
            assert!(TicketKey::new("AB2-3").is_ok());
        }

        #[test]
        fn number_is_parsed() {
            assert_eq!(TicketKey::new("ABC-0012").unwrap().number(), 12);
            assert_eq!(TicketKey::new("X-1-2").unwrap().number(), 1);
        }

        #[test]
        fn invalid_keys() {
            assert!(TicketKey::new("").is_err());
            assert!(TicketKey::new("ABC").is_err());
            assert!(TicketKey::new("-1").is_err());
            assert!(TicketKey::new("ABC-").is_err());
            assert!(TicketKey::new("ABC-1a").is_err());
            assert!(TicketKey::new("ABC-99999999999999999999999").is_err());
        }

        #[test]
        fn serde_roundtrip() {
            let key = TicketKey::new("DEV-5").unwrap();
            let json = serde_json::to_string(&key).unwrap();
            assert_eq!(json, "\"DEV-5\"");
            let parsed: TicketKey = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, key);
        }

        #[test]
        fn serde_rejects_invalid() {
            let result: Result<TicketKey, _> = serde_json::from_str("\"nope\"");
            assert!(result.is_err());
        }
    }

    mod oid {
        use super::*;

        #[test]
        fn normalizes_case() {
            let oid = Oid::new("ABCDEF0123456789ABCDEF0123456789ABCDEF01").unwrap();
            assert_eq!(oid.as_str(), "abcdef0123456789abcdef0123456789abcdef01");
        }

        #[test]
        fn rejects_bad_length_and_chars() {
            assert!(Oid::new("abc").is_err());
            assert!(Oid::new("g".repeat(40)).is_err());
        }
    }

    mod issue_type {
        use super::*;

        #[test]
        fn known_names_roundtrip() {
            for name in ["Epic", "Task", "New Feature", "Improvment", "Bug", "Sub-task"] {
                assert_eq!(IssueType::from_name(name).name(), name);
            }
        }

        #[test]
        fn unknown_names_are_kept() {
            let t = IssueType::from_name("Story");
            assert_eq!(t, IssueType::Other("Story".to_string()));
            assert_eq!(t.name(), "Story");
        }

        #[test]
        fn bug_reads_as_fix() {
            assert_eq!(IssueType::Bug.public_label(), "Fix");
            assert_eq!(IssueType::Task.public_label(), "Task");
        }
    }

    mod priority_table {
        use super::*;

        #[test]
        fn dual_file_ranks() {
            let t = PriorityTable::DUAL_FILE;
            assert_eq!(t.rank(&IssueType::Epic), 3);
            assert_eq!(t.rank(&IssueType::Task), 4);
            assert_eq!(t.rank(&IssueType::Bug), 5);
            assert_eq!(t.rank(&IssueType::Other("Story".into())), 7);
        }

        #[test]
        fn chat_ranks() {
            let t = PriorityTable::CHAT;
            assert_eq!(t.rank(&IssueType::Epic), 1);
            assert_eq!(t.rank(&IssueType::Task), 2);
            assert_eq!(t.bug_rank(), 3);
        }

        #[test]
        fn bug_outranks_features_in_both_tables() {
            for t in [PriorityTable::DUAL_FILE, PriorityTable::CHAT] {
                assert!(t.rank(&IssueType::NewFeature) < t.bug_rank());
                assert!(t.rank(&IssueType::Improvement) < t.bug_rank());
                assert!(t.rank(&IssueType::SubTask) > t.bug_rank());
            }
        }
    }
}
