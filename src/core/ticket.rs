//! core::ticket
//!
//! The [`Ticket`] entity: one tracker issue correlated to a commit.
//!
//! A ticket is built once from an [`IssueRecord`] and a [`PriorityTable`]
//! and never mutated afterwards. Its resolved fix version decides which
//! release bucket it lands in.

use std::cmp::Ordering;

use super::types::{IssueType, PriorityTable, TicketKey, TypeError};
use crate::tracker::IssueRecord;

/// Release name used when a ticket targets no real release.
pub const MASTER: &str = "master";

/// A single issue-tracker record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    key: TicketKey,
    issue_type: IssueType,
    rank: u8,
    summary: String,
    description: Option<String>,
    fix_versions: Vec<String>,
    fix_version: String,
}

impl Ticket {
    /// Build a ticket from a tracker record.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidTicketKey` if the record's key has no
    /// numeric suffix.
    pub fn from_record(record: IssueRecord, priorities: &PriorityTable) -> Result<Self, TypeError> {
        let key = TicketKey::new(record.key)?;
        let issue_type = IssueType::from_name(&record.issue_type);
        let rank = priorities.rank(&issue_type);
        let fix_version = resolve_fix_version(&record.fix_versions);

        Ok(Self {
            key,
            issue_type,
            rank,
            summary: record.summary,
            description: record.description,
            fix_versions: record.fix_versions,
            fix_version,
        })
    }

    pub fn key(&self) -> &TicketKey {
        &self.key
    }

    /// Numeric suffix of the key, used as the last ordering tie-break.
    pub fn number(&self) -> u64 {
        self.key.number()
    }

    pub fn issue_type(&self) -> &IssueType {
        &self.issue_type
    }

    /// Type-priority rank from the table the ticket was built with.
    pub fn rank(&self) -> u8 {
        self.rank
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Every fix version the tracker declares, in tracker order.
    pub fn fix_versions(&self) -> &[String] {
        &self.fix_versions
    }

    /// The single release this ticket is grouped under.
    pub fn fix_version(&self) -> &str {
        &self.fix_version
    }

    pub fn is_epic(&self) -> bool {
        self.issue_type.is_epic()
    }

    /// Release ordering: release name, then rank, then key number.
    pub fn release_order(&self, other: &Ticket) -> Ordering {
        self.fix_version
            .cmp(&other.fix_version)
            .then(self.rank.cmp(&other.rank))
            .then(self.number().cmp(&other.number()))
    }
}

/// First declared release other than "master"; "master" if there is none.
fn resolve_fix_version(fix_versions: &[String]) -> String {
    fix_versions
        .iter()
        .find(|v| v.as_str() != MASTER)
        .cloned()
        .unwrap_or_else(|| MASTER.to_string())
}
