//! core::render
//!
//! Plain-text rendering of release notes.
//!
//! # Formats
//!
//! - [`TicketFormat::WithKey`]: `KEY - Type: Summary`
//! - [`TicketFormat::WithoutKey`]: `Type: Summary`, with "Bug" shown as "Fix"
//!
//! Epics in either format are followed by a newline and their description.
//! Every ticket becomes one `\n* ` bullet.
//!
//! # Selection
//!
//! Releases render in map order. A release with epics lists all epics and
//! then only the non-epic tickets ranked below "Bug". A release without
//! epics lists every non-epic ticket; the keyless format also leaves out
//! tasks there.
//!
//! Rendering is a pure function of the release map: rendering twice yields
//! the same text.

use chrono::NaiveDate;

use super::release::{FixVersion, ReleaseMap};
use super::ticket::Ticket;
use super::types::{IssueType, PriorityTable};

/// Per-ticket line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketFormat {
    WithKey,
    WithoutKey,
}

/// Format one ticket (without the bullet prefix).
pub fn format_ticket(ticket: &Ticket, format: TicketFormat) -> String {
    let mut line = match format {
        TicketFormat::WithKey => format!(
            "{} - {}: {}",
            ticket.key(),
            ticket.issue_type().name(),
            ticket.summary()
        ),
        TicketFormat::WithoutKey => format!(
            "{}: {}",
            ticket.issue_type().public_label(),
            ticket.summary()
        ),
    };

    if ticket.is_epic() {
        if let Some(description) = ticket.description() {
            line.push('\n');
            line.push_str(description);
        }
    }

    line
}

/// Tickets of one release that make it into the notes, in output order.
pub fn select_tickets<'a>(
    release: &'a FixVersion,
    format: TicketFormat,
    priorities: &PriorityTable,
) -> Vec<&'a Ticket> {
    if release.has_epics() {
        let bug_rank = priorities.bug_rank();
        release
            .epics()
            .iter()
            .chain(release.tickets().iter().filter(|t| t.rank() < bug_rank))
            .collect()
    } else {
        release
            .tickets()
            .iter()
            .filter(|t| format == TicketFormat::WithKey || *t.issue_type() != IssueType::Task)
            .collect()
    }
}

/// Render the notes body for every release in the map.
pub fn render_notes(releases: &ReleaseMap, format: TicketFormat, priorities: &PriorityTable) -> String {
    let mut notes = String::new();
    for release in releases.iter() {
        for ticket in select_tickets(release, format, priorities) {
            notes.push_str("\n* ");
            notes.push_str(&format_ticket(ticket, format));
        }
    }
    notes
}

/// Heading placed above the notes in the changelog file and chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseHeader {
    /// Repository display name (chat message only)
    pub repo_name: Option<String>,
    /// Version the notes describe
    pub version: String,
    /// Release date
    pub date: NaiveDate,
}

impl ReleaseHeader {
    pub fn new(repo_name: Option<String>, version: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            repo_name,
            version: version.into(),
            date,
        }
    }

    fn date_line(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Section appended to the changelog file.
    pub fn changelog_section(&self, notes: &str) -> String {
        format!("## Version {}\n{}\n{}\n", self.version, self.date_line(), notes)
    }

    /// Markdown text posted to the chat webhook.
    pub fn chat_message(&self, notes: &str) -> String {
        let title = match &self.repo_name {
            Some(repo) => format!("{} {}", repo, self.version),
            None => format!("Version {}", self.version),
        };
        format!("*{}*\n{}\n{}", title, self.date_line(), notes)
    }
}

/// Decides whether rendered notes count as "empty" for downstream automation.
///
/// The stock check looks for a marker substring; callers can supply any
/// other predicate, including a closure.
pub trait EmptinessCheck: Send + Sync {
    fn is_empty(&self, notes: &str) -> bool;
}

impl<F> EmptinessCheck for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_empty(&self, notes: &str) -> bool {
        self(notes)
    }
}

/// Notes are empty unless they contain `marker`, compared case-insensitively.
///
/// With the default marker "dev" this is a heuristic on the project key: it
/// also fires on any summary, description or release name containing "dev".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerCheck {
    marker: String,
}

impl MarkerCheck {
    pub const DEFAULT_MARKER: &'static str = "dev";

    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into().to_lowercase(),
        }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }
}

impl Default for MarkerCheck {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MARKER)
    }
}

impl EmptinessCheck for MarkerCheck {
    fn is_empty(&self, notes: &str) -> bool {
        !notes.to_lowercase().contains(&self.marker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::IssueRecord;

    fn ticket_with(
        key: &str,
        issue_type: &str,
        fix_version: &str,
        description: Option<&str>,
        table: &PriorityTable,
    ) -> Ticket {
        let record = IssueRecord {
            key: key.to_string(),
            issue_type: issue_type.to_string(),
            summary: format!("{key} summary"),
            description: description.map(str::to_string),
            fix_versions: vec![fix_version.to_string()],
        };
        Ticket::from_record(record, table).unwrap()
    }

    fn ticket(key: &str, issue_type: &str, fix_version: &str) -> Ticket {
        ticket_with(key, issue_type, fix_version, None, &PriorityTable::DUAL_FILE)
    }

    mod format {
        use super::*;

        #[test]
        fn with_key() {
            let t = ticket("ABC-1", "Bug", "2.3");
            assert_eq!(format_ticket(&t, TicketFormat::WithKey), "ABC-1 - Bug: ABC-1 summary");
        }

        #[test]
        fn without_key_renames_bug() {
            let t = ticket("ABC-1", "Bug", "2.3");
            assert_eq!(format_ticket(&t, TicketFormat::WithoutKey), "Fix: ABC-1 summary");
        }

        #[test]
        fn epic_appends_description() {
            let t = ticket_with("ABC-2", "Epic", "2.3", Some("Big thing"), &PriorityTable::DUAL_FILE);
            assert_eq!(
                format_ticket(&t, TicketFormat::WithKey),
                "ABC-2 - Epic: ABC-2 summary\nBig thing"
            );
            assert_eq!(
                format_ticket(&t, TicketFormat::WithoutKey),
                "Epic: ABC-2 summary\nBig thing"
            );
        }

        #[test]
        fn epic_without_description_is_one_line() {
            let t = ticket("ABC-2", "Epic", "2.3");
            assert_eq!(format_ticket(&t, TicketFormat::WithKey), "ABC-2 - Epic: ABC-2 summary");
        }

        #[test]
        fn non_epic_ignores_description() {
            let t = ticket_with("ABC-3", "Task", "2.3", Some("hidden"), &PriorityTable::DUAL_FILE);
            assert!(!format_ticket(&t, TicketFormat::WithKey).contains("hidden"));
        }
    }

    mod selection {
        use super::*;

        #[test]
        fn no_epics_lists_everything_in_order() {
            let map = ReleaseMap::from_tickets(vec![
                ticket("ABC-2", "Task", "2.3"),
                ticket("ABC-1", "Bug", "2.3"),
            ]);
            let notes = render_notes(&map, TicketFormat::WithKey, &PriorityTable::DUAL_FILE);
            assert_eq!(
                notes,
                "\n* ABC-2 - Task: ABC-2 summary\n* ABC-1 - Bug: ABC-1 summary"
            );
        }

        #[test]
        fn epics_filter_bugs() {
            let map = ReleaseMap::from_tickets(vec![
                ticket("ABC-1", "Epic", "2.3"),
                ticket("ABC-2", "Bug", "2.3"),
                ticket("ABC-3", "New Feature", "2.3"),
            ]);
            let notes = render_notes(&map, TicketFormat::WithKey, &PriorityTable::DUAL_FILE);
            assert!(notes.contains("ABC-1 - Epic"));
            assert!(notes.contains("ABC-3 - New Feature"));
            assert!(!notes.contains("ABC-2"));
        }

        #[test]
        fn epics_come_first() {
            let map = ReleaseMap::from_tickets(vec![
                ticket("ABC-3", "Task", "2.3"),
                ticket("ABC-1", "Epic", "2.3"),
            ]);
            let notes = render_notes(&map, TicketFormat::WithKey, &PriorityTable::DUAL_FILE);
            assert_eq!(
                notes,
                "\n* ABC-1 - Epic: ABC-1 summary\n* ABC-3 - Task: ABC-3 summary"
            );
        }

        #[test]
        fn without_key_drops_tasks_when_no_epics() {
            let map = ReleaseMap::from_tickets(vec![
                ticket("ABC-2", "Task", "2.3"),
                ticket("ABC-1", "Bug", "2.3"),
            ]);
            let notes = render_notes(&map, TicketFormat::WithoutKey, &PriorityTable::DUAL_FILE);
            assert_eq!(notes, "\n* Fix: ABC-1 summary");
        }

        #[test]
        fn without_key_keeps_tasks_when_epics() {
            let map = ReleaseMap::from_tickets(vec![
                ticket("ABC-1", "Epic", "2.3"),
                ticket("ABC-2", "Task", "2.3"),
            ]);
            let notes = render_notes(&map, TicketFormat::WithoutKey, &PriorityTable::DUAL_FILE);
            assert!(notes.contains("Task: ABC-2 summary"));
        }

        #[test]
        fn master_epics_are_not_listed() {
            let map = ReleaseMap::from_tickets(vec![
                ticket("ABC-1", "Epic", "master"),
                ticket("ABC-2", "Bug", "master"),
            ]);
            let notes = render_notes(&map, TicketFormat::WithKey, &PriorityTable::DUAL_FILE);
            assert_eq!(notes, "\n* ABC-2 - Bug: ABC-2 summary");
        }

        #[test]
        fn chat_table_uses_its_own_bug_rank() {
            let table = PriorityTable::CHAT;
            let map = ReleaseMap::from_tickets(vec![
                ticket_with("ABC-1", "Epic", "2.3", None, &table),
                ticket_with("ABC-2", "Task", "2.3", None, &table),
                ticket_with("ABC-3", "Bug", "2.3", None, &table),
            ]);
            let notes = render_notes(&map, TicketFormat::WithoutKey, &table);
            assert!(notes.contains("Task: ABC-2 summary"));
            assert!(!notes.contains("ABC-3"));
        }

        #[test]
        fn releases_render_in_map_order() {
            let map = ReleaseMap::from_tickets(vec![
                ticket("ABC-1", "Bug", "3.0"),
                ticket("ABC-2", "Bug", "1.0"),
            ]);
            let notes = render_notes(&map, TicketFormat::WithKey, &PriorityTable::DUAL_FILE);
            let first = notes.find("ABC-1").unwrap();
            let second = notes.find("ABC-2").unwrap();
            assert!(first < second);
        }

        #[test]
        fn rendering_is_repeatable() {
            let map = ReleaseMap::from_tickets(vec![
                ticket("ABC-1", "Epic", "2.3"),
                ticket("ABC-2", "Task", "2.3"),
            ]);
            let a = render_notes(&map, TicketFormat::WithoutKey, &PriorityTable::DUAL_FILE);
            let b = render_notes(&map, TicketFormat::WithoutKey, &PriorityTable::DUAL_FILE);
            assert_eq!(a, b);
        }

        #[test]
        fn empty_map_renders_nothing() {
            let notes = render_notes(&ReleaseMap::new(), TicketFormat::WithKey, &PriorityTable::DUAL_FILE);
            assert!(notes.is_empty());
        }
    }

    mod header {
        use super::*;

        fn date() -> NaiveDate {
            NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
        }

        #[test]
        fn changelog_section() {
            let header = ReleaseHeader::new(None, "2.3", date());
            assert_eq!(
                header.changelog_section("\n* Fix: a"),
                "## Version 2.3\n2024-03-09\n\n* Fix: a\n"
            );
        }

        #[test]
        fn chat_message_with_repo() {
            let header = ReleaseHeader::new(Some("api".into()), "2.3", date());
            assert_eq!(header.chat_message("\n* Fix: a"), "*api 2.3*\n2024-03-09\n\n* Fix: a");
        }

        #[test]
        fn chat_message_without_repo() {
            let header = ReleaseHeader::new(None, "2.3", date());
            assert!(header.chat_message("").starts_with("*Version 2.3*"));
        }
    }

    mod emptiness {
        use super::*;

        #[test]
        fn marker_present_is_not_empty() {
            assert!(!MarkerCheck::default().is_empty("\n* DEV-1 - Bug: x"));
            assert!(!MarkerCheck::default().is_empty("Developer docs"));
        }

        #[test]
        fn marker_absent_is_empty() {
            assert!(MarkerCheck::default().is_empty("\n* ABC-1 - Bug: x"));
            assert!(MarkerCheck::default().is_empty(""));
        }

        #[test]
        fn custom_marker_is_case_insensitive() {
            let check = MarkerCheck::new("OPS");
            assert_eq!(check.marker(), "ops");
            assert!(!check.is_empty("ops-12"));
        }

        #[test]
        fn closures_are_checks() {
            let check = |notes: &str| notes.trim().is_empty();
            assert!(EmptinessCheck::is_empty(&check, "  "));
            assert!(!EmptinessCheck::is_empty(&check, "\n* x"));
        }
    }
}
