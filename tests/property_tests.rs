//! Property-based tests for the scanner, ticket ordering and rendering.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated inputs.

use std::cmp::Ordering;

use proptest::prelude::*;

use fixnotes::core::release::{FixVersion, ReleaseMap};
use fixnotes::core::render::{render_notes, TicketFormat};
use fixnotes::core::scan::{first_reference, scan_subjects};
use fixnotes::core::ticket::{Ticket, MASTER};
use fixnotes::core::types::PriorityTable;
use fixnotes::tracker::IssueRecord;

const TYPES: &[&str] = &["Epic", "Task", "New Feature", "Improvment", "Bug", "Sub-task", "Story"];

/// Strategy for ticket keys like `DEV-42`.
fn ticket_key() -> impl Strategy<Value = String> {
    ("[A-Z]{1,5}", 1u32..10_000).prop_map(|(project, n)| format!("{project}-{n}"))
}

/// Strategy for release names, including "master".
fn release_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(MASTER.to_string()),
        (0u8..5, 0u8..10).prop_map(|(major, minor)| format!("{major}.{minor}")),
    ]
}

fn issue_record() -> impl Strategy<Value = IssueRecord> {
    (
        ticket_key(),
        prop::sample::select(TYPES),
        "[a-z ]{0,20}",
        prop::option::of("[a-z]{0,10}"),
        prop::collection::vec(release_name(), 0..3),
    )
        .prop_map(|(key, issue_type, summary, description, fix_versions)| IssueRecord {
            key,
            issue_type: issue_type.to_string(),
            summary,
            description,
            fix_versions,
        })
}

fn ticket() -> impl Strategy<Value = Ticket> {
    issue_record().prop_map(|r| Ticket::from_record(r, &PriorityTable::DUAL_FILE).unwrap())
}

proptest! {
    #[test]
    fn scanner_yields_unique_keys(subjects in prop::collection::vec("[A-Za-z0-9 -]{0,30}", 0..20)) {
        let keys = scan_subjects(&subjects);
        let matched = subjects.iter().filter_map(|s| first_reference(s)).count();
        prop_assert!(keys.len() <= matched);

        // Duplicating every subject never adds keys.
        let doubled: Vec<String> = subjects.iter().chain(subjects.iter()).cloned().collect();
        prop_assert_eq!(scan_subjects(&doubled), keys);
    }

    #[test]
    fn scanner_finds_embedded_key(prefix in "[a-z ]{0,10}", key in ticket_key(), suffix in "[ a-z]{0,10}") {
        let subject = format!("{prefix} {key}{suffix}");
        let found = first_reference(&subject).unwrap();
        prop_assert_eq!(found.as_str(), key.as_str());
    }

    #[test]
    fn different_releases_compare_by_name(a in ticket(), b in ticket()) {
        prop_assume!(a.fix_version() != b.fix_version());
        prop_assert_eq!(a.release_order(&b), a.fix_version().cmp(b.fix_version()));
    }

    #[test]
    fn release_order_is_antisymmetric(a in ticket(), b in ticket()) {
        prop_assert_eq!(a.release_order(&b), b.release_order(&a).reverse());
        prop_assert_eq!(a.release_order(&a), Ordering::Equal);
    }

    #[test]
    fn has_epics_iff_named_release_with_epics(
        name in release_name(),
        records in prop::collection::vec(issue_record(), 0..6),
    ) {
        let mut release = FixVersion::new(name.clone());
        let mut epics = 0;
        for record in records {
            let ticket = Ticket::from_record(record, &PriorityTable::DUAL_FILE).unwrap();
            if ticket.is_epic() {
                epics += 1;
            }
            release.add_ticket(ticket);
        }
        prop_assert_eq!(release.has_epics(), name != MASTER && epics > 0);
    }

    #[test]
    fn rendering_is_idempotent(tickets in prop::collection::vec(ticket(), 0..12)) {
        let releases = ReleaseMap::from_tickets(tickets);
        for format in [TicketFormat::WithKey, TicketFormat::WithoutKey] {
            let first = render_notes(&releases, format, &PriorityTable::DUAL_FILE);
            let second = render_notes(&releases, format, &PriorityTable::DUAL_FILE);
            prop_assert_eq!(first, second);
        }
    }

    #[test]
    fn every_ticket_lands_in_one_bucket(tickets in prop::collection::vec(ticket(), 0..12)) {
        let count = tickets.len();
        let releases = ReleaseMap::from_tickets(tickets);
        prop_assert_eq!(releases.ticket_count(), count);
    }
}
