//! core::release
//!
//! Release buckets ("fix versions") and the insertion-ordered map of them.
//!
//! # Invariants
//!
//! - Every ticket lands in exactly one bucket, chosen by its resolved
//!   fix version.
//! - Within a bucket, epics and non-epics are disjoint lists, each in
//!   append order.
//! - Buckets iterate in the order their release was first seen, never
//!   sorted.

use super::ticket::{Ticket, MASTER};

/// One release and the tickets targeting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixVersion {
    name: String,
    tickets: Vec<Ticket>,
    epics: Vec<Ticket>,
}

impl FixVersion {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tickets: Vec::new(),
            epics: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Non-epic tickets in append order.
    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    /// Epic tickets in append order.
    pub fn epics(&self) -> &[Ticket] {
        &self.epics
    }

    /// Append a ticket to the epic or non-epic list by its type.
    pub fn add_ticket(&mut self, ticket: Ticket) {
        if ticket.is_epic() {
            self.epics.push(ticket);
        } else {
            self.tickets.push(ticket);
        }
    }

    /// True when this is a real release that has at least one epic.
    ///
    /// "master" never has epics, whatever its list holds.
    pub fn has_epics(&self) -> bool {
        self.name != MASTER && !self.epics.is_empty()
    }

    pub fn is_master(&self) -> bool {
        self.name == MASTER
    }
}

impl std::fmt::Display for FixVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "fix version {}: {} tickets, {} epics",
            self.name,
            self.tickets.len(),
            self.epics.len()
        )
    }
}

/// Release name → bucket, iterated in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseMap {
    releases: Vec<FixVersion>,
}

impl ReleaseMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group tickets by resolved fix version, preserving the given order.
    pub fn from_tickets(tickets: impl IntoIterator<Item = Ticket>) -> Self {
        let mut map = Self::new();
        for ticket in tickets {
            map.add_ticket(ticket);
        }
        map
    }

    /// Add a ticket to its release, creating the bucket on first sight.
    pub fn add_ticket(&mut self, ticket: Ticket) {
        let name = ticket.fix_version().to_string();
        self.entry(&name).add_ticket(ticket);
    }

    /// Get the bucket for `name`, creating it at the end if missing.
    pub fn entry(&mut self, name: &str) -> &mut FixVersion {
        let index = match self.releases.iter().position(|r| r.name() == name) {
            Some(index) => index,
            None => {
                self.releases.push(FixVersion::new(name));
                self.releases.len() - 1
            }
        };
        &mut self.releases[index]
    }

    pub fn get(&self, name: &str) -> Option<&FixVersion> {
        self.releases.iter().find(|r| r.name() == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut FixVersion> {
        self.releases.iter_mut().find(|r| r.name() == name)
    }

    /// Release names in first-seen order.
    pub fn names(&self) -> Vec<String> {
        self.releases.iter().map(|r| r.name().to_string()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FixVersion> {
        self.releases.iter()
    }

    pub fn len(&self) -> usize {
        self.releases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }

    /// Total number of tickets across all buckets, epics included.
    pub fn ticket_count(&self) -> usize {
        self.releases
            .iter()
            .map(|r| r.tickets().len() + r.epics().len())
            .sum()
    }
}
