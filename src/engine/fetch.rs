//! engine::fetch
//!
//! Ticket fetching and epic enrichment.
//!
//! Both stages issue one request at a time. A failed ticket lookup drops
//! that ticket and the loop continues. A failed epic search stops
//! enrichment; releases already enriched keep their epics.

use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use crate::core::release::ReleaseMap;
use crate::core::ticket::Ticket;
use crate::core::types::{PriorityTable, TicketKey};
use crate::tracker::{IssueTracker, TrackerError};

/// Final direction of the ticket list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketOrder {
    /// Release, rank, number ascending
    Ascending,
    /// Exactly the reverse of `Ascending`
    Descending,
}

/// A ticket that could not be fetched or built.
#[derive(Debug, Clone)]
pub struct FetchFailure {
    pub key: TicketKey,
    pub error: String,
}

/// Outcome of fetching tickets.
#[derive(Debug, Clone, Default)]
pub struct FetchOutcome {
    pub tickets: Vec<Ticket>,
    pub failures: Vec<FetchFailure>,
}

/// Look up every key and build sorted tickets.
pub async fn fetch_tickets(
    tracker: &dyn IssueTracker,
    keys: &BTreeSet<TicketKey>,
    priorities: &PriorityTable,
    order: TicketOrder,
) -> FetchOutcome {
    let mut outcome = FetchOutcome::default();

    for key in keys {
        let built = match tracker.get_issue(key.as_str()).await {
            Ok(record) => Ticket::from_record(record, priorities).map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };

        match built {
            Ok(ticket) => {
                debug!(
                    key = %key,
                    fix_version = ticket.fix_version(),
                    declared = ?ticket.fix_versions(),
                    "fetched ticket"
                );
                outcome.tickets.push(ticket);
            }
            Err(error) => {
                warn!(key = %key, %error, "failed to get ticket data");
                outcome.failures.push(FetchFailure {
                    key: key.clone(),
                    error,
                });
            }
        }
    }

    sort_tickets(&mut outcome.tickets, order);
    info!(
        fetched = outcome.tickets.len(),
        failed = outcome.failures.len(),
        "fetched tickets"
    );
    outcome
}

/// Sort by release order, then apply the direction.
pub fn sort_tickets(tickets: &mut [Ticket], order: TicketOrder) {
    tickets.sort_by(Ticket::release_order);
    if order == TicketOrder::Descending {
        tickets.reverse();
    }
}

/// Outcome of epic enrichment.
#[derive(Debug, Clone, Default)]
pub struct EnrichOutcome {
    /// Epics appended across all releases
    pub added: usize,
    /// The error that stopped enrichment, if any
    pub error: Option<String>,
}

/// Append every epic declared against each non-master release.
pub async fn enrich_epics(
    tracker: &dyn IssueTracker,
    releases: &mut ReleaseMap,
    priorities: &PriorityTable,
) -> EnrichOutcome {
    let mut outcome = EnrichOutcome::default();
    if let Err(e) = enrich_all(tracker, releases, priorities, &mut outcome.added).await {
        warn!(error = %e, added = outcome.added, "epic enrichment stopped");
        outcome.error = Some(e);
    }
    outcome
}

async fn enrich_all(
    tracker: &dyn IssueTracker,
    releases: &mut ReleaseMap,
    priorities: &PriorityTable,
    added: &mut usize,
) -> Result<(), String> {
    for name in releases.names() {
        let Some(release) = releases.get_mut(&name) else {
            continue;
        };
        if release.is_master() {
            continue;
        }

        let epics = tracker
            .search_epics(&name)
            .await
            .map_err(|e: TrackerError| format!("{}: {}", name, e))?;

        for record in epics {
            let epic = Ticket::from_record(record, priorities).map_err(|e| e.to_string())?;
            debug!(key = %epic.key(), release = %name, "epic added");
            release.add_ticket(epic);
            *added += 1;
        }
    }
    Ok(())
}
