//! engine
//!
//! Orchestrates a run: Extract -> Scan -> Fetch -> Group -> Enrich -> Render -> Publish.
//!
//! # Architecture
//!
//! The engine wires the layers together and owns no I/O of its own:
//!
//! 1. **Extract**: Resolve the commit range and list unique subjects ([`extract`])
//! 2. **Scan**: Pull the first ticket key out of each subject ([`crate::core::scan`])
//! 3. **Fetch**: Look up each key in the tracker and sort ([`fetch`])
//! 4. **Group**: Bucket tickets by resolved release ([`crate::core::release`])
//! 5. **Enrich**: Append each release's declared epics ([`fetch`])
//! 6. **Render**: Produce with-key and without-key notes ([`crate::core::render`])
//! 7. **Publish**: Write files, post chat, collect CI outputs ([`runner`])
//!
//! # Invariants
//!
//! - Tracker requests are issued one at a time
//! - A failed ticket lookup never aborts the run
//! - A failed epic search stops enrichment but keeps earlier results
//! - Git and file-write failures abort the run

pub mod extract;
pub mod fetch;
pub mod modes;
pub mod runner;

pub use extract::{CommitRange, CommitSpan};
pub use fetch::{EnrichOutcome, FetchFailure, TicketOrder};
pub use modes::{ChatDelivery, ModeError, RenderMode};
pub use runner::{
    output_names, ChatOutcome, OutputPaths, Pipeline, RenderedNotes, RunConfig, RunError, RunReport,
};
