//! Helio Reconcile
//!
//! Identity reconciliation between hardware-reported panels and the
//! user-declared topology.
//!
//! Panels self-report labels over telemetry, and those labels are wrong
//! often enough to matter: installers mislabel, hardware re-enumerates,
//! strings get rewired. [`compute_mapping`] reconciles a discovery snapshot
//! against the expected slots, honoring user [`Translation`] overrides
//! first, exact label matches second, and classifying everything left as
//! excess or unassigned. The output is a complete partition: every
//! discovered panel lands in exactly one category, every expected slot is
//! either assigned or empty.
//!
//! Everything here is pure and deterministic. The caller owns all state
//! (telemetry cache, topology, translations) and passes it in on every
//! call; recomputation is idempotent and safe to run per telemetry update.
//!
//! [`match_panel`] is the related advisory triage used by the setup wizard
//! while discovery is still in progress.

mod mapping;
mod matching;
mod order;
mod panel;
mod translation;

pub use mapping::{
    compute_mapping, AssignedPanel, ExcessPanel, MappingResult, MappingSummary, MatchSource,
};
pub use matching::{
    match_panel, summarize_matches, ConfiguredPanel, Confidence, MatchOutcome, MatchSummary,
};
pub use order::natural_cmp;
pub use panel::DiscoveredPanel;
pub use translation::{Translation, TranslationTable};
