//! Three-pass identity reconciliation.
//!
//! [`compute_mapping`] partitions every discovered panel into exactly one of
//! assigned / excess / unassigned, honoring user translations first, then
//! exact label matches, then classifying the leftovers. It is pure and
//! total: any input shape reachable through normal use produces a result,
//! never an error. Structural topology validation is the caller's job
//! (`Topology::validate`); behavior under a malformed topology is
//! unspecified.
//!
//! # Determinism
//!
//! Panels are processed in ascending serial order wherever order matters,
//! so the output is a function of input content alone. When two panels
//! translate to the same slot the first serial wins and the other falls
//! through to the later passes, where its own raw label may still
//! auto-match a free slot.

use std::collections::BTreeMap;

use helio_topology::{parse_panel_label, SlotLabel, StringName, Topology};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::order::natural_cmp;
use crate::panel::DiscoveredPanel;
use crate::translation::{Translation, TranslationTable};

/// How a panel ended up on its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchSource {
    /// Assigned through a user translation.
    UserMapped,
    /// Raw label matched the slot label exactly.
    AutoMatched,
}

/// A panel occupying an expected slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignedPanel {
    /// The discovered panel.
    pub panel: DiscoveredPanel,
    /// Whether the user or the auto-matcher put it there.
    pub source: MatchSource,
}

/// A panel whose label names a known string but a position beyond its
/// declared panel count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExcessPanel {
    /// The discovered panel.
    pub panel: DiscoveredPanel,
    /// The out-of-range position its label claims.
    pub position: u32,
}

/// Summary counts over a [`MappingResult`].
///
/// Always derived by counting the categorized collections, never tracked
/// separately, so the counts cannot drift from what they summarize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingSummary {
    /// Total expected slots in the topology.
    pub total_slots: usize,
    /// Slots filled by exact label matches.
    pub auto_matched: usize,
    /// Slots filled through user translations.
    pub user_mapped: usize,
    /// Expected slots with no panel.
    pub empty: usize,
    /// Panels beyond their string's declared length.
    pub excess: usize,
    /// Panels that are explicitly unassigned or whose label fits nothing.
    pub unassigned: usize,
}

/// Complete partition of discovered panels against the declared topology.
///
/// Derived output: recomputed on every call, never persisted independently
/// of its inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingResult {
    /// Occupied slots, ordered by slot label.
    pub assigned: BTreeMap<SlotLabel, AssignedPanel>,
    /// Unoccupied expected slots, in topology declaration order.
    pub empty_slots: Vec<SlotLabel>,
    /// Excess panels grouped by string name, ascending by claimed position.
    pub excess: BTreeMap<StringName, Vec<ExcessPanel>>,
    /// Explicitly-unassigned and unparseable panels, in natural label order.
    pub unassigned: Vec<DiscoveredPanel>,
    /// Counts derived from the collections above.
    pub summary: MappingSummary,
}

/// Reconcile discovered panels against the topology and user translations.
///
/// Three ordered passes:
///
/// 1. **Translation priority.** A panel whose raw label translates to a
///    valid, still-free slot is assigned there as [`MatchSource::UserMapped`].
/// 2. **Auto-match.** A remaining panel (not explicitly unassigned) whose
///    raw label is exactly a still-free slot label is assigned there as
///    [`MatchSource::AutoMatched`]. Exact means string-exact: `a1` and
///    `A01` do not auto-match slot `A1`, though a translation can put them
///    there.
/// 3. **Residual classification.** Everything left is explicitly
///    unassigned, excess (parses to a known string, position beyond its
///    panel count), or unassigned (fits nothing).
pub fn compute_mapping(
    discovered: &BTreeMap<String, DiscoveredPanel>,
    topology: &Topology,
    translations: &TranslationTable,
) -> MappingResult {
    let mut assigned: BTreeMap<SlotLabel, AssignedPanel> = BTreeMap::new();

    // Pass 1: user translations win. Ascending serial order, first writer
    // wins on a collision.
    let mut remaining: Vec<&DiscoveredPanel> = Vec::new();
    for panel in discovered.values() {
        let target = translations
            .get(&panel.raw_label)
            .and_then(Translation::slot);
        match target {
            Some(slot) if topology.contains_slot(slot) && !assigned.contains_key(slot) => {
                assigned.insert(
                    slot.clone(),
                    AssignedPanel {
                        panel: panel.clone(),
                        source: MatchSource::UserMapped,
                    },
                );
            }
            _ => remaining.push(panel),
        }
    }

    // Pass 2: exact label matches onto still-free slots.
    let mut residual: Vec<&DiscoveredPanel> = Vec::new();
    for panel in remaining {
        let marked_unassigned = translations
            .get(&panel.raw_label)
            .is_some_and(Translation::is_unassigned);
        let exact_slot = panel
            .raw_label
            .parse::<SlotLabel>()
            .ok()
            .filter(|slot| slot.to_string() == panel.raw_label);
        match exact_slot {
            Some(slot)
                if !marked_unassigned
                    && topology.contains_slot(&slot)
                    && !assigned.contains_key(&slot) =>
            {
                assigned.insert(
                    slot,
                    AssignedPanel {
                        panel: panel.clone(),
                        source: MatchSource::AutoMatched,
                    },
                );
            }
            _ => residual.push(panel),
        }
    }

    // Pass 3: classify the leftovers.
    let mut excess: BTreeMap<StringName, Vec<ExcessPanel>> = BTreeMap::new();
    let mut unassigned: Vec<DiscoveredPanel> = Vec::new();
    for panel in residual {
        let marked_unassigned = translations
            .get(&panel.raw_label)
            .is_some_and(Translation::is_unassigned);
        if marked_unassigned {
            unassigned.push(panel.clone());
            continue;
        }
        match parse_panel_label(&panel.raw_label) {
            Some((string, position)) if is_excess(topology, &string, position) => {
                excess.entry(string).or_default().push(ExcessPanel {
                    panel: panel.clone(),
                    position,
                });
            }
            _ => unassigned.push(panel.clone()),
        }
    }

    for group in excess.values_mut() {
        group.sort_by_key(|p| p.position);
    }
    unassigned.sort_by(|a, b| natural_cmp(&a.raw_label, &b.raw_label));

    let empty_slots: Vec<SlotLabel> = topology
        .expected_slots()
        .filter(|slot| !assigned.contains_key(slot))
        .collect();

    let summary = summarize(topology, &assigned, &empty_slots, &excess, &unassigned);
    debug!(
        total = summary.total_slots,
        auto_matched = summary.auto_matched,
        user_mapped = summary.user_mapped,
        empty = summary.empty,
        excess = summary.excess,
        unassigned = summary.unassigned,
        "reconciled discovered panels"
    );

    MappingResult {
        assigned,
        empty_slots,
        excess,
        unassigned,
        summary,
    }
}

/// A parsed label is excess when its string is declared and its position
/// lies beyond the string's panel count.
fn is_excess(topology: &Topology, string: &StringName, position: u32) -> bool {
    topology
        .string_len(string)
        .is_some_and(|count| position > count)
}

/// Count the categorized collections.
fn summarize(
    topology: &Topology,
    assigned: &BTreeMap<SlotLabel, AssignedPanel>,
    empty_slots: &[SlotLabel],
    excess: &BTreeMap<StringName, Vec<ExcessPanel>>,
    unassigned: &[DiscoveredPanel],
) -> MappingSummary {
    MappingSummary {
        total_slots: topology.total_slots(),
        auto_matched: assigned
            .values()
            .filter(|a| a.source == MatchSource::AutoMatched)
            .count(),
        user_mapped: assigned
            .values()
            .filter(|a| a.source == MatchSource::UserMapped)
            .count(),
        empty: empty_slots.len(),
        excess: excess.values().map(Vec::len).sum(),
        unassigned: unassigned.len(),
    }
}
