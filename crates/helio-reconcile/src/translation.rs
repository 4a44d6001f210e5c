//! User translation overrides.
//!
//! A translation maps a raw hardware label to either a target slot or an
//! explicit "leave this panel unassigned" marker. Translations are
//! user-authored and always take precedence over automatic matching. The
//! unassigned marker is a distinct variant rather than a sentinel string,
//! so it can never collide with a real label.

use std::collections::btree_map;
use std::collections::BTreeMap;

use helio_topology::SlotLabel;
use serde::{Deserialize, Serialize};

/// What the user wants done with a raw label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Translation {
    /// Assign the panel carrying this label to the given slot.
    Slot(SlotLabel),
    /// Keep the panel out of the layout entirely.
    Unassigned,
}

impl Translation {
    /// Whether this is the explicit unassigned marker.
    pub fn is_unassigned(&self) -> bool {
        matches!(self, Translation::Unassigned)
    }

    /// The target slot, if this translation names one.
    pub fn slot(&self) -> Option<&SlotLabel> {
        match self {
            Translation::Slot(slot) => Some(slot),
            Translation::Unassigned => None,
        }
    }
}

/// A flat raw-label → translation store.
///
/// Backed by a `BTreeMap` so iteration order is a function of content, not
/// of editing history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationTable {
    entries: BTreeMap<String, Translation>,
}

impl TranslationTable {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the translation for a raw label.
    pub fn get(&self, raw_label: &str) -> Option<&Translation> {
        self.entries.get(raw_label)
    }

    /// Map a raw label to a slot, replacing any previous entry.
    pub fn assign(&mut self, raw_label: impl Into<String>, slot: SlotLabel) {
        self.entries.insert(raw_label.into(), Translation::Slot(slot));
    }

    /// Mark a raw label explicitly unassigned.
    pub fn unassign(&mut self, raw_label: impl Into<String>) {
        self.entries.insert(raw_label.into(), Translation::Unassigned);
    }

    /// Remove any entry for a raw label, restoring automatic matching.
    pub fn clear_label(&mut self, raw_label: &str) -> Option<Translation> {
        self.entries.remove(raw_label)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in label order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Translation> {
        self.entries.iter()
    }
}
