//! Helio Topology
//!
//! The declared shape of a solar installation: acquisition devices, the
//! series-wired strings behind each device, and the expected slots those
//! strings imply.
//!
//! # Slots
//!
//! Every string declares a name (1-2 uppercase letters) and a panel count.
//! Slot labels are derived as `<string><position>` with 1-based positions:
//! a string `A` with 3 panels contributes slots `A1`, `A2`, `A3`. Slot
//! labels are unique across the whole installation; [`Topology::validate`]
//! enforces this and must be called before the topology is used for
//! reconciliation.
//!
//! # Hardware labels
//!
//! Panels self-report labels over telemetry that may or may not match a
//! declared slot. [`parse_panel_label`] is the tolerant parser for those
//! reports; it normalizes case and leading zeros but never guesses.

mod config;
mod label;

pub use config::{DeviceConfig, Result, StringConfig, Topology, TopologyError};
pub use label::{
    parse_panel_label, ParseSlotLabelError, SlotLabel, StringName, MAX_STRING_NAME_LEN,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_name_length_invariant() {
        assert!(StringName::new("AB").is_some());
        assert!(StringName::new("ABC").is_none());
        assert_eq!(MAX_STRING_NAME_LEN, 2);
    }
}
