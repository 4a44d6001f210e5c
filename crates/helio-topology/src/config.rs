//! Declared topology: acquisition devices, their strings, and the slots
//! they imply.
//!
//! The topology is user-declared configuration, not hardware truth. It
//! defines the universe of expected slots that discovered panels are
//! reconciled against. Structural validation lives here and MUST pass
//! before the topology is handed to the reconciler; reconciler behavior
//! under a malformed topology is unspecified.

use std::collections::HashSet;

use thiserror::Error;

use crate::label::{SlotLabel, StringName};

/// Result type for topology validation.
pub type Result<T> = std::result::Result<T, TopologyError>;

/// Structural errors in a declared topology.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
    /// A device was declared with an empty name.
    #[error("device name must not be empty")]
    EmptyDeviceName,

    /// Two devices share a name.
    #[error("duplicate device name: {0}")]
    DuplicateDevice(String),

    /// A string was declared with no panels.
    #[error("string {string} on device {device} must have at least one panel")]
    EmptyString { device: String, string: StringName },

    /// A string name appears more than once anywhere in the topology.
    ///
    /// String names are the prefix of every slot label, so a repeated name
    /// makes slot labels collide across the whole installation.
    #[error("string name {0} is declared more than once; slot labels must be unique")]
    DuplicateString(StringName),
}

/// One series-wired string: a name and how many panels it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StringConfig {
    /// The string name (1-2 uppercase letters).
    pub name: StringName,
    /// Number of panels wired into this string.
    pub panel_count: u32,
}

/// One acquisition device and the strings wired into it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceConfig {
    /// User-chosen device name.
    pub name: String,
    /// Strings in declaration order.
    pub strings: Vec<StringConfig>,
}

/// The declared topology: ordered devices, each with ordered strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Topology {
    /// Devices in declaration order.
    pub devices: Vec<DeviceConfig>,
}

impl Topology {
    /// Validate the structure of the topology.
    ///
    /// Checks, in order: non-empty and unique device names, positive panel
    /// counts, and globally unique string names (which makes every derived
    /// slot label unique).
    pub fn validate(&self) -> Result<()> {
        let mut device_names = HashSet::new();
        let mut string_names = HashSet::new();

        for device in &self.devices {
            if device.name.is_empty() {
                return Err(TopologyError::EmptyDeviceName);
            }
            if !device_names.insert(device.name.as_str()) {
                return Err(TopologyError::DuplicateDevice(device.name.clone()));
            }
            for string in &device.strings {
                if string.panel_count == 0 {
                    return Err(TopologyError::EmptyString {
                        device: device.name.clone(),
                        string: string.name.clone(),
                    });
                }
                if !string_names.insert(string.name.clone()) {
                    return Err(TopologyError::DuplicateString(string.name.clone()));
                }
            }
        }
        Ok(())
    }

    /// All expected slot labels in declaration order: device order, string
    /// order, position 1 through the string's panel count.
    pub fn expected_slots(&self) -> impl Iterator<Item = SlotLabel> + '_ {
        self.devices.iter().flat_map(|device| {
            device.strings.iter().flat_map(|string| {
                (1..=string.panel_count)
                    .map(move |position| SlotLabel::new(string.name.clone(), position))
            })
        })
    }

    /// Total number of expected slots.
    pub fn total_slots(&self) -> usize {
        self.devices
            .iter()
            .flat_map(|d| &d.strings)
            .map(|s| s.panel_count as usize)
            .sum()
    }

    /// Panel count of the named string, if it is declared.
    pub fn string_len(&self, name: &StringName) -> Option<u32> {
        self.devices
            .iter()
            .flat_map(|d| &d.strings)
            .find(|s| &s.name == name)
            .map(|s| s.panel_count)
    }

    /// Whether a slot label names a declared slot.
    pub fn contains_slot(&self, label: &SlotLabel) -> bool {
        label.position >= 1
            && self
                .string_len(&label.string)
                .is_some_and(|count| label.position <= count)
    }

    /// Name of the device that hosts the named string, if any.
    pub fn device_of(&self, name: &StringName) -> Option<&str> {
        self.devices
            .iter()
            .find(|d| d.strings.iter().any(|s| &s.name == name))
            .map(|d| d.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> StringName {
        StringName::new(s).unwrap()
    }

    fn two_device_topology() -> Topology {
        Topology {
            devices: vec![
                DeviceConfig {
                    name: "roof-east".into(),
                    strings: vec![
                        StringConfig { name: name("A"), panel_count: 3 },
                        StringConfig { name: name("B"), panel_count: 2 },
                    ],
                },
                DeviceConfig {
                    name: "roof-west".into(),
                    strings: vec![StringConfig { name: name("C"), panel_count: 4 }],
                },
            ],
        }
    }

    #[test]
    fn valid_topology_passes() {
        assert_eq!(two_device_topology().validate(), Ok(()));
    }

    #[test]
    fn expected_slots_follow_declaration_order() {
        let labels: Vec<String> = two_device_topology()
            .expected_slots()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(
            labels,
            ["A1", "A2", "A3", "B1", "B2", "C1", "C2", "C3", "C4"]
        );
    }

    #[test]
    fn slot_count_matches_enumeration() {
        let topology = two_device_topology();
        assert_eq!(topology.total_slots(), 9);
        assert_eq!(topology.expected_slots().count(), 9);
    }

    #[test]
    fn rejects_zero_panel_count() {
        let mut topology = two_device_topology();
        topology.devices[0].strings[1].panel_count = 0;
        assert_eq!(
            topology.validate(),
            Err(TopologyError::EmptyString {
                device: "roof-east".into(),
                string: name("B"),
            })
        );
    }

    #[test]
    fn rejects_duplicate_string_across_devices() {
        let mut topology = two_device_topology();
        topology.devices[1].strings[0].name = name("A");
        assert_eq!(
            topology.validate(),
            Err(TopologyError::DuplicateString(name("A")))
        );
    }

    #[test]
    fn rejects_duplicate_device_names() {
        let mut topology = two_device_topology();
        topology.devices[1].name = "roof-east".into();
        assert_eq!(
            topology.validate(),
            Err(TopologyError::DuplicateDevice("roof-east".into()))
        );
    }

    #[test]
    fn contains_slot_respects_string_bounds() {
        let topology = two_device_topology();
        assert!(topology.contains_slot(&"A3".parse().unwrap()));
        assert!(!topology.contains_slot(&"A4".parse().unwrap()));
        assert!(!topology.contains_slot(&"Z1".parse().unwrap()));
    }

    #[test]
    fn device_lookup_by_string() {
        let topology = two_device_topology();
        assert_eq!(topology.device_of(&name("B")), Some("roof-east"));
        assert_eq!(topology.device_of(&name("C")), Some("roof-west"));
        assert_eq!(topology.device_of(&name("Z")), None);
    }
}
