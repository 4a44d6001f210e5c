//! Per-panel match triage for the setup wizard.
//!
//! While a discovery session runs, each incoming panel is triaged against
//! the declared topology and the panels already committed to configuration.
//! This is advisory only: it suggests labels and surfaces likely wiring
//! problems, but assignment itself goes through the reconciler.

use helio_topology::{parse_panel_label, StringName, Topology};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::panel::DiscoveredPanel;

/// A panel already committed to the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfiguredPanel {
    /// Hardware serial number.
    pub serial: String,
    /// Device the panel is configured under.
    pub device: String,
    /// String the panel belongs to.
    pub string: StringName,
    /// The hardware label recorded at configuration time.
    pub raw_label: String,
    /// The slot label shown to the user.
    pub display_label: String,
}

/// How confident the triage is in a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    /// Matched by serial number.
    High,
    /// Matched by topology fit only.
    Medium,
}

/// Triage outcome for one discovered panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MatchOutcome {
    /// The serial is already configured.
    Known {
        panel: ConfiguredPanel,
        confidence: Confidence,
    },
    /// New panel whose label fits a declared string on the device that
    /// reported it.
    ByTopology {
        suggested_label: String,
        confidence: Confidence,
    },
    /// The label fits a string declared on a different device than the one
    /// that reported the panel.
    WiringIssue {
        reported_device: String,
        expected_device: String,
        warning: String,
    },
    /// Nothing fits.
    Unmatched {
        raw_label: String,
        /// True when the label itself is fine but the topology has no home
        /// for it, so a user translation is the way forward.
        needs_translation: bool,
        reason: String,
    },
}

/// Summary counts over a triaged discovery session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub total: usize,
    pub matched: usize,
    pub unmatched: usize,
    pub wiring_issues: usize,
}

/// Triage one discovered panel against topology and known panels.
pub fn match_panel(
    discovered: &DiscoveredPanel,
    topology: &Topology,
    known: &[ConfiguredPanel],
) -> MatchOutcome {
    // A serial we have seen before is the strongest signal there is.
    if let Some(panel) = known.iter().find(|p| p.serial == discovered.serial) {
        return MatchOutcome::Known {
            panel: panel.clone(),
            confidence: Confidence::High,
        };
    }

    let Some((string, position)) = parse_panel_label(&discovered.raw_label) else {
        return MatchOutcome::Unmatched {
            raw_label: discovered.raw_label.clone(),
            needs_translation: false,
            reason: "invalid label format - expected a shape like 'A1' or 'AA12'".into(),
        };
    };

    match topology.device_of(&string) {
        Some(device) if position >= 1 && fits_string(topology, &string, position) => {
            if device == discovered.device {
                MatchOutcome::ByTopology {
                    suggested_label: format!("{string}{position}"),
                    confidence: Confidence::Medium,
                }
            } else {
                debug!(
                    serial = %discovered.serial,
                    reported = %discovered.device,
                    expected = %device,
                    "panel reported from unexpected device"
                );
                MatchOutcome::WiringIssue {
                    reported_device: discovered.device.clone(),
                    expected_device: device.to_string(),
                    warning: format!(
                        "Panel reports from '{}' but string '{}' is configured on '{}'",
                        discovered.device, string, device
                    ),
                }
            }
        }
        _ => MatchOutcome::Unmatched {
            raw_label: discovered.raw_label.clone(),
            needs_translation: true,
            reason: format!("no declared slot fits label '{}'", discovered.raw_label),
        },
    }
}

fn fits_string(topology: &Topology, string: &StringName, position: u32) -> bool {
    topology
        .string_len(string)
        .is_some_and(|count| position <= count)
}

/// Count triage outcomes for a whole discovery session.
pub fn summarize_matches(outcomes: &[MatchOutcome]) -> MatchSummary {
    let mut summary = MatchSummary {
        total: outcomes.len(),
        ..MatchSummary::default()
    };
    for outcome in outcomes {
        match outcome {
            MatchOutcome::Known { .. } | MatchOutcome::ByTopology { .. } => {
                summary.matched += 1;
            }
            MatchOutcome::WiringIssue { .. } => summary.wiring_issues += 1,
            MatchOutcome::Unmatched { .. } => summary.unmatched += 1,
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use helio_topology::{DeviceConfig, StringConfig};

    fn name(s: &str) -> StringName {
        StringName::new(s).unwrap()
    }

    fn topology() -> Topology {
        Topology {
            devices: vec![
                DeviceConfig {
                    name: "roof-east".into(),
                    strings: vec![StringConfig { name: name("A"), panel_count: 3 }],
                },
                DeviceConfig {
                    name: "roof-west".into(),
                    strings: vec![StringConfig { name: name("B"), panel_count: 2 }],
                },
            ],
        }
    }

    fn discovered(serial: &str, device: &str, raw_label: &str) -> DiscoveredPanel {
        DiscoveredPanel::discovered(serial, device, raw_label, "2026-08-01T10:00:00Z")
    }

    fn known_panel(serial: &str) -> ConfiguredPanel {
        ConfiguredPanel {
            serial: serial.into(),
            device: "roof-east".into(),
            string: name("A"),
            raw_label: "A1".into(),
            display_label: "A1".into(),
        }
    }

    #[test]
    fn known_serial_matches_with_high_confidence() {
        let outcome = match_panel(
            &discovered("SN1", "roof-east", "whatever"),
            &topology(),
            &[known_panel("SN1")],
        );
        assert!(matches!(
            outcome,
            MatchOutcome::Known { confidence: Confidence::High, .. }
        ));
    }

    #[test]
    fn new_panel_fitting_its_device_is_suggested() {
        let outcome = match_panel(&discovered("SN2", "roof-east", "A2"), &topology(), &[]);
        assert_eq!(
            outcome,
            MatchOutcome::ByTopology {
                suggested_label: "A2".into(),
                confidence: Confidence::Medium,
            }
        );
    }

    #[test]
    fn string_on_another_device_is_a_wiring_issue() {
        let outcome = match_panel(&discovered("SN3", "roof-east", "B1"), &topology(), &[]);
        match outcome {
            MatchOutcome::WiringIssue { reported_device, expected_device, warning } => {
                assert_eq!(reported_device, "roof-east");
                assert_eq!(expected_device, "roof-west");
                assert!(warning.contains("'roof-west'"));
            }
            other => panic!("expected wiring issue, got {other:?}"),
        }
    }

    #[test]
    fn garbage_label_is_unmatched_without_translation_hint() {
        let outcome = match_panel(&discovered("SN4", "roof-east", "???"), &topology(), &[]);
        assert!(matches!(
            outcome,
            MatchOutcome::Unmatched { needs_translation: false, .. }
        ));
    }

    #[test]
    fn out_of_range_label_needs_translation() {
        let outcome = match_panel(&discovered("SN5", "roof-east", "A9"), &topology(), &[]);
        assert!(matches!(
            outcome,
            MatchOutcome::Unmatched { needs_translation: true, .. }
        ));
    }

    #[test]
    fn summary_counts_each_category() {
        let outcomes = vec![
            match_panel(&discovered("SN1", "roof-east", "junk"), &topology(), &[known_panel("SN1")]),
            match_panel(&discovered("SN2", "roof-east", "A2"), &topology(), &[]),
            match_panel(&discovered("SN3", "roof-east", "B1"), &topology(), &[]),
            match_panel(&discovered("SN4", "roof-east", "misc"), &topology(), &[]),
        ];
        let summary = summarize_matches(&outcomes);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.matched, 2);
        assert_eq!(summary.wiring_issues, 1);
        assert_eq!(summary.unmatched, 1);
    }
}
