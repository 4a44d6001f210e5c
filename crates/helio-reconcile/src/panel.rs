//! Hardware-reported panel records.

use serde::{Deserialize, Serialize};

/// A panel as reported by the hardware, before any reconciliation.
///
/// Ephemeral: sourced from a live telemetry stream or a bulk import and held
/// by the caller in a serial-keyed collection. The serial is the only stable
/// identity a report carries; the raw label is whatever the panel believes
/// about its own position and is not trusted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveredPanel {
    /// Hardware serial number (unique key).
    pub serial: String,
    /// Name of the acquisition device that reported this panel.
    pub device: String,
    /// Raw self-reported label, e.g. `"A4"`. May be empty or garbage.
    pub raw_label: String,
    /// Last reported power in watts, if a reading has arrived.
    pub watts: Option<f64>,
    /// Last reported voltage, if a reading has arrived.
    pub voltage: Option<f64>,
    /// Whether the panel is currently reporting.
    pub online: bool,
    /// ISO-8601 timestamp of the first report.
    pub first_seen: String,
    /// ISO-8601 timestamp of the most recent report.
    pub last_seen: String,
}

impl DiscoveredPanel {
    /// Convenience constructor for a panel that has just been discovered:
    /// first and last seen are the same instant.
    pub fn discovered(
        serial: impl Into<String>,
        device: impl Into<String>,
        raw_label: impl Into<String>,
        seen_at: impl Into<String>,
    ) -> Self {
        let seen = seen_at.into();
        Self {
            serial: serial.into(),
            device: device.into(),
            raw_label: raw_label.into(),
            watts: None,
            voltage: None,
            online: true,
            first_seen: seen.clone(),
            last_seen: seen,
        }
    }

    /// Fold a fresh report into this record, keeping the first-seen stamp.
    pub fn refresh(&mut self, watts: Option<f64>, voltage: Option<f64>, seen_at: impl Into<String>) {
        if watts.is_some() {
            self.watts = watts;
        }
        if voltage.is_some() {
            self.voltage = voltage;
        }
        self.online = true;
        self.last_seen = seen_at.into();
    }
}
