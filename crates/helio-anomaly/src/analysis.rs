//! Per-string mismatch analysis.
//!
//! Given the readings of one wiring string, flag panels whose output
//! deviates from the group median by more than a threshold. The policy
//! changes with how many readings are usable:
//!
//! - fewer than two: nothing to compare, the result says so;
//! - exactly two: a fixed 30% pairwise rule, because two readings cannot
//!   tell which of them is wrong;
//! - three or more: deviation from the group median against the caller's
//!   threshold.
//!
//! The median rule has a known, accepted failure mode: when a majority of
//! a string is malfunctioning, the median sides with the majority and the
//! healthy minority gets flagged instead. That behavior is intentional and
//! covered by tests; do not "fix" it here.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::median::median;

/// Readings below this wattage are ignored entirely. Filters out
/// low-light and nighttime noise. Fixed, not configurable.
pub const MIN_POWER_WATTS: f64 = 50.0;

/// Fixed pairwise threshold used when exactly two panels are comparable.
/// The caller's threshold does not apply to a pair.
pub const PAIR_THRESHOLD_PCT: f64 = 30.0;

/// Default deviation threshold for strings of three or more panels.
pub const DEFAULT_THRESHOLD_PCT: f64 = 15.0;

/// One panel's reading as fed into the analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelReading {
    /// Panel identifier used in warnings (slot label or serial).
    pub id: String,
    /// Power reading in watts, if one has arrived.
    pub watts: Option<f64>,
    /// Online flag; `None` means unknown and counts as online.
    pub online: Option<bool>,
}

impl PanelReading {
    /// A reading with known power, online.
    pub fn new(id: impl Into<String>, watts: f64) -> Self {
        Self {
            id: id.into(),
            watts: Some(watts),
            online: Some(true),
        }
    }

    /// Whether this reading counts toward the median and can be flagged.
    ///
    /// Eligible iff not explicitly offline, a reading is present, and the
    /// reading clears the fixed low-light cutoff (strictly above 50 W).
    pub fn is_eligible(&self) -> bool {
        self.online != Some(false) && self.watts.is_some_and(|w| w > MIN_POWER_WATTS)
    }
}

/// One panel's share of a [`StringAnalysis`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelDeviation {
    /// Identifier copied from the input reading.
    pub id: String,
    /// The reading, copied through for rendering.
    pub watts: Option<f64>,
    /// Percentage deviation from the reference value. Always 0 for
    /// ineligible panels, whatever their actual reading.
    pub deviation_pct: f64,
    /// Whether this panel is considered mismatched.
    pub flagged: bool,
}

/// Result of analyzing one string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringAnalysis {
    /// Per-panel results, in input order, one per input reading.
    pub panels: Vec<PanelDeviation>,
    /// The reference value deviations were measured against: the median of
    /// eligible readings, or their average when exactly two are eligible.
    pub median: f64,
    /// Whether any panel is flagged.
    pub has_mismatch: bool,
    /// True when fewer than two readings were usable.
    pub insufficient_data: bool,
    /// Human-readable warning when a mismatch was found.
    pub warning: Option<String>,
}

/// Analyze one string of panel readings.
///
/// Pure and total: never fails, never flags an ineligible panel, reports
/// deviation 0 for every panel it cannot judge. `threshold_pct` is only
/// consulted for strings with three or more eligible readings; any
/// positive number is accepted.
pub fn analyze_string(panels: &[PanelReading], threshold_pct: f64) -> StringAnalysis {
    let eligible: Vec<f64> = panels
        .iter()
        .filter(|p| p.is_eligible())
        .filter_map(|p| p.watts)
        .collect();

    let analysis = match eligible.len() {
        0 | 1 => StringAnalysis {
            panels: unflagged(panels),
            median: median(&eligible),
            has_mismatch: false,
            insufficient_data: true,
            warning: None,
        },
        2 => analyze_pair(panels, eligible[0], eligible[1]),
        _ => analyze_group(panels, &eligible, threshold_pct),
    };

    debug!(
        panels = panels.len(),
        eligible = eligible.len(),
        median = analysis.median,
        mismatch = analysis.has_mismatch,
        "analyzed string"
    );
    analysis
}

/// Every panel at deviation 0, unflagged.
fn unflagged(panels: &[PanelReading]) -> Vec<PanelDeviation> {
    panels
        .iter()
        .map(|p| PanelDeviation {
            id: p.id.clone(),
            watts: p.watts,
            deviation_pct: 0.0,
            flagged: false,
        })
        .collect()
}

/// Fixed 30% rule for exactly two comparable readings.
///
/// A deviating pair cannot be disambiguated, so over the threshold BOTH
/// panels are flagged and both carry the pairwise variance. At or under
/// the threshold the variance is reported as 0 for both.
fn analyze_pair(panels: &[PanelReading], a: f64, b: f64) -> StringAnalysis {
    let average = (a + b) / 2.0;
    let variance_pct = (a - b).abs() / average * 100.0;
    let mismatched = variance_pct > PAIR_THRESHOLD_PCT;

    let deviations = panels
        .iter()
        .map(|p| {
            let eligible = p.is_eligible();
            PanelDeviation {
                id: p.id.clone(),
                watts: p.watts,
                deviation_pct: if mismatched && eligible { variance_pct } else { 0.0 },
                flagged: mismatched && eligible,
            }
        })
        .collect();

    let warning = mismatched.then(|| {
        format!(
            "With only 2 panels reporting, {a:.0}W and {b:.0}W are {variance_pct:.0}% apart; \
             not all panels are outputting equally"
        )
    });

    StringAnalysis {
        panels: deviations,
        median: average,
        has_mismatch: mismatched,
        insufficient_data: false,
        warning,
    }
}

/// Median-deviation rule for three or more comparable readings.
fn analyze_group(panels: &[PanelReading], eligible: &[f64], threshold_pct: f64) -> StringAnalysis {
    let reference = median(eligible);

    let deviations: Vec<PanelDeviation> = panels
        .iter()
        .map(|p| {
            let deviation_pct = match p.watts {
                Some(w) if p.is_eligible() && reference != 0.0 => {
                    (w - reference).abs() / reference * 100.0
                }
                _ => 0.0,
            };
            PanelDeviation {
                id: p.id.clone(),
                watts: p.watts,
                deviation_pct,
                flagged: p.is_eligible() && deviation_pct > threshold_pct,
            }
        })
        .collect();

    let flagged: Vec<&PanelDeviation> = deviations.iter().filter(|d| d.flagged).collect();
    let has_mismatch = !flagged.is_empty();
    let warning = match flagged.as_slice() {
        [] => None,
        [single] => Some(format!(
            "Panel {} is outputting {:.0}W against a string median of {:.0}W",
            single.id,
            single.watts.unwrap_or(0.0),
            reference
        )),
        many => {
            let ids: Vec<&str> = many.iter().map(|d| d.id.as_str()).collect();
            Some(format!(
                "Panels {} deviate from the string median of {:.0}W",
                ids.join(", "),
                reference
            ))
        }
    };

    StringAnalysis {
        panels: deviations,
        median: reference,
        has_mismatch,
        insufficient_data: false,
        warning,
    }
}
