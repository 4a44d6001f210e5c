//! Helio Anomaly
//!
//! Median-based outlier detection for one wiring string of panels.
//!
//! Panels in a string share one electrical circuit, so under even light
//! they should produce comparable power. [`analyze_string`] measures each
//! panel's deviation from the string median and flags the ones past a
//! threshold, with special handling when fewer than three readings are
//! usable:
//!
//! | Eligible readings | Policy |
//! |---|---|
//! | 0 or 1 | insufficient data, nothing flagged |
//! | exactly 2 | fixed 30% pairwise rule, both flagged on a miss |
//! | 3 or more | deviation from median vs. caller threshold |
//!
//! A reading is eligible when the panel is not explicitly offline, a power
//! value is present, and it exceeds the fixed 50 W low-light cutoff.
//!
//! Pure and total: no I/O, no state, no failure path. The caller re-runs
//! the analysis whenever its telemetry cache changes.

mod analysis;
mod median;

pub use analysis::{
    analyze_string, PanelDeviation, PanelReading, StringAnalysis, DEFAULT_THRESHOLD_PCT,
    MIN_POWER_WATTS, PAIR_THRESHOLD_PCT,
};
pub use median::median;
