//! Numeric-aware label ordering.
//!
//! Raw labels mix letters and digits (`A2`, `A10`, `B1`, `panel-3`). Plain
//! lexicographic order puts `A10` before `A2`; the natural order used for
//! presenting unassigned panels compares digit runs by value instead.

use std::cmp::Ordering;

/// Compare two labels with digit runs compared numerically.
///
/// Non-digit runs compare as plain text. Digit runs compare by numeric
/// value regardless of length, with the shorter spelling first on ties so
/// `A1` orders before `A01`.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut rest_a = a;
    let mut rest_b = b;

    loop {
        match (rest_a.chars().next(), rest_b.chars().next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(ca), Some(cb)) => {
                if ca.is_ascii_digit() && cb.is_ascii_digit() {
                    let (run_a, tail_a) = split_digit_run(rest_a);
                    let (run_b, tail_b) = split_digit_run(rest_b);
                    match cmp_digit_runs(run_a, run_b) {
                        Ordering::Equal => {
                            rest_a = tail_a;
                            rest_b = tail_b;
                        }
                        other => return other,
                    }
                } else {
                    match ca.cmp(&cb) {
                        Ordering::Equal => {
                            rest_a = &rest_a[ca.len_utf8()..];
                            rest_b = &rest_b[cb.len_utf8()..];
                        }
                        other => return other,
                    }
                }
            }
        }
    }
}

/// Split a leading ASCII digit run off a label.
fn split_digit_run(s: &str) -> (&str, &str) {
    let end = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len());
    s.split_at(end)
}

/// Compare two digit runs by numeric value without parsing them.
///
/// After stripping leading zeros, a longer run is a larger number and
/// equal-length runs compare digit by digit. Ties (same value) fall back
/// to spelling length so `1` orders before `01`.
fn cmp_digit_runs(a: &str, b: &str) -> Ordering {
    let sig_a = a.trim_start_matches('0');
    let sig_b = b.trim_start_matches('0');
    sig_a
        .len()
        .cmp(&sig_b.len())
        .then_with(|| sig_a.cmp(sig_b))
        .then_with(|| a.len().cmp(&b.len()))
}
