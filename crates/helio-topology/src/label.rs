//! String names and slot labels.
//!
//! A *string* is a series-wired chain of panels named with 1-2 uppercase
//! letters. A *slot* is one expected position within a string, rendered as
//! the string name followed by the 1-based position: `A1`, `AA12`.
//!
//! Hardware reports its own labels over telemetry and those labels are not
//! trusted: [`parse_panel_label`] is the tolerant parser used to interpret
//! them, while [`SlotLabel`]'s `FromStr` is the strict form used for
//! declared configuration.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A label did not parse as a declared slot label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid slot label: {0:?}")]
pub struct ParseSlotLabelError(pub String);

/// Maximum length of a string name in characters.
pub const MAX_STRING_NAME_LEN: usize = 2;

/// A validated string name: 1-2 ASCII uppercase letters.
///
/// Construction normalizes lowercase input; anything that is not one or two
/// ASCII letters is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StringName(String);

impl StringName {
    /// Create a string name, normalizing to uppercase.
    ///
    /// Returns `None` unless the input is 1-2 ASCII letters.
    pub fn new(name: &str) -> Option<Self> {
        if name.is_empty() || name.len() > MAX_STRING_NAME_LEN {
            return None;
        }
        if !name.chars().all(|c| c.is_ascii_alphabetic()) {
            return None;
        }
        Some(Self(name.to_ascii_uppercase()))
    }

    /// The normalized (uppercase) name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StringName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for StringName {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for StringName {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = <String as serde::Deserialize>::deserialize(deserializer)?;
        StringName::new(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "string name must be 1-2 ASCII letters, got {raw:?}"
            ))
        })
    }
}

/// An expected position within the declared topology: string name plus
/// 1-based position.
///
/// Ordered by (string, position), so `A2 < A10 < B1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotLabel {
    /// The string this slot belongs to.
    pub string: StringName,
    /// 1-based position within the string.
    pub position: u32,
}

impl SlotLabel {
    /// Create a slot label.
    pub fn new(string: StringName, position: u32) -> Self {
        Self { string, position }
    }
}

impl fmt::Display for SlotLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.string, self.position)
    }
}

impl FromStr for SlotLabel {
    type Err = ParseSlotLabelError;

    /// Strict parse of a declared slot label.
    ///
    /// Accepts the same shapes as [`parse_panel_label`] but rejects
    /// position 0, which can never be a declared slot.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parse_panel_label(s) {
            Some((string, position)) if position >= 1 => Ok(Self { string, position }),
            _ => Err(ParseSlotLabelError(s.to_string())),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for SlotLabel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for SlotLabel {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = <String as serde::Deserialize>::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Tolerant parse of a hardware-reported label into string name and position.
///
/// Letters are normalized to uppercase (hardware reports uppercase, user
/// input may not) and leading zeros are stripped by the numeric parse:
///
/// - `"A1"` → `(A, 1)`
/// - `"AA12"` → `(AA, 12)`
/// - `"b10"` → `(B, 10)`
/// - `"A01"` → `(A, 1)`
///
/// Returns `None` for anything else: empty input, digits first (`"1A"`),
/// no digits (`"A"`), no letters (`"123"`), separators (`"A-1"`, `"A 1"`),
/// trailing letters (`"A1B"`), or more than two letters (no string can be
/// named that way).
pub fn parse_panel_label(label: &str) -> Option<(StringName, u32)> {
    let digits_at = label.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = label.split_at(digits_at);
    if digits.chars().any(|c| !c.is_ascii_digit()) {
        return None;
    }
    let string = StringName::new(letters)?;
    let position = digits.parse().ok()?;
    Some((string, position))
}
