//! Tagged display values
//!
//! One parameter type lets a call site say "this exact pattern", "this
//! decimal digit" or "this character" without separate entry points.

use super::font::FontTable;
use super::pattern::{SegmentPattern, BLANK, DP};

/// What to show at one position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Value {
    /// Pattern sent as-is, all eight bits
    Raw(SegmentPattern),
    /// Decimal digit 0-9
    Digit(u8),
    /// Printable ASCII 32-126
    Char(u8),
}

impl Value {
    /// Resolve against a font, optionally lighting the decimal point
    pub fn resolve(self, font: &FontTable, decimal_point: bool) -> SegmentPattern {
        resolve(font, self, decimal_point)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        // Anything outside ASCII maps to DEL, which is out of range
        Value::Char(if c.is_ascii() { c as u8 } else { 0x7F })
    }
}

/// Turn a tagged value into a segment pattern
///
/// Out-of-range digits and characters give blank. The decimal point is
/// OR-ed in last, so it also applies to raw and blank patterns.
pub fn resolve(font: &FontTable, value: Value, decimal_point: bool) -> SegmentPattern {
    let pattern = match value {
        Value::Raw(pattern) => pattern,
        Value::Digit(d @ 0..=9) => font.resolve(b'0' + d),
        Value::Char(c @ 32..=126) => font.resolve(c),
        Value::Digit(_) | Value::Char(_) => BLANK,
    };

    if decimal_point {
        pattern | DP
    } else {
        pattern
    }
}
