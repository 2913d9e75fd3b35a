//! Segment patterns and board wiring

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One display position's segment pattern
///
/// Bits 0-6 are segments, bit 7 is the decimal point/colon.
pub type SegmentPattern = u8;

/// Nothing lit
pub const BLANK: SegmentPattern = 0x00;

/// Decimal point / colon bit
pub const DP: SegmentPattern = 0x80;

/// The seven segment bits (everything except the decimal point)
pub const SEGMENTS_MASK: SegmentPattern = 0x7F;

/// Logical segment of a digit
///
/// ```text
///    aaa
///   f   b
///   f   b
///    ggg
///   e   c
///   e   c
///    ddd  dp
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Segment {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    Dp,
}

impl Segment {
    /// Bit of this segment in the logical layout
    pub const fn logical_bit(self) -> u8 {
        self as u8
    }
}

/// Mapping from logical segments to the bits the board actually wires
///
/// Entry `i` is the physical bit driven for logical segment `i`
/// (a, b, c, d, e, f, g, dp). The decimal point always stays on bit 7,
/// so the seven segments permute bits 0..=6.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "[u8; 8]", into = "[u8; 8]"))]
pub struct SegmentWiring {
    bits: [u8; 8],
}

impl Default for SegmentWiring {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl SegmentWiring {
    /// a..g on bits 0..6, dp on bit 7
    pub const STANDARD: Self = Self {
        bits: [0, 1, 2, 3, 4, 5, 6, 7],
    };

    /// TA6932 clock board: b, f, a, e, d, c, g, dp on bits 0..7
    pub const TA6932_CLOCK_BOARD: Self = Self {
        bits: [2, 0, 5, 4, 3, 1, 6, 7],
    };

    /// Build a wiring from physical bit numbers
    ///
    /// Returns `None` unless `bits` is a permutation of 0..=7 with the
    /// decimal point on bit 7.
    pub const fn new(bits: [u8; 8]) -> Option<Self> {
        if bits[7] != 7 {
            return None;
        }
        let mut seen = 0u8;
        let mut i = 0;
        while i < 8 {
            if bits[i] > 7 {
                return None;
            }
            seen |= 1 << bits[i];
            i += 1;
        }
        if seen == 0xFF {
            Some(Self { bits })
        } else {
            None
        }
    }

    /// Physical bit driven for a logical segment
    pub const fn physical_bit(&self, segment: Segment) -> u8 {
        self.bits[segment as usize] & 0x07
    }

    /// Translate a logical-layout pattern to the board layout
    pub const fn apply(&self, logical: SegmentPattern) -> SegmentPattern {
        let mut out = 0u8;
        let mut i = 0;
        while i < 8 {
            if logical & (1 << i) != 0 {
                out |= 1 << (self.bits[i] & 0x07);
            }
            i += 1;
        }
        out
    }
}

/// Rejected wiring table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidWiring;

impl core::fmt::Display for InvalidWiring {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("segment wiring must permute bits 0-6 with dp on bit 7")
    }
}

impl TryFrom<[u8; 8]> for SegmentWiring {
    type Error = InvalidWiring;

    fn try_from(bits: [u8; 8]) -> Result<Self, Self::Error> {
        Self::new(bits).ok_or(InvalidWiring)
    }
}

impl From<SegmentWiring> for [u8; 8] {
    fn from(wiring: SegmentWiring) -> Self {
        wiring.bits
    }
}
