//! Display back buffer
//!
//! Sixteen segment patterns, one per controller address. Positions are
//! never rejected: only the low four bits are used.

use super::pattern::{SegmentPattern, BLANK};

/// Number of addressable positions
pub const POSITIONS: usize = 16;

/// Mask applied to every position before use
pub const POSITION_MASK: u8 = 0x0F;

/// Buffer index for a position
#[inline]
pub const fn position_index(position: u8) -> usize {
    (position & POSITION_MASK) as usize
}

/// Back buffer of segment patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayMemory {
    cells: [SegmentPattern; POSITIONS],
}

impl DisplayMemory {
    /// All blank
    pub const fn new() -> Self {
        Self {
            cells: [BLANK; POSITIONS],
        }
    }

    /// Store a pattern at `position mod 16`
    pub fn put(&mut self, position: u8, pattern: SegmentPattern) {
        self.cells[position_index(position)] = pattern;
    }

    /// Pattern at `position mod 16`
    pub fn get(&self, position: u8) -> SegmentPattern {
        self.cells[position_index(position)]
    }

    /// Copy of the whole buffer, index = position
    pub fn snapshot(&self) -> [SegmentPattern; POSITIONS] {
        self.cells
    }

    /// Borrow the buffer in transmission order
    pub fn as_bytes(&self) -> &[SegmentPattern; POSITIONS] {
        &self.cells
    }

    /// Blank every position
    pub fn clear(&mut self) {
        self.cells = [BLANK; POSITIONS];
    }

    /// Replace the whole buffer
    pub fn load(&mut self, patterns: &[SegmentPattern; POSITIONS]) {
        self.cells = *patterns;
    }
}
