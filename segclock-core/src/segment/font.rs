//! Character-to-segment font
//!
//! The built-in glyphs are authored in the logical layout (a = bit 0 ..
//! g = bit 6) and translated through a [`SegmentWiring`] when the table is
//! built. Overrides installed with [`FontTable::set_glyph`] are stored as
//! given, in the board layout.

use super::pattern::{SegmentPattern, SegmentWiring, BLANK, SEGMENTS_MASK};

/// Number of character codes covered by the table (7-bit ASCII)
pub const FONT_SIZE: usize = 128;

/// Built-in glyphs, logical layout
///
/// Letters that cannot be told apart from digits on seven segments share
/// their pattern (`O`/`0`, `S`/`5`, `I`/`1`, `Z`/`2`, `g`/`9`). K, M, V, W
/// and X have no usable shape and are left out.
const BUILTIN: &[(u8, SegmentPattern)] = &[
    (b' ', 0x00),
    (b'-', 0x40),
    (b'_', 0x08),
    (b'0', 0x3F),
    (b'1', 0x06),
    (b'2', 0x5B),
    (b'3', 0x4F),
    (b'4', 0x66),
    (b'5', 0x6D),
    (b'6', 0x7D),
    (b'7', 0x07),
    (b'8', 0x7F),
    (b'9', 0x6F),
    (b'A', 0x77),
    (b'B', 0x7C),
    (b'C', 0x39),
    (b'D', 0x5E),
    (b'E', 0x79),
    (b'F', 0x71),
    (b'G', 0x3D),
    (b'H', 0x76),
    (b'I', 0x06),
    (b'J', 0x1E),
    (b'L', 0x38),
    (b'N', 0x37),
    (b'O', 0x3F),
    (b'P', 0x73),
    (b'Q', 0x67),
    (b'R', 0x50),
    (b'S', 0x6D),
    (b'T', 0x78),
    (b'U', 0x3E),
    (b'Y', 0x6E),
    (b'Z', 0x5B),
    (b'a', 0x77),
    (b'b', 0x7C),
    (b'c', 0x58),
    (b'd', 0x5E),
    (b'e', 0x79),
    (b'f', 0x71),
    (b'g', 0x6F),
    (b'h', 0x74),
    (b'i', 0x04),
    (b'j', 0x0E),
    (b'l', 0x38),
    (b'n', 0x54),
    (b'o', 0x5C),
    (b'p', 0x73),
    (b'q', 0x67),
    (b'r', 0x50),
    (b's', 0x6D),
    (b't', 0x78),
    (b'u', 0x1C),
    (b'y', 0x6E),
    (b'z', 0x5B),
];

/// Look up a built-in glyph in the logical layout
pub fn builtin(code: u8) -> Option<SegmentPattern> {
    BUILTIN
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, pattern)| *pattern)
}

/// Mutable glyph table
///
/// Every entry has bit 7 clear. Codes without a glyph resolve to blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontTable {
    glyphs: [SegmentPattern; FONT_SIZE],
    defined: u128,
    wiring: SegmentWiring,
}

impl Default for FontTable {
    fn default() -> Self {
        Self::new()
    }
}

impl FontTable {
    /// Built-in glyphs in the standard layout
    pub fn new() -> Self {
        Self::with_wiring(SegmentWiring::STANDARD)
    }

    /// Built-in glyphs translated through `wiring`
    pub fn with_wiring(wiring: SegmentWiring) -> Self {
        let mut table = Self {
            glyphs: [BLANK; FONT_SIZE],
            defined: 0,
            wiring,
        };
        for &(code, pattern) in BUILTIN {
            table.install(code, wiring.apply(pattern));
        }
        table
    }

    /// Pattern for a character code; blank when undefined or >= 128
    pub fn resolve(&self, code: u8) -> SegmentPattern {
        self.glyphs.get(code as usize).copied().unwrap_or(BLANK)
    }

    /// Install or replace one glyph
    ///
    /// The pattern is masked to the seven segment bits. Codes >= 128 are
    /// ignored.
    pub fn set_glyph(&mut self, code: u8, pattern: SegmentPattern) {
        self.install(code, pattern);
    }

    /// Put back the built-in glyph (or blank) for one code
    pub fn restore_builtin(&mut self, code: u8) {
        if code as usize >= FONT_SIZE {
            return;
        }
        match builtin(code) {
            Some(pattern) => self.install(code, self.wiring.apply(pattern)),
            None => {
                self.glyphs[code as usize] = BLANK;
                self.defined &= !(1u128 << code);
            }
        }
    }

    /// Whether a code has a glyph (built-in or installed)
    pub fn is_defined(&self, code: u8) -> bool {
        (code as usize) < FONT_SIZE && self.defined & (1u128 << code) != 0
    }

    /// Wiring the built-ins were translated through
    pub fn wiring(&self) -> SegmentWiring {
        self.wiring
    }

    fn install(&mut self, code: u8, pattern: SegmentPattern) {
        if let Some(slot) = self.glyphs.get_mut(code as usize) {
            *slot = pattern & SEGMENTS_MASK;
            self.defined |= 1u128 << code;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::pattern::DP;

    #[test]
    fn test_digits() {
        let font = FontTable::new();
        let expected = [0x3F, 0x06, 0x5B, 0x4F, 0x66, 0x6D, 0x7D, 0x07, 0x7F, 0x6F];
        for (d, pattern) in expected.iter().enumerate() {
            assert_eq!(font.resolve(b'0' + d as u8), *pattern);
        }
    }

    #[test]
    fn test_space_and_punctuation() {
        let font = FontTable::new();
        assert_eq!(font.resolve(b' '), BLANK);
        assert!(font.is_defined(b' '));
        assert_eq!(font.resolve(b'-'), 0x40);
        assert_eq!(font.resolve(b'_'), 0x08);
        assert_eq!(font.resolve(b'!'), BLANK);
        assert!(!font.is_defined(b'!'));
    }

    #[test]
    fn test_undefined_letters_are_blank() {
        let font = FontTable::new();
        for c in b"KMVWXkmvwx" {
            assert_eq!(font.resolve(*c), BLANK);
            assert!(!font.is_defined(*c));
        }
    }

    #[test]
    fn test_aliases_match_digits() {
        let font = FontTable::new();
        assert_eq!(font.resolve(b'O'), font.resolve(b'0'));
        assert_eq!(font.resolve(b'S'), font.resolve(b'5'));
        assert_eq!(font.resolve(b'I'), font.resolve(b'1'));
        assert_eq!(font.resolve(b'Z'), font.resolve(b'2'));
        assert_eq!(font.resolve(b'g'), font.resolve(b'9'));
    }

    #[test]
    fn test_high_codes() {
        let mut font = FontTable::new();
        assert_eq!(font.resolve(200), BLANK);
        font.set_glyph(200, 0x7F);
        assert_eq!(font.resolve(200), BLANK);
        assert!(!font.is_defined(200));
    }

    #[test]
    fn test_set_glyph_masks_dp() {
        let mut font = FontTable::new();
        font.set_glyph(b'K', 0x76 | DP);
        assert_eq!(font.resolve(b'K'), 0x76);
        assert!(font.is_defined(b'K'));

        font.restore_builtin(b'K');
        assert_eq!(font.resolve(b'K'), BLANK);
        assert!(!font.is_defined(b'K'));
    }

    #[test]
    fn test_restore_builtin() {
        let mut font = FontTable::with_wiring(SegmentWiring::TA6932_CLOCK_BOARD);
        font.set_glyph(b'1', 0x00);
        assert_eq!(font.resolve(b'1'), 0x00);

        font.restore_builtin(b'1');
        assert_eq!(font.resolve(b'1'), 0x21);
    }

    #[test]
    fn test_clock_board_wiring() {
        let font = FontTable::with_wiring(SegmentWiring::TA6932_CLOCK_BOARD);
        let expected = [0x3F, 0x21, 0x5D, 0x75, 0x63, 0x76, 0x7E, 0x25, 0x7F, 0x77];
        for (d, pattern) in expected.iter().enumerate() {
            assert_eq!(font.resolve(b'0' + d as u8), *pattern);
        }
        assert_eq!(font.resolve(b'-'), 0x40);
        assert_eq!(font.wiring(), SegmentWiring::TA6932_CLOCK_BOARD);
    }

    #[test]
    fn test_no_entry_has_dp() {
        let font = FontTable::with_wiring(SegmentWiring::TA6932_CLOCK_BOARD);
        for code in 0..128u8 {
            assert_eq!(font.resolve(code) & DP, 0);
        }
    }
}
