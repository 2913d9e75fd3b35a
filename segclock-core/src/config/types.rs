//! Configuration type definitions

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::rtc::RtcTime;
use crate::segment::{Brightness, FontTable, SegmentPattern, SegmentWiring};

/// Maximum glyph overrides per display
pub const MAX_GLYPH_OVERRIDES: usize = 16;

/// Current config layout version
pub const CONFIG_VERSION: u8 = 1;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Serialization failed (buffer too small)
    Encode,
    /// Deserialization failed
    Decode,
    /// Stored config was written by another layout version
    VersionMismatch,
    /// No room for another glyph override
    TooManyOverrides,
}

/// One custom glyph, in the board's wire layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GlyphOverride {
    /// Character code (0-127)
    pub code: u8,
    /// Segment pattern; bit 7 is dropped
    pub pattern: SegmentPattern,
}

/// Display controller configuration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Brightness applied by `init()`
    pub brightness: Brightness,
    /// How segments are wired to controller bits
    pub wiring: SegmentWiring,
    /// Glyphs installed over the built-ins
    pub glyph_overrides: Vec<GlyphOverride, MAX_GLYPH_OVERRIDES>,
}

impl DisplayConfig {
    /// Config for the TA6932 clock board
    pub fn clock_board() -> Self {
        Self {
            wiring: SegmentWiring::TA6932_CLOCK_BOARD,
            ..Self::default()
        }
    }

    /// Add a glyph override
    pub fn with_glyph(mut self, code: u8, pattern: SegmentPattern) -> Result<Self, ConfigError> {
        self.glyph_overrides
            .push(GlyphOverride { code, pattern })
            .map_err(|_| ConfigError::TooManyOverrides)?;
        Ok(self)
    }

    /// Build the font table: built-ins through the wiring, then overrides
    pub fn font(&self) -> FontTable {
        let mut font = FontTable::with_wiring(self.wiring);
        for glyph in &self.glyph_overrides {
            font.set_glyph(glyph.code, glyph.pattern);
        }
        font
    }
}

/// Real-time clock configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RtcConfig {
    /// Time written when the oscillator is found stopped
    pub default_time: Option<RtcTime>,
}

impl RtcConfig {
    /// Default time, if set and in range
    pub fn valid_default_time(&self) -> Option<RtcTime> {
        self.default_time.filter(RtcTime::is_valid)
    }
}

/// Complete clock configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClockConfig {
    /// Layout version, checked on load
    pub version: u8,
    pub display: DisplayConfig,
    pub rtc: RtcConfig,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            display: DisplayConfig::default(),
            rtc: RtcConfig::default(),
        }
    }
}

#[cfg(feature = "serde")]
impl ClockConfig {
    /// Serialize into `buf`, returning the used prefix
    pub fn to_bytes<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
        postcard::to_slice(self, buf).map_err(|_| ConfigError::Encode)
    }

    /// Deserialize and check the layout version
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = postcard::from_bytes(bytes).map_err(|_| ConfigError::Decode)?;
        if config.version != CONFIG_VERSION {
            return Err(ConfigError::VersionMismatch);
        }
        Ok(config)
    }
}

#[cfg(feature = "serde")]
impl DisplayConfig {
    /// Serialize into `buf`, returning the used prefix
    pub fn to_bytes<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
        postcard::to_slice(self, buf).map_err(|_| ConfigError::Encode)
    }

    /// Deserialize
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        postcard::from_bytes(bytes).map_err(|_| ConfigError::Decode)
    }
}
