//! Display brightness level

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// PWM duty step, 0 (dimmest) to 7 (brightest)
///
/// Construction saturates out-of-range levels to 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Brightness(u8);

impl Brightness {
    /// Dimmest setting that still lights the display
    pub const MIN: Self = Self(0);
    /// Brightest setting
    pub const MAX: Self = Self(7);

    /// Clamp a level into 0..=7
    pub const fn new(level: u8) -> Self {
        if level > 7 {
            Self::MAX
        } else {
            Self(level)
        }
    }

    /// Level as a 3-bit value
    pub const fn level(self) -> u8 {
        self.0
    }
}

impl Default for Brightness {
    fn default() -> Self {
        Self::MAX
    }
}

impl From<u8> for Brightness {
    fn from(level: u8) -> Self {
        Self::new(level)
    }
}
