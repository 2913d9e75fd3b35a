//! Calendar time as stored by the RTC

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Time and date record
///
/// Hours are 24-hour. `weekday` is 1-7 with no fixed starting day; the
/// RTC only counts it. `year` is the full year; the chip stores the last
/// two digits and reads back as 2000-2099.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RtcTime {
    pub seconds: u8,
    pub minutes: u8,
    pub hours: u8,
    pub weekday: u8,
    pub date: u8,
    pub month: u8,
    pub year: u16,
}

impl Default for RtcTime {
    fn default() -> Self {
        Self {
            seconds: 0,
            minutes: 0,
            hours: 0,
            weekday: 1,
            date: 1,
            month: 1,
            year: 2000,
        }
    }
}

impl RtcTime {
    /// Build a record from date and time parts
    pub const fn new(
        year: u16,
        month: u8,
        date: u8,
        weekday: u8,
        hours: u8,
        minutes: u8,
        seconds: u8,
    ) -> Self {
        Self {
            seconds,
            minutes,
            hours,
            weekday,
            date,
            month,
            year,
        }
    }

    /// Check every field against its register range
    ///
    /// Does not check the day against the month length.
    pub fn is_valid(&self) -> bool {
        self.seconds < 60
            && self.minutes < 60
            && self.hours < 24
            && (1..=7).contains(&self.weekday)
            && (1..=31).contains(&self.date)
            && (1..=12).contains(&self.month)
            && (2000..=2099).contains(&self.year)
    }
}
