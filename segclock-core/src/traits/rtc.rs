//! Real-time clock trait

use crate::rtc::RtcTime;

/// Battery-backed calendar clock
pub trait RealTimeClock {
    /// Bus error type
    type Error;

    /// Write the full time and date record
    fn set_time(&mut self, time: &RtcTime) -> Result<(), Self::Error>;

    /// Read the full time and date record
    fn get_time(&mut self) -> Result<RtcTime, Self::Error>;

    /// Recover from an oscillator stop
    ///
    /// If the chip reports that its oscillator stopped (power loss with no
    /// battery, first power-up), restart it, write `default_time` when
    /// given and clear the flag. Returns `true` when recovery ran.
    fn ensure_initialized(&mut self, default_time: Option<&RtcTime>) -> Result<bool, Self::Error>;

    /// Die temperature in hundredths of a degree Celsius
    fn read_temperature_x100(&mut self) -> Result<i16, Self::Error>;
}
