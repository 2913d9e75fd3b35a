//! Clock face loop

use defmt::*;
use embassy_time::{Duration, Ticker};

use segclock_core::traits::{RealTimeClock, SegmentDisplayExt};

/// Refresh period
const TICK: Duration = Duration::from_secs(1);

/// Log the die temperature every this many ticks
const TEMPERATURE_EVERY: u32 = 60;

/// Read the RTC and redraw the display once per tick, forever
///
/// Bus errors are logged and the next tick tries again.
pub async fn run<D, R>(display: &mut D, rtc: &mut R) -> !
where
    D: SegmentDisplayExt,
    D::Error: Format,
    R: RealTimeClock,
    R::Error: Format,
{
    let mut ticker = Ticker::every(TICK);
    let mut ticks: u32 = 0;

    loop {
        match rtc.get_time() {
            Ok(time) if !time.is_valid() => warn!("RTC returned out-of-range time: {}", time),
            Ok(time) => {
                if let Err(e) = display.show_clock_face(&time) {
                    warn!("Display update failed: {}", e);
                }
            }
            Err(e) => warn!("RTC read failed: {}", e),
        }

        if ticks % TEMPERATURE_EVERY == 0 {
            match rtc.read_temperature_x100() {
                Ok(t) => debug!("RTC temperature: {} centi-C", t),
                Err(e) => warn!("RTC temperature read failed: {}", e),
            }
        }
        ticks = ticks.wrapping_add(1);

        ticker.next().await;
    }
}
