//! Board configuration
//!
//! Pin assignment (RP2040):
//!
//! | Signal     | Pin  |
//! |------------|------|
//! | TA6932 CLK | GP2  |
//! | TA6932 DIN | GP3  |
//! | TA6932 STB | GP5  |
//! | DS3231 SDA | GP8  |
//! | DS3231 SCL | GP9  |

use embassy_rp::spi;
use segclock_core::config::{ClockConfig, DisplayConfig, RtcConfig, CONFIG_VERSION};
use segclock_core::rtc::RtcTime;
use segclock_core::segment::Brightness;
use segclock_drivers::display::TransportConfig;
use segclock_hal::spi::{Phase, Polarity};
use segclock_hal::{BitOrder, SpiConfig};

/// RP2040 SPI shifts MSB first only
const NATIVE_BIT_ORDER: BitOrder = BitOrder::MsbFirst;

/// Display bus settings
pub const DISPLAY_BUS: SpiConfig = SpiConfig::TA6932;

/// Transport settings for the display bus on this chip
pub const TRANSPORT: TransportConfig =
    TransportConfig::for_bus(DISPLAY_BUS.bit_order, NATIVE_BIT_ORDER);

/// embassy-rp SPI config for a bus
pub fn spi_config(bus: &SpiConfig) -> spi::Config {
    let (polarity, phase): (Polarity, Phase) = bus.mode.into();
    let mut config = spi::Config::default();
    config.frequency = bus.frequency;
    config.polarity = match polarity {
        Polarity::IdleLow => spi::Polarity::IdleLow,
        Polarity::IdleHigh => spi::Polarity::IdleHigh,
    };
    config.phase = match phase {
        Phase::CaptureOnFirstTransition => spi::Phase::CaptureOnFirstTransition,
        Phase::CaptureOnSecondTransition => spi::Phase::CaptureOnSecondTransition,
    };
    config
}

/// Time written when the RTC is found with its oscillator stopped
pub const DEFAULT_TIME: RtcTime = RtcTime::new(2025, 9, 22, 1, 12, 0, 0);

/// Built-in configuration for the clock board
pub fn clock_config() -> ClockConfig {
    ClockConfig {
        version: CONFIG_VERSION,
        display: DisplayConfig {
            brightness: Brightness::MAX,
            ..DisplayConfig::clock_board()
        },
        rtc: RtcConfig {
            default_time: Some(DEFAULT_TIME),
        },
    }
}
