//! segclock - TA6932 segment clock firmware
//!
//! RP2040 firmware for a 16-digit LED clock: a TA6932 display controller
//! on SPI0 with a separate strobe line, and a DS3231 RTC on I2C0.
//!
//! Boot sequence:
//! 1. Bring up SPI0, the strobe pin and I2C0
//! 2. Recover the RTC if its oscillator stopped
//! 3. Initialize the display and show the self-test pattern
//! 4. Render the clock face once per second

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::spi::Spi;
use embassy_time::Timer;
use {defmt_rtt as _, panic_probe as _};

use segclock_core::traits::{RealTimeClock, SegmentDisplay, SegmentDisplayExt};
use segclock_drivers::display::Ta6932;
use segclock_drivers::rtc::Ds3231;
use segclock_hal::adapters::{EhI2cBus, EhOutputPin, EhSpi};
use segclock_hal::I2cConfig;

mod board;
mod clock;

/// How long the self-test pattern stays up
const TEST_PATTERN_MS: u64 = 1000;

/// Display init attempts before giving up
const INIT_ATTEMPTS: u32 = 3;

/// Pause between display init attempts
const INIT_RETRY_MS: u64 = 100;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("segclock firmware starting...");

    let p = embassy_rp::init(Default::default());
    let config = board::clock_config();

    let spi_config = board::spi_config(&board::DISPLAY_BUS);
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_2, p.PIN_3, spi_config);
    let stb = Output::new(p.PIN_5, Level::High);

    let mut display = Ta6932::new(
        EhSpi::new(spi),
        EhOutputPin::new(stb),
        board::TRANSPORT,
        &config.display,
    );

    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = I2cConfig::STANDARD.frequency;
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_9, p.PIN_8, i2c_config);
    let mut rtc = Ds3231::new(EhI2cBus::new(i2c));
    info!("Peripherals initialized");

    let default_time = config.rtc.valid_default_time();
    if config.rtc.default_time.is_some() && default_time.is_none() {
        warn!("Configured default time out of range; ignored");
    }
    match rtc.ensure_initialized(default_time.as_ref()) {
        Ok(true) => warn!("RTC oscillator had stopped; default time written"),
        Ok(false) => info!("RTC running"),
        Err(e) => error!("RTC init failed: {}", e),
    }

    for attempt in 1..=INIT_ATTEMPTS {
        match display.init() {
            Ok(()) => break,
            Err(e) => warn!("Display init attempt {} failed: {}", attempt, e),
        }
        Timer::after_millis(INIT_RETRY_MS).await;
    }
    if !display.state().is_ready() {
        error!("Display not ready after {} attempts", INIT_ATTEMPTS);
    }
    if let Err(e) = display.show_test_pattern() {
        warn!("Test pattern failed: {}", e);
    }
    Timer::after_millis(TEST_PATTERN_MS).await;

    clock::run(&mut display, &mut rtc).await
}
