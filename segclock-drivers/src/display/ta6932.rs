//! TA6932 16-position LED display controller
//!
//! The TA6932 (a TM16xx-family part) drives up to 16 common-cathode
//! digits from an internal display RAM. It is written over a 3-wire link
//! (CLK, DIN, STB) with LSB-first bytes.
//!
//! # Wire protocol
//!
//! Every transaction is a strobe frame (see [`StrobeTransport`]):
//! - Data command: `0x40` (auto-increment) or `0x44` (fixed address)
//! - Address frame: `0xC0 | position` followed by one or more data bytes
//! - Display control: `0x88 | brightness` (on) or `0x80` (off)
//!
//! # Buffering
//!
//! The driver keeps a 16-byte back buffer. `put_*` only stage into it;
//! `flush()` sends the whole buffer as one auto-increment burst.
//! `write_one_raw()` and the `put_*_one` helpers send a single position
//! immediately and mirror it into the buffer.

use segclock_core::config::DisplayConfig;
use segclock_core::segment::{
    Brightness, DisplayMemory, FontTable, SegmentPattern, DP, POSITIONS, POSITION_MASK,
};
use segclock_core::state::{DriverEvent, DriverState};
use segclock_core::traits::SegmentDisplay;
use segclock_hal::{OutputPin, SpiBus};

use super::transport::{StrobeTransport, TransportConfig};

/// TA6932 command bytes
pub mod cmd {
    /// Data write, address auto-increment
    pub const DATA_AUTO_INCREMENT: u8 = 0x40;
    /// Data write, fixed address
    pub const DATA_FIXED_ADDRESS: u8 = 0x44;
    /// Display on; low three bits select brightness
    pub const DISPLAY_ON: u8 = 0x88;
    /// Display off
    pub const DISPLAY_OFF: u8 = 0x80;
    /// Address set; low four bits select the position
    pub const ADDRESS: u8 = 0xC0;
}

/// Address byte for a position
#[inline]
pub const fn address(position: u8) -> u8 {
    cmd::ADDRESS | (position & POSITION_MASK)
}

/// Display-on byte for a brightness level
#[inline]
pub const fn display_on(brightness: Brightness) -> u8 {
    cmd::DISPLAY_ON | brightness.level()
}

/// TA6932 driver
pub struct Ta6932<SPI, STB> {
    transport: StrobeTransport<SPI, STB>,
    memory: DisplayMemory,
    font: FontTable,
    /// Level `init()` applies
    configured: Brightness,
    brightness: Brightness,
    on: bool,
    state: DriverState,
}

impl<SPI: SpiBus, STB: OutputPin> Ta6932<SPI, STB> {
    /// Create a driver; nothing is sent until [`SegmentDisplay::init`]
    pub fn new(spi: SPI, stb: STB, transport: TransportConfig, config: &DisplayConfig) -> Self {
        Self {
            transport: StrobeTransport::new(spi, stb, transport),
            memory: DisplayMemory::new(),
            font: config.font(),
            configured: Brightness::new(config.brightness.level()),
            brightness: Brightness::new(config.brightness.level()),
            on: false,
            state: DriverState::Uninitialized,
        }
    }

    /// Install or replace a glyph (board layout, bit 7 dropped)
    pub fn set_glyph(&mut self, code: u8, pattern: SegmentPattern) {
        self.font.set_glyph(code, pattern);
    }

    /// Mutable access to the glyph table
    pub fn font_mut(&mut self) -> &mut FontTable {
        &mut self.font
    }

    /// Stored brightness
    pub fn brightness(&self) -> Brightness {
        self.brightness
    }

    /// Whether the last display control command turned the display on
    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Lifecycle state
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Send several positions in fixed-address mode
    ///
    /// One `0x44` data command, then one address frame per entry. Each
    /// entry is mirrored into the back buffer once its frame went out; on
    /// failure the remaining entries are not sent.
    pub fn write_many_raw(&mut self, entries: &[(u8, SegmentPattern)]) -> Result<(), SPI::Error> {
        if entries.is_empty() {
            return Ok(());
        }

        self.transport.command(cmd::DATA_FIXED_ADDRESS)?;
        for &(position, pattern) in entries {
            self.transport
                .frame(|w| w.send_all(&[address(position), pattern]))?;
            self.memory.put(position, pattern);
        }
        Ok(())
    }

    /// Hand back the bus and strobe pin
    pub fn release(self) -> (SPI, STB) {
        #[cfg(feature = "defmt")]
        defmt::debug!("ta6932: {}", self.state.transition(DriverEvent::Released));

        self.transport.release()
    }

    fn send_display_control(&mut self, on: bool) -> Result<(), SPI::Error> {
        let command = if on {
            display_on(self.brightness)
        } else {
            cmd::DISPLAY_OFF
        };
        self.transport.command(command)?;
        self.on = on;
        Ok(())
    }
}

impl<SPI: SpiBus, STB: OutputPin> SegmentDisplay for Ta6932<SPI, STB> {
    type Error = SPI::Error;

    fn init(&mut self) -> Result<(), Self::Error> {
        self.transport.idle();
        self.brightness = self.configured;
        self.send_display_control(true)?;
        self.state = self.state.transition(DriverEvent::InitComplete);

        #[cfg(feature = "defmt")]
        defmt::debug!("ta6932: ready, brightness {}", self.brightness);

        Ok(())
    }

    fn font(&self) -> &FontTable {
        &self.font
    }

    fn put_raw(&mut self, position: u8, pattern: SegmentPattern, decimal_point: bool) {
        let pattern = if decimal_point { pattern | DP } else { pattern };
        self.memory.put(position, pattern);
    }

    fn snapshot(&self) -> [SegmentPattern; POSITIONS] {
        self.memory.snapshot()
    }

    fn load_buffer(&mut self, patterns: &[SegmentPattern; POSITIONS]) {
        self.memory.load(patterns);
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.transport.command(cmd::DATA_AUTO_INCREMENT)?;
        let memory = &self.memory;
        self.transport.frame(|w| {
            w.send_byte(address(0))?;
            w.send_all(memory.as_bytes())
        })
    }

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.memory.clear();
        self.flush()
    }

    fn write_one_raw(&mut self, position: u8, pattern: SegmentPattern) -> Result<(), Self::Error> {
        self.transport.command(cmd::DATA_FIXED_ADDRESS)?;
        self.transport
            .frame(|w| w.send_all(&[address(position), pattern]))?;
        self.memory.put(position, pattern);
        Ok(())
    }

    fn set_brightness(&mut self, level: u8) -> Result<(), Self::Error> {
        self.brightness = Brightness::new(level);
        self.send_display_control(true)
    }

    fn display_on(&mut self) -> Result<(), Self::Error> {
        self.send_display_control(true)
    }

    fn display_off(&mut self) -> Result<(), Self::Error> {
        self.send_display_control(false)
    }
}
