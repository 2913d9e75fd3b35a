//! Strobe-framed serial transport
//!
//! The TA6932 latches a transaction between the falling and rising edge of
//! its STB line. A frame is: STB low, one or more bytes, STB high. The
//! first byte of every frame is interpreted as a command.

use segclock_hal::{BitOrder, OutputPin, SpiBus};

/// Transport settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TransportConfig {
    /// Bit-reverse every byte before it is sent
    ///
    /// The controller expects LSB-first data. Set this on buses that can
    /// only shift MSB first (RP2040).
    pub reverse_bits: bool,
}

impl TransportConfig {
    /// For buses configured LSB first
    pub const LSB_FIRST_BUS: Self = Self {
        reverse_bits: false,
    };

    /// For buses that only shift MSB first
    pub const MSB_FIRST_BUS: Self = Self { reverse_bits: true };

    /// Settings for a bus that shifts `native` order when the device
    /// wants `wanted`
    pub const fn for_bus(wanted: BitOrder, native: BitOrder) -> Self {
        Self {
            reverse_bits: !matches!(
                (wanted, native),
                (BitOrder::MsbFirst, BitOrder::MsbFirst) | (BitOrder::LsbFirst, BitOrder::LsbFirst)
            ),
        }
    }
}

/// Serial link plus strobe line
pub struct StrobeTransport<SPI, STB> {
    spi: SPI,
    stb: STB,
    config: TransportConfig,
}

/// Byte sink handed to a frame body
///
/// Only exists while the strobe is held low, so frames cannot nest.
pub struct FrameWriter<'a, SPI> {
    spi: &'a mut SPI,
    reverse_bits: bool,
    sent: usize,
}

impl<SPI: SpiBus> FrameWriter<'_, SPI> {
    /// Send one byte inside the current frame
    pub fn send_byte(&mut self, byte: u8) -> Result<(), SPI::Error> {
        send(self.spi, self.reverse_bits, byte)?;
        self.sent += 1;
        Ok(())
    }

    /// Send bytes one at a time inside the current frame
    pub fn send_all(&mut self, bytes: &[u8]) -> Result<(), SPI::Error> {
        for &byte in bytes {
            self.send_byte(byte)?;
        }
        Ok(())
    }

    /// Bytes sent so far in this frame
    pub fn sent(&self) -> usize {
        self.sent
    }
}

fn send<SPI: SpiBus>(spi: &mut SPI, reverse_bits: bool, byte: u8) -> Result<(), SPI::Error> {
    let byte = if reverse_bits { byte.reverse_bits() } else { byte };
    spi.write_byte(byte)
}

impl<SPI: SpiBus, STB: OutputPin> StrobeTransport<SPI, STB> {
    /// Take the bus and strobe pin; the strobe is driven idle (high)
    pub fn new(spi: SPI, stb: STB, config: TransportConfig) -> Self {
        let mut transport = Self { spi, stb, config };
        transport.idle();
        transport
    }

    /// Drive the strobe line to its idle level
    pub fn idle(&mut self) {
        self.stb.set_high();
    }

    /// Whether the strobe is at its idle level
    pub fn is_idle(&self) -> bool {
        self.stb.is_set_high()
    }

    /// Transport settings
    pub fn config(&self) -> TransportConfig {
        self.config
    }

    /// Send one byte with no framing
    pub fn send_byte(&mut self, byte: u8) -> Result<(), SPI::Error> {
        send(&mut self.spi, self.config.reverse_bits, byte)
    }

    /// Run `body` with the strobe held low
    ///
    /// The strobe is released whether or not `body` succeeds; its error
    /// is returned unchanged.
    pub fn frame<F>(&mut self, body: F) -> Result<(), SPI::Error>
    where
        F: FnOnce(&mut FrameWriter<'_, SPI>) -> Result<(), SPI::Error>,
    {
        let mut writer = FrameWriter {
            spi: &mut self.spi,
            reverse_bits: self.config.reverse_bits,
            sent: 0,
        };

        self.stb.set_low();
        let result = body(&mut writer);
        self.stb.set_high();

        #[cfg(feature = "defmt")]
        if result.is_err() {
            defmt::warn!("ta6932: frame aborted after {} bytes", writer.sent);
        }

        result
    }

    /// One-byte frame
    pub fn command(&mut self, command: u8) -> Result<(), SPI::Error> {
        #[cfg(feature = "defmt")]
        defmt::trace!("ta6932: cmd {=u8:#x}", command);

        self.frame(|w| w.send_byte(command))
    }

    /// Hand back the bus and strobe pin
    pub fn release(self) -> (SPI, STB) {
        (self.spi, self.stb)
    }
}
