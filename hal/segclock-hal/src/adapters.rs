//! Adapters from `embedded-hal` 1.0 blocking traits
//!
//! Wrap a chip HAL's pin or bus to use it with the segclock drivers:
//!
//! ```ignore
//! let spi = EhSpi::new(embassy_rp::spi::Spi::new_blocking_txonly(..));
//! let stb = EhOutputPin::new(Output::new(p.PIN_5, Level::High));
//! ```

use core::convert::Infallible;

use embedded_hal::digital::OutputPin as EhOutput;
use embedded_hal::i2c::I2c as EhI2c;
use embedded_hal::spi::SpiBus as EhSpiBus;

use crate::gpio::OutputPin;
use crate::i2c::I2cBus;
use crate::spi::SpiBus;

/// Output pin adapter
///
/// Only pins whose level changes cannot fail are accepted; the last driven
/// level is tracked so [`OutputPin::is_set_high`] does not need `&mut`.
pub struct EhOutputPin<P> {
    pin: P,
    high: bool,
}

impl<P: EhOutput<Error = Infallible>> EhOutputPin<P> {
    /// Wrap a pin; the pin is driven high (idle for strobe lines)
    pub fn new(mut pin: P) -> Self {
        pin.set_high().unwrap_or_else(|never| match never {});
        Self { pin, high: true }
    }

    /// Return the wrapped pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: EhOutput<Error = Infallible>> OutputPin for EhOutputPin<P> {
    fn set_high(&mut self) {
        self.pin.set_high().unwrap_or_else(|never| match never {});
        self.high = true;
    }

    fn set_low(&mut self) {
        self.pin.set_low().unwrap_or_else(|never| match never {});
        self.high = false;
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// SPI bus adapter
///
/// Each write is followed by a flush so a returned `Ok` means the bytes
/// are on the wire, which the strobe framing relies on.
pub struct EhSpi<S> {
    bus: S,
}

impl<S: EhSpiBus> EhSpi<S> {
    /// Wrap an SPI bus
    pub fn new(bus: S) -> Self {
        Self { bus }
    }

    /// Return the wrapped bus
    pub fn into_inner(self) -> S {
        self.bus
    }
}

impl<S: EhSpiBus> SpiBus for EhSpi<S> {
    type Error = S::Error;

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.bus.write(data)?;
        self.bus.flush()
    }
}

/// I2C bus adapter
pub struct EhI2cBus<I> {
    bus: I,
}

impl<I: EhI2c> EhI2cBus<I> {
    /// Wrap an I2C bus
    pub fn new(bus: I) -> Self {
        Self { bus }
    }

    /// Return the wrapped bus
    pub fn into_inner(self) -> I {
        self.bus
    }
}

impl<I: EhI2c> I2cBus for EhI2cBus<I> {
    type Error = I::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.bus.write(address, data)
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.bus.write_read(address, write_data, read_buf)
    }
}
