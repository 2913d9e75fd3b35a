//! segclock Hardware Abstraction Layer
//!
//! This crate defines the small set of bus and pin traits the segclock
//! drivers are written against. Chip-specific code (or the `embedded-hal`
//! adapters in [`adapters`]) implements them, and host tests implement them
//! with recording mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  segclock-firmware / host tests         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  segclock-drivers (TA6932, DS3231)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  segclock-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ embedded-hal  │       │  test mocks   │
//! │   adapters    │       │               │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Digital output (strobe/latch line)
//! - [`spi::SpiBus`] - Write-only serial link to the display controller
//! - [`i2c::I2cBus`] - Two-wire bus to the RTC

#![no_std]
#![deny(unsafe_code)]

#[cfg(feature = "embedded-hal")]
pub mod adapters;
pub mod gpio;
pub mod i2c;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use gpio::OutputPin;
pub use i2c::{I2cBus, I2cConfig};
pub use spi::{BitOrder, SpiBus, SpiConfig};
