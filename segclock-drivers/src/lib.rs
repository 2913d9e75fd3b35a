//! Hardware driver implementations
//!
//! Concrete implementations of the traits defined in segclock-core,
//! written against the bus traits of segclock-hal:
//!
//! - TA6932 16-position LED controller (strobe-framed serial link)
//! - DS3231 real-time clock (I2C)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod display;
pub mod rtc;
