//! Board-agnostic core logic for the segment clock
//!
//! This crate contains everything that does not depend on a specific bus
//! or chip:
//!
//! - Segment patterns, wiring permutations and the glyph font
//! - The 16-position display back buffer
//! - Tagged value resolution (raw pattern / digit / character)
//! - Driver lifecycle state
//! - RTC time record and BCD conversion
//! - Display and RTC traits implemented by the drivers
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod rtc;
pub mod segment;
pub mod state;
pub mod traits;
