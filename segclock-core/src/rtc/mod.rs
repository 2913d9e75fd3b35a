//! Real-time clock data types

pub mod bcd;
pub mod time;

pub use bcd::{bcd_to_bin, bin_to_bcd};
pub use time::RtcTime;
