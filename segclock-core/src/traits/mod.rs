//! Hardware abstraction traits
//!
//! These traits define the interface between application code and the
//! concrete drivers.

pub mod display;
pub mod rtc;

pub use display::{SegmentDisplay, SegmentDisplayExt};
pub use rtc::RealTimeClock;
