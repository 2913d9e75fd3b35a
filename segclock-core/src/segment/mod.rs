//! Seven-segment primitives
//!
//! Patterns are plain bytes: bits 0-6 light segments, bit 7 lights the
//! decimal point (or colon, depending on the board).

pub mod brightness;
pub mod font;
pub mod memory;
pub mod pattern;
pub mod value;

pub use brightness::Brightness;
pub use font::FontTable;
pub use memory::{position_index, DisplayMemory, POSITIONS, POSITION_MASK};
pub use pattern::{InvalidWiring, Segment, SegmentPattern, SegmentWiring, BLANK, DP, SEGMENTS_MASK};
pub use value::{resolve, Value};
