//! Segment display drivers

pub mod ta6932;
pub mod transport;

#[cfg(test)]
mod mock;

pub use ta6932::Ta6932;
pub use transport::{FrameWriter, StrobeTransport, TransportConfig};
