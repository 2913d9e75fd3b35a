//! Driver lifecycle state

pub mod machine;

pub use machine::{DriverEvent, DriverState};
