//! Recording bus and strobe pin for display tests

use std::cell::RefCell;
use std::rc::Rc;

use segclock_hal::{OutputPin, SpiBus};

/// Something that happened on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wire {
    StrobeLow,
    StrobeHigh,
    Byte(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusFault;

#[derive(Default)]
pub struct Log {
    pub events: Vec<Wire>,
    /// Fail the transfer once this many bytes have been sent
    pub fail_after: Option<usize>,
    pub sent: usize,
}

pub type SharedLog = Rc<RefCell<Log>>;

pub struct MockSpi {
    log: SharedLog,
}

pub struct MockStrobe {
    log: SharedLog,
    high: bool,
}

impl SpiBus for MockSpi {
    type Error = BusFault;

    fn write(&mut self, data: &[u8]) -> Result<(), BusFault> {
        let mut log = self.log.borrow_mut();
        for byte in data {
            if log.fail_after.is_some_and(|n| log.sent >= n) {
                return Err(BusFault);
            }
            log.sent += 1;
            log.events.push(Wire::Byte(*byte));
        }
        Ok(())
    }
}

impl OutputPin for MockStrobe {
    fn set_high(&mut self) {
        self.high = true;
        self.log.borrow_mut().events.push(Wire::StrobeHigh);
    }

    fn set_low(&mut self) {
        self.high = false;
        self.log.borrow_mut().events.push(Wire::StrobeLow);
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// Bus and strobe sharing one log; the strobe starts low
pub fn mock_bus() -> (MockSpi, MockStrobe, SharedLog) {
    let log: SharedLog = Rc::new(RefCell::new(Log::default()));
    let spi = MockSpi { log: log.clone() };
    let stb = MockStrobe {
        log: log.clone(),
        high: false,
    };
    (spi, stb, log)
}

/// Bytes of each strobe-low..strobe-high frame, in order
pub fn frames(log: &SharedLog) -> Vec<Vec<u8>> {
    let mut out = Vec::new();
    let mut current: Option<Vec<u8>> = None;
    for event in &log.borrow().events {
        match event {
            Wire::StrobeLow => current = Some(Vec::new()),
            Wire::StrobeHigh => out.extend(current.take()),
            Wire::Byte(b) => {
                if let Some(frame) = current.as_mut() {
                    frame.push(*b);
                }
            }
        }
    }
    out
}

/// Forget everything recorded so far
pub fn reset(log: &SharedLog) {
    let mut log = log.borrow_mut();
    log.events.clear();
    log.sent = 0;
    log.fail_after = None;
}

/// Fail after `n` more bytes
pub fn fail_after(log: &SharedLog, n: usize) {
    let mut log = log.borrow_mut();
    log.fail_after = Some(log.sent + n);
}
