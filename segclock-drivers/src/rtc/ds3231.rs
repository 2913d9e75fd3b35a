//! DS3231 real-time clock (I2C)
//!
//! Stateless register shim: every call is a bus transaction, nothing is
//! cached. Time registers are packed BCD, 24-hour mode.
//!
//! # Register map (subset)
//!
//! | Reg  | Contents                          |
//! |------|-----------------------------------|
//! | 0x00 | seconds .. 0x06 year (BCD)        |
//! | 0x0E | control: EOSC, INTCN, RS2:RS1     |
//! | 0x0F | status: OSF                       |
//! | 0x11 | temperature, signed whole degrees |
//! | 0x12 | temperature fraction, bits 7:6    |

use segclock_core::rtc::{bcd_to_bin, bin_to_bcd, RtcTime};
use segclock_core::traits::RealTimeClock;
use segclock_hal::I2cBus;

/// 7-bit bus address
pub const ADDRESS: u8 = 0x68;

/// DS3231 register addresses
pub mod reg {
    pub const SECONDS: u8 = 0x00;
    pub const MINUTES: u8 = 0x01;
    pub const HOURS: u8 = 0x02;
    pub const DAY: u8 = 0x03;
    pub const DATE: u8 = 0x04;
    pub const MONTH: u8 = 0x05;
    pub const YEAR: u8 = 0x06;
    pub const CONTROL: u8 = 0x0E;
    pub const STATUS: u8 = 0x0F;
    pub const TEMP_MSB: u8 = 0x11;
    pub const TEMP_LSB: u8 = 0x12;
}

/// Control register bits
pub mod control {
    /// Oscillator disabled on battery when set (active low enable)
    pub const EOSC: u8 = 1 << 7;
    /// Rate select RS2:RS1; 00 = 1 Hz
    pub const RS_MASK: u8 = 0b0001_1000;
    /// Interrupt output instead of square wave
    pub const INTCN: u8 = 1 << 2;
}

/// Status register bits
pub mod status {
    /// Oscillator stopped since the flag was last cleared
    pub const OSF: u8 = 1 << 7;
}

/// Read masks for the seven time registers
const TIME_MASKS: [u8; 7] = [0x7F, 0x7F, 0x3F, 0x07, 0x3F, 0x1F, 0xFF];

/// Encode a time record as the seven BCD registers
pub fn encode_time(time: &RtcTime) -> [u8; 7] {
    [
        bin_to_bcd(time.seconds),
        bin_to_bcd(time.minutes),
        bin_to_bcd(time.hours),
        bin_to_bcd(time.weekday),
        bin_to_bcd(time.date),
        bin_to_bcd(time.month),
        bin_to_bcd((time.year % 100) as u8),
    ]
}

/// Decode the seven BCD registers; the year reads as 2000-2099
pub fn decode_time(regs: &[u8; 7]) -> RtcTime {
    let field = |i: usize| bcd_to_bin(regs[i] & TIME_MASKS[i]);
    RtcTime {
        seconds: field(0),
        minutes: field(1),
        hours: field(2),
        weekday: field(3),
        date: field(4),
        month: field(5),
        year: 2000 + field(6) as u16,
    }
}

/// Temperature registers to hundredths of a degree
pub fn temperature_x100(msb: u8, lsb: u8) -> i16 {
    (msb as i8) as i16 * 100 + (lsb >> 6) as i16 * 25
}

/// Control value that runs the oscillator and outputs 1 Hz on SQW
const fn with_1hz_sqw(ctrl: u8) -> u8 {
    ctrl & !(control::EOSC | control::INTCN | control::RS_MASK)
}

/// DS3231 driver
pub struct Ds3231<I2C> {
    i2c: I2C,
}

impl<I2C: I2cBus> Ds3231<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Hand back the bus
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn write_regs(&mut self, start: u8, data: &[u8]) -> Result<(), I2C::Error> {
        let mut buf = [0u8; 8];
        let len = data.len().min(buf.len() - 1);
        buf[0] = start;
        buf[1..=len].copy_from_slice(&data[..len]);
        self.i2c.write(ADDRESS, &buf[..=len])
    }

    fn read_regs(&mut self, start: u8, data: &mut [u8]) -> Result<(), I2C::Error> {
        self.i2c.write_read(ADDRESS, &[start], data)
    }

    fn read_reg(&mut self, reg: u8) -> Result<u8, I2C::Error> {
        let mut value = [0u8];
        self.read_regs(reg, &mut value)?;
        Ok(value[0])
    }

    pub fn read_control(&mut self) -> Result<u8, I2C::Error> {
        self.read_reg(reg::CONTROL)
    }

    pub fn write_control(&mut self, value: u8) -> Result<(), I2C::Error> {
        self.write_regs(reg::CONTROL, &[value])
    }

    pub fn read_status(&mut self) -> Result<u8, I2C::Error> {
        self.read_reg(reg::STATUS)
    }

    pub fn write_status(&mut self, value: u8) -> Result<(), I2C::Error> {
        self.write_regs(reg::STATUS, &[value])
    }

    /// Run the oscillator and output a 1 Hz square wave
    pub fn enable_1hz_sqw(&mut self) -> Result<(), I2C::Error> {
        let ctrl = self.read_control()?;
        self.write_control(with_1hz_sqw(ctrl))
    }

    /// Switch SQW/INT to interrupt mode
    pub fn disable_sqw(&mut self) -> Result<(), I2C::Error> {
        let ctrl = self.read_control()?;
        self.write_control(ctrl | control::INTCN)
    }
}

impl<I2C: I2cBus> RealTimeClock for Ds3231<I2C> {
    type Error = I2C::Error;

    fn set_time(&mut self, time: &RtcTime) -> Result<(), Self::Error> {
        self.write_regs(reg::SECONDS, &encode_time(time))
    }

    fn get_time(&mut self) -> Result<RtcTime, Self::Error> {
        let mut regs = [0u8; 7];
        self.read_regs(reg::SECONDS, &mut regs)?;
        Ok(decode_time(&regs))
    }

    fn ensure_initialized(&mut self, default_time: Option<&RtcTime>) -> Result<bool, Self::Error> {
        let stat = self.read_status()?;
        if stat & status::OSF == 0 {
            return Ok(false);
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("ds3231: oscillator stop flag set, reinitializing");

        let ctrl = self.read_control()?;
        self.write_control(with_1hz_sqw(ctrl))?;

        if let Some(time) = default_time {
            self.set_time(time)?;
        }

        self.write_status(stat & !status::OSF)?;
        Ok(true)
    }

    fn read_temperature_x100(&mut self) -> Result<i16, Self::Error> {
        let mut regs = [0u8; 2];
        self.read_regs(reg::TEMP_MSB, &mut regs)?;
        Ok(temperature_x100(regs[0], regs[1]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Nak;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Op {
        Write(u8, Vec<u8>),
        Read(u8, usize),
    }

    /// Register file behind a fake bus
    struct MockI2c {
        regs: [u8; 0x13],
        ops: Vec<Op>,
        fail: bool,
    }

    impl MockI2c {
        fn new() -> Self {
            Self {
                regs: [0; 0x13],
                ops: Vec::new(),
                fail: false,
            }
        }
    }

    impl I2cBus for MockI2c {
        type Error = Nak;

        fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Nak> {
            if self.fail || address != ADDRESS {
                return Err(Nak);
            }
            let start = data[0] as usize;
            self.regs[start..start + data.len() - 1].copy_from_slice(&data[1..]);
            self.ops.push(Op::Write(data[0], data[1..].to_vec()));
            Ok(())
        }

        fn write_read(&mut self, address: u8, write_data: &[u8], read_buf: &mut [u8]) -> Result<(), Nak> {
            if self.fail || address != ADDRESS {
                return Err(Nak);
            }
            let start = write_data[0] as usize;
            read_buf.copy_from_slice(&self.regs[start..start + read_buf.len()]);
            self.ops.push(Op::Read(write_data[0], read_buf.len()));
            Ok(())
        }
    }

    #[test]
    fn test_set_time_writes_bcd() {
        let mut rtc = Ds3231::new(MockI2c::new());
        let time = RtcTime::new(2025, 9, 22, 1, 12, 34, 56);
        rtc.set_time(&time).unwrap();

        let bus = rtc.release();
        assert_eq!(
            bus.ops,
            vec![Op::Write(0x00, vec![0x56, 0x34, 0x12, 0x01, 0x22, 0x09, 0x25])]
        );
    }

    #[test]
    fn test_get_time_masks_flag_bits() {
        let mut bus = MockI2c::new();
        // CH-style bit 7 on seconds, 12/24 bit on hours, century bit on month
        bus.regs[..7].copy_from_slice(&[0xD9, 0x59, 0x63, 0x07, 0x31, 0x92, 0x99]);
        let mut rtc = Ds3231::new(bus);

        let time = rtc.get_time().unwrap();
        assert_eq!(time, RtcTime::new(2099, 12, 31, 7, 23, 59, 59));
    }

    #[test]
    fn test_ensure_initialized_noop_when_running() {
        let mut bus = MockI2c::new();
        bus.regs[reg::STATUS as usize] = 0x08;
        let mut rtc = Ds3231::new(bus);

        let recovered = rtc
            .ensure_initialized(Some(&RtcTime::default()))
            .unwrap();

        assert!(!recovered);
        assert_eq!(rtc.release().ops, vec![Op::Read(reg::STATUS, 1)]);
    }

    #[test]
    fn test_ensure_initialized_recovers() {
        let mut bus = MockI2c::new();
        bus.regs[reg::STATUS as usize] = status::OSF | 0x08;
        bus.regs[reg::CONTROL as usize] = 0x9C;
        let mut rtc = Ds3231::new(bus);

        let default = RtcTime::new(2025, 1, 2, 4, 3, 4, 5);
        assert!(rtc.ensure_initialized(Some(&default)).unwrap());

        let bus = rtc.release();
        assert_eq!(
            bus.ops,
            vec![
                Op::Read(reg::STATUS, 1),
                Op::Read(reg::CONTROL, 1),
                Op::Write(reg::CONTROL, vec![0x00]),
                Op::Write(0x00, vec![0x05, 0x04, 0x03, 0x04, 0x02, 0x01, 0x25]),
                Op::Write(reg::STATUS, vec![0x08]),
            ]
        );
    }

    #[test]
    fn test_ensure_initialized_without_default_time() {
        let mut bus = MockI2c::new();
        bus.regs[reg::STATUS as usize] = status::OSF;
        bus.regs[reg::CONTROL as usize] = 0x1C;
        let mut rtc = Ds3231::new(bus);

        assert!(rtc.ensure_initialized(None).unwrap());
        // Second call sees OSF cleared
        assert!(!rtc.ensure_initialized(None).unwrap());

        let bus = rtc.release();
        assert!(!bus.ops.iter().any(|op| matches!(op, Op::Write(0x00, _))));
        assert_eq!(bus.regs[reg::CONTROL as usize], 0x00);
    }

    #[test]
    fn test_sqw_control() {
        let mut bus = MockI2c::new();
        bus.regs[reg::CONTROL as usize] = control::EOSC | control::INTCN | control::RS_MASK | 0x01;
        let mut rtc = Ds3231::new(bus);

        rtc.enable_1hz_sqw().unwrap();
        assert_eq!(rtc.read_control().unwrap(), 0x01);

        rtc.disable_sqw().unwrap();
        assert_eq!(rtc.read_control().unwrap(), 0x01 | control::INTCN);

        rtc.write_status(0x88).unwrap();
        assert_eq!(rtc.read_status().unwrap(), 0x88);
    }

    #[test]
    fn test_temperature() {
        assert_eq!(temperature_x100(25, 0x40), 2525);
        assert_eq!(temperature_x100(0x19, 0xC0), 2575);
        // -6 + 0.25
        assert_eq!(temperature_x100(0xFA, 0x40), -575);

        let mut bus = MockI2c::new();
        bus.regs[reg::TEMP_MSB as usize] = 21;
        bus.regs[reg::TEMP_LSB as usize] = 0x80;
        let mut rtc = Ds3231::new(bus);
        assert_eq!(rtc.read_temperature_x100().unwrap(), 2150);
    }

    #[test]
    fn test_bus_error_propagates() {
        let mut bus = MockI2c::new();
        bus.fail = true;
        let mut rtc = Ds3231::new(bus);

        assert_eq!(rtc.get_time(), Err(Nak));
        assert_eq!(rtc.ensure_initialized(None), Err(Nak));
        assert_eq!(rtc.set_time(&RtcTime::default()), Err(Nak));
    }

    proptest! {
        #[test]
        fn time_round_trip(
            seconds in 0u8..60,
            minutes in 0u8..60,
            hours in 0u8..24,
            weekday in 1u8..=7,
            date in 1u8..=31,
            month in 1u8..=12,
            year in 2000u16..2100,
        ) {
            let time = RtcTime { seconds, minutes, hours, weekday, date, month, year };
            let mut rtc = Ds3231::new(MockI2c::new());
            rtc.set_time(&time).unwrap();
            prop_assert_eq!(rtc.get_time().unwrap(), time);
        }
    }
}
