//! Segment display trait
//!
//! A display keeps a 16-position back buffer. Buffered writes only touch
//! the buffer and are sent with [`SegmentDisplay::flush`]; immediate
//! writes go to the device at once and are mirrored into the buffer.

use crate::rtc::RtcTime;
use crate::segment::{
    position_index, FontTable, SegmentPattern, Value, BLANK, DP, POSITIONS,
};

/// Position of the colon indicator on the clock board
pub const COLON_POSITION: u8 = 14;

/// Power-on self test digits for positions 0-13
pub const TEST_PATTERN_DIGITS: [u8; 14] = [1, 2, 3, 4, 5, 6, 2, 0, 2, 5, 0, 9, 2, 2];

/// Buffered 7-segment display
pub trait SegmentDisplay {
    /// Bus error type
    type Error;

    /// Configure the device and turn it on
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Glyph table used to resolve digits and characters
    fn font(&self) -> &FontTable;

    /// Stage a raw pattern; `decimal_point` ORs in bit 7
    fn put_raw(&mut self, position: u8, pattern: SegmentPattern, decimal_point: bool);

    /// Copy of the back buffer
    fn snapshot(&self) -> [SegmentPattern; POSITIONS];

    /// Replace the back buffer without sending it
    fn load_buffer(&mut self, patterns: &[SegmentPattern; POSITIONS]);

    /// Send the whole back buffer
    fn flush(&mut self) -> Result<(), Self::Error>;

    /// Blank the back buffer and send it
    fn clear(&mut self) -> Result<(), Self::Error>;

    /// Send one pattern to one position now, then mirror it
    fn write_one_raw(&mut self, position: u8, pattern: SegmentPattern) -> Result<(), Self::Error>;

    /// Set brightness (clamped to 0-7) and turn the display on
    fn set_brightness(&mut self, level: u8) -> Result<(), Self::Error>;

    /// Turn the display on at the stored brightness
    fn display_on(&mut self) -> Result<(), Self::Error>;

    /// Turn the display off, keeping the stored brightness
    fn display_off(&mut self) -> Result<(), Self::Error>;

    /// Stage a tagged value
    fn put(&mut self, position: u8, value: Value, decimal_point: bool) {
        let pattern = value.resolve(self.font(), decimal_point);
        self.put_raw(position, pattern, false);
    }

    /// Stage a decimal digit
    fn put_digit(&mut self, position: u8, digit: u8, decimal_point: bool) {
        self.put(position, Value::Digit(digit), decimal_point);
    }

    /// Stage a character
    fn put_char(&mut self, position: u8, c: u8, decimal_point: bool) {
        self.put(position, Value::Char(c), decimal_point);
    }

    /// Send a tagged value to one position now
    fn put_one(&mut self, position: u8, value: Value, decimal_point: bool) -> Result<(), Self::Error> {
        let pattern = value.resolve(self.font(), decimal_point);
        self.write_one_raw(position, pattern)
    }

    /// Send a decimal digit to one position now
    fn put_digit_one(&mut self, position: u8, digit: u8, decimal_point: bool) -> Result<(), Self::Error> {
        self.put_one(position, Value::Digit(digit), decimal_point)
    }

    /// Send a character to one position now
    fn put_char_one(&mut self, position: u8, c: u8, decimal_point: bool) -> Result<(), Self::Error> {
        self.put_one(position, Value::Char(c), decimal_point)
    }
}

/// Higher-level rendering on top of [`SegmentDisplay`]
///
/// `put_text` and `put_number` only stage; the `show_*` frames flush.
pub trait SegmentDisplayExt: SegmentDisplay {
    /// Stage text from `start`, one position per character
    ///
    /// Non-ASCII characters take a blank position. A `.` lights the decimal point of the previous position instead of
    /// taking its own, unless there is no previous character or it already
    /// carries a point. At most 16 positions are written. Returns the
    /// number of positions used.
    fn put_text(&mut self, start: u8, text: &str) -> u8 {
        let mut used: u8 = 0;
        let mut last_has_dp = true;

        for c in text.chars() {
            if c == '.' && !last_has_dp {
                let prev = start.wrapping_add(used - 1);
                let pattern = self.snapshot()[position_index(prev)];
                self.put_raw(prev, pattern, true);
                last_has_dp = true;
                continue;
            }

            if used as usize == POSITIONS {
                break;
            }

            let position = start.wrapping_add(used);
            if c == '.' {
                self.put_raw(position, BLANK, true);
                last_has_dp = true;
            } else {
                self.put(position, Value::from(c), false);
                last_has_dp = false;
            }
            used += 1;
        }

        used
    }

    /// Stage an unsigned number right-aligned in `width` positions
    ///
    /// Without `leading_zeros` the unused positions are blanked. Digits
    /// that do not fit are dropped from the most significant end.
    fn put_number(&mut self, start: u8, width: u8, value: u32, leading_zeros: bool) {
        let width = width.min(POSITIONS as u8);
        let mut rest = value;

        for i in (0..width).rev() {
            let position = start.wrapping_add(i);
            let is_units = i == width - 1;
            if rest == 0 && !is_units && !leading_zeros {
                self.put_raw(position, BLANK, false);
            } else {
                self.put_digit(position, (rest % 10) as u8, false);
            }
            rest /= 10;
        }
    }

    /// Power-on self test frame
    ///
    /// Digits `12345620250922` on positions 0-13, colon on, last position
    /// blank, then flush.
    fn show_test_pattern(&mut self) -> Result<(), Self::Error> {
        for (position, digit) in TEST_PATTERN_DIGITS.iter().enumerate() {
            self.put_digit(position as u8, *digit, false);
        }
        self.put_raw(COLON_POSITION, DP, false);
        self.put_raw(COLON_POSITION + 1, BLANK, false);
        self.flush()
    }

    /// One frame of the counter demo
    ///
    /// Digit `d` on positions 0-13, colon on, last position blank, then
    /// flush. Frame pacing is up to the caller.
    fn show_counter_frame(&mut self, d: u8) -> Result<(), Self::Error> {
        for position in 0..COLON_POSITION {
            self.put_digit(position, d, false);
        }
        self.put_raw(COLON_POSITION, DP, false);
        self.put_raw(COLON_POSITION + 1, BLANK, false);
        self.flush()
    }

    /// Render a full clock face and flush
    ///
    /// ```text
    /// 0-5    6-9   10-11  12-13  14     15
    /// HHMMSS YYYY  MM     DD     colon  weekday
    /// ```
    fn show_clock_face(&mut self, time: &RtcTime) -> Result<(), Self::Error> {
        self.put_number(0, 2, time.hours as u32, true);
        self.put_number(2, 2, time.minutes as u32, true);
        self.put_number(4, 2, time.seconds as u32, true);
        self.put_number(6, 4, time.year as u32, true);
        self.put_number(10, 2, time.month as u32, true);
        self.put_number(12, 2, time.date as u32, true);
        self.put_raw(COLON_POSITION, DP, false);
        self.put_digit(COLON_POSITION + 1, time.weekday, false);
        self.flush()
    }
}

// Blanket implementation for all SegmentDisplay types
impl<T: SegmentDisplay> SegmentDisplayExt for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::{Brightness, DisplayMemory};

    /// Buffer-only display that records flushed frames
    struct MockDisplay {
        font: FontTable,
        memory: DisplayMemory,
        flushed: Vec<[u8; POSITIONS]>,
        immediate: Vec<(u8, u8)>,
        brightness: Brightness,
        on: bool,
    }

    impl MockDisplay {
        fn new() -> Self {
            Self {
                font: FontTable::new(),
                memory: DisplayMemory::new(),
                flushed: Vec::new(),
                immediate: Vec::new(),
                brightness: Brightness::MAX,
                on: false,
            }
        }
    }

    impl SegmentDisplay for MockDisplay {
        type Error = ();

        fn init(&mut self) -> Result<(), ()> {
            self.on = true;
            Ok(())
        }

        fn font(&self) -> &FontTable {
            &self.font
        }

        fn put_raw(&mut self, position: u8, pattern: u8, decimal_point: bool) {
            let dp = if decimal_point { DP } else { 0 };
            self.memory.put(position, pattern | dp);
        }

        fn snapshot(&self) -> [u8; POSITIONS] {
            self.memory.snapshot()
        }

        fn load_buffer(&mut self, patterns: &[u8; POSITIONS]) {
            self.memory.load(patterns);
        }

        fn flush(&mut self) -> Result<(), ()> {
            self.flushed.push(self.memory.snapshot());
            Ok(())
        }

        fn clear(&mut self) -> Result<(), ()> {
            self.memory.clear();
            self.flush()
        }

        fn write_one_raw(&mut self, position: u8, pattern: u8) -> Result<(), ()> {
            self.immediate.push((position, pattern));
            self.memory.put(position, pattern);
            Ok(())
        }

        fn set_brightness(&mut self, level: u8) -> Result<(), ()> {
            self.brightness = Brightness::new(level);
            self.on = true;
            Ok(())
        }

        fn display_on(&mut self) -> Result<(), ()> {
            self.on = true;
            Ok(())
        }

        fn display_off(&mut self) -> Result<(), ()> {
            self.on = false;
            Ok(())
        }
    }

    fn digit(d: u8) -> u8 {
        FontTable::new().resolve(b'0' + d)
    }

    #[test]
    fn test_put_default_resolves() {
        let mut display = MockDisplay::new();
        display.put_digit(0, 7, true);
        display.put_char(1, b'H', false);
        display.put(2, Value::Raw(0x12), false);

        let snap = display.snapshot();
        assert_eq!(snap[0], digit(7) | DP);
        assert_eq!(snap[1], 0x76);
        assert_eq!(snap[2], 0x12);
        assert!(display.flushed.is_empty());
    }

    #[test]
    fn test_put_one_writes_immediately() {
        let mut display = MockDisplay::new();
        display.put_digit_one(18, 3, false).unwrap();
        display.put_char_one(4, b'-', true).unwrap();

        assert_eq!(display.immediate, vec![(18, digit(3)), (4, 0x40 | DP)]);
        assert_eq!(display.snapshot()[2], digit(3));
    }

    #[test]
    fn test_put_text_folds_points() {
        let mut display = MockDisplay::new();
        let used = display.put_text(0, "12.5");

        assert_eq!(used, 3);
        let snap = display.snapshot();
        assert_eq!(snap[0], digit(1));
        assert_eq!(snap[1], digit(2) | DP);
        assert_eq!(snap[2], digit(5));
    }

    #[test]
    fn test_put_text_leading_and_double_points() {
        let mut display = MockDisplay::new();
        let used = display.put_text(4, ".1..");

        assert_eq!(used, 3);
        let snap = display.snapshot();
        assert_eq!(snap[4], DP);
        assert_eq!(snap[5], digit(1) | DP);
        assert_eq!(snap[6], DP);
    }

    #[test]
    fn test_put_text_one_position_per_char() {
        let mut display = MockDisplay::new();
        // 'é' is two bytes in UTF-8 but takes one blank position
        let used = display.put_text(0, "é1.");

        assert_eq!(used, 2);
        let snap = display.snapshot();
        assert_eq!(snap[0], BLANK);
        assert_eq!(snap[1], digit(1) | DP);
        assert_eq!(snap[2], BLANK);
    }

    #[test]
    fn test_put_text_stops_at_sixteen() {
        let mut display = MockDisplay::new();
        let used = display.put_text(0, "0123456789ABCDEFGH");
        assert_eq!(used, 16);
        assert_eq!(display.snapshot()[0], digit(0));
        assert_eq!(display.snapshot()[15], 0x71);
    }

    #[test]
    fn test_put_number() {
        let mut display = MockDisplay::new();
        display.put_number(0, 4, 42, false);
        let snap = display.snapshot();
        assert_eq!(&snap[0..4], &[BLANK, BLANK, digit(4), digit(2)]);

        display.put_number(4, 4, 42, true);
        let snap = display.snapshot();
        assert_eq!(&snap[4..8], &[digit(0), digit(0), digit(4), digit(2)]);

        display.put_number(8, 2, 0, false);
        let snap = display.snapshot();
        assert_eq!(&snap[8..10], &[BLANK, digit(0)]);

        // Overflow keeps the low digits
        display.put_number(10, 2, 2025, false);
        let snap = display.snapshot();
        assert_eq!(&snap[10..12], &[digit(2), digit(5)]);
    }

    #[test]
    fn test_show_test_pattern() {
        let mut display = MockDisplay::new();
        display.show_test_pattern().unwrap();

        assert_eq!(display.flushed.len(), 1);
        let frame = display.flushed[0];
        for (i, d) in TEST_PATTERN_DIGITS.iter().enumerate() {
            assert_eq!(frame[i], digit(*d));
        }
        assert_eq!(frame[14], 0x80);
        assert_eq!(frame[15], 0x00);
    }

    #[test]
    fn test_show_counter_frame() {
        let mut display = MockDisplay::new();
        for d in 0..10 {
            display.show_counter_frame(d).unwrap();
        }

        assert_eq!(display.flushed.len(), 10);
        let frame = display.flushed[9];
        assert!(frame[..14].iter().all(|p| *p == digit(9)));
        assert_eq!(frame[14], DP);
        assert_eq!(frame[15], BLANK);
    }

    #[test]
    fn test_show_clock_face() {
        let mut display = MockDisplay::new();
        let time = RtcTime::new(2025, 9, 22, 1, 7, 5, 3);
        display.show_clock_face(&time).unwrap();

        let digits = [0, 7, 0, 5, 0, 3, 2, 0, 2, 5, 0, 9, 2, 2];
        let frame = display.flushed[0];
        for (i, d) in digits.iter().enumerate() {
            assert_eq!(frame[i], digit(*d));
        }
        assert_eq!(frame[14], DP);
        assert_eq!(frame[15], digit(1));
    }

    #[test]
    fn test_power_helpers() {
        let mut display = MockDisplay::new();
        display.init().unwrap();
        display.set_brightness(12).unwrap();
        assert_eq!(display.brightness, Brightness::MAX);

        display.display_off().unwrap();
        assert!(!display.on);
        display.display_on().unwrap();
        assert!(display.on);
    }

    #[test]
    fn test_clear_blanks() {
        let mut display = MockDisplay::new();
        display.show_test_pattern().unwrap();
        display.clear().unwrap();
        assert_eq!(display.flushed.last(), Some(&[0u8; POSITIONS]));
    }
}
