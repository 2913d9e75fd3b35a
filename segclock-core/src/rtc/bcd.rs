//! Packed BCD conversion for RTC registers

/// Packed BCD byte to binary
///
/// Nibbles above 9 are not rejected; the result is simply `hi * 10 + lo`.
pub const fn bcd_to_bin(value: u8) -> u8 {
    (value >> 4) * 10 + (value & 0x0F)
}

/// Binary 0-99 to packed BCD
///
/// Values above 99 wrap modulo 100.
pub const fn bin_to_bcd(value: u8) -> u8 {
    let value = value % 100;
    ((value / 10) << 4) | (value % 10)
}
