//! Binary coded decimal.
//!
//! Both RTC chips store every clock and calendar field as BCD, meaning each
//! half-byte represents a decimal digit. For example, the value `12` is not
//! stored as `0x0c` but as `0x12`.
//!
//! No range validation is performed here. Callers must supply values in the
//! chip's valid range (0-99 per field); out-of-range input packs into
//! silently wrong digits.

/// Combines a pair of decimal digits into a binary value.
pub(crate) fn decode(high: u8, low: u8) -> u8 {
    high * 10 + low
}

/// The high decimal digit of a binary value.
pub(crate) fn encode_high(value: u8) -> u8 {
    value / 10
}

/// The low decimal digit of a binary value.
pub(crate) fn encode_low(value: u8) -> u8 {
    value % 10
}

/// Converts a packed BCD byte to its binary form.
pub(crate) fn from_packed(byte: u8) -> u8 {
    decode(byte >> 4, byte & 0x0f)
}

/// Packs a binary value into a BCD byte, one digit per nibble.
pub(crate) fn to_packed(value: u8) -> u8 {
    (encode_high(value) << 4) | encode_low(value)
}
