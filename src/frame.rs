//! The packed clock/calendar register block of the DS1302.
//!
//! The chip's first eight registers hold the complete clock state and can be
//! transferred in one burst session. This module mirrors that block
//! bit-for-bit and converts between it and the plain-integer
//! [`DateTime`](crate::DateTime) representation.
//!
//! The hour register overlays two layouts selected by its high bit: 24-hour
//! form (two magnitude bits in the tens position) and 12-hour form (one
//! magnitude bit plus an AM/PM bit). Decoding here always uses the 24-hour
//! interpretation, and every encoder clears the mode bit, so data written
//! through this crate is unambiguous.

use crate::{
    bcd,
    Date,
    DateTime,
    Time,
};

/// Clock halt flag, bit 7 of the seconds register. The oscillator stops
/// while it is set.
pub(crate) const CLOCK_HALT: u8 = 0x80;

/// Hour format flag, bit 7 of the hours register. Clear for 24-hour form.
pub(crate) const HOUR_12: u8 = 0x80;

/// Write protect flag, bit 7 of the enable register. The chip refuses all
/// clock writes while it is set.
pub(crate) const WRITE_PROTECT: u8 = 0x80;

/// Register offsets within the burst block.
const SECONDS: usize = 0;
const MINUTES: usize = 1;
const HOURS: usize = 2;
const DAY: usize = 3;
const MONTH: usize = 4;
const WEEKDAY: usize = 5;
const YEAR: usize = 6;
const ENABLE: usize = 7;

/// An image of the eight clock/calendar registers.
///
/// A `ClockFrame` is built fresh for every burst transfer; it has no
/// identity beyond a single read or write call.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ClockFrame([u8; 8]);

impl ClockFrame {
    /// Encodes a full date and time into a register block.
    ///
    /// The clock halt, hour format, and write protect flags are all
    /// cleared: the written block always describes a running clock in
    /// 24-hour form that accepts further writes.
    pub fn from_datetime(datetime: &DateTime) -> Self {
        let mut frame = Self::default();
        frame.set_time(&datetime.time());
        frame.set_date(&datetime.date());
        frame
    }

    /// Decodes the full date and time.
    pub fn datetime(&self) -> DateTime {
        DateTime {
            hour: self.hour(),
            minute: self.minute(),
            second: self.second(),
            year: self.year(),
            month: self.month(),
            day: self.day(),
            weekday: self.weekday(),
        }
    }

    /// Decodes the calendar portion.
    pub fn date(&self) -> Date {
        Date {
            year: self.year(),
            month: self.month(),
            day: self.day(),
            weekday: self.weekday(),
        }
    }

    /// Decodes the time-of-day portion.
    pub fn time(&self) -> Time {
        Time {
            hour: self.hour(),
            minute: self.minute(),
            second: self.second(),
        }
    }

    pub fn second(&self) -> u8 {
        bcd::from_packed(self.0[SECONDS] & !CLOCK_HALT)
    }

    pub fn minute(&self) -> u8 {
        bcd::from_packed(self.0[MINUTES] & 0x7f)
    }

    /// The hour under the 24-hour interpretation. If the chip holds
    /// 12-hour data written by other software, the AM/PM bit is read as a
    /// magnitude bit and the result is wrong; this crate never writes
    /// 12-hour data.
    pub fn hour(&self) -> u8 {
        bcd::from_packed(self.0[HOURS] & 0x3f)
    }

    pub fn day(&self) -> u8 {
        bcd::from_packed(self.0[DAY] & 0x3f)
    }

    pub fn month(&self) -> u8 {
        bcd::from_packed(self.0[MONTH] & 0x1f)
    }

    /// The raw 1-7 weekday. No mapping to day names is applied.
    pub fn weekday(&self) -> u8 {
        self.0[WEEKDAY] & 0x07
    }

    pub fn year(&self) -> u16 {
        2000 + u16::from(bcd::from_packed(self.0[YEAR]))
    }

    /// Overwrites the time-of-day registers, leaving the calendar
    /// registers untouched. Clears the clock halt flag and forces 24-hour
    /// form.
    pub fn set_time(&mut self, time: &Time) {
        self.0[SECONDS] = bcd::to_packed(time.second);
        self.0[MINUTES] = bcd::to_packed(time.minute);
        self.0[HOURS] = bcd::to_packed(time.hour);
    }

    /// Overwrites the calendar registers, leaving the time-of-day
    /// registers untouched. Clears the write protect flag.
    pub fn set_date(&mut self, date: &Date) {
        self.0[DAY] = bcd::to_packed(date.day);
        self.0[MONTH] = bcd::to_packed(date.month);
        self.0[WEEKDAY] = date.weekday;
        self.0[YEAR] = bcd::to_packed(date.year.wrapping_sub(2000) as u8);
        self.0[ENABLE] = 0;
    }

    /// Clears the clock halt flag without disturbing the stored seconds.
    pub fn set_running(&mut self) {
        self.0[SECONDS] &= !CLOCK_HALT;
    }

    /// Clears the write protect flag.
    pub fn clear_write_protect(&mut self) {
        self.0[ENABLE] &= !WRITE_PROTECT;
    }
}

impl From<[u8; 8]> for ClockFrame {
    fn from(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }
}

impl From<ClockFrame> for [u8; 8] {
    fn from(frame: ClockFrame) -> Self {
        frame.0
    }
}

#[cfg(test)]
mod tests {
    use super::{
        ClockFrame,
        CLOCK_HALT,
        HOUR_12,
        WRITE_PROTECT,
    };
    use crate::{
        Date,
        DateTime,
        Time,
    };

    const DATETIME: DateTime = DateTime {
        hour: 14,
        minute: 30,
        second: 0,
        year: 2024,
        month: 3,
        day: 15,
        weekday: 5,
    };

    #[test]
    fn datetime_round_trip() {
        assert_eq!(ClockFrame::from_datetime(&DATETIME).datetime(), DATETIME);
    }

    #[test]
    fn encoding_is_packed_bcd() {
        let bytes: [u8; 8] = ClockFrame::from_datetime(&DATETIME).into();
        assert_eq!(bytes, [0x00, 0x30, 0x14, 0x15, 0x03, 0x05, 0x24, 0x00]);
    }

    #[test]
    fn encoding_clears_normalization_flags() {
        let bytes: [u8; 8] = ClockFrame::from_datetime(&DateTime {
            hour: 23,
            minute: 59,
            second: 59,
            year: 2099,
            month: 12,
            day: 31,
            weekday: 7,
        })
        .into();
        assert_eq!(bytes[0] & CLOCK_HALT, 0);
        assert_eq!(bytes[2] & HOUR_12, 0);
        assert_eq!(bytes[7] & WRITE_PROTECT, 0);
    }

    #[test]
    fn decoding_masks_clock_halt() {
        let frame = ClockFrame::from([0x80 | 0x42, 0, 0, 0x01, 0x01, 1, 0, 0]);
        assert_eq!(frame.second(), 42);
    }

    #[test]
    fn decoding_reads_hour_as_24_hour() {
        // 12/24 flag set with hour digits 0x09; the flag bit is ignored.
        let frame = ClockFrame::from([0, 0, HOUR_12 | 0x09, 0x01, 0x01, 1, 0, 0]);
        assert_eq!(frame.hour(), 9);
    }

    #[test]
    fn weekday_is_raw() {
        let frame = ClockFrame::from([0, 0, 0, 0x01, 0x01, 7, 0, 0]);
        assert_eq!(frame.weekday(), 7);
    }

    #[test]
    fn set_time_preserves_calendar() {
        let mut frame = ClockFrame::from_datetime(&DATETIME);
        frame.set_time(&Time {
            hour: 1,
            minute: 2,
            second: 3,
        });
        assert_eq!(frame.date(), DATETIME.date());
        assert_eq!(
            frame.time(),
            Time {
                hour: 1,
                minute: 2,
                second: 3,
            }
        );
    }

    #[test]
    fn set_date_preserves_time() {
        let mut frame = ClockFrame::from_datetime(&DATETIME);
        frame.set_date(&Date {
            year: 2025,
            month: 1,
            day: 1,
            weekday: 3,
        });
        assert_eq!(frame.time(), DATETIME.time());
        assert_eq!(
            frame.date(),
            Date {
                year: 2025,
                month: 1,
                day: 1,
                weekday: 3,
            }
        );
    }

    #[test]
    fn set_running_clears_halt_only() {
        let mut frame = ClockFrame::from([CLOCK_HALT | 0x42, 0, 0, 0, 0, 0, 0, 0]);
        frame.set_running();
        let bytes: [u8; 8] = frame.into();
        assert_eq!(bytes[0], 0x42);
    }

    #[test]
    fn clear_write_protect_clears_flag_only() {
        let mut frame = ClockFrame::from([0, 0, 0, 0, 0, 0, 0, WRITE_PROTECT]);
        frame.clear_write_protect();
        let bytes: [u8; 8] = frame.into();
        assert_eq!(bytes[7], 0x00);
    }
}
