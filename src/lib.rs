//! Drivers for the Dallas DS1302 and DS1307 real-time clocks.
//!
//! Both chips keep seconds through year plus a 1-7 weekday in battery-backed
//! BCD registers, but they are wired completely differently: the DS1302
//! speaks a custom bit-banged 3-wire protocol driven pin by pin, while the
//! DS1307 sits on a standard two-wire bus. Each driver implements the same
//! [`Rtc`] capability, so calling code can hold either chip behind
//! `&mut dyn Rtc` and swap hardware without changing logic.
//!
//! Pin access, delays, and the two-wire bus come from [`embedded-hal`]
//! traits; the bidirectional DS1302 data line uses the crate's own
//! [`InOutPin`] since `embedded-hal` has no half-duplex pin trait.
//!
//! [`embedded-hal`]: https://github.com/rust-embedded/embedded-hal
//!
//! ```ignore
//! use dallas_rtc::{Ds1302, Rtc};
//!
//! let mut rtc = Ds1302::new(ce_pin, io_pin, clk_pin, delay);
//! rtc.init()?;
//! let now = rtc.datetime()?;
//! ```
//!
//! All public fields are plain integers in the chip's ranges. Out-of-range
//! values are not rejected; they pack into malformed BCD and come back
//! wrong. Supplying valid ranges is the caller's contract.

#![cfg_attr(not(test), no_std)]

mod bcd;
mod datetime;
mod ds1302;
mod ds1307;
mod error;
mod frame;
mod threewire;

pub use datetime::{
    Date,
    DateTime,
    Time,
};
pub use ds1302::Ds1302;
pub use ds1307::Ds1307;
pub use error::Error;
pub use frame::ClockFrame;
pub use threewire::{
    InOutPin,
    ThreeWire,
};

/// The common capability set of a real-time clock chip.
///
/// Every operation is synchronous and blocking, attempted exactly once,
/// and runs to completion on the calling thread. Setters always leave the
/// chip running in 24-hour mode regardless of its previous state.
pub trait Rtc {
    /// Performs chip-specific startup. Must be called once before the
    /// clock is trusted; the only operation guaranteed to report a missing
    /// chip where the bus can detect one.
    fn init(&mut self) -> Result<(), Error>;

    /// Reads the full timestamp in one atomic multi-register transfer.
    fn datetime(&mut self) -> Result<DateTime, Error>;

    /// Reads the calendar portion in one atomic multi-register transfer.
    fn date(&mut self) -> Result<Date, Error>;

    /// Reads the time of day in one atomic multi-register transfer.
    fn time(&mut self) -> Result<Time, Error>;

    /// Reads the hour register, 0-23.
    fn hour(&mut self) -> Result<u8, Error>;

    /// Reads the minute register, 0-59.
    fn minute(&mut self) -> Result<u8, Error>;

    /// Reads the second register, 0-59.
    fn second(&mut self) -> Result<u8, Error>;

    /// Reads the year register, 2000-2099.
    fn year(&mut self) -> Result<u16, Error>;

    /// Reads the month register, 1-12.
    fn month(&mut self) -> Result<u8, Error>;

    /// Reads the day-of-month register, 1-31.
    fn day(&mut self) -> Result<u8, Error>;

    /// Reads the raw 1-7 weekday register.
    fn weekday(&mut self) -> Result<u8, Error>;

    /// Writes the full timestamp atomically.
    fn set_datetime(&mut self, datetime: &DateTime) -> Result<(), Error>;

    /// Writes the calendar portion, preserving the stored time of day.
    fn set_date(&mut self, date: &Date) -> Result<(), Error>;

    /// Writes the time of day, preserving the stored calendar.
    fn set_time(&mut self, time: &Time) -> Result<(), Error>;

    /// Writes the hour register, 0-23.
    fn set_hour(&mut self, hour: u8) -> Result<(), Error>;

    /// Writes the minute register, 0-59.
    fn set_minute(&mut self, minute: u8) -> Result<(), Error>;

    /// Writes the second register, 0-59.
    fn set_second(&mut self, second: u8) -> Result<(), Error>;

    /// Writes the year register, 2000-2099.
    fn set_year(&mut self, year: u16) -> Result<(), Error>;

    /// Writes the month register, 1-12.
    fn set_month(&mut self, month: u8) -> Result<(), Error>;

    /// Writes the day-of-month register, 1-31.
    fn set_day(&mut self, day: u8) -> Result<(), Error>;

    /// Writes the raw 1-7 weekday register.
    fn set_weekday(&mut self, weekday: u8) -> Result<(), Error>;
}
