//! Types representing the date and time stored within the RTC.
//!
//! All fields are plain integers matching the registers of the chips: the
//! year covers 2000-2099 (stored on-chip as a two-digit offset) and the
//! weekday is a raw 1-7 value with no fixed mapping to day names; whichever
//! day the caller assigns to `1` defines the epoch.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A full calendar date and time of day.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct DateTime {
    /// Hour of the day, 0-23. Always 24-hour form.
    pub hour: u8,
    /// Minute within the hour, 0-59.
    pub minute: u8,
    /// Second within the minute, 0-59.
    pub second: u8,
    /// Calendar year, 2000-2099.
    pub year: u16,
    /// Month of the year, 1-12.
    pub month: u8,
    /// Day of the month, 1-31.
    pub day: u8,
    /// Day of the week, 1-7, caller-defined epoch.
    pub weekday: u8,
}

/// The calendar portion of a [`DateTime`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct Date {
    /// Calendar year, 2000-2099.
    pub year: u16,
    /// Month of the year, 1-12.
    pub month: u8,
    /// Day of the month, 1-31.
    pub day: u8,
    /// Day of the week, 1-7, caller-defined epoch.
    pub weekday: u8,
}

/// The time-of-day portion of a [`DateTime`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct Time {
    /// Hour of the day, 0-23. Always 24-hour form.
    pub hour: u8,
    /// Minute within the hour, 0-59.
    pub minute: u8,
    /// Second within the minute, 0-59.
    pub second: u8,
}

impl DateTime {
    /// The calendar portion of this date and time.
    pub fn date(&self) -> Date {
        Date {
            year: self.year,
            month: self.month,
            day: self.day,
            weekday: self.weekday,
        }
    }

    /// The time-of-day portion of this date and time.
    pub fn time(&self) -> Time {
        Time {
            hour: self.hour,
            minute: self.minute,
            second: self.second,
        }
    }
}

/// Interprets the date and time as a [`time::PrimitiveDateTime`].
///
/// Fails if any field is outside its calendar range (for example a month of
/// `13`, or February 30th). The weekday is discarded; the `time` crate
/// derives it from the date instead.
#[cfg(feature = "time")]
impl TryFrom<DateTime> for time::PrimitiveDateTime {
    type Error = time::error::ComponentRange;

    fn try_from(datetime: DateTime) -> Result<Self, Self::Error> {
        let month = time::Month::try_from(datetime.month)?;
        let date = time::Date::from_calendar_date(datetime.year.into(), month, datetime.day)?;
        let time = time::Time::from_hms(datetime.hour, datetime.minute, datetime.second)?;
        Ok(Self::new(date, time))
    }
}

/// Converts a [`time::PrimitiveDateTime`] into the chip representation.
///
/// The weekday is numbered from Monday as `1`. Years outside 2000-2099
/// cannot be represented by the chips and are truncated silently when
/// written.
#[cfg(feature = "time")]
impl From<time::PrimitiveDateTime> for DateTime {
    fn from(datetime: time::PrimitiveDateTime) -> Self {
        Self {
            hour: datetime.hour(),
            minute: datetime.minute(),
            second: datetime.second(),
            year: datetime.year() as u16,
            month: datetime.month().into(),
            day: datetime.day(),
            weekday: datetime.weekday().number_from_monday(),
        }
    }
}
