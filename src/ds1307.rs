//! Driver for the DS1307 timekeeping chip.
//!
//! Unlike the DS1302, the DS1307 sits on a standard two-wire bus, so all
//! framing, timing, and arbitration belong to the bus implementation. This
//! driver only assembles register transactions: a register pointer byte
//! followed by payload bytes for writes, or a write-read pair for reads.
//! The chip auto-increments its register pointer, which gives multi-byte
//! transfers for free.

use crate::{
    bcd,
    Date,
    DateTime,
    Error,
    Rtc,
    Time,
};
use embedded_hal::i2c::I2c;

/// Fixed two-wire peripheral address of the DS1307.
const ADDRESS: u8 = 0x68;

/// Register indices.
enum Register {
    Seconds = 0x00,
    Minutes = 0x01,
    Hours = 0x02,
    Weekday = 0x03,
    Day = 0x04,
    Month = 0x05,
    Year = 0x06,
    Control = 0x07,
}

/// Hour format and AM/PM flag of the hours register. Masked off on every
/// read so a chip left in 12-hour mode by other software still decodes
/// under the 24-hour interpretation.
const HOUR_MODE_BITS: u8 = 0b1100_0000;

/// Clock halt flag, bit 7 of the seconds register.
const CLOCK_HALT: u8 = 0x80;

/// DS1307 driver over an already-initialized two-wire bus.
///
/// The bus object is moved in; exclusive, serialized access to the shared
/// bus is the bus implementation's responsibility. Each operation here is
/// a single uninterrupted transaction.
#[derive(Debug)]
pub struct Ds1307<I2C> {
    i2c: I2C,
}

impl<I2C> Ds1307<I2C>
where
    I2C: I2c,
{
    /// Creates a driver on the given bus. No bus traffic occurs until the
    /// first operation.
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Releases the owned bus.
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn read_register(&mut self, register: Register) -> Result<u8, Error> {
        let mut value = [0];
        self.i2c
            .write_read(ADDRESS, &[register as u8], &mut value)
            .map_err(|_| Error::Bus)?;
        Ok(value[0])
    }

    fn write_register(&mut self, register: Register, value: u8) -> Result<(), Error> {
        self.i2c
            .write(ADDRESS, &[register as u8, value])
            .map_err(|_| Error::Bus)
    }
}

impl<I2C> Rtc for Ds1307<I2C>
where
    I2C: I2c,
{
    /// Zeroes the control register, leaving the square-wave output
    /// disabled. This is the one operation whose failure the original
    /// interface reports, and a convenient probe for chip presence.
    fn init(&mut self) -> Result<(), Error> {
        self.write_register(Register::Control, 0x00)
    }

    fn datetime(&mut self) -> Result<DateTime, Error> {
        let mut bytes = [0; 7];
        self.i2c
            .write_read(ADDRESS, &[Register::Seconds as u8], &mut bytes)
            .map_err(|_| Error::Bus)?;
        Ok(DateTime {
            second: bcd::from_packed(bytes[0] & !CLOCK_HALT),
            minute: bcd::from_packed(bytes[1]),
            hour: bcd::from_packed(bytes[2] & !HOUR_MODE_BITS),
            weekday: bytes[3] & 0x07,
            day: bcd::from_packed(bytes[4]),
            month: bcd::from_packed(bytes[5]),
            year: 2000 + u16::from(bcd::from_packed(bytes[6])),
        })
    }

    fn date(&mut self) -> Result<Date, Error> {
        let mut bytes = [0; 4];
        self.i2c
            .write_read(ADDRESS, &[Register::Weekday as u8], &mut bytes)
            .map_err(|_| Error::Bus)?;
        Ok(Date {
            weekday: bytes[0] & 0x07,
            day: bcd::from_packed(bytes[1]),
            month: bcd::from_packed(bytes[2]),
            year: 2000 + u16::from(bcd::from_packed(bytes[3])),
        })
    }

    fn time(&mut self) -> Result<Time, Error> {
        let mut bytes = [0; 3];
        self.i2c
            .write_read(ADDRESS, &[Register::Seconds as u8], &mut bytes)
            .map_err(|_| Error::Bus)?;
        Ok(Time {
            second: bcd::from_packed(bytes[0] & !CLOCK_HALT),
            minute: bcd::from_packed(bytes[1]),
            hour: bcd::from_packed(bytes[2] & !HOUR_MODE_BITS),
        })
    }

    fn hour(&mut self) -> Result<u8, Error> {
        Ok(bcd::from_packed(
            self.read_register(Register::Hours)? & !HOUR_MODE_BITS,
        ))
    }

    fn minute(&mut self) -> Result<u8, Error> {
        Ok(bcd::from_packed(self.read_register(Register::Minutes)?))
    }

    fn second(&mut self) -> Result<u8, Error> {
        Ok(bcd::from_packed(
            self.read_register(Register::Seconds)? & !CLOCK_HALT,
        ))
    }

    fn year(&mut self) -> Result<u16, Error> {
        Ok(2000 + u16::from(bcd::from_packed(self.read_register(Register::Year)?)))
    }

    fn month(&mut self) -> Result<u8, Error> {
        Ok(bcd::from_packed(self.read_register(Register::Month)?))
    }

    fn day(&mut self) -> Result<u8, Error> {
        Ok(bcd::from_packed(self.read_register(Register::Day)?))
    }

    fn weekday(&mut self) -> Result<u8, Error> {
        Ok(self.read_register(Register::Weekday)? & 0x07)
    }

    /// One transaction over the whole clock register range. Writing the
    /// seconds register with its high bit clear also restarts a halted
    /// clock, and writing the hour plain keeps the chip in 24-hour mode.
    fn set_datetime(&mut self, datetime: &DateTime) -> Result<(), Error> {
        self.i2c
            .write(
                ADDRESS,
                &[
                    Register::Seconds as u8,
                    bcd::to_packed(datetime.second),
                    bcd::to_packed(datetime.minute),
                    bcd::to_packed(datetime.hour),
                    datetime.weekday,
                    bcd::to_packed(datetime.day),
                    bcd::to_packed(datetime.month),
                    bcd::to_packed(datetime.year.wrapping_sub(2000) as u8),
                ],
            )
            .map_err(|_| Error::Bus)
    }

    /// One transaction over the weekday through year registers; the
    /// time-of-day registers are never touched.
    fn set_date(&mut self, date: &Date) -> Result<(), Error> {
        self.i2c
            .write(
                ADDRESS,
                &[
                    Register::Weekday as u8,
                    date.weekday,
                    bcd::to_packed(date.day),
                    bcd::to_packed(date.month),
                    bcd::to_packed(date.year.wrapping_sub(2000) as u8),
                ],
            )
            .map_err(|_| Error::Bus)
    }

    /// One transaction over the seconds through hours registers; the
    /// calendar registers are never touched.
    fn set_time(&mut self, time: &Time) -> Result<(), Error> {
        self.i2c
            .write(
                ADDRESS,
                &[
                    Register::Seconds as u8,
                    bcd::to_packed(time.second),
                    bcd::to_packed(time.minute),
                    bcd::to_packed(time.hour),
                ],
            )
            .map_err(|_| Error::Bus)
    }

    fn set_hour(&mut self, hour: u8) -> Result<(), Error> {
        self.write_register(Register::Hours, bcd::to_packed(hour))
    }

    fn set_minute(&mut self, minute: u8) -> Result<(), Error> {
        self.write_register(Register::Minutes, bcd::to_packed(minute))
    }

    fn set_second(&mut self, second: u8) -> Result<(), Error> {
        self.write_register(Register::Seconds, bcd::to_packed(second))
    }

    fn set_year(&mut self, year: u16) -> Result<(), Error> {
        self.write_register(Register::Year, bcd::to_packed(year.wrapping_sub(2000) as u8))
    }

    fn set_month(&mut self, month: u8) -> Result<(), Error> {
        self.write_register(Register::Month, bcd::to_packed(month))
    }

    fn set_day(&mut self, day: u8) -> Result<(), Error> {
        self.write_register(Register::Day, bcd::to_packed(day))
    }

    fn set_weekday(&mut self, weekday: u8) -> Result<(), Error> {
        self.write_register(Register::Weekday, weekday)
    }
}
