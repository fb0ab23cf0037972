//! Driver for the DS1302 timekeeping chip.
//!
//! The DS1302 hangs off three directly driven pins (see
//! [`ThreeWire`](crate::ThreeWire)). Full and partial timestamp transfers go
//! through the clock burst commands so that a value is never read or
//! written while a digit rolls over; single fields use one-register
//! sessions.
//!
//! The chip refuses clock writes while its write protect flag is set, so
//! every setter clears the enable register first. Setters also always
//! encode a running clock in 24-hour form; whatever hour format other
//! software may have left in the chip, data written through this driver is
//! unambiguous.

use crate::{
    bcd,
    frame::ClockFrame,
    threewire::{
        InOutPin,
        ThreeWire,
    },
    Date,
    DateTime,
    Error,
    Rtc,
    Time,
};
use embedded_hal::{
    delay::DelayNs,
    digital::OutputPin,
};

/// Command addresses of the clock register file.
///
/// The highest bit of every command is `1`, so the register commands start
/// at `0x80`. The two burst values are commands rather than true addresses.
enum Command {
    Seconds = 0x80,
    Minutes = 0x82,
    Hours = 0x84,
    Day = 0x86,
    Month = 0x88,
    Weekday = 0x8a,
    Year = 0x8c,
    WriteEnable = 0x8e,
    Trickle = 0x90,
    BurstWrite = 0xbe,
    BurstRead = 0xbf,
}

/// DS1302 driver over three caller-supplied pins and a delay provider.
///
/// The pins are owned exclusively for the driver's lifetime. They are not
/// validated; handing over overlapping or miswired pins yields undefined
/// data, not an error.
#[derive(Debug)]
pub struct Ds1302<CE, IO, CLK, D> {
    transport: ThreeWire<CE, IO, CLK, D>,
}

impl<CE, IO, CLK, D> Ds1302<CE, IO, CLK, D>
where
    CE: OutputPin,
    IO: InOutPin,
    CLK: OutputPin,
    D: DelayNs,
{
    /// Creates a driver from chip-enable, data, and clock pins plus a
    /// delay provider. No bus traffic occurs until the first operation.
    pub fn new(ce: CE, io: IO, clk: CLK, delay: D) -> Self {
        Self {
            transport: ThreeWire::new(ce, io, clk, delay),
        }
    }

    /// Releases the owned pins and delay provider.
    pub fn release(self) -> (CE, IO, CLK, D) {
        self.transport.release()
    }

    /// Clears write protect. Required before every write-class session.
    fn enable_writes(&mut self) -> Result<(), Error> {
        self.transport
            .write_register(Command::WriteEnable as u8, 0x00)
    }

    fn read_frame(&mut self) -> Result<ClockFrame, Error> {
        self.transport
            .read_burst(Command::BurstRead as u8)
            .map(ClockFrame::from)
    }

    fn write_frame(&mut self, frame: ClockFrame) -> Result<(), Error> {
        self.enable_writes()?;
        self.transport
            .write_burst(Command::BurstWrite as u8, &frame.into())
    }
}

impl<CE, IO, CLK, D> Rtc for Ds1302<CE, IO, CLK, D>
where
    CE: OutputPin,
    IO: InOutPin,
    CLK: OutputPin,
    D: DelayNs,
{
    /// Disables the trickle charger. The charger configuration itself is
    /// out of scope; the chip only needs it off for plain timekeeping.
    fn init(&mut self) -> Result<(), Error> {
        self.transport.write_register(Command::Trickle as u8, 0x00)
    }

    fn datetime(&mut self) -> Result<DateTime, Error> {
        Ok(self.read_frame()?.datetime())
    }

    fn date(&mut self) -> Result<Date, Error> {
        Ok(self.read_frame()?.date())
    }

    fn time(&mut self) -> Result<Time, Error> {
        Ok(self.read_frame()?.time())
    }

    fn hour(&mut self) -> Result<u8, Error> {
        // 24-hour interpretation; the format flag in bit 7 is ignored.
        Ok(bcd::from_packed(
            self.transport.read_register(Command::Hours as u8)? & 0x3f,
        ))
    }

    fn minute(&mut self) -> Result<u8, Error> {
        Ok(bcd::from_packed(
            self.transport.read_register(Command::Minutes as u8)? & 0x7f,
        ))
    }

    fn second(&mut self) -> Result<u8, Error> {
        Ok(bcd::from_packed(
            self.transport.read_register(Command::Seconds as u8)? & 0x7f,
        ))
    }

    fn year(&mut self) -> Result<u16, Error> {
        Ok(2000
            + u16::from(bcd::from_packed(
                self.transport.read_register(Command::Year as u8)?,
            )))
    }

    fn month(&mut self) -> Result<u8, Error> {
        Ok(bcd::from_packed(
            self.transport.read_register(Command::Month as u8)? & 0x1f,
        ))
    }

    fn day(&mut self) -> Result<u8, Error> {
        Ok(bcd::from_packed(
            self.transport.read_register(Command::Day as u8)? & 0x3f,
        ))
    }

    fn weekday(&mut self) -> Result<u8, Error> {
        Ok(self.transport.read_register(Command::Weekday as u8)? & 0x07)
    }

    /// Builds the register block from scratch and burst-writes it; nothing
    /// of the previous chip state survives.
    fn set_datetime(&mut self, datetime: &DateTime) -> Result<(), Error> {
        self.write_frame(ClockFrame::from_datetime(datetime))
    }

    /// Burst-reads the current block, replaces the calendar registers, and
    /// burst-writes the whole block back, preserving the stored time.
    fn set_date(&mut self, date: &Date) -> Result<(), Error> {
        let mut frame = self.read_frame()?;
        frame.set_date(date);
        frame.set_running();
        self.write_frame(frame)
    }

    /// Burst-reads the current block, replaces the time-of-day registers,
    /// and burst-writes the whole block back, preserving the calendar.
    fn set_time(&mut self, time: &Time) -> Result<(), Error> {
        let mut frame = self.read_frame()?;
        frame.set_time(time);
        frame.clear_write_protect();
        self.write_frame(frame)
    }

    fn set_hour(&mut self, hour: u8) -> Result<(), Error> {
        self.enable_writes()?;
        self.transport
            .write_register(Command::Hours as u8, bcd::to_packed(hour))
    }

    fn set_minute(&mut self, minute: u8) -> Result<(), Error> {
        self.enable_writes()?;
        self.transport
            .write_register(Command::Minutes as u8, bcd::to_packed(minute))
    }

    fn set_second(&mut self, second: u8) -> Result<(), Error> {
        self.enable_writes()?;
        self.transport
            .write_register(Command::Seconds as u8, bcd::to_packed(second))
    }

    fn set_year(&mut self, year: u16) -> Result<(), Error> {
        self.enable_writes()?;
        self.transport.write_register(
            Command::Year as u8,
            bcd::to_packed(year.wrapping_sub(2000) as u8),
        )
    }

    fn set_month(&mut self, month: u8) -> Result<(), Error> {
        self.enable_writes()?;
        self.transport
            .write_register(Command::Month as u8, bcd::to_packed(month))
    }

    fn set_day(&mut self, day: u8) -> Result<(), Error> {
        self.enable_writes()?;
        self.transport
            .write_register(Command::Day as u8, bcd::to_packed(day))
    }

    fn set_weekday(&mut self, weekday: u8) -> Result<(), Error> {
        self.enable_writes()?;
        self.transport
            .write_register(Command::Weekday as u8, weekday)
    }
}
