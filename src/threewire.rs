//! The bit-banged 3-wire serial transport of the DS1302.
//!
//! The chip speaks over chip-enable, clock, and a bidirectional data line.
//! The protocol is not SPI, I2C, or 1-Wire, so no bus peripheral applies;
//! every bit is shifted by driving the pins directly. A transaction is one
//! session: chip-enable rises, a command byte is shifted out LSB-first, one
//! or more data bytes follow in either direction, and chip-enable falls.
//!
//! The chip samples its inputs on the rising clock edge and updates its
//! output after the falling edge. There is no acknowledgement anywhere in
//! the protocol; miswired pins or violated timing surface only as logically
//! wrong data.

use crate::Error;
use embedded_hal::{
    delay::DelayNs,
    digital::OutputPin,
};

/// Read bit of a command byte. Set for register reads, clear for writes.
pub(crate) const READ_BIT: u8 = 0x01;

/// Chip-enable settle time after either edge, in microseconds (t_CC and
/// t_CWH in the datasheet).
const SETTLE_US: u32 = 4;

/// Data and clock hold time per bit, in microseconds. The datasheet asks
/// for under a microsecond (t_DC = 200ns, t_CH = t_CL = 1000ns); a full
/// microsecond is the shortest delay the contract provides.
const BIT_US: u32 = 1;

/// A bidirectional data pin.
///
/// `embedded-hal` has no trait for a half-duplex line that switches between
/// driving and sampling, so the data line is abstracted here: direction
/// control plus level write and read. Implementations map this onto their
/// platform's open-drain or direction-switchable GPIO.
pub trait InOutPin {
    type Error;

    /// Configures the pin as an output, driven by this side.
    fn set_output(&mut self) -> Result<(), Self::Error>;

    /// Releases the pin to an input, letting the chip drive it.
    fn set_input(&mut self) -> Result<(), Self::Error>;

    /// Drives the pin high. Only meaningful while configured as an output.
    fn set_high(&mut self) -> Result<(), Self::Error>;

    /// Drives the pin low. Only meaningful while configured as an output.
    fn set_low(&mut self) -> Result<(), Self::Error>;

    /// Samples the pin level.
    fn is_high(&mut self) -> Result<bool, Self::Error>;
}

/// The 3-wire transport: chip-enable, data, and clock pins plus a delay
/// provider.
///
/// A `ThreeWire` owns its pins exclusively for its lifetime. Two instances
/// sharing pins is undefined behavior on the wire and excluded from the
/// contract.
#[derive(Debug)]
pub struct ThreeWire<CE, IO, CLK, D> {
    ce: CE,
    io: IO,
    clk: CLK,
    delay: D,
}

impl<CE, IO, CLK, D> ThreeWire<CE, IO, CLK, D>
where
    CE: OutputPin,
    IO: InOutPin,
    CLK: OutputPin,
    D: DelayNs,
{
    pub fn new(ce: CE, io: IO, clk: CLK, delay: D) -> Self {
        Self { ce, io, clk, delay }
    }

    /// Releases the owned pins and delay provider.
    pub fn release(self) -> (CE, IO, CLK, D) {
        (self.ce, self.io, self.clk, self.delay)
    }

    /// Reads one register. The command byte is sent with the read bit set
    /// and the data line handed to the chip for the response byte.
    pub fn read_register(&mut self, address: u8) -> Result<u8, Error> {
        self.start()?;
        self.write_byte(address | READ_BIT, true)?;
        let value = self.read_byte()?;
        self.stop()?;
        Ok(value)
    }

    /// Writes one register: command byte with the read bit clear, then the
    /// data byte, without releasing the line in between.
    pub fn write_register(&mut self, address: u8, value: u8) -> Result<(), Error> {
        self.start()?;
        self.write_byte(address & !READ_BIT, false)?;
        self.write_byte(value, false)?;
        self.stop()
    }

    /// Reads eight registers in one session.
    ///
    /// `command` is a burst command value, not a register address. The chip
    /// snapshots its registers when the command lands, so the returned
    /// block can never straddle a digit rollover.
    pub fn read_burst(&mut self, command: u8) -> Result<[u8; 8], Error> {
        let mut bytes = [0; 8];
        self.start()?;
        self.write_byte(command | READ_BIT, true)?;
        for byte in &mut bytes {
            *byte = self.read_byte()?;
        }
        self.stop()?;
        Ok(bytes)
    }

    /// Writes eight registers in one session.
    pub fn write_burst(&mut self, command: u8, bytes: &[u8; 8]) -> Result<(), Error> {
        self.start()?;
        self.write_byte(command & !READ_BIT, false)?;
        for &byte in bytes {
            self.write_byte(byte, false)?;
        }
        self.stop()
    }

    /// Opens a session: all three pins to their idle drive states, then
    /// chip-enable high with the settle delay the chip needs before it will
    /// accept a command.
    fn start(&mut self) -> Result<(), Error> {
        self.ce.set_low().map_err(|_| Error::Pin)?;
        self.clk.set_low().map_err(|_| Error::Pin)?;
        self.io.set_output().map_err(|_| Error::Pin)?;
        self.ce.set_high().map_err(|_| Error::Pin)?;
        self.delay.delay_us(SETTLE_US);
        Ok(())
    }

    /// Closes the session. The settle delay here is the minimum
    /// chip-enable inactive time before a new session may begin.
    fn stop(&mut self) -> Result<(), Error> {
        self.ce.set_low().map_err(|_| Error::Pin)?;
        self.delay.delay_us(SETTLE_US);
        Ok(())
    }

    /// Shifts one byte out, least significant bit first.
    ///
    /// With `release`, the data line is switched to input on the final bit
    /// while the clock is still high, instead of completing the clock
    /// cycle. The chip starts driving the line on the next falling edge;
    /// handing the line over first keeps both ends from driving it at
    /// once.
    fn write_byte(&mut self, byte: u8, release: bool) -> Result<(), Error> {
        for bit in 0..8 {
            if byte >> bit & 1 != 0 {
                self.io.set_high().map_err(|_| Error::Pin)?;
            } else {
                self.io.set_low().map_err(|_| Error::Pin)?;
            }
            self.delay.delay_us(BIT_US);
            self.clk.set_high().map_err(|_| Error::Pin)?;
            self.delay.delay_us(BIT_US);
            if release && bit == 7 {
                self.io.set_input().map_err(|_| Error::Pin)?;
            } else {
                self.clk.set_low().map_err(|_| Error::Pin)?;
                self.delay.delay_us(BIT_US);
            }
        }
        Ok(())
    }

    /// Shifts one byte in, least significant bit first. The chip presents
    /// each bit after the falling clock edge.
    fn read_byte(&mut self) -> Result<u8, Error> {
        let mut byte = 0;
        for bit in 0..8 {
            self.clk.set_high().map_err(|_| Error::Pin)?;
            self.delay.delay_us(BIT_US);
            self.clk.set_low().map_err(|_| Error::Pin)?;
            self.delay.delay_us(BIT_US);
            if self.io.is_high().map_err(|_| Error::Pin)? {
                byte |= 1 << bit;
            }
        }
        Ok(byte)
    }
}
