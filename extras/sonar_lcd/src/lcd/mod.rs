//! HD44780-style 16x2 character display on an 8-bit parallel bus.
//!
//! The controller is write-only here: RW is held low and the busy flag is
//! never read, so every transaction relies on fixed delays. Wrong timing or
//! ordering garbles the screen silently; only pin failures surface as errors.

mod bus;
pub mod command;

pub use bus::DataBus;

use embedded_hal::{delay::DelayNs, digital::OutputPin};

use crate::Error;

/// How long E is held high for each transaction.
pub const ENABLE_HOLD_MS: u32 = 1;

/// Settle time after each power-on configuration command.
pub const INIT_SETTLE_MS: u32 = 10;

const BLANK_ROW: &str = "                ";

/// A two-row character display.
pub trait CharacterDisplay {
    /// Bring the controller into a known state.
    fn initialize(&mut self) -> Result<(), Error>;

    /// Move the cursor to a 1-based `(row, col)` position.
    fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), Error>;

    /// Write text at the cursor. No wrapping.
    fn write_str(&mut self, text: &str) -> Result<(), Error>;

    /// Overwrite a row with spaces and leave the cursor at its start.
    fn clear_row(&mut self, row: u8) -> Result<(), Error> {
        self.set_cursor(row, 1)?;
        self.write_str(BLANK_ROW)?;
        self.set_cursor(row, 1)
    }
}

/// Register selected by the RS line.
#[derive(Clone, Copy)]
enum Register {
    Instruction,
    Data,
}

pub struct Lcd<PIN, BUS, DELAY> {
    rs: PIN,
    rw: PIN,
    en: PIN,
    bus: BUS,
    delay: DELAY,
}

impl<PIN, BUS, DELAY> Lcd<PIN, BUS, DELAY>
where
    PIN: OutputPin,
    BUS: DataBus,
    DELAY: DelayNs,
{
    pub fn new(rs: PIN, rw: PIN, en: PIN, bus: BUS, delay: DELAY) -> Self {
        Self {
            rs,
            rw,
            en,
            bus,
            delay,
        }
    }

    /// Give back the control pins, bus and delay.
    pub fn release(self) -> (PIN, PIN, PIN, BUS, DELAY) {
        (self.rs, self.rw, self.en, self.bus, self.delay)
    }

    pub fn write_command(&mut self, code: u8) -> Result<(), Error> {
        self.transfer(Register::Instruction, code)
    }

    pub fn write_data(&mut self, byte: u8) -> Result<(), Error> {
        self.transfer(Register::Data, byte)
    }

    /// Byte on the bus, select register, write mode, then pulse E.
    fn transfer(&mut self, register: Register, byte: u8) -> Result<(), Error> {
        self.bus.write_byte(byte).map_err(Error::pin)?;
        match register {
            Register::Instruction => self.rs.set_low(),
            Register::Data => self.rs.set_high(),
        }
        .map_err(Error::pin)?;
        self.rw.set_low().map_err(Error::pin)?;

        self.en.set_high().map_err(Error::pin)?;
        self.delay.delay_ms(ENABLE_HOLD_MS);
        self.en.set_low().map_err(Error::pin)
    }
}

impl<PIN, BUS, DELAY> CharacterDisplay for Lcd<PIN, BUS, DELAY>
where
    PIN: OutputPin,
    BUS: DataBus,
    DELAY: DelayNs,
{
    fn initialize(&mut self) -> Result<(), Error> {
        for code in command::INIT_SEQUENCE {
            self.write_command(code)?;
            self.delay.delay_ms(INIT_SETTLE_MS);
        }
        #[cfg(feature = "defmt")]
        defmt::debug!("display initialized");
        Ok(())
    }

    fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), Error> {
        let address = command::cursor_address(row, col)?;
        self.write_command(address)
    }

    fn write_str(&mut self, text: &str) -> Result<(), Error> {
        text.bytes().try_for_each(|byte| self.write_data(byte))
    }
}
