//! The 8-bit parallel data bus.

use embedded_hal::digital::{OutputPin, PinState};

/// Puts one byte on the controller's data lines.
pub trait DataBus {
    type Error: embedded_hal::digital::Error;

    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error>;
}

/// Eight output pins, D0 at index 0 through D7 at index 7.
impl<P: OutputPin> DataBus for [P; 8] {
    type Error = P::Error;

    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        for (bit, pin) in self.iter_mut().enumerate() {
            pin.set_state(PinState::from(byte & (1 << bit) != 0))?;
        }
        Ok(())
    }
}
