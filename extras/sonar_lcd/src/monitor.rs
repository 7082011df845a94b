//! The ranging loop: measure, convert, display, wait, forever.

use embedded_hal::delay::DelayNs;

use crate::{
    distance::Reading, format::reading_text, lcd::CharacterDisplay, sensor::EchoSensor, Error,
};

/// Static text on the first row.
pub const LABEL: &str = "Distance:";

/// Row that shows the latest reading.
pub const READING_ROW: u8 = 2;

/// Pause between two measurement cycles.
pub const CYCLE_DELAY_MS: u32 = 200;

/// Owns the sensor and display and drives one measurement per cycle.
pub struct Monitor<SENSOR, DISPLAY, DELAY> {
    sensor: SENSOR,
    display: DISPLAY,
    delay: DELAY,
}

impl<SENSOR, DISPLAY, DELAY> Monitor<SENSOR, DISPLAY, DELAY>
where
    SENSOR: EchoSensor,
    DISPLAY: CharacterDisplay,
    DELAY: DelayNs,
{
    pub fn new(sensor: SENSOR, display: DISPLAY, delay: DELAY) -> Self {
        Self {
            sensor,
            display,
            delay,
        }
    }

    /// Initialize the display and the timer, then draw the label.
    pub fn setup(&mut self) -> Result<(), Error> {
        self.display.initialize()?;
        self.sensor.configure()?;
        self.display.set_cursor(1, 1)?;
        self.display.write_str(LABEL)
    }

    /// Run one measurement and show it on the reading row.
    pub fn cycle(&mut self) -> Result<Reading, Error> {
        let reading = Reading::from_measurement(self.sensor.measure(), self.sensor.tick_seconds());
        let text = reading_text(&reading)?;

        self.display.clear_row(READING_ROW)?;
        self.display.write_str(&text)?;

        self.delay.delay_ms(CYCLE_DELAY_MS);
        Ok(reading)
    }

    /// Cycle forever. Display failures are logged and the next cycle retries.
    pub fn run(mut self) -> ! {
        loop {
            match self.cycle() {
                Ok(_reading) => {
                    #[cfg(feature = "defmt")]
                    defmt::info!("{}", _reading);
                }
                Err(_e) => {
                    #[cfg(feature = "defmt")]
                    defmt::error!("display update failed: {}", _e);
                    self.delay.delay_ms(CYCLE_DELAY_MS);
                }
            }
        }
    }

    /// Give back the sensor, display and delay.
    pub fn release(self) -> (SENSOR, DISPLAY, DELAY) {
        (self.sensor, self.display, self.delay)
    }
}
