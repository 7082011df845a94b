//! Trigger/echo handshake with the HC-SR04.
//!
//! One call to [`EchoSensor::measure`] walks the whole handshake: pulse the
//! trigger line for 10us, wait for the echo line to rise, then time how long
//! it stays high with the [`PulseTimer`]. Every wait is a busy-wait with an
//! explicit bound, so a disconnected sensor can never hang the caller.

use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
};

use crate::{
    distance::ticks_to_cm,
    timer::{PulseTimer, TickCount},
    Error,
};

/// Width of the trigger pulse in microseconds.
pub const TRIGGER_PULSE_US: u32 = 10;

/// Bounds for the echo waits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Ticks to wait for the echo line to rise after the trigger falls.
    pub rise_timeout_ticks: TickCount,
    /// Maximum samples of the echo line per wait, regardless of the timer.
    pub poll_limit: u32,
}

impl Config {
    pub const DEFAULT: Self = Self {
        rise_timeout_ticks: 30_000,
        poll_limit: 20_000_000,
    };
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Width of one echo pulse as read back from the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EchoPulse {
    pub ticks: TickCount,
    /// The timer wrapped before the echo line fell, so `ticks` is only the
    /// size of the timer window and not a real echo.
    pub overflowed: bool,
}

impl EchoPulse {
    /// Distance in centimeters, or `None` if the pulse ran past the timer window.
    pub fn distance_cm(&self, tick_seconds: f64) -> Option<f64> {
        if self.overflowed {
            None
        } else {
            Some(ticks_to_cm(self.ticks, tick_seconds))
        }
    }
}

/// Anything that can fire a ranging pulse and time the echo.
pub trait EchoSensor {
    /// Prepare the timing hardware. Call once before the first measurement.
    fn configure(&mut self) -> Result<(), Error>;

    /// Run one complete trigger/echo handshake.
    fn measure(&mut self) -> Result<EchoPulse, Error>;

    /// Duration of one tick of the returned pulse widths, in seconds.
    fn tick_seconds(&self) -> f64;
}

/// The HC-SR04 ultrasonic distance sensor driver.
///
/// # Note
///
/// `measure` returns an error if the echo pin is already high, or if the echo
/// pin does not go high within `Config::rise_timeout_ticks`. A pulse longer
/// than the timer window is reported with `EchoPulse::overflowed` set.
pub struct Hcsr04<TRIGPIN, ECHOPIN, TIMER, DELAY> {
    trigger: TRIGPIN,
    echo: ECHOPIN,
    timer: TIMER,
    delay: DELAY,
    config: Config,
}

impl<TRIGPIN, ECHOPIN, TIMER, DELAY> Hcsr04<TRIGPIN, ECHOPIN, TIMER, DELAY>
where
    TRIGPIN: OutputPin,
    ECHOPIN: InputPin,
    TIMER: PulseTimer,
    DELAY: DelayNs,
{
    /// Initialize a new sensor.
    /// Requires a trigger pin and an echo pin, the pulse is timed on the echo pin.
    /// Requires a 16-bit pulse timer and a delay for the trigger pulse.
    pub fn new(
        trigger: TRIGPIN,
        echo: ECHOPIN,
        timer: TIMER,
        delay: DELAY,
        config: Config,
    ) -> Self {
        Self {
            trigger,
            echo,
            timer,
            delay,
            config,
        }
    }

    /// Give back the pins, timer and delay.
    pub fn release(self) -> (TRIGPIN, ECHOPIN, TIMER, DELAY) {
        (self.trigger, self.echo, self.timer, self.delay)
    }

    fn echo_high(&mut self) -> Result<bool, Error> {
        self.echo.is_high().map_err(Error::pin)
    }

    fn send_trigger_pulse(&mut self) -> Result<(), Error> {
        self.trigger.set_high().map_err(Error::pin)?;
        self.delay.delay_us(TRIGGER_PULSE_US);
        self.trigger.set_low().map_err(Error::pin)
    }

    /// Spin until the echo line rises. The timer runs during the wait and
    /// bounds it.
    fn await_echo_rise(&mut self) -> Result<(), Error> {
        self.timer.reset();
        self.timer.start();

        let mut polls: u32 = 0;
        loop {
            if self.echo_high()? {
                self.timer.stop();
                return Ok(());
            }
            polls += 1;
            if self.timer.overflowed()
                || self.timer.read() >= self.config.rise_timeout_ticks
                || polls >= self.config.poll_limit
            {
                self.timer.stop();
                #[cfg(feature = "defmt")]
                defmt::warn!("no echo after {} polls ({} ticks)", polls, self.timer.read());
                return Err(Error::NoEcho);
            }
        }
    }

    /// Spin while the echo line stays high and the timer has room left.
    fn time_echo_pulse(&mut self) -> Result<EchoPulse, Error> {
        self.timer.reset();
        self.timer.start();

        let mut polls: u32 = 0;
        while self.echo_high()? && !self.timer.overflowed() {
            polls += 1;
            if polls >= self.config.poll_limit {
                self.timer.stop();
                #[cfg(feature = "defmt")]
                defmt::warn!("echo still high after {} polls", polls);
                return Err(Error::EchoStuckHigh);
            }
        }
        self.timer.stop();

        Ok(EchoPulse {
            ticks: self.timer.read(),
            overflowed: self.timer.overflowed(),
        })
    }
}

impl<TRIGPIN, ECHOPIN, TIMER, DELAY> EchoSensor for Hcsr04<TRIGPIN, ECHOPIN, TIMER, DELAY>
where
    TRIGPIN: OutputPin,
    ECHOPIN: InputPin,
    TIMER: PulseTimer,
    DELAY: DelayNs,
{
    fn configure(&mut self) -> Result<(), Error> {
        self.timer.configure();
        self.trigger.set_low().map_err(Error::pin)
    }

    fn measure(&mut self) -> Result<EchoPulse, Error> {
        // error if the echo pin is already high
        if self.echo_high()? {
            #[cfg(feature = "defmt")]
            defmt::warn!("echo pin is already high");
            return Err(Error::EchoAlreadyHigh);
        }

        self.send_trigger_pulse()?;
        self.await_echo_rise()?;
        let pulse = self.time_echo_pulse()?;

        #[cfg(feature = "defmt")]
        defmt::trace!("echo pulse {}", pulse);
        Ok(pulse)
    }

    fn tick_seconds(&self) -> f64 {
        TIMER::TICK_SECONDS
    }
}
