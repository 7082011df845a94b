//! # sonar_lcd
//!
//! Measures distance with an HC-SR04 ultrasonic sensor and shows it on an
//! HD44780-compatible 16x2 character display.
//!
//! The echo pulse is timed with a 16-bit single-shot [`PulseTimer`]. Every
//! wait is a bounded busy-wait, so a disconnected sensor shows up as
//! [`Reading::NoEcho`] instead of a hang, and an echo longer than the timer
//! window shows up as [`Reading::OutOfRange`] instead of a bogus distance.
//!
//! ## Features
//!
//! - `defmt`: derive `defmt::Format` on the public types and log timeouts and
//!   readings.
//!
//! # Example
//!
//! ```rust, ignore
//! let sensor = Hcsr04::new(trigger, echo, timer, Delay, Config::DEFAULT);
//! let display = Lcd::new(rs, rw, en, [d0, d1, d2, d3, d4, d5, d6, d7], Delay);
//!
//! let mut monitor = Monitor::new(sensor, display, Delay);
//! monitor.setup()?;
//! monitor.run()
//! ```

#![cfg_attr(not(test), no_std)]

pub mod distance;
mod error;
pub mod format;
pub mod lcd;
pub mod monitor;
pub mod sensor;
pub mod timer;

#[cfg(test)]
mod sim;

pub use distance::{distance_cm, ticks_to_cm, Reading};
pub use error::Error;
pub use format::{format_distance, reading_text};
pub use lcd::{CharacterDisplay, DataBus, Lcd};
pub use monitor::Monitor;
pub use sensor::{Config, EchoPulse, EchoSensor, Hcsr04};
pub use timer::{PulseTimer, TickCount};
