//! Conversion from echo ticks to centimeters.

use crate::{sensor::EchoPulse, timer::TickCount, Error};

/// Speed of sound in air, in centimeters per second.
pub const SPEED_OF_SOUND_CM_PER_S: f64 = 34300.0;

/// Half the speed of sound: the echo covers the distance twice.
pub const ROUND_TRIP_CM_PER_S: f64 = SPEED_OF_SOUND_CM_PER_S / 2.0;

/// Tick period of a 12-cycle timer clocked from an 11.0592 MHz crystal.
pub const REFERENCE_TICK_SECONDS: f64 = 1.085e-6;

/// Distance for a pulse of `ticks` counts of `tick_seconds` each.
pub fn ticks_to_cm(ticks: TickCount, tick_seconds: f64) -> f64 {
    f64::from(ticks) * tick_seconds * ROUND_TRIP_CM_PER_S
}

/// Distance for a pulse measured with the reference tick period.
pub fn distance_cm(ticks: TickCount) -> f64 {
    ticks_to_cm(ticks, REFERENCE_TICK_SECONDS)
}

/// Outcome of one ranging cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reading {
    /// A valid echo, in centimeters.
    Distance(f64),
    /// The echo outlasted the timer window: nothing within range.
    OutOfRange,
    /// The sensor never answered the trigger.
    NoEcho,
    /// The echo line misbehaved or a pin could not be accessed.
    SensorFault,
}

impl Reading {
    /// Classify the result of a measurement.
    pub fn from_measurement(result: Result<EchoPulse, Error>, tick_seconds: f64) -> Self {
        match result {
            Ok(pulse) => match pulse.distance_cm(tick_seconds) {
                Some(cm) => Reading::Distance(cm),
                None => Reading::OutOfRange,
            },
            Err(Error::NoEcho) => Reading::NoEcho,
            Err(_) => Reading::SensorFault,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Reading::Distance(_))
    }
}
