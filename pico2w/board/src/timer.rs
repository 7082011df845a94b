//! `PulseTimer` on top of the embassy time driver.
//!
//! The RP2350 timer is 64-bit and never wraps in practice, so the 16-bit
//! single-shot window is enforced in software: counts past `u16::MAX`
//! saturate and raise the overflow flag.

use embassy_time::Instant;
use sonar_lcd::{PulseTimer, TickCount};

pub struct MicrosTimer {
    started: Option<Instant>,
    held_us: u64,
}

impl MicrosTimer {
    pub const fn new() -> Self {
        Self {
            started: None,
            held_us: 0,
        }
    }

    fn elapsed_us(&self) -> u64 {
        let running = match self.started {
            Some(start) => start.elapsed().as_micros(),
            None => 0,
        };
        self.held_us + running
    }
}

impl PulseTimer for MicrosTimer {
    const TICK_SECONDS: f64 = 1e-6;

    fn configure(&mut self) {
        self.started = None;
        self.held_us = 0;
    }

    fn start(&mut self) {
        if self.started.is_none() {
            self.started = Some(Instant::now());
        }
    }

    fn stop(&mut self) {
        if let Some(start) = self.started.take() {
            self.held_us += start.elapsed().as_micros();
        }
    }

    fn reset(&mut self) {
        self.held_us = 0;
        if self.started.is_some() {
            self.started = Some(Instant::now());
        }
    }

    fn read(&self) -> TickCount {
        let elapsed = self.elapsed_us();
        TickCount::try_from(elapsed).unwrap_or(TickCount::MAX)
    }

    fn overflowed(&self) -> bool {
        self.elapsed_us() > u64::from(TickCount::MAX)
    }
}
