//! Single-shot 16-bit interval timer.
//!
//! Models a count-up hardware timer in single-run mode: it counts while
//! running, holds its value while stopped and raises an overflow flag when
//! the count passes `u16::MAX`.

/// Raw count read back from the timer.
pub type TickCount = u16;

/// A free-running 16-bit counter with overflow detection.
///
/// All methods touch hardware registers. They are not reentrant and must be
/// called from a single execution context.
pub trait PulseTimer {
    /// Duration of one count, in seconds.
    const TICK_SECONDS: f64;

    /// Select 16-bit single-run mode, clear the overflow flag and stop the
    /// counter. Call once before first use.
    fn configure(&mut self);

    /// Start counting from the current value.
    fn start(&mut self);

    /// Stop counting. The value is kept until the next `reset`.
    fn stop(&mut self);

    /// Zero the count and clear the overflow flag.
    fn reset(&mut self);

    /// Current count. Saturates at `u16::MAX` once the timer has overflowed.
    fn read(&self) -> TickCount;

    /// True if the count wrapped since the last `reset`.
    fn overflowed(&self) -> bool;
}
