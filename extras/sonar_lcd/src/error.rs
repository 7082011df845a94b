use embedded_hal::digital::ErrorKind;

/// Everything that can go wrong while ranging or driving the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A GPIO line could not be driven or sampled.
    Pin(ErrorKind),
    /// The echo line was already high before the trigger pulse.
    EchoAlreadyHigh,
    /// The echo line never rose after the trigger pulse.
    NoEcho,
    /// The echo line stayed high past the poll budget without the timer overflowing.
    EchoStuckHigh,
    /// The cursor position lies outside the two visible rows.
    InvalidPosition { row: u8, col: u8 },
    /// Formatted text did not fit its line buffer.
    Format,
}

impl Error {
    pub(crate) fn pin<E: embedded_hal::digital::Error>(e: E) -> Self {
        Error::Pin(e.kind())
    }
}

impl From<core::fmt::Error> for Error {
    fn from(_: core::fmt::Error) -> Self {
        Error::Format
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Pin(kind) => write!(f, "pin error: {kind:?}"),
            Error::EchoAlreadyHigh => f.write_str("echo pin is already high"),
            Error::NoEcho => f.write_str("timeout waiting for echo pin to go high"),
            Error::EchoStuckHigh => f.write_str("timeout waiting for echo pin to go low"),
            Error::InvalidPosition { row, col } => {
                write!(f, "cursor position ({row}, {col}) is off screen")
            }
            Error::Format => f.write_str("text does not fit the line"),
        }
    }
}
