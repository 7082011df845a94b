//! Fixed-width text for the reading row.

use core::fmt::Write;

use heapless::String;

use crate::{distance::Reading, Error};

/// Characters in one visible display row.
pub const LINE_WIDTH: usize = 16;

/// Text for one display row.
pub type Line = String<LINE_WIDTH>;

/// Format a distance as `"<value> cm"` with two decimals and a minimum field
/// width of four. Values that do not fit a row are an error, never cut off.
pub fn format_distance(cm: f64) -> Result<Line, Error> {
    let mut line = Line::new();
    write!(line, "{:4.2} cm", cm)?;
    Ok(line)
}

/// Row text for any reading.
pub fn reading_text(reading: &Reading) -> Result<Line, Error> {
    let message = match reading {
        Reading::Distance(cm) => return format_distance(*cm),
        Reading::OutOfRange => "Out of range",
        Reading::NoEcho => "No echo",
        Reading::SensorFault => "Sensor error",
    };
    let mut line = Line::new();
    line.push_str(message).map_err(|_| Error::Format)?;
    Ok(line)
}
