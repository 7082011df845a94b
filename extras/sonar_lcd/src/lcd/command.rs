//! Instruction bytes understood by HD44780-compatible controllers.

use crate::Error;

/// 8-bit interface, two lines, 5x7 font.
pub const FUNCTION_SET_8BIT_2LINE: u8 = 0x38;
/// Display on, cursor on.
pub const DISPLAY_ON_CURSOR: u8 = 0x0E;
/// Blank the whole display and home the cursor.
pub const CLEAR_DISPLAY: u8 = 0x01;
/// Move the cursor right after every character, no display shift.
pub const ENTRY_MODE_INCREMENT: u8 = 0x06;

/// Set DDRAM address, start of the first row.
pub const ROW_1_ADDRESS: u8 = 0x80;
/// Set DDRAM address, start of the second row.
pub const ROW_2_ADDRESS: u8 = 0xC0;

/// Power-on configuration, in the order the controller expects it.
pub const INIT_SEQUENCE: [u8; 4] = [
    FUNCTION_SET_8BIT_2LINE,
    DISPLAY_ON_CURSOR,
    CLEAR_DISPLAY,
    ENTRY_MODE_INCREMENT,
];

/// Set-address command for a 1-based `(row, col)` position.
///
/// Any column whose command still fits in a byte is accepted: up to 128 on
/// row 1 and 64 on row 2.
pub fn cursor_address(row: u8, col: u8) -> Result<u8, Error> {
    let base = match row {
        1 => ROW_1_ADDRESS,
        2 => ROW_2_ADDRESS,
        _ => return Err(Error::InvalidPosition { row, col }),
    };
    col.checked_sub(1)
        .and_then(|offset| base.checked_add(offset))
        .ok_or(Error::InvalidPosition { row, col })
}
