//! Tecplot string codec.
//!
//! Strings in a `.plt` file store one character per 4-byte little-endian
//! integer and end at a 4-byte zero. The writer that produced the format
//! emitted them in 8-byte qword units (an alignment artifact), which
//! matters for termination: when the *first* 4-byte slot of a unit is the
//! terminator, the second slot belongs to the next field and must not be
//! consumed. A decoded string of `L` characters therefore occupies exactly
//! `4 * (L + 1)` bytes.

use super::cursor::ByteCursor;
use super::error::{PltError, Result};

/// Decode a zero-terminated Tecplot string starting at the cursor.
///
/// Advances the cursor to the byte immediately after the terminator.
/// Character codes with no Unicode mapping decode to U+FFFD. Fails with
/// [`PltError::TruncatedString`] if the buffer ends before the terminator.
pub fn read_tec_string(cursor: &mut ByteCursor<'_>) -> Result<String> {
    let mut out = String::new();
    loop {
        // First slot of the qword unit.
        if !push_slot(cursor, &mut out)? {
            break;
        }
        // Second slot; skipped entirely when the first slot terminated.
        if !push_slot(cursor, &mut out)? {
            break;
        }
    }
    Ok(out)
}

/// Read one 4-byte character slot. Returns `false` on the terminator.
fn push_slot(cursor: &mut ByteCursor<'_>, out: &mut String) -> Result<bool> {
    let offset = cursor.position();
    let code = cursor.read_i32().map_err(|_| PltError::TruncatedString { offset })?;
    if code == 0 {
        return Ok(false);
    }
    out.push(char::from_u32(code as u32).unwrap_or(char::REPLACEMENT_CHARACTER));
    Ok(true)
}
