//! Board pack binary format (`resources/boards`)
//!
//! One file holding every board, framed with ASCII control characters.
//! POD format - no magic bytes, no version, no padding.
//!
//! # Layout
//! ```text
//! for each board:
//!     n_misses_allowed  i32 LE
//!     0x1F
//!     n_hits_required   i32 LE
//!     0x1F
//!     n_correct_items   i32 LE
//!     0x1F
//!     for each item (correct items, then wrong items):
//!         name bytes, 0x00
//!     0x1F
//!     rule bytes, 0x00
//!     0x1F
//!     0x1E
//! 0x1C
//! ```
//!
//! The reader splits the item block into correct and wrong items using
//! `n_correct_items`. Integers are always little-endian, independent of the
//! host that produced the pack.
//!
//! Item names never contain framing bytes (validation restricts them to
//! printable ASCII without spaces). Rule text is written as-is.


use std::io::Write;

use crate::board::Board;

/// File name of the pack inside the resources directory (no extension)
pub const BOARD_PACK_FILE_NAME: &str = "boards";

/// Ends a string
pub const STRING_TERMINATOR: u8 = 0x00;
/// Ends a field (ASCII unit separator)
pub const FIELD_SEPARATOR: u8 = 0x1F;
/// Ends a board (ASCII record separator)
pub const RECORD_SEPARATOR: u8 = 0x1E;
/// Ends the pack (ASCII file separator)
pub const FILE_SEPARATOR: u8 = 0x1C;

/// Failure while writing a board pack
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// Correct item count does not fit the i32 count field
    #[error("board {board}: {count} correct items do not fit in an i32")]
    CountOverflow { board: usize, count: usize },

    #[error("failed to write board pack: {0}")]
    Io(#[from] std::io::Error),
}

/// Write a complete board pack
pub fn write_board_pack<W: Write>(w: &mut W, boards: &[Board]) -> Result<(), EncodeError> {
    for (index, board) in boards.iter().enumerate() {
        let n_correct_items =
            i32::try_from(board.n_correct_items()).map_err(|_| EncodeError::CountOverflow {
                board: index,
                count: board.n_correct_items(),
            })?;

        write_i32_field(w, board.n_misses_allowed)?;
        write_i32_field(w, board.n_hits_required)?;
        write_i32_field(w, n_correct_items)?;

        for item in board.items() {
            write_str(w, item)?;
        }
        w.write_all(&[FIELD_SEPARATOR])?;

        write_str(w, &board.rule)?;
        w.write_all(&[FIELD_SEPARATOR, RECORD_SEPARATOR])?;
    }

    w.write_all(&[FILE_SEPARATOR])?;
    Ok(())
}

/// Encode a board pack into memory
pub fn encode_board_pack(boards: &[Board]) -> Result<Vec<u8>, EncodeError> {
    let mut buf = Vec::with_capacity(encoded_size_hint(boards));
    write_board_pack(&mut buf, boards)?;
    Ok(buf)
}

fn write_i32_field<W: Write>(w: &mut W, value: i32) -> std::io::Result<()> {
    w.write_all(&value.to_le_bytes())?;
    w.write_all(&[FIELD_SEPARATOR])
}

fn write_str<W: Write>(w: &mut W, s: &str) -> std::io::Result<()> {
    w.write_all(s.as_bytes())?;
    w.write_all(&[STRING_TERMINATOR])
}

// 3 × (i32 + separator), item block separator, rule separator + record separator
const BOARD_FIXED_SIZE: usize = 3 * 5 + 1 + 2;

fn encoded_size_hint(boards: &[Board]) -> usize {
    let strings: usize = boards
        .iter()
        .map(|b| b.items().map(|i| i.len() + 1).sum::<usize>() + b.rule.len() + 1)
        .sum();
    boards.len() * BOARD_FIXED_SIZE + strings + 1
}
