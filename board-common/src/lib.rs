//! Shared types for board puzzle assets
//!
//! This crate provides the board asset pipeline pieces shared between:
//! - `board-export` (offline asset tool)
//! - tests and tooling that need to produce board packs in memory
//!
//! # Modules
//!
//! - [`board`] - Board records and loading from JSON source descriptions
//! - [`validate`] - Structural invariants checked before anything is encoded
//! - [`formats`] - The binary board pack consumed by the game runtime

pub mod board;
pub mod formats;
pub mod validate;

pub use board::{load, load_file, Board, FormatError};

pub use validate::{
    validate, validate_with_limits, Limits, SpriteDir, SpriteStore, ValidationError, Violation,
    SPRITE_EXT,
};

pub use formats::{
    encode_board_pack, write_board_pack, EncodeError, BOARD_PACK_FILE_NAME, FIELD_SEPARATOR,
    FILE_SEPARATOR, RECORD_SEPARATOR, STRING_TERMINATOR,
};
