//! Binary formats consumed by the game runtime
//!
//! - [`board_pack`] - All boards of a game, separator-framed

pub mod board_pack;

pub use board_pack::*;
