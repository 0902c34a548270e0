//! Board validation
//!
//! Every board must satisfy the following before a pack is encoded:
//!
//! 1. `n_hits_required` does not exceed the number of items
//! 2. the item count is a perfect square (items tile a square grid)
//! 3. no item name contains a space
//! 4. every item name is ASCII
//! 5. every item has a sprite in the sprite store
//!
//! Boards are checked in declaration order and items in combined order
//! (correct items, then wrong items). The first violation aborts the run.
//!
//! Optional [`Limits`] mirror the fixed-size buffers of the runtime loader and
//! are checked after the invariants above.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::board::Board;
use crate::formats::{FIELD_SEPARATOR, FILE_SEPARATOR, STRING_TERMINATOR};

/// Sprite file extension probed for each item
pub const SPRITE_EXT: &str = "png";

/// Lookup of item sprites. Only existence is queried, never contents.
pub trait SpriteStore {
    /// Where the sprite for `item` is expected to live
    fn sprite_path(&self, item: &str) -> PathBuf;

    /// Whether the sprite for `item` exists
    fn has_sprite(&self, item: &str) -> bool;
}

/// Sprites stored as `<root>/<item>.png`
#[derive(Debug, Clone)]
pub struct SpriteDir {
    root: PathBuf,
}

impl SpriteDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl SpriteStore for SpriteDir {
    fn sprite_path(&self, item: &str) -> PathBuf {
        self.root.join(format!("{item}.{SPRITE_EXT}"))
    }

    fn has_sprite(&self, item: &str) -> bool {
        self.sprite_path(item).is_file()
    }
}

/// Runtime capacity limits. `None` disables a check.
///
/// Name and rule lengths are in bytes and must leave room for the NUL
/// terminator, so a name is accepted only when `len < max_item_name_len`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Limits {
    pub max_boards: Option<usize>,
    pub max_items: Option<usize>,
    pub max_item_name_len: Option<usize>,
    pub max_rule_len: Option<usize>,
}

impl Limits {
    /// No limits
    pub const NONE: Self = Self {
        max_boards: None,
        max_items: None,
        max_item_name_len: None,
        max_rule_len: None,
    };
}

/// Which rule a board broke
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// More hits required than there are items
    HitsUnreachable { required: i32, available: usize },

    /// Item count is not a perfect square
    NotSquare { n_items: usize },

    /// Item name contains a space
    ItemContainsSpace { item: String },

    /// Item name contains a non-ASCII character
    ItemNotAscii { item: String },

    /// Sprite file for the item does not exist
    MissingSprite { item: String, path: PathBuf },

    /// More boards than the runtime can hold
    TooManyBoards { n_boards: usize, max: usize },

    /// More items on a board than the runtime can hold
    TooManyItems { n_items: usize, max: usize },

    /// Item name does not fit the runtime name buffer
    ItemNameTooLong { item: String, max: usize },

    /// Rule text does not fit the runtime rule buffer
    RuleTooLong { len: usize, max: usize },
}

impl Violation {
    /// Stable identifier of the violated rule
    pub fn invariant(&self) -> &'static str {
        match self {
            Self::HitsUnreachable { .. } => "hits-reachable",
            Self::NotSquare { .. } => "square-grid",
            Self::ItemContainsSpace { .. } => "item-no-space",
            Self::ItemNotAscii { .. } => "item-ascii",
            Self::MissingSprite { .. } => "item-sprite",
            Self::TooManyBoards { .. } => "max-boards",
            Self::TooManyItems { .. } => "max-items",
            Self::ItemNameTooLong { .. } => "max-item-name-len",
            Self::RuleTooLong { .. } => "max-rule-len",
        }
    }

    /// Offending item, if the violation is about a single item
    pub fn item(&self) -> Option<&str> {
        match self {
            Self::ItemContainsSpace { item }
            | Self::ItemNotAscii { item }
            | Self::MissingSprite { item, .. }
            | Self::ItemNameTooLong { item, .. } => Some(item),
            _ => None,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HitsUnreachable {
                required,
                available,
            } => write!(
                f,
                "n_hits_required {required} exceeds item count {available}"
            ),
            Self::NotSquare { n_items } => {
                write!(f, "item count {n_items} is not a perfect square")
            }
            Self::ItemContainsSpace { item } => write!(f, "item {item:?} contains a space"),
            Self::ItemNotAscii { item } => write!(f, "item {item:?} is not ASCII"),
            Self::MissingSprite { item, path } => {
                write!(f, "item {item:?} has no sprite at {}", path.display())
            }
            Self::TooManyBoards { n_boards, max } => {
                write!(f, "{n_boards} boards exceed the limit of {max}")
            }
            Self::TooManyItems { n_items, max } => {
                write!(f, "{n_items} items exceed the limit of {max}")
            }
            Self::ItemNameTooLong { item, max } => {
                write!(f, "item {item:?} does not fit in {max} bytes")
            }
            Self::RuleTooLong { len, max } => {
                write!(f, "rule of {len} bytes does not fit in {max} bytes")
            }
        }
    }
}

/// First rule violation found in a board list
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("board {board}: {violation} [{}]", .violation.invariant())]
pub struct ValidationError {
    /// 0-based position of the offending board
    pub board: usize,
    pub violation: Violation,
}

/// Check invariants 1-5 for every board.
pub fn validate(boards: &[Board], sprites: &impl SpriteStore) -> Result<(), ValidationError> {
    validate_with_limits(boards, sprites, &Limits::NONE)
}

/// Check invariants 1-5 and the given runtime limits for every board.
pub fn validate_with_limits(
    boards: &[Board],
    sprites: &impl SpriteStore,
    limits: &Limits,
) -> Result<(), ValidationError> {
    if let Some(max) = limits.max_boards {
        if boards.len() > max {
            return Err(ValidationError {
                board: max,
                violation: Violation::TooManyBoards {
                    n_boards: boards.len(),
                    max,
                },
            });
        }
    }

    for (index, board) in boards.iter().enumerate() {
        check_board(board, sprites, limits).map_err(|violation| ValidationError {
            board: index,
            violation,
        })?;

        if board.rule.bytes().any(is_framing_byte) {
            tracing::warn!(
                "Board {}: rule {:?} contains a framing byte; the runtime reader will misparse it",
                index,
                board.rule
            );
        }
    }

    tracing::debug!("Validated {} boards", boards.len());
    Ok(())
}

fn check_board(board: &Board, sprites: &impl SpriteStore, limits: &Limits) -> Result<(), Violation> {
    let n_items = board.n_items();

    // Negative requirements are trivially reachable
    if let Ok(required) = usize::try_from(board.n_hits_required) {
        if required > n_items {
            return Err(Violation::HitsUnreachable {
                required: board.n_hits_required,
                available: n_items,
            });
        }
    }

    if !is_perfect_square(n_items) {
        return Err(Violation::NotSquare { n_items });
    }

    for item in board.items() {
        if item.contains(' ') {
            return Err(Violation::ItemContainsSpace {
                item: item.to_string(),
            });
        }
        if !item.is_ascii() {
            return Err(Violation::ItemNotAscii {
                item: item.to_string(),
            });
        }
        if !sprites.has_sprite(item) {
            return Err(Violation::MissingSprite {
                item: item.to_string(),
                path: sprites.sprite_path(item),
            });
        }
    }

    check_limits(board, limits)
}

fn check_limits(board: &Board, limits: &Limits) -> Result<(), Violation> {
    if let Some(max) = limits.max_items {
        if board.n_items() > max {
            return Err(Violation::TooManyItems {
                n_items: board.n_items(),
                max,
            });
        }
    }

    if let Some(max) = limits.max_item_name_len {
        if let Some(item) = board.items().find(|item| item.len() >= max) {
            return Err(Violation::ItemNameTooLong {
                item: item.to_string(),
                max,
            });
        }
    }

    if let Some(max) = limits.max_rule_len {
        if board.rule.len() >= max {
            return Err(Violation::RuleTooLong {
                len: board.rule.len(),
                max,
            });
        }
    }

    Ok(())
}

fn is_perfect_square(n: usize) -> bool {
    let root = n.isqrt();
    root * root == n
}

fn is_framing_byte(byte: u8) -> bool {
    byte == STRING_TERMINATOR || (FILE_SEPARATOR..=FIELD_SEPARATOR).contains(&byte)
}
