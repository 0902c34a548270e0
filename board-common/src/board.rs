//! Board records and their JSON source descriptions
//!
//! A board source file is a JSON array of objects:
//!
//! ```json
//! [
//!   {
//!     "n_misses_allowed": 3,
//!     "n_hits_required": 2,
//!     "correct_items": ["cat", "dog"],
//!     "wrong_items": ["car", "dot"],
//!     "rule": "animals"
//!   }
//! ]
//! ```
//!
//! Loading only checks the shape of each description. Business rules live in
//! [`crate::validate`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One puzzle configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Board {
    /// Wrong picks tolerated before the board is lost
    pub n_misses_allowed: i32,
    /// Correct picks needed to win
    pub n_hits_required: i32,
    /// Items satisfying the rule
    pub correct_items: Vec<String>,
    /// Distractors
    pub wrong_items: Vec<String>,
    /// Rule text shown to the player
    pub rule: String,
}

impl Board {
    /// All items, correct ones first.
    pub fn items(&self) -> impl Iterator<Item = &str> {
        self.correct_items
            .iter()
            .chain(self.wrong_items.iter())
            .map(String::as_str)
    }

    pub fn n_items(&self) -> usize {
        self.correct_items.len() + self.wrong_items.len()
    }

    pub fn n_correct_items(&self) -> usize {
        self.correct_items.len()
    }
}

/// Board source does not have the expected shape.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// Failed to read the source file
    #[error("failed to read board source {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source is not a JSON array of objects
    #[error("board source is not a JSON array: {0}")]
    Document(#[source] serde_json::Error),

    /// A description has a missing, mistyped or unknown field
    #[error("board {board}: {source}")]
    Board {
        board: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Parse board descriptions, preserving declaration order.
pub fn load(source: &str) -> Result<Vec<Board>, FormatError> {
    let raw: Vec<serde_json::Value> =
        serde_json::from_str(source).map_err(FormatError::Document)?;

    raw.into_iter()
        .enumerate()
        .map(|(board, value)| {
            serde_json::from_value(value).map_err(|source| FormatError::Board { board, source })
        })
        .collect()
}

/// Read and parse a board source file.
pub fn load_file(path: &Path) -> Result<Vec<Board>, FormatError> {
    let content = std::fs::read_to_string(path).map_err(|source| FormatError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let boards = load(&content)?;
    tracing::debug!("Loaded {} boards from {}", boards.len(), path.display());
    Ok(boards)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANIMALS: &str = r#"
[
  {
    "n_misses_allowed": 3,
    "n_hits_required": 2,
    "correct_items": ["cat", "dog"],
    "wrong_items": ["car", "dot"],
    "rule": "animals"
  }
]
"#;

    #[test]
    fn test_load_single_board() {
        let boards = load(ANIMALS).unwrap();
        assert_eq!(boards.len(), 1);

        let board = &boards[0];
        assert_eq!(board.n_misses_allowed, 3);
        assert_eq!(board.n_hits_required, 2);
        assert_eq!(board.correct_items, vec!["cat", "dog"]);
        assert_eq!(board.wrong_items, vec!["car", "dot"]);
        assert_eq!(board.rule, "animals");
    }

    #[test]
    fn test_items_correct_first() {
        let boards = load(ANIMALS).unwrap();
        let items: Vec<&str> = boards[0].items().collect();
        assert_eq!(items, vec!["cat", "dog", "car", "dot"]);
        assert_eq!(boards[0].n_items(), 4);
        assert_eq!(boards[0].n_correct_items(), 2);
    }

    #[test]
    fn test_load_preserves_order() {
        let source = r#"[
            {"n_misses_allowed": 0, "n_hits_required": 1, "correct_items": ["a"], "wrong_items": [], "rule": "first"},
            {"n_misses_allowed": 1, "n_hits_required": 1, "correct_items": ["b"], "wrong_items": [], "rule": "second"},
            {"n_misses_allowed": 2, "n_hits_required": 1, "correct_items": ["c"], "wrong_items": [], "rule": "third"}
        ]"#;
        let boards = load(source).unwrap();
        let rules: Vec<&str> = boards.iter().map(|b| b.rule.as_str()).collect();
        assert_eq!(rules, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_load_empty_list() {
        assert!(load("[]").unwrap().is_empty());
    }

    #[test]
    fn test_missing_field_names_board() {
        let source = r#"[
            {"n_misses_allowed": 0, "n_hits_required": 1, "correct_items": ["a"], "wrong_items": [], "rule": "ok"},
            {"n_misses_allowed": 0, "n_hits_required": 1, "correct_items": ["a"], "wrong_items": []}
        ]"#;
        let err = load(source).unwrap_err();
        assert!(matches!(err, FormatError::Board { board: 1, .. }));
        assert!(err.to_string().contains("rule"));
    }

    #[test]
    fn test_mistyped_field() {
        let source = r#"[
            {"n_misses_allowed": "three", "n_hits_required": 1, "correct_items": ["a"], "wrong_items": [], "rule": "r"}
        ]"#;
        assert!(matches!(
            load(source),
            Err(FormatError::Board { board: 0, .. })
        ));
    }

    #[test]
    fn test_out_of_range_integer() {
        let source = r#"[
            {"n_misses_allowed": 4294967296, "n_hits_required": 1, "correct_items": ["a"], "wrong_items": [], "rule": "r"}
        ]"#;
        assert!(matches!(
            load(source),
            Err(FormatError::Board { board: 0, .. })
        ));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let source = r#"[
            {"n_misses_allowed": 0, "n_hits_required": 1, "correct_items": ["a"], "wrong_items": [], "rule": "r", "bonus": 1}
        ]"#;
        assert!(matches!(
            load(source),
            Err(FormatError::Board { board: 0, .. })
        ));
    }

    #[test]
    fn test_not_an_array() {
        assert!(matches!(
            load(r#"{"boards": []}"#),
            Err(FormatError::Document(_))
        ));
        assert!(matches!(load("not json"), Err(FormatError::Document(_))));
    }

    #[test]
    fn test_load_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_file(&dir.path().join("boards.json"));
        assert!(matches!(result, Err(FormatError::Io { .. })));
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("boards.json");
        std::fs::write(&path, ANIMALS).unwrap();

        let boards = load_file(&path).unwrap();
        assert_eq!(boards.len(), 1);
        assert_eq!(boards[0].rule, "animals");
    }
}
