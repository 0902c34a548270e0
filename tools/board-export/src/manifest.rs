//! boards.toml manifest parsing
//!
//! ```toml
//! [boards]
//! input = "tools/boards.json"
//! sprites = "resources/items/sprites"
//! output = "resources/boards"
//!
//! # Optional: capacity of the runtime loader
//! [limits]
//! max_boards = 16
//! max_items = 36
//! max_item_name_len = 32
//! max_rule_len = 128
//! ```
//!
//! Every key is optional. Paths are relative to the manifest's directory.

use anyhow::{Context, Result};
use board_common::{Limits, BOARD_PACK_FILE_NAME};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Manifest looked up in the working directory when none is given
pub const DEFAULT_MANIFEST: &str = "boards.toml";

/// boards.toml manifest structure
#[derive(Debug, Default, Deserialize)]
pub struct BoardsManifest {
    #[serde(default)]
    pub boards: BoardsSection,
    #[serde(default)]
    pub limits: LimitsSection,
}

/// Input, sprite and output locations
#[derive(Debug, Deserialize)]
pub struct BoardsSection {
    /// Board source descriptions (JSON)
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// Directory holding `<item>.png` sprites
    #[serde(default = "default_sprites")]
    pub sprites: PathBuf,

    /// Board pack to write
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

impl Default for BoardsSection {
    fn default() -> Self {
        Self {
            input: default_input(),
            sprites: default_sprites(),
            output: default_output(),
        }
    }
}

fn default_input() -> PathBuf {
    PathBuf::from("boards.json")
}

fn default_sprites() -> PathBuf {
    Path::new("resources").join("items").join("sprites")
}

fn default_output() -> PathBuf {
    Path::new("resources").join(BOARD_PACK_FILE_NAME)
}

/// Runtime loader capacity. Omitted keys are not checked.
#[derive(Debug, Default, Deserialize)]
pub struct LimitsSection {
    pub max_boards: Option<usize>,
    pub max_items: Option<usize>,
    pub max_item_name_len: Option<usize>,
    pub max_rule_len: Option<usize>,
}

impl LimitsSection {
    pub fn to_limits(&self) -> Limits {
        Limits {
            max_boards: self.max_boards,
            max_items: self.max_items,
            max_item_name_len: self.max_item_name_len,
            max_rule_len: self.max_rule_len,
        }
    }
}

impl BoardsManifest {
    /// Load manifest from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse manifest from string
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse boards.toml")
    }

    /// Validate manifest fields
    pub fn validate(&self) -> Result<()> {
        let limits = [
            ("max_boards", self.limits.max_boards),
            ("max_items", self.limits.max_items),
            ("max_item_name_len", self.limits.max_item_name_len),
            ("max_rule_len", self.limits.max_rule_len),
        ];
        for (name, value) in limits {
            if value == Some(0) {
                anyhow::bail!("Invalid {} 0 in boards.toml (must be at least 1)", name);
            }
        }

        if self.boards.input.as_os_str().is_empty() {
            anyhow::bail!("Empty boards.input in boards.toml");
        }
        if self.boards.output.as_os_str().is_empty() {
            anyhow::bail!("Empty boards.output in boards.toml");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_empty() {
        let manifest = BoardsManifest::parse("").unwrap();

        assert_eq!(manifest.boards.input, PathBuf::from("boards.json"));
        assert_eq!(
            manifest.boards.sprites,
            Path::new("resources").join("items").join("sprites")
        );
        assert_eq!(manifest.boards.output, Path::new("resources").join("boards"));
        assert_eq!(manifest.limits.to_limits(), Limits::NONE);
        assert!(manifest.validate().is_ok());
    }

    #[test]
    fn test_manifest_paths() {
        let manifest = BoardsManifest::parse(
            r#"
[boards]
input = "tools/boards.json"
sprites = "art/sprites"
output = "build/boards.bin"
"#,
        )
        .unwrap();

        assert_eq!(manifest.boards.input, PathBuf::from("tools/boards.json"));
        assert_eq!(manifest.boards.sprites, PathBuf::from("art/sprites"));
        assert_eq!(manifest.boards.output, PathBuf::from("build/boards.bin"));
    }

    #[test]
    fn test_manifest_partial_boards_section() {
        let manifest = BoardsManifest::parse(
            r#"
[boards]
input = "levels.json"
"#,
        )
        .unwrap();

        assert_eq!(manifest.boards.input, PathBuf::from("levels.json"));
        assert_eq!(manifest.boards.output, Path::new("resources").join("boards"));
    }

    #[test]
    fn test_manifest_limits() {
        let manifest = BoardsManifest::parse(
            r#"
[limits]
max_boards = 16
max_items = 36
max_item_name_len = 32
"#,
        )
        .unwrap();

        assert_eq!(
            manifest.limits.to_limits(),
            Limits {
                max_boards: Some(16),
                max_items: Some(36),
                max_item_name_len: Some(32),
                max_rule_len: None,
            }
        );
        assert!(manifest.validate().is_ok());
    }

    #[test]
    fn test_manifest_zero_limit_invalid() {
        let manifest = BoardsManifest::parse(
            r#"
[limits]
max_items = 0
"#,
        )
        .unwrap();

        let err = manifest.validate().unwrap_err();
        assert!(err.to_string().contains("max_items"));
    }

    #[test]
    fn test_manifest_empty_output_invalid() {
        let manifest = BoardsManifest::parse(
            r#"
[boards]
output = ""
"#,
        )
        .unwrap();

        assert!(manifest.validate().is_err());
    }

    #[test]
    fn test_manifest_mistyped_limit() {
        assert!(BoardsManifest::parse("[limits]\nmax_items = \"many\"\n").is_err());
    }
}
