//! Board export pipeline
//!
//! read source -> load -> validate -> encode -> write.
//! Nothing is written unless every board is valid and the whole pack encoded.

use anyhow::{Context, Result};
use board_common::{encode_board_pack, load_file, validate_with_limits, Board, Limits, SpriteDir};
use std::path::{Path, PathBuf};

use crate::manifest::{BoardsManifest, DEFAULT_MANIFEST};

/// Resolved locations and limits for one export run
#[derive(Debug, Clone)]
pub struct ExportContext {
    pub input: PathBuf,
    pub sprites: PathBuf,
    pub output: PathBuf,
    pub limits: Limits,
}

/// Result of a successful build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub output: PathBuf,
    pub n_boards: usize,
    pub n_bytes: usize,
}

impl ExportContext {
    /// Resolve manifest paths against the directory holding the manifest
    pub fn from_manifest(manifest: &BoardsManifest, project_dir: &Path) -> Self {
        Self {
            input: project_dir.join(&manifest.boards.input),
            sprites: project_dir.join(&manifest.boards.sprites),
            output: project_dir.join(&manifest.boards.output),
            limits: manifest.limits.to_limits(),
        }
    }

    /// Load the context from a manifest.
    ///
    /// An explicit manifest must exist. Without one, `boards.toml` in the
    /// working directory is used if present, defaults otherwise.
    pub fn load(manifest_path: Option<&Path>) -> Result<Self> {
        let manifest_path = match manifest_path {
            Some(path) => path.to_path_buf(),
            None => {
                let path = PathBuf::from(DEFAULT_MANIFEST);
                if !path.is_file() {
                    tracing::debug!("No {} found, using defaults", DEFAULT_MANIFEST);
                    return Ok(Self::from_manifest(&BoardsManifest::default(), Path::new(".")));
                }
                path
            }
        };

        let manifest = BoardsManifest::load(&manifest_path)?;
        manifest.validate()?;

        let project_dir = manifest_path.parent().unwrap_or_else(|| Path::new("."));
        Ok(Self::from_manifest(&manifest, project_dir))
    }
}

/// Load and validate every board without writing anything
pub fn check(ctx: &ExportContext) -> Result<Vec<Board>> {
    let boards = load_file(&ctx.input)
        .with_context(|| format!("Failed to load boards: {}", ctx.input.display()))?;
    tracing::info!("Loaded {} boards from {}", boards.len(), ctx.input.display());

    let sprites = SpriteDir::new(&ctx.sprites);
    validate_with_limits(&boards, &sprites, &ctx.limits).context("Board validation failed")?;

    Ok(boards)
}

/// Validate every board, then write the board pack
pub fn build(ctx: &ExportContext) -> Result<ExportSummary> {
    let boards = check(ctx)?;

    let bytes = encode_board_pack(&boards).context("Failed to encode board pack")?;

    if let Some(parent) = ctx.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    std::fs::write(&ctx.output, &bytes)
        .with_context(|| format!("Failed to write board pack: {}", ctx.output.display()))?;

    tracing::info!(
        "Wrote {} boards to {} ({} bytes)",
        boards.len(),
        ctx.output.display(),
        bytes.len()
    );

    Ok(ExportSummary {
        output: ctx.output.clone(),
        n_boards: boards.len(),
        n_bytes: bytes.len(),
    })
}
