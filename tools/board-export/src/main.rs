//! board-export - board asset export tool
//!
//! Validates board definitions (JSON) and packs them into the binary board
//! pack read by the game at startup.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use board_export::{export, ExportContext};

#[derive(Parser)]
#[command(name = "board-export")]
#[command(about = "Board asset export tool")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate boards and write the board pack
    Build {
        #[command(flatten)]
        paths: PathArgs,

        /// Board pack to write (overrides manifest)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate boards without writing anything
    Check {
        #[command(flatten)]
        paths: PathArgs,
    },
}

#[derive(Args)]
struct PathArgs {
    /// Path to boards.toml manifest (default: ./boards.toml if present)
    #[arg(short, long)]
    manifest: Option<PathBuf>,

    /// Board source JSON (overrides manifest)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Sprite directory (overrides manifest)
    #[arg(short, long)]
    sprites: Option<PathBuf>,
}

impl PathArgs {
    fn resolve(self) -> Result<ExportContext> {
        let mut ctx = ExportContext::load(self.manifest.as_deref())?;
        if let Some(input) = self.input {
            ctx.input = input;
        }
        if let Some(sprites) = self.sprites {
            ctx.sprites = sprites;
        }
        Ok(ctx)
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build { paths, output } => {
            let mut ctx = paths.resolve()?;
            if let Some(output) = output {
                ctx.output = output;
            }
            tracing::info!("Building {:?} -> {:?}", ctx.input, ctx.output);
            export::build(&ctx)?;
            tracing::info!("Done!");
        }

        Commands::Check { paths } => {
            let ctx = paths.resolve()?;
            tracing::info!("Checking {:?}", ctx.input);
            let boards = export::check(&ctx)?;
            tracing::info!("All {} boards are valid!", boards.len());
        }
    }

    Ok(())
}
