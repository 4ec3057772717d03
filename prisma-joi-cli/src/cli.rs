//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// prisma-joi - Joi validation schemas from Prisma
#[derive(Parser, Debug)]
#[command(name = "prisma-joi")]
#[command(author = "Pegasus Heavy Industries LLC")]
#[command(version)]
#[command(about = "prisma-joi - Joi validation schemas from Prisma", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Print debug logs (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate Joi schemas from generator options
    Generate(GenerateArgs),

    /// Validate generator configuration without generating
    CheckConfig(CheckConfigArgs),

    /// Display version information
    Version,
}

// =============================================================================
// Shared configuration arguments
// =============================================================================

/// Configuration layered on top of the generator block
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Path to a prisma-joi.toml file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override a configuration key (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,
}

// =============================================================================
// Generate Command
// =============================================================================

/// Arguments for the `generate` command
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Path to the generator options JSON emitted by Prisma
    #[arg(short, long, env = "PRISMA_JOI_INPUT")]
    pub input: PathBuf,

    /// Output directory (overrides the generator output)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub config: ConfigArgs,

    /// Skip index files
    #[arg(long)]
    pub no_index: bool,

    /// Generate in memory and list the files without writing them
    #[arg(long)]
    pub dry_run: bool,
}

// =============================================================================
// Check Config Command
// =============================================================================

/// Arguments for the `check-config` command
#[derive(Args, Debug)]
pub struct CheckConfigArgs {
    /// Generator options JSON whose generator block is included
    #[arg(short, long, env = "PRISMA_JOI_INPUT")]
    pub input: Option<PathBuf>,

    #[command(flatten)]
    pub config: ConfigArgs,
}
