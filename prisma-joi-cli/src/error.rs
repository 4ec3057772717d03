//! CLI error types and result alias.

// The fields are read by the derive macros
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

use prisma_joi_codegen::{ConfigError, GenError};
use prisma_joi_dmmf::DmmfError;

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// IO error
    #[error("IO error: {0}")]
    #[diagnostic(code(prisma_joi::cli::io))]
    Io(#[from] std::io::Error),

    /// Configuration file or override error
    #[error("Configuration error: {0}")]
    #[diagnostic(code(prisma_joi::cli::config))]
    Config(String),

    /// Malformed `--set` argument
    #[error("invalid override `{0}`")]
    #[diagnostic(
        code(prisma_joi::cli::override_syntax),
        help("overrides are written as KEY=VALUE, e.g. --set directoryStrategy=flat")
    )]
    Override(String),

    /// Description could not be read
    #[error(transparent)]
    #[diagnostic(transparent)]
    Dmmf(#[from] DmmfError),

    /// Generator configuration is invalid
    #[error(transparent)]
    #[diagnostic(transparent)]
    Settings(#[from] ConfigError),

    /// Generation failed
    #[error(transparent)]
    #[diagnostic(transparent)]
    Generate(#[from] GenError),
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        CliError::Config(format!("Failed to parse TOML: {}", err))
    }
}
