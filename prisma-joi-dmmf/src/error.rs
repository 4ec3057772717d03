//! Error types for reading a DMMF description.

// The fields are read by the derive macros
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

/// Result type for description operations.
pub type DmmfResult<T> = Result<T, DmmfError>;

/// Errors that can occur while reading or checking a description.
#[derive(Error, Debug, Diagnostic)]
pub enum DmmfError {
    /// Error reading a file.
    #[error("failed to read description file: {path}")]
    #[diagnostic(code(prisma_joi::dmmf::io_error))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON or has the wrong shape.
    #[error("failed to parse description: {message}")]
    #[diagnostic(code(prisma_joi::dmmf::json_error))]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// No compatible Prisma client generator was configured upstream.
    #[error("no compatible Prisma client generator found (looked for {expected})")]
    #[diagnostic(
        code(prisma_joi::dmmf::missing_client_generator),
        help(
            "add a client generator to your Prisma schema, e.g.\n\n  generator client {{\n    provider = \"prisma-client-js\"\n  }}"
        )
    )]
    MissingClientGenerator { expected: String },
}

impl DmmfError {
    /// Create a JSON error with context.
    pub fn json(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            message: message.into(),
            source,
        }
    }
}
