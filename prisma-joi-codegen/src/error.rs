//! Error types for code generation.

// These warnings are false positives - the fields are used by derive macros
#![allow(unused_assignments)]

use std::io::ErrorKind;

use miette::Diagnostic;
use prisma_joi_dmmf::DmmfError;
use thiserror::Error;

use crate::config::ConfigError;
use crate::emitter::ArtifactStage;

/// Result type for generation operations.
pub type GenResult<T> = Result<T, GenError>;

/// Errors that can occur during a generation run.
#[derive(Error, Debug, Diagnostic)]
pub enum GenError {
    /// Invalid generator configuration.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    /// The description could not be read or failed a precondition.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Dmmf(#[from] DmmfError),

    /// Enabled kinds depend on disabled kinds.
    #[error("unmet artifact dependencies:\n  {}", .errors.join("\n  "))]
    #[diagnostic(
        code(prisma_joi::codegen::unmet_dependency),
        help("enable the missing kinds or disable the kinds that need them")
    )]
    Dependency { errors: Vec<String> },

    /// The kind dependency graph contains a cycle.
    #[error("circular artifact dependency: {}", .path.join(" -> "))]
    #[diagnostic(code(prisma_joi::codegen::dependency_cycle))]
    DependencyCycle { path: Vec<String> },

    /// File-system failure.
    #[error("failed to write `{path}`: {cause}")]
    #[diagnostic(code(prisma_joi::codegen::io_error))]
    Io {
        path: String,
        cause: String,
        #[source]
        source: std::io::Error,
    },

    /// A single artifact failed at a given stage.
    #[error("failed to generate `{name}` while {stage}")]
    #[diagnostic(code(prisma_joi::codegen::artifact_error))]
    Artifact {
        name: String,
        stage: ArtifactStage,
        #[source]
        source: Box<GenError>,
    },

    /// Two artifacts resolved to the same file.
    #[error("more than one artifact resolves to `{path}`")]
    #[diagnostic(
        code(prisma_joi::codegen::duplicate_output),
        help("include `{{name}}` or `{{operation}}` in the file naming patterns")
    )]
    DuplicateOutput { path: String },

    /// No output directory was configured anywhere.
    #[error("no output directory configured")]
    #[diagnostic(
        code(prisma_joi::codegen::missing_output),
        help("set `output` in the generator block, the `output` config key, or pass --output")
    )]
    MissingOutput,
}

impl GenError {
    /// Create an I/O error with a human-readable cause.
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            cause: describe_io_error(&source),
            source,
        }
    }

    /// Wrap an error with the artifact and stage it happened in.
    pub fn artifact(name: impl Into<String>, stage: ArtifactStage, source: GenError) -> Self {
        Self::Artifact {
            name: name.into(),
            stage,
            source: Box::new(source),
        }
    }
}

fn describe_io_error(err: &std::io::Error) -> String {
    match err.kind() {
        ErrorKind::PermissionDenied => "permission denied".to_string(),
        ErrorKind::NotFound => "no such file or directory".to_string(),
        _ => match err.raw_os_error() {
            Some(28) => "out of space".to_string(),
            Some(24) => "too many open files".to_string(),
            _ => err.to_string(),
        },
    }
}
