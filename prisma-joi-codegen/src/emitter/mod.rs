//! Module text generation.
//!
//! Each artifact is built into a [`Module`], then claimed, formatted, written
//! and registered in the session so the index files can re-export it.

mod enums;
mod index;
mod object;
mod operation;

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::artifact::FileInfo;
use crate::context::GenerationContext;
use crate::error::{GenError, GenResult};
use crate::session::{GeneratedModule, GenerationSession};

pub use enums::build_enum;
pub use index::write_indexes;
pub use object::build_object;
pub use operation::{OperationKey, build_operation, operation_keys};

/// Header shared by every module.
pub(crate) const JOI_IMPORT: &str = "import Joi from 'joi';";

/// Pipeline stage of one artifact, reported in errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactStage {
    Formatting,
    Writing,
    Registering,
}

impl std::fmt::Display for ArtifactStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Formatting => "formatting",
            Self::Writing => "writing",
            Self::Registering => "registering",
        })
    }
}

/// An assembled, not yet written module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    pub file: FileInfo,
    pub export_name: String,
    pub content: String,
}

/// Format, write and register a module.
pub async fn finish(
    ctx: &GenerationContext<'_>,
    session: &mut GenerationSession,
    module: Module,
) -> GenResult<PathBuf> {
    let path = ctx.resolver.resolve_path(&module.file).file_path;
    let name = module.file.name.to_string();

    if !session.claim(&path) {
        return Err(GenError::artifact(
            name,
            ArtifactStage::Registering,
            GenError::DuplicateOutput {
                path: ctx.display_path(&path),
            },
        ));
    }

    let content = match ctx.formatter.format(&module.content) {
        Ok(formatted) => formatted,
        Err(e) => {
            warn!(
                artifact = %name,
                stage = %ArtifactStage::Formatting,
                error = %e,
                "formatting failed, writing unformatted output"
            );
            module.content
        }
    };

    ctx.writer
        .write_file(&path, &content)
        .await
        .map_err(|e| {
            GenError::artifact(
                name.clone(),
                ArtifactStage::Writing,
                GenError::io(ctx.display_path(&path), e),
            )
        })?;
    session.record_written(path.clone());

    debug!(artifact = %name, path = %ctx.display_path(&path), "wrote module");

    session.register(GeneratedModule {
        export_name: module.export_name,
        file: module.file,
        path: path.clone(),
    });

    Ok(path)
}

/// Quote a string as a single-quoted TypeScript literal.
pub(crate) fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}
