//! Per-run generation state.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::artifact::{FileInfo, FileKind};
use crate::mapper::ReferenceScope;

/// A module written during the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedModule {
    /// The exported symbol.
    pub export_name: String,
    pub file: FileInfo,
    /// Absolute output path.
    pub path: PathBuf,
}

/// Mutable state of one generation run.
///
/// A session is created for each invocation and dropped at its end; nothing
/// carries over between runs.
#[derive(Debug, Default)]
pub struct GenerationSession {
    scope: ReferenceScope,
    schemas: Vec<GeneratedModule>,
    objects: Vec<GeneratedModule>,
    enums: Vec<GeneratedModule>,
    written: Vec<PathBuf>,
    claimed: HashSet<PathBuf>,
}

impl GenerationSession {
    /// Start a session with the set of emitted enums and objects.
    pub fn new(scope: ReferenceScope) -> Self {
        Self {
            scope,
            ..Default::default()
        }
    }

    /// Enums and objects that references may point at.
    pub fn scope(&self) -> &ReferenceScope {
        &self.scope
    }

    /// Reserve an output path. Returns false if another file already holds it.
    pub fn claim(&mut self, path: &Path) -> bool {
        self.claimed.insert(path.to_path_buf())
    }

    /// Record a written file.
    pub fn record_written(&mut self, path: PathBuf) {
        self.written.push(path);
    }

    /// Track a generated module for index assembly.
    pub fn register(&mut self, module: GeneratedModule) {
        match module.file.kind {
            FileKind::Schema => self.schemas.push(module),
            FileKind::Object => self.objects.push(module),
            FileKind::Enum => self.enums.push(module),
        }
    }

    /// Modules of one kind, in generation order.
    pub fn modules(&self, kind: FileKind) -> &[GeneratedModule] {
        match kind {
            FileKind::Schema => &self.schemas,
            FileKind::Object => &self.objects,
            FileKind::Enum => &self.enums,
        }
    }

    /// Schema and object modules owned by a model, schemas first.
    pub fn model_modules<'a>(&'a self, model: &'a str) -> impl Iterator<Item = &'a GeneratedModule> {
        self.schemas
            .iter()
            .chain(self.objects.iter())
            .filter(move |m| m.file.model.as_deref() == Some(model))
    }

    /// Every file written so far, in write order.
    pub fn written_files(&self) -> &[PathBuf] {
        &self.written
    }
}
