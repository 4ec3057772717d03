//! Read-only generation context.

use std::path::Path;

use prisma_joi_dmmf::{Catalog, ModelDescription};
use smol_str::SmolStr;

use crate::artifact::FileInfo;
use crate::config::ValidatedConfig;
use crate::format::SourceFormatter;
use crate::paths::{PathResolver, extract_model_name};
use crate::writer::FileWriter;

/// Everything a generator reads during a run.
///
/// `models` is the slice the current step works on; batching narrows it
/// while the catalog stays complete.
#[derive(Clone, Copy)]
pub struct GenerationContext<'a> {
    pub catalog: &'a Catalog,
    pub models: &'a [ModelDescription],
    pub config: &'a ValidatedConfig,
    pub resolver: &'a PathResolver,
    pub output_dir: &'a Path,
    pub writer: &'a dyn FileWriter,
    pub formatter: &'a dyn SourceFormatter,
}

impl<'a> GenerationContext<'a> {
    /// A copy of the context restricted to `models`.
    pub fn for_models(&self, models: &'a [ModelDescription]) -> Self {
        Self { models, ..*self }
    }

    /// File identity of an object module, with its owning model when the
    /// name maps onto a known model.
    pub fn object_file_info(&self, name: &str) -> FileInfo {
        FileInfo::object(name, self.owning_model(name))
    }

    /// Path relative to the output directory, for messages.
    pub fn display_path(&self, path: &Path) -> String {
        path.strip_prefix(self.output_dir)
            .unwrap_or(path)
            .display()
            .to_string()
    }

    fn owning_model(&self, name: &str) -> Option<SmolStr> {
        let candidate = extract_model_name(name)?;
        self.catalog
            .model_names()
            .find(|model| model.as_str() == candidate)
            .cloned()
    }
}

impl std::fmt::Debug for GenerationContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationContext")
            .field("models", &self.models.len())
            .field("output_dir", &self.output_dir)
            .field("strategy", &self.config.directory_strategy)
            .finish_non_exhaustive()
    }
}
