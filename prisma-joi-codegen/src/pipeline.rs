//! Orchestration of a generation run.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use prisma_joi_dmmf::{Catalog, GeneratorOptions, ensure_client_generator};
use tracing::{Instrument, debug, info, info_span, warn};

use crate::artifact::{ArtifactKind, FileKind};
use crate::config::{RawConfig, ValidatedConfig};
use crate::context::GenerationContext;
use crate::emitter::write_indexes;
use crate::error::{GenError, GenResult};
use crate::format::{SourceFormatter, TidyFormatter};
use crate::mapper::ReferenceScope;
use crate::paths::PathResolver;
use crate::registry::ArtifactRegistry;
use crate::session::GenerationSession;
use crate::writer::{FileWriter, FsWriter};

/// Host-supplied settings layered around the generator block.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Lowest-precedence configuration, e.g. from a config file.
    pub defaults: RawConfig,
    /// Highest-precedence configuration.
    pub overrides: RawConfig,
    /// Output directory, overriding the generator's.
    pub output: Option<PathBuf>,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub output_dir: PathBuf,
    /// Every written file, in write order.
    pub files: Vec<PathBuf>,
    pub schemas: usize,
    pub objects: usize,
    pub enums: usize,
    pub indexes: usize,
    /// Modules written per kind, in generation order.
    pub kinds: Vec<(ArtifactKind, usize)>,
    /// Lines across all written files. Unreadable files count as zero.
    pub total_lines: usize,
}

/// Merge configuration layers: `defaults` < generator block < `overrides`.
pub fn layered_config(options: &GeneratorOptions, run: &RunOptions) -> RawConfig {
    let mut raw = run.defaults.clone();
    for (key, value) in options
        .generator
        .config
        .iter()
        .chain(run.overrides.iter())
    {
        raw.insert(key.clone(), value.clone());
    }
    raw
}

/// Runs the generation pipeline.
pub struct Generator {
    writer: Arc<dyn FileWriter>,
    formatter: Arc<dyn SourceFormatter>,
    registry: ArtifactRegistry,
}

impl Default for Generator {
    fn default() -> Self {
        Self {
            writer: Arc::new(FsWriter),
            formatter: Arc::new(TidyFormatter),
            registry: ArtifactRegistry::with_builtins(),
        }
    }
}

impl Generator {
    /// A generator writing formatted output to disk.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_writer(mut self, writer: Arc<dyn FileWriter>) -> Self {
        self.writer = writer;
        self
    }

    pub fn with_formatter(mut self, formatter: Arc<dyn SourceFormatter>) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn with_registry(mut self, registry: ArtifactRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Validate configuration without generating anything.
    pub fn check(&self, options: &GeneratorOptions, run: &RunOptions) -> GenResult<ValidatedConfig> {
        ensure_client_generator(options)?;
        let config = ValidatedConfig::parse(&layered_config(options, run))?;
        self.registry.ensure_dependencies(&config)?;
        Ok(config)
    }

    /// Generate every enabled artifact.
    pub async fn run(
        &self,
        options: &GeneratorOptions,
        run: &RunOptions,
    ) -> GenResult<GenerationReport> {
        let config = self.check(options, run)?;

        let output_dir = run
            .output
            .clone()
            .or_else(|| options.generator.output_path().map(PathBuf::from))
            .or_else(|| config.output.clone())
            .ok_or(GenError::MissingOutput)?;

        let span = info_span!("prisma_joi", output = %output_dir.display());
        self.generate_into(options, &config, &output_dir)
            .instrument(span)
            .await
    }

    async fn generate_into(
        &self,
        options: &GeneratorOptions,
        config: &ValidatedConfig,
        output_dir: &Path,
    ) -> GenResult<GenerationReport> {
        let catalog = Catalog::ingest(&options.dmmf);
        let scope = reference_scope(&catalog, config);
        let resolver = PathResolver::new(output_dir, config);

        let display = |path: &Path| {
            path.strip_prefix(output_dir)
                .unwrap_or(path)
                .display()
                .to_string()
        };

        // Previous output is removed before anything is written.
        self.writer
            .clear_dir(resolver.base_dir())
            .await
            .map_err(|e| GenError::io(display(resolver.base_dir()), e))?;
        for dir in resolver.required_directories(config, catalog.model_names().map(|m| m.as_str())) {
            self.writer
                .create_dir_all(&dir)
                .await
                .map_err(|e| GenError::io(display(&dir), e))?;
        }

        let ctx = GenerationContext {
            catalog: &catalog,
            models: &catalog.models,
            config,
            resolver: &resolver,
            output_dir,
            writer: self.writer.as_ref(),
            formatter: self.formatter.as_ref(),
        };
        let mut session = GenerationSession::new(scope);

        let kinds = self.registry.execute(&ctx, &mut session).await?;
        let indexes = write_indexes(&ctx, &mut session).await?;

        let mut total_lines = 0;
        for path in session.written_files() {
            match self.writer.read_to_string(path).await {
                Ok(content) => total_lines += content.lines().count(),
                Err(e) => {
                    let shown = display(path);
                    warn!(path = %shown, error = %e, "could not count lines");
                }
            }
        }

        let report = GenerationReport {
            output_dir: output_dir.to_path_buf(),
            files: session.written_files().to_vec(),
            schemas: session.modules(FileKind::Schema).len(),
            objects: session.modules(FileKind::Object).len(),
            enums: session.modules(FileKind::Enum).len(),
            indexes: indexes.len(),
            kinds,
            total_lines,
        };

        info!(
            files = report.files.len(),
            schemas = report.schemas,
            objects = report.objects,
            enums = report.enums,
            lines = report.total_lines,
            "generation complete"
        );
        Ok(report)
    }
}

/// Enums and objects that will be emitted under `config`.
fn reference_scope(catalog: &Catalog, config: &ValidatedConfig) -> ReferenceScope {
    let enums = if config.is_enabled(ArtifactKind::Enums) {
        catalog.enum_names().cloned().collect()
    } else {
        Vec::new()
    };
    let objects: Vec<_> = catalog
        .objects
        .iter()
        .filter(|o| config.is_enabled(ArtifactKind::for_object(&o.name)))
        .map(|o| o.name.clone())
        .collect();

    debug!(enums = enums.len(), objects = objects.len(), "reference scope");
    ReferenceScope::new(enums, objects)
}

/// Generate into `output` with the default generator.
pub async fn generate(
    options: &GeneratorOptions,
    output: impl Into<PathBuf>,
) -> GenResult<GenerationReport> {
    let run = RunOptions {
        output: Some(output.into()),
        ..Default::default()
    };
    Generator::new().run(options, &run).await
}
