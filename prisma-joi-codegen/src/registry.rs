//! Artifact kind registry.
//!
//! Every artifact kind is registered with a priority, the kinds it depends
//! on and the generator that emits it. The registry derives a
//! dependency-respecting order and runs the enabled kinds in it.
//!
//! ```rust,ignore
//! use prisma_joi_codegen::registry::ArtifactRegistry;
//!
//! let registry = ArtifactRegistry::with_builtins();
//! registry.ensure_dependencies(&config)?;
//! registry.execute(&ctx, &mut session).await?;
//! ```

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::{Instrument, debug, info, info_span};

use crate::artifact::ArtifactKind;
use crate::config::ValidatedConfig;
use crate::context::GenerationContext;
use crate::error::{GenError, GenResult};
use crate::generators::{EnumsGenerator, ObjectsGenerator, OperationsGenerator};
use crate::session::GenerationSession;

/// Per-model kinds with more models than this run in batches.
pub const BATCH_THRESHOLD: usize = 50;

/// Models per batch.
pub const BATCH_SIZE: usize = 10;

/// Emits the artifacts of one kind.
#[async_trait]
pub trait ArtifactGenerator: Send + Sync {
    /// Generate every artifact of the kind for the models in `ctx`.
    ///
    /// Returns the number of modules written.
    async fn generate(
        &self,
        ctx: &GenerationContext<'_>,
        session: &mut GenerationSession,
    ) -> GenResult<usize>;
}

/// Static facts about a registered kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactMetadata {
    /// Lower runs first among kinds without a dependency between them.
    pub priority: u32,
    pub dependencies: Vec<ArtifactKind>,
    /// Whether the generator iterates models and may be batched.
    pub per_model: bool,
    pub description: &'static str,
}

impl ArtifactMetadata {
    pub fn new(priority: u32, dependencies: &[ArtifactKind]) -> Self {
        Self {
            priority,
            dependencies: dependencies.to_vec(),
            per_model: false,
            description: "",
        }
    }

    pub fn per_model(mut self) -> Self {
        self.per_model = true;
        self
    }

    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }
}

struct Registration {
    kind: ArtifactKind,
    metadata: ArtifactMetadata,
    generator: Box<dyn ArtifactGenerator>,
}

/// Registry of artifact kinds.
#[derive(Default)]
pub struct ArtifactRegistry {
    entries: Vec<Registration>,
}

impl ArtifactRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the twelve built-in kinds.
    pub fn with_builtins() -> Self {
        use ArtifactKind::*;

        let mut registry = Self::new();
        registry.register(
            Enums,
            ArtifactMetadata::new(0, &[]).describe("enum validators"),
            Box::new(EnumsGenerator),
        );
        registry.register(
            Objects,
            ArtifactMetadata::new(10, &[Enums]).describe("input object validators"),
            Box::new(ObjectsGenerator::new(Objects)),
        );
        registry.register(
            Filter,
            ArtifactMetadata::new(20, &[Enums]).describe("where and filter inputs"),
            Box::new(ObjectsGenerator::new(Filter)),
        );
        registry.register(
            OrderBy,
            ArtifactMetadata::new(20, &[Enums]).describe("ordering inputs"),
            Box::new(ObjectsGenerator::new(OrderBy)),
        );
        registry.register(
            Unchecked,
            ArtifactMetadata::new(30, &[Objects]).describe("unchecked create and update inputs"),
            Box::new(ObjectsGenerator::new(Unchecked)),
        );

        let operations: [(ArtifactKind, u32, &[ArtifactKind], &'static str); 7] = [
            (Find, 40, &[Filter], "findUnique, findFirst and findMany"),
            (Create, 40, &[Objects], "createOne and createMany"),
            (Update, 40, &[Objects, Filter], "updateOne and updateMany"),
            (Upsert, 40, &[Objects, Filter], "upsertOne"),
            (Delete, 40, &[Filter], "deleteOne and deleteMany"),
            (Aggregate, 50, &[Filter], "aggregate"),
            (GroupBy, 50, &[Filter, Enums], "groupBy"),
        ];
        for (kind, priority, deps, description) in operations {
            registry.register(
                kind,
                ArtifactMetadata::new(priority, deps)
                    .per_model()
                    .describe(description),
                Box::new(OperationsGenerator::new(kind)),
            );
        }

        registry
    }

    /// Register a kind. A second registration of the same kind replaces the first.
    pub fn register(
        &mut self,
        kind: ArtifactKind,
        metadata: ArtifactMetadata,
        generator: Box<dyn ArtifactGenerator>,
    ) {
        let registration = Registration {
            kind,
            metadata,
            generator,
        };
        match self.entries.iter_mut().find(|e| e.kind == kind) {
            Some(existing) => *existing = registration,
            None => self.entries.push(registration),
        }
    }

    /// Metadata of a registered kind.
    pub fn metadata(&self, kind: ArtifactKind) -> Option<&ArtifactMetadata> {
        self.entries
            .iter()
            .find(|e| e.kind == kind)
            .map(|e| &e.metadata)
    }

    /// Registered kinds in registration order.
    pub fn kinds(&self) -> impl Iterator<Item = ArtifactKind> + '_ {
        self.entries.iter().map(|e| e.kind)
    }

    /// Every unmet dependency of an enabled kind.
    pub fn validate_dependencies(&self, config: &ValidatedConfig) -> Vec<String> {
        let mut errors = Vec::new();
        for entry in self.entries.iter().filter(|e| config.is_enabled(e.kind)) {
            for dep in &entry.metadata.dependencies {
                if self.metadata(*dep).is_none() {
                    errors.push(format!("`{}` requires `{dep}`, which is not registered", entry.kind));
                } else if !config.is_enabled(*dep) {
                    errors.push(format!("`{}` requires `{dep}`, which is disabled", entry.kind));
                }
            }
        }
        errors
    }

    /// Fail if any enabled kind has an unmet dependency.
    pub fn ensure_dependencies(&self, config: &ValidatedConfig) -> GenResult<()> {
        let errors = self.validate_dependencies(config);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(GenError::Dependency { errors })
        }
    }

    /// Topological order of every registered kind.
    ///
    /// Depth-first, seeded by priority with ties broken by registration order.
    pub fn generation_order(&self) -> GenResult<Vec<ArtifactKind>> {
        let mut seeds: Vec<(usize, &Registration)> = self.entries.iter().enumerate().collect();
        seeds.sort_by_key(|(idx, e)| (e.metadata.priority, *idx));

        let mut marks: HashMap<ArtifactKind, Mark> = HashMap::new();
        let mut stack = Vec::new();
        let mut order = Vec::with_capacity(self.entries.len());

        for (_, entry) in seeds {
            self.visit(entry.kind, &mut marks, &mut stack, &mut order)?;
        }
        Ok(order)
    }

    fn visit(
        &self,
        kind: ArtifactKind,
        marks: &mut HashMap<ArtifactKind, Mark>,
        stack: &mut Vec<ArtifactKind>,
        order: &mut Vec<ArtifactKind>,
    ) -> GenResult<()> {
        match marks.get(&kind) {
            Some(Mark::Done) => return Ok(()),
            Some(Mark::Visiting) => {
                let start = stack.iter().position(|k| *k == kind).unwrap_or(0);
                let mut path: Vec<String> = stack[start..].iter().map(|k| k.to_string()).collect();
                path.push(kind.to_string());
                return Err(GenError::DependencyCycle { path });
            }
            None => {}
        }

        // Unregistered dependencies are reported by `validate_dependencies`.
        let Some(metadata) = self.metadata(kind) else {
            return Ok(());
        };

        marks.insert(kind, Mark::Visiting);
        stack.push(kind);
        for dep in &metadata.dependencies {
            self.visit(*dep, marks, stack, order)?;
        }
        stack.pop();
        marks.insert(kind, Mark::Done);
        order.push(kind);
        Ok(())
    }

    /// Run every enabled kind in generation order.
    ///
    /// Returns the number of modules written per kind.
    pub async fn execute(
        &self,
        ctx: &GenerationContext<'_>,
        session: &mut GenerationSession,
    ) -> GenResult<Vec<(ArtifactKind, usize)>> {
        let order = self.generation_order()?;
        let mut summary = Vec::new();

        for kind in order.into_iter().filter(|k| ctx.config.is_enabled(*k)) {
            let Some(entry) = self.entries.iter().find(|e| e.kind == kind) else {
                continue;
            };
            let span = info_span!("generate", kind = %kind);

            let count = if entry.metadata.per_model && ctx.models.len() > BATCH_THRESHOLD {
                let mut count = 0;
                for (batch, models) in ctx.models.chunks(BATCH_SIZE).enumerate() {
                    debug!(kind = %kind, batch, models = models.len(), "running batch");
                    count += entry
                        .generator
                        .generate(&ctx.for_models(models), session)
                        .instrument(span.clone())
                        .await?;
                }
                count
            } else {
                entry
                    .generator
                    .generate(ctx, session)
                    .instrument(span.clone())
                    .await?
            };

            info!(kind = %kind, modules = count, "generated");
            summary.push((kind, count));
        }

        Ok(summary)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}
