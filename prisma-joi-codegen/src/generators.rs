//! Built-in artifact generators.

use async_trait::async_trait;
use tracing::debug;

use crate::artifact::ArtifactKind;
use crate::context::GenerationContext;
use crate::emitter::{build_enum, build_object, build_operation, finish};
use crate::error::GenResult;
use crate::registry::ArtifactGenerator;
use crate::session::GenerationSession;

/// Emits one module per enum.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnumsGenerator;

#[async_trait]
impl ArtifactGenerator for EnumsGenerator {
    async fn generate(
        &self,
        ctx: &GenerationContext<'_>,
        session: &mut GenerationSession,
    ) -> GenResult<usize> {
        for desc in &ctx.catalog.enums {
            finish(ctx, session, build_enum(desc)).await?;
        }
        Ok(ctx.catalog.enums.len())
    }
}

/// Emits the object modules classified under one kind.
#[derive(Debug, Clone, Copy)]
pub struct ObjectsGenerator {
    kind: ArtifactKind,
}

impl ObjectsGenerator {
    pub fn new(kind: ArtifactKind) -> Self {
        Self { kind }
    }
}

#[async_trait]
impl ArtifactGenerator for ObjectsGenerator {
    async fn generate(
        &self,
        ctx: &GenerationContext<'_>,
        session: &mut GenerationSession,
    ) -> GenResult<usize> {
        let mut count = 0;
        for desc in ctx
            .catalog
            .objects
            .iter()
            .filter(|o| ArtifactKind::for_object(&o.name) == self.kind)
        {
            let module = build_object(ctx, session.scope(), desc);
            finish(ctx, session, module).await?;
            count += 1;
        }
        Ok(count)
    }
}

/// Emits the operation schemas of one kind for every model in the context.
#[derive(Debug, Clone, Copy)]
pub struct OperationsGenerator {
    kind: ArtifactKind,
}

impl OperationsGenerator {
    pub fn new(kind: ArtifactKind) -> Self {
        Self { kind }
    }
}

#[async_trait]
impl ArtifactGenerator for OperationsGenerator {
    async fn generate(
        &self,
        ctx: &GenerationContext<'_>,
        session: &mut GenerationSession,
    ) -> GenResult<usize> {
        let mut count = 0;
        for model in ctx.models {
            for (op, name) in model
                .operations()
                .filter(|(op, _)| ArtifactKind::for_operation(*op) == self.kind)
            {
                let module = build_operation(ctx, session.scope(), model, op, name);
                finish(ctx, session, module).await?;
                count += 1;
            }
            debug!(model = %model.name, kind = %self.kind, "model done");
        }
        Ok(count)
    }
}
