use std::path::{Path, PathBuf};

use tracing::debug;

use crate::artifact::FileKind;
use crate::context::GenerationContext;
use crate::error::{GenError, GenResult};
use crate::paths::{IndexCategory, PathResolver};
use crate::session::{GeneratedModule, GenerationSession};

/// Write the index files re-exporting every module tracked in the session.
///
/// Only the session is consulted, never the file system. Each category gets
/// an index even when it has no modules. Per-model indexes are skipped for
/// models without modules.
pub async fn write_indexes(
    ctx: &GenerationContext<'_>,
    session: &mut GenerationSession,
) -> GenResult<Vec<PathBuf>> {
    let mut written = Vec::new();
    if !ctx.config.generate_index {
        return Ok(written);
    }

    for (category, kind) in [
        (IndexCategory::Schemas, FileKind::Schema),
        (IndexCategory::Objects, FileKind::Object),
        (IndexCategory::Enums, FileKind::Enum),
    ] {
        let path = ctx.resolver.resolve_index_path(category).file_path;
        let content = render_index(&path, session.modules(kind).iter());
        write_index(ctx, session, &path, &content).await?;
        written.push(path);
    }

    for model in ctx.catalog.models.iter() {
        let Some(index) = ctx.resolver.resolve_model_index_path(&model.name) else {
            break;
        };
        let mut modules = session.model_modules(&model.name).peekable();
        if modules.peek().is_none() {
            continue;
        }
        let content = render_index(&index.file_path, modules);
        write_index(ctx, session, &index.file_path, &content).await?;
        written.push(index.file_path);
    }

    for path in &written {
        session.record_written(path.clone());
    }
    debug!(count = written.len(), "wrote index files");
    Ok(written)
}

fn render_index<'a>(
    index: &Path,
    modules: impl Iterator<Item = &'a GeneratedModule>,
) -> String {
    modules
        .map(|m| format!("export * from '{}';\n", PathResolver::import_between(index, &m.path)))
        .collect()
}

async fn write_index(
    ctx: &GenerationContext<'_>,
    session: &mut GenerationSession,
    path: &Path,
    content: &str,
) -> GenResult<()> {
    if !session.claim(path) {
        return Err(GenError::DuplicateOutput {
            path: ctx.display_path(path),
        });
    }
    ctx.writer
        .write_file(path, content)
        .await
        .map_err(|e| GenError::io(ctx.display_path(path), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::FileInfo;
    use crate::config::{RawConfig, ValidatedConfig};
    use crate::format::PassThrough;
    use crate::writer::MemoryWriter;
    use prisma_joi_dmmf::{Catalog, ConfigValue, ModelDescription, ModelMapping};
    use pretty_assertions::assert_eq;

    fn catalog() -> Catalog {
        Catalog {
            models: ["User", "Post"]
                .into_iter()
                .map(|name| ModelDescription {
                    name: name.into(),
                    mapping: ModelMapping::all(name),
                })
                .collect(),
            ..Default::default()
        }
    }

    fn track(session: &mut GenerationSession, resolver: &PathResolver, file: FileInfo) {
        let path = resolver.resolve_path(&file).file_path;
        assert!(session.claim(&path));
        session.register(GeneratedModule {
            export_name: String::new(),
            path,
            file,
        });
    }

    fn blog_files() -> Vec<FileInfo> {
        vec![
            FileInfo::enumeration("SortOrder"),
            FileInfo::object("StringFilter", None),
            FileInfo::object("UserWhereInput", Some("User".into())),
            FileInfo::schema("findManyUser", Some("User".into())),
            FileInfo::schema("findManyPost", Some("Post".into())),
        ]
    }

    async fn write_with(
        pairs: &[(&str, &str)],
        files: Vec<FileInfo>,
    ) -> (MemoryWriter, GenResult<Vec<PathBuf>>) {
        let catalog = catalog();
        let raw: RawConfig = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), ConfigValue::from(*v)))
            .collect();
        let config = ValidatedConfig::parse(&raw).unwrap();
        let resolver = PathResolver::new("/out", &config);
        let writer = MemoryWriter::new();

        let mut session = GenerationSession::default();
        for file in files {
            track(&mut session, &resolver, file);
        }

        let ctx = GenerationContext {
            catalog: &catalog,
            models: &catalog.models,
            config: &config,
            resolver: &resolver,
            output_dir: Path::new("/out"),
            writer: &writer,
            formatter: &PassThrough,
        };
        let written = write_indexes(&ctx, &mut session).await;
        (writer, written)
    }

    async fn run(strategy: &str) -> (MemoryWriter, Vec<PathBuf>) {
        let (writer, written) = write_with(&[("directoryStrategy", strategy)], blog_files()).await;
        (writer, written.unwrap())
    }

    #[tokio::test]
    async fn test_grouped_indexes() {
        let (writer, written) = run("grouped").await;
        assert_eq!(written.len(), 3);
        assert_eq!(
            writer.get("/out/schemas/index.ts").unwrap(),
            "export * from './findManyUser.schema';\nexport * from './findManyPost.schema';\n"
        );
        assert_eq!(
            writer.get("/out/schemas/objects/index.ts").unwrap(),
            "export * from './StringFilter.schema';\nexport * from './UserWhereInput.schema';\n"
        );
        assert_eq!(
            writer.get("/out/schemas/enums/index.ts").unwrap(),
            "export * from './SortOrder.schema';\n"
        );
    }

    #[tokio::test]
    async fn test_flat_indexes() {
        let (writer, _) = run("flat").await;
        assert_eq!(
            writer.get("/out/schemas/objects.ts").unwrap(),
            "export * from './StringFilter.schema';\nexport * from './UserWhereInput.schema';\n"
        );
        assert!(writer.get("/out/schemas/enums.ts").is_some());
    }

    #[tokio::test]
    async fn test_by_model_indexes() {
        let (writer, written) = run("by-model").await;
        assert_eq!(written.len(), 5);
        assert_eq!(
            writer.get("/out/schemas/index.ts").unwrap(),
            "export * from './models/user/findManyUser.schema';\nexport * from './models/post/findManyPost.schema';\n"
        );
        assert_eq!(
            writer.get("/out/schemas/models/user/index.ts").unwrap(),
            "export * from './findManyUser.schema';\nexport * from './objects/UserWhereInput.schema';\n"
        );
        assert_eq!(
            writer.get("/out/schemas/objects/index.ts").unwrap(),
            "export * from './StringFilter.schema';\nexport * from '../models/user/objects/UserWhereInput.schema';\n"
        );
    }

    #[tokio::test]
    async fn test_empty_categories_get_empty_index() {
        let files = vec![FileInfo::schema("findManyUser", Some("User".into()))];
        let (writer, written) = write_with(&[], files).await;

        assert_eq!(written.unwrap().len(), 3);
        assert_eq!(writer.get("/out/schemas/enums/index.ts").unwrap(), "");
        assert_eq!(writer.get("/out/schemas/objects/index.ts").unwrap(), "");
        assert_eq!(
            writer.get("/out/schemas/index.ts").unwrap(),
            "export * from './findManyUser.schema';\n"
        );
    }

    #[tokio::test]
    async fn test_index_colliding_with_module_is_reported() {
        let files = vec![FileInfo::enumeration("enums")];
        let (writer, written) = write_with(
            &[("directoryStrategy", "flat"), ("enumFilePattern", "{name}")],
            files,
        )
        .await;

        match written {
            Err(GenError::DuplicateOutput { path }) => assert_eq!(path, "schemas/enums.ts"),
            other => panic!("Expected DuplicateOutput, got {other:?}"),
        }
        assert!(writer.get("/out/schemas/enums.ts").is_none());
    }
}
