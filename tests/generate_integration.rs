//! End-to-end generation tests over a two-model blog description.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use pretty_assertions::assert_eq;
use prisma_joi::codegen::{
    ArtifactKind, ArtifactRegistry, GenError, Generator, MemoryWriter, RunOptions,
    ValidatedConfig,
};
use prisma_joi::dmmf::{ConfigValue, GeneratorOptions, load_options};
use prisma_joi::generate;
use tempfile::TempDir;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/blog.json");

fn blog() -> GeneratorOptions {
    load_options(FIXTURE).expect("fixture should load")
}

fn run_options(pairs: &[(&str, &str)]) -> RunOptions {
    RunOptions {
        overrides: pairs
            .iter()
            .map(|(k, v)| (k.to_string(), ConfigValue::from(*v)))
            .collect(),
        output: Some(PathBuf::from("/out")),
        ..Default::default()
    }
}

async fn in_memory(pairs: &[(&str, &str)]) -> Arc<MemoryWriter> {
    let writer = Arc::new(MemoryWriter::new());
    Generator::new()
        .with_writer(writer.clone())
        .run(&blog(), &run_options(pairs))
        .await
        .expect("generation should succeed");
    writer
}

fn read_tree(root: &Path) -> BTreeMap<PathBuf, String> {
    let mut files = BTreeMap::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in std::fs::read_dir(&dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                pending.push(path);
            } else {
                let content = std::fs::read_to_string(&path).unwrap();
                files.insert(path.strip_prefix(root).unwrap().to_path_buf(), content);
            }
        }
    }
    files
}

fn export_lines(content: &str) -> usize {
    content.lines().filter(|l| l.starts_with("export * from")).count()
}

#[tokio::test]
async fn test_generate_grouped_tree() {
    let dir = TempDir::new().unwrap();
    let report = generate(&blog(), dir.path()).await.unwrap();

    assert_eq!(report.schemas, 24);
    assert_eq!(report.objects, 32);
    assert_eq!(report.enums, 5);
    assert_eq!(report.indexes, 3);
    assert_eq!(report.files.len(), 64);
    assert!(report.total_lines > 64);

    let schemas = dir.path().join("schemas");
    let index = std::fs::read_to_string(schemas.join("index.ts")).unwrap();
    assert_eq!(export_lines(&index), 24);
    let objects = std::fs::read_to_string(schemas.join("objects/index.ts")).unwrap();
    assert_eq!(export_lines(&objects), 32);
    let enums = std::fs::read_to_string(schemas.join("enums/index.ts")).unwrap();
    assert_eq!(export_lines(&enums), 5);

    assert!(schemas.join("findUniqueUser.schema.ts").is_file());
    assert!(schemas.join("objects/UserWhereInput.schema.ts").is_file());
    assert!(schemas.join("enums/Role.schema.ts").is_file());
}

#[tokio::test]
async fn test_operation_module_content() {
    let writer = in_memory(&[]).await;

    assert_eq!(
        writer.get("/out/schemas/findUniqueUser.schema.ts").unwrap(),
        "import Joi from 'joi';\n\
         import { UserWhereUniqueInputSchemaObject } from './objects/UserWhereUniqueInput.schema';\n\
         \n\
         export const UserFindUniqueSchema = Joi.object().keys({\n  \
         where: Joi.object().keys(UserWhereUniqueInputSchemaObject).id('UserWhereUniqueInput').required(),\n\
         }).required();\n"
    );

    let create = writer.get("/out/schemas/createOneUser.schema.ts").unwrap();
    assert!(create.contains(
        "  data: Joi.alternatives().try(Joi.object().keys(UserCreateInputSchemaObject).id('UserCreateInput'), \
         Joi.object().keys(UserUncheckedCreateInputSchemaObject).id('UserUncheckedCreateInput')).required(),"
    ));

    let group_by = writer.get("/out/schemas/groupByPost.schema.ts").unwrap();
    assert!(group_by.contains("export const PostGroupBySchema"));
    assert!(group_by.contains("  by: Joi.array().items(PostScalarFieldEnumSchema).required(),"));
    assert!(group_by.contains("import { PostScalarFieldEnumSchema } from './enums';"));

    // Only `_count` has an input type in the description.
    let aggregate = writer.get("/out/schemas/aggregateUser.schema.ts").unwrap();
    assert!(aggregate.contains(
        "  _count: Joi.alternatives().try(Joi.boolean(), Joi.object().keys(UserCountAggregateInputSchemaObject).id('UserCountAggregateInput')),"
    ));
    assert!(!aggregate.contains("_min"));
}

#[tokio::test]
async fn test_object_module_markers() {
    let writer = in_memory(&[]).await;

    let create = writer
        .get("/out/schemas/objects/UserCreateInput.schema.ts")
        .unwrap();
    assert_eq!(
        create,
        "import Joi from 'joi';\n\
         import { RoleSchema } from '../enums';\n\
         import { PostCreateNestedManyWithoutAuthorInputSchemaObject } from './PostCreateNestedManyWithoutAuthorInput.schema';\n\
         \n\
         export const UserCreateInputSchemaObject = {\n  \
         email: Joi.string().required(),\n  \
         name: Joi.string().allow(null),\n  \
         role: RoleSchema,\n  \
         posts: Joi.object().keys(PostCreateNestedManyWithoutAuthorInputSchemaObject).id('PostCreateNestedManyWithoutAuthorInput'),\n\
         };\n"
    );

    // Alternations never carry presence markers.
    let filter = writer
        .get("/out/schemas/objects/UserWhereInput.schema.ts")
        .unwrap();
    assert!(filter.contains(
        "  name: Joi.alternatives().try(Joi.object().keys(StringNullableFilterSchemaObject).id('StringNullableFilter'), Joi.string()),"
    ));
    assert!(
        filter
            .lines()
            .filter(|l| l.contains("Joi.alternatives()"))
            .all(|l| !l.contains(".allow(null)") && !l.ends_with(".required(),"))
    );
}

#[tokio::test]
async fn test_self_references_are_linked() {
    let writer = in_memory(&[]).await;

    let nested = writer
        .get("/out/schemas/objects/NestedIntFilter.schema.ts")
        .unwrap();
    assert!(nested.contains("  not: Joi.alternatives().try(Joi.number(), Joi.link('#NestedIntFilter')),"));
    assert!(!nested.contains("import { NestedIntFilterSchemaObject }"));

    let where_input = writer
        .get("/out/schemas/objects/UserWhereInput.schema.ts")
        .unwrap();
    assert!(where_input.contains(
        "  AND: Joi.alternatives().try(Joi.link('#UserWhereInput'), Joi.array().items(Joi.link('#UserWhereInput'))),"
    ));
    assert!(!where_input.contains("from './UserWhereInput.schema'"));
}

#[tokio::test]
async fn test_single_json_fields_are_dropped() {
    let writer = in_memory(&[]).await;
    let post = writer
        .get("/out/schemas/objects/PostCreateInput.schema.ts")
        .unwrap();
    assert!(post.contains("  title: Joi.string().required(),"));
    assert!(post.contains("  published: Joi.boolean(),"));
    assert!(!post.contains("metadata"));
}

#[tokio::test]
async fn test_self_links_have_named_targets() {
    let writer = in_memory(&[]).await;

    let where_input = writer
        .get("/out/schemas/objects/UserWhereInput.schema.ts")
        .unwrap();
    assert!(where_input.contains("Joi.link('#UserWhereInput')"));
    assert!(!where_input.contains("import { UserWhereInputSchemaObject }"));

    // Every reference to the object carries the id the link resolves against.
    let find_many = writer.get("/out/schemas/findManyUser.schema.ts").unwrap();
    assert!(find_many.contains(
        "  where: Joi.object().keys(UserWhereInputSchemaObject).id('UserWhereInput'),"
    ));
}

#[tokio::test]
async fn test_by_model_layout() {
    let writer = in_memory(&[("directoryStrategy", "by-model")]).await;

    assert!(writer.get("/out/schemas/models/user/findUniqueUser.schema.ts").is_some());
    assert!(
        writer
            .get("/out/schemas/models/user/objects/UserCreateInput.schema.ts")
            .is_some()
    );
    assert!(writer.get("/out/schemas/objects/IntFilter.schema.ts").is_some());

    let user_index = writer.get("/out/schemas/models/user/index.ts").unwrap();
    assert!(user_index.contains("export * from './findUniqueUser.schema';"));
    assert!(user_index.contains("export * from './objects/UserCreateInput.schema';"));

    let find = writer
        .get("/out/schemas/models/user/findUniqueUser.schema.ts")
        .unwrap();
    assert!(find.contains("from './objects/UserWhereUniqueInput.schema';"));

    let create = writer
        .get("/out/schemas/models/user/objects/UserCreateInput.schema.ts")
        .unwrap();
    assert!(create.contains("import { RoleSchema } from '../../../enums';"));
    assert!(create.contains(
        "from '../../post/objects/PostCreateNestedManyWithoutAuthorInput.schema';"
    ));
}

#[tokio::test]
async fn test_flat_layout_without_index() {
    let writer = in_memory(&[("directoryStrategy", "flat"), ("generateIndex", "false")]).await;

    let files = writer.files();
    assert_eq!(files.len(), 61);
    assert!(files.keys().all(|p| p.parent() == Some(Path::new("/out/schemas"))));

    let create = writer
        .get("/out/schemas/UserCreateInput.schema.ts")
        .unwrap();
    assert!(create.contains("import { RoleSchema } from './Role.schema';"));
}

#[tokio::test]
async fn test_whitelist_limits_output_and_references() {
    let writer = in_memory(&[
        ("filterStrategy", "whitelist"),
        ("includeTypes", "find,filter,enums"),
    ])
    .await;

    let files = writer.files();
    let schemas = files
        .keys()
        .filter(|p| p.parent() == Some(Path::new("/out/schemas")) && !p.ends_with("index.ts"))
        .count();
    assert_eq!(schemas, 6);
    assert!(writer.get("/out/schemas/objects/UserCreateInput.schema.ts").is_none());

    // Ordering inputs are disabled, so the key is omitted rather than left dangling.
    let find_many = writer.get("/out/schemas/findManyUser.schema.ts").unwrap();
    assert!(!find_many.contains("orderBy"));
    assert!(find_many.contains("  where: Joi.object().keys(UserWhereInputSchemaObject).id('UserWhereInput'),"));
    assert!(find_many.contains("  distinct: Joi.array().items(UserScalarFieldEnumSchema),"));
}

#[tokio::test]
async fn test_blacklist_drops_unchecked_references() {
    let writer = in_memory(&[
        ("filterStrategy", "blacklist"),
        ("excludeTypes", "unchecked"),
    ])
    .await;

    assert!(
        writer
            .get("/out/schemas/objects/UserUncheckedCreateInput.schema.ts")
            .is_none()
    );
    // Two candidates stay an alternation even when only one remains in scope.
    let create = writer.get("/out/schemas/createOneUser.schema.ts").unwrap();
    assert!(create.contains(
        "  data: Joi.alternatives().try(Joi.object().keys(UserCreateInputSchemaObject).id('UserCreateInput')).required(),"
    ));
    assert!(!create.contains("Unchecked"));
}

#[tokio::test]
async fn test_generation_is_deterministic() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    let options = blog();

    generate(&options, first.path()).await.unwrap();
    generate(&options, second.path()).await.unwrap();

    let a = read_tree(first.path());
    let b = read_tree(second.path());
    assert_eq!(a.len(), 64);
    assert_eq!(a, b);
}

#[tokio::test]
async fn test_missing_client_generator_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let mut options = blog();
    options.other_generators.clear();

    let err = generate(&options, dir.path()).await.unwrap_err();
    assert!(matches!(err, GenError::Dmmf(_)));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_generation_order_respects_dependencies_for_every_selection() {
    let registry = ArtifactRegistry::with_builtins();
    let order = registry.generation_order().unwrap();
    let mut valid = 0;

    for mask in 1u32..(1 << ArtifactKind::ALL.len()) {
        let names: Vec<&str> = ArtifactKind::ALL
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, k)| k.name())
            .collect();
        let mut raw = prisma_joi::codegen::RawConfig::new();
        raw.insert("filterStrategy".into(), "whitelist".into());
        raw.insert("includeTypes".into(), ConfigValue::from(names.join(",")));
        let config = ValidatedConfig::parse(&raw).unwrap();

        if registry.ensure_dependencies(&config).is_err() {
            continue;
        }
        valid += 1;

        let enabled: Vec<ArtifactKind> = order
            .iter()
            .copied()
            .filter(|k| config.is_enabled(*k))
            .collect();
        for (pos, kind) in enabled.iter().enumerate() {
            for dep in &registry.metadata(*kind).unwrap().dependencies {
                let dep_pos = enabled.iter().position(|k| k == dep);
                assert!(
                    dep_pos.is_some_and(|d| d < pos),
                    "{dep} must precede {kind} in {names:?}"
                );
            }
        }
    }

    assert!(valid > 0);
}
