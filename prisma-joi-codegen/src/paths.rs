//! Output path resolution.
//!
//! Resolution is pure: the same file identity under the same configuration
//! always maps to the same path, so modules can compute each other's import
//! specifiers without touching the file system.

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use crate::artifact::{ArtifactKind, FileInfo, FileKind};
use crate::config::{DirectoryNames, DirectoryStrategy, NamingPatterns, ValidatedConfig};

const EXTENSION: &str = "ts";
const INDEX_FILE: &str = "index.ts";

const OPERATION_PREFIXES: &[&str] = &[
    "findUnique",
    "findFirst",
    "findMany",
    "createOne",
    "createMany",
    "updateOne",
    "updateMany",
    "upsertOne",
    "deleteOne",
    "deleteMany",
    "aggregate",
    "groupBy",
];

const KEBAB_PREFIXES: &[&str] = &[
    "find-unique-",
    "find-first-",
    "find-many-",
    "create-one-",
    "create-many-",
    "update-one-",
    "update-many-",
    "upsert-one-",
    "delete-one-",
    "delete-many-",
    "aggregate-",
    "group-by-",
];

// Checked longest first.
const TYPE_SUFFIXES: &[&str] = &[
    "ScalarWhereWithAggregatesInput",
    "OrderByWithAggregationInput",
    "OrderByRelationAggregateInput",
    "CountOrderByAggregateInput",
    "OrderByWithRelationInput",
    "UncheckedUpdateManyInput",
    "AvgOrderByAggregateInput",
    "MaxOrderByAggregateInput",
    "MinOrderByAggregateInput",
    "SumOrderByAggregateInput",
    "UpdateManyMutationInput",
    "NullableRelationFilter",
    "UncheckedCreateInput",
    "UncheckedUpdateInput",
    "ScalarRelationFilter",
    "CountAggregateInput",
    "ListRelationFilter",
    "AvgAggregateInput",
    "MaxAggregateInput",
    "MinAggregateInput",
    "SumAggregateInput",
    "WhereUniqueInput",
    "ScalarWhereInput",
    "CreateManyInput",
    "RelationFilter",
    "CreateInput",
    "UpdateInput",
    "WhereInput",
];

// Verbs that start the `<Model><Verb>Without<Relation>Input` family.
const WITHOUT_VERBS: &[&str] = &[
    "Unchecked",
    "CreateNested",
    "CreateOrConnect",
    "Create",
    "Update",
    "Upsert",
];

/// A file location plus the specifier used to import it from the base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    pub file_path: PathBuf,
    pub directory: PathBuf,
    pub filename: String,
    /// Extensionless, `./`-prefixed, relative to the base directory.
    pub import_path: String,
}

/// Index file categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexCategory {
    Schemas,
    Objects,
    Enums,
}

/// Computes output locations under one directory strategy.
#[derive(Debug, Clone)]
pub struct PathResolver {
    base: PathBuf,
    strategy: DirectoryStrategy,
    directories: DirectoryNames,
    naming: NamingPatterns,
}

impl PathResolver {
    /// Create a resolver rooted at `output_dir`.
    pub fn new(output_dir: impl AsRef<Path>, config: &ValidatedConfig) -> Self {
        Self {
            base: output_dir.as_ref().join(&config.directories.base),
            strategy: config.directory_strategy,
            directories: config.directories.clone(),
            naming: config.naming.clone(),
        }
    }

    /// The base directory all files live under.
    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    /// Resolve the location of a generated file.
    pub fn resolve_path(&self, info: &FileInfo) -> ResolvedPath {
        let directory = self.directory_for(info);
        let filename = self.filename_for(info);
        self.resolved(directory, filename)
    }

    /// Resolve the location of a category index file.
    pub fn resolve_index_path(&self, category: IndexCategory) -> ResolvedPath {
        match (self.strategy, category) {
            (_, IndexCategory::Schemas) => self.resolved(self.base.clone(), INDEX_FILE.to_string()),
            (DirectoryStrategy::Flat, IndexCategory::Objects) => self.resolved(
                self.base.clone(),
                format!("{}.{EXTENSION}", self.directories.objects),
            ),
            (DirectoryStrategy::Flat, IndexCategory::Enums) => self.resolved(
                self.base.clone(),
                format!("{}.{EXTENSION}", self.directories.enums),
            ),
            (_, IndexCategory::Objects) => {
                self.resolved(self.base.join(&self.directories.objects), INDEX_FILE.to_string())
            }
            (_, IndexCategory::Enums) => {
                self.resolved(self.base.join(&self.directories.enums), INDEX_FILE.to_string())
            }
        }
    }

    /// Resolve the per-model index file. Only the by-model layout has one.
    pub fn resolve_model_index_path(&self, model: &str) -> Option<ResolvedPath> {
        (self.strategy == DirectoryStrategy::ByModel)
            .then(|| self.resolved(self.model_dir(model), INDEX_FILE.to_string()))
    }

    /// Every directory the enabled kinds write into.
    pub fn required_directories<'a>(
        &self,
        config: &ValidatedConfig,
        models: impl IntoIterator<Item = &'a str>,
    ) -> BTreeSet<PathBuf> {
        let mut dirs = BTreeSet::new();
        dirs.insert(self.base.clone());

        let objects = config.enabled_kinds().any(|k| k.is_object());
        let operations = config.enabled_kinds().any(|k| k.is_operation());
        let enums = config.is_enabled(ArtifactKind::Enums);

        if self.strategy == DirectoryStrategy::Flat {
            return dirs;
        }

        if objects {
            dirs.insert(self.base.join(&self.directories.objects));
        }
        if enums {
            dirs.insert(self.base.join(&self.directories.enums));
        }

        if self.strategy == DirectoryStrategy::ByModel && (objects || operations) {
            for model in models {
                let dir = self.model_dir(model);
                if objects {
                    dirs.insert(dir.join(&self.directories.objects));
                }
                dirs.insert(dir);
            }
        }

        dirs
    }

    /// Import specifier for `to` as seen from the module at `from`.
    ///
    /// Both are file paths. A trailing `/index` is dropped.
    pub fn import_between(from: &Path, to: &Path) -> String {
        let from_dir = from.parent().unwrap_or(Path::new(""));
        let target = to.with_extension("");
        let relative = pathdiff::diff_paths(&target, from_dir).unwrap_or(target);

        let mut specifier = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                Component::ParentDir => Some("..".to_string()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/");

        if let Some(stripped) = specifier.strip_suffix("/index") {
            specifier = stripped.to_string();
        }
        if specifier == ".." || specifier.starts_with("../") {
            specifier
        } else {
            format!("./{specifier}")
        }
    }

    fn directory_for(&self, info: &FileInfo) -> PathBuf {
        match (self.strategy, info.kind, info.model.as_deref()) {
            (DirectoryStrategy::Flat, _, _) => self.base.clone(),
            (_, FileKind::Enum, _) => self.base.join(&self.directories.enums),
            (DirectoryStrategy::ByModel, FileKind::Schema, Some(model)) => self.model_dir(model),
            (DirectoryStrategy::ByModel, FileKind::Object, Some(model)) => {
                self.model_dir(model).join(&self.directories.objects)
            }
            (_, FileKind::Object, _) => self.base.join(&self.directories.objects),
            (_, FileKind::Schema, _) => self.base.clone(),
        }
    }

    fn filename_for(&self, info: &FileInfo) -> String {
        let pattern = match info.kind {
            FileKind::Schema => &self.naming.schema,
            FileKind::Object => &self.naming.object,
            FileKind::Enum => &self.naming.enumeration,
        };
        let stem = pattern
            .replace("{operation}", &info.name)
            .replace("{name}", &info.name)
            .replace("{type}", info.kind.label());
        format!("{stem}.{EXTENSION}")
    }

    fn model_dir(&self, model: &str) -> PathBuf {
        self.base.join(&self.directories.models).join(model_slug(model))
    }

    fn resolved(&self, directory: PathBuf, filename: String) -> ResolvedPath {
        let file_path = directory.join(&filename);
        let import_path = Self::import_between(&self.base.join(INDEX_FILE), &file_path);
        ResolvedPath {
            file_path,
            directory,
            filename,
            import_path,
        }
    }
}

/// Directory slug for a model: lowercase, non-alphanumeric runs collapsed to `-`.
pub fn model_slug(model: &str) -> String {
    let mut slug = String::with_capacity(model.len());
    for c in model.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Best-effort extraction of the model an artifact name belongs to.
pub fn extract_model_name(name: &str) -> Option<&str> {
    for prefix in OPERATION_PREFIXES {
        match name.strip_prefix(prefix) {
            Some(rest) if rest.starts_with(|c: char| c.is_ascii_uppercase()) => return Some(rest),
            _ => {}
        }
    }
    for prefix in KEBAB_PREFIXES {
        match name.strip_prefix(prefix) {
            Some(rest) if !rest.is_empty() => return Some(rest),
            _ => {}
        }
    }

    if let Some(model) = TYPE_SUFFIXES
        .iter()
        .filter_map(|suffix| name.strip_suffix(suffix))
        .find(|model| !model.is_empty())
    {
        return Some(model);
    }

    if let Some(idx) = name.find("Without") {
        let head = &name[..idx];
        if let Some(pos) = WITHOUT_VERBS
            .iter()
            .filter_map(|verb| head.find(verb))
            .filter(|pos| *pos > 0)
            .min()
        {
            return Some(&head[..pos]);
        }
    }

    match name.find("CreateMany") {
        Some(idx) if idx > 0 && name.contains("Input") => return Some(&name[..idx]),
        _ => {}
    }

    name.strip_suffix("Schema")
        .or_else(|| name.strip_suffix("-schema"))
        .filter(|model| !model.is_empty())
}
