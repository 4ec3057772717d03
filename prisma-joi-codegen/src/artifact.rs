//! Artifact kinds and generated-file identities.

use prisma_joi_dmmf::OperationKind;
use smol_str::SmolStr;

/// One of the categories of generated output that configuration can toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArtifactKind {
    Create,
    Update,
    Upsert,
    Unchecked,
    Filter,
    OrderBy,
    Aggregate,
    GroupBy,
    Find,
    Delete,
    Enums,
    Objects,
}

impl ArtifactKind {
    /// Every kind, in the order they are listed to users.
    pub const ALL: [ArtifactKind; 12] = [
        Self::Create,
        Self::Update,
        Self::Upsert,
        Self::Unchecked,
        Self::Filter,
        Self::OrderBy,
        Self::Aggregate,
        Self::GroupBy,
        Self::Find,
        Self::Delete,
        Self::Enums,
        Self::Objects,
    ];

    /// The configuration name of the kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Upsert => "upsert",
            Self::Unchecked => "unchecked",
            Self::Filter => "filter",
            Self::OrderBy => "orderBy",
            Self::Aggregate => "aggregate",
            Self::GroupBy => "groupBy",
            Self::Find => "find",
            Self::Delete => "delete",
            Self::Enums => "enums",
            Self::Objects => "objects",
        }
    }

    /// Look up a kind by name, ignoring case, `-` and `_`.
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized: String = name
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().to_lowercase() == normalized)
    }

    /// Comma-separated list of every valid name, for error messages.
    pub fn valid_names() -> String {
        Self::ALL
            .iter()
            .map(|k| k.name())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// The file kind this artifact kind produces.
    pub fn file_kind(&self) -> FileKind {
        match self {
            Self::Enums => FileKind::Enum,
            Self::Objects | Self::Filter | Self::OrderBy | Self::Unchecked => FileKind::Object,
            _ => FileKind::Schema,
        }
    }

    /// Whether this kind emits operation schemas.
    pub fn is_operation(&self) -> bool {
        self.file_kind() == FileKind::Schema
    }

    /// Whether this kind emits object modules.
    pub fn is_object(&self) -> bool {
        self.file_kind() == FileKind::Object
    }

    /// The kind that owns an operation.
    pub fn for_operation(op: OperationKind) -> Self {
        match op {
            OperationKind::FindUnique | OperationKind::FindFirst | OperationKind::FindMany => {
                Self::Find
            }
            OperationKind::CreateOne | OperationKind::CreateMany => Self::Create,
            OperationKind::UpdateOne | OperationKind::UpdateMany => Self::Update,
            OperationKind::UpsertOne => Self::Upsert,
            OperationKind::DeleteOne | OperationKind::DeleteMany => Self::Delete,
            OperationKind::Aggregate => Self::Aggregate,
            OperationKind::GroupBy => Self::GroupBy,
        }
    }

    /// The kind that owns an input object type, by name.
    pub fn for_object(name: &str) -> Self {
        if name.contains("Unchecked") {
            Self::Unchecked
        } else if name.contains("OrderBy") {
            Self::OrderBy
        } else if FILTER_SUFFIXES.iter().any(|s| name.ends_with(s)) {
            Self::Filter
        } else {
            Self::Objects
        }
    }
}

const FILTER_SUFFIXES: &[&str] = &[
    "Filter",
    "WhereInput",
    "WhereUniqueInput",
    "WhereWithAggregatesInput",
];

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The three kinds of generated files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FileKind {
    /// Operation schema.
    Schema,
    /// Input object module.
    Object,
    /// Enum module.
    Enum,
}

impl FileKind {
    /// The `{type}` placeholder value.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Schema => "schema",
            Self::Object => "object",
            Self::Enum => "enum",
        }
    }
}

/// Logical identity of one generated file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileInfo {
    pub kind: FileKind,
    /// Artifact name (operation name, object type or enum name).
    pub name: SmolStr,
    /// Owning model, when known.
    pub model: Option<SmolStr>,
}

impl FileInfo {
    /// An operation schema file.
    pub fn schema(name: impl Into<SmolStr>, model: Option<SmolStr>) -> Self {
        Self {
            kind: FileKind::Schema,
            name: name.into(),
            model,
        }
    }

    /// An object module file.
    pub fn object(name: impl Into<SmolStr>, model: Option<SmolStr>) -> Self {
        Self {
            kind: FileKind::Object,
            name: name.into(),
            model,
        }
    }

    /// An enum module file.
    pub fn enumeration(name: impl Into<SmolStr>) -> Self {
        Self {
            kind: FileKind::Enum,
            name: name.into(),
            model: None,
        }
    }
}
