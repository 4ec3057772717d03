//! Operation mappings of the DMMF.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Operation mappings for every model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Mappings {
    /// Per-model operation names.
    pub model_operations: Vec<ModelMapping>,
}

/// Names of the operation entry points Prisma exposes for one model.
///
/// Every operation is optional; it is present only when the source schema
/// supports it for the model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModelMapping {
    /// Model name.
    pub model: SmolStr,
    /// Plural accessor name.
    pub plural: Option<SmolStr>,
    pub find_unique: Option<SmolStr>,
    pub find_first: Option<SmolStr>,
    pub find_many: Option<SmolStr>,
    pub create_one: Option<SmolStr>,
    pub create_many: Option<SmolStr>,
    pub update_one: Option<SmolStr>,
    pub update_many: Option<SmolStr>,
    pub upsert_one: Option<SmolStr>,
    pub delete_one: Option<SmolStr>,
    pub delete_many: Option<SmolStr>,
    pub aggregate: Option<SmolStr>,
    pub group_by: Option<SmolStr>,
}

impl ModelMapping {
    /// Create a mapping with every operation present, named `<op><Model>`.
    pub fn all(model: impl Into<SmolStr>) -> Self {
        let model = model.into();
        let name = |op: OperationKind| Some(SmolStr::from(format!("{}{}", op.as_str(), model)));
        Self {
            plural: None,
            find_unique: name(OperationKind::FindUnique),
            find_first: name(OperationKind::FindFirst),
            find_many: name(OperationKind::FindMany),
            create_one: name(OperationKind::CreateOne),
            create_many: name(OperationKind::CreateMany),
            update_one: name(OperationKind::UpdateOne),
            update_many: name(OperationKind::UpdateMany),
            upsert_one: name(OperationKind::UpsertOne),
            delete_one: name(OperationKind::DeleteOne),
            delete_many: name(OperationKind::DeleteMany),
            aggregate: name(OperationKind::Aggregate),
            group_by: name(OperationKind::GroupBy),
            model,
        }
    }

    /// Get the mapped name of one operation.
    pub fn get(&self, op: OperationKind) -> Option<&str> {
        let name = match op {
            OperationKind::FindUnique => &self.find_unique,
            OperationKind::FindFirst => &self.find_first,
            OperationKind::FindMany => &self.find_many,
            OperationKind::CreateOne => &self.create_one,
            OperationKind::CreateMany => &self.create_many,
            OperationKind::UpdateOne => &self.update_one,
            OperationKind::UpdateMany => &self.update_many,
            OperationKind::UpsertOne => &self.upsert_one,
            OperationKind::DeleteOne => &self.delete_one,
            OperationKind::DeleteMany => &self.delete_many,
            OperationKind::Aggregate => &self.aggregate,
            OperationKind::GroupBy => &self.group_by,
        };
        name.as_deref()
    }

    /// Present operations in canonical order.
    pub fn operations(&self) -> impl Iterator<Item = (OperationKind, &str)> {
        OperationKind::ALL
            .iter()
            .filter_map(|&op| self.get(op).map(|name| (op, name)))
    }
}

/// An operation Prisma's client exposes on a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OperationKind {
    FindUnique,
    FindFirst,
    FindMany,
    CreateOne,
    CreateMany,
    UpdateOne,
    UpdateMany,
    UpsertOne,
    DeleteOne,
    DeleteMany,
    Aggregate,
    GroupBy,
}

impl OperationKind {
    /// Every operation in canonical order.
    pub const ALL: [OperationKind; 12] = [
        Self::FindUnique,
        Self::FindFirst,
        Self::FindMany,
        Self::CreateOne,
        Self::CreateMany,
        Self::UpdateOne,
        Self::UpdateMany,
        Self::UpsertOne,
        Self::DeleteOne,
        Self::DeleteMany,
        Self::Aggregate,
        Self::GroupBy,
    ];

    /// The camelCase operation name used as a mapping prefix.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FindUnique => "findUnique",
            Self::FindFirst => "findFirst",
            Self::FindMany => "findMany",
            Self::CreateOne => "createOne",
            Self::CreateMany => "createMany",
            Self::UpdateOne => "updateOne",
            Self::UpdateMany => "updateMany",
            Self::UpsertOne => "upsertOne",
            Self::DeleteOne => "deleteOne",
            Self::DeleteMany => "deleteMany",
            Self::Aggregate => "aggregate",
            Self::GroupBy => "groupBy",
        }
    }

    /// The kebab-case operation name.
    pub fn kebab(&self) -> &'static str {
        match self {
            Self::FindUnique => "find-unique",
            Self::FindFirst => "find-first",
            Self::FindMany => "find-many",
            Self::CreateOne => "create-one",
            Self::CreateMany => "create-many",
            Self::UpdateOne => "update-one",
            Self::UpdateMany => "update-many",
            Self::UpsertOne => "upsert-one",
            Self::DeleteOne => "delete-one",
            Self::DeleteMany => "delete-many",
            Self::Aggregate => "aggregate",
            Self::GroupBy => "group-by",
        }
    }

    /// PascalCase suffix used in exported schema names (`UserFindMany`).
    pub fn export_suffix(&self) -> &'static str {
        match self {
            Self::FindUnique => "FindUnique",
            Self::FindFirst => "FindFirst",
            Self::FindMany => "FindMany",
            Self::CreateOne => "CreateOne",
            Self::CreateMany => "CreateMany",
            Self::UpdateOne => "UpdateOne",
            Self::UpdateMany => "UpdateMany",
            Self::UpsertOne => "Upsert",
            Self::DeleteOne => "DeleteOne",
            Self::DeleteMany => "DeleteMany",
            Self::Aggregate => "Aggregate",
            Self::GroupBy => "GroupBy",
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
