//! Ingestion of the DMMF into closed type shapes.
//!
//! Every candidate type of every field is classified exactly once here, so
//! code generation switches on [`TypeShape`] instead of re-deriving type
//! identity from strings.

use std::collections::HashSet;

use indexmap::IndexMap;
use smol_str::SmolStr;
use tracing::debug;

use crate::ast::{Document, InputTypeRef, ModelMapping, OperationKind, SchemaArg, TypeLocation};

/// Scalars with a fixed validator mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    String,
    Int,
    Float,
    Boolean,
    DateTime,
    Json,
}

impl ScalarKind {
    /// Recognize a scalar by its DMMF type name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "String" => Some(Self::String),
            "Int" => Some(Self::Int),
            "Float" => Some(Self::Float),
            "Boolean" => Some(Self::Boolean),
            "DateTime" => Some(Self::DateTime),
            "Json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// The shape of one candidate type, relative to the type that owns the field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeShape {
    /// A recognized scalar.
    Scalar(ScalarKind),
    /// A schema-owned enum.
    EnumRef(SmolStr),
    /// A schema-owned input object other than the owner.
    ObjectRef(SmolStr),
    /// The owning type itself.
    SelfRef(SmolStr),
    /// Anything without a validator mapping (ad hoc types, unknown scalars).
    Unsupported(SmolStr),
}

impl TypeShape {
    /// Classify a candidate reference of a field owned by `owner`.
    pub fn classify(reference: &InputTypeRef, owner: &str, enum_names: &HashSet<SmolStr>) -> Self {
        let name = &reference.type_name;

        if !reference.is_schema_owned() {
            return match (reference.location, ScalarKind::from_name(name)) {
                (TypeLocation::Scalar, Some(kind)) => Self::Scalar(kind),
                _ => Self::Unsupported(name.clone()),
            };
        }

        if name == owner {
            return Self::SelfRef(name.clone());
        }

        match reference.location {
            TypeLocation::EnumTypes => Self::EnumRef(name.clone()),
            _ if enum_names.contains(name) => Self::EnumRef(name.clone()),
            TypeLocation::InputObjectTypes | TypeLocation::FieldRefTypes => {
                Self::ObjectRef(name.clone())
            }
            _ => Self::Unsupported(name.clone()),
        }
    }
}

/// One candidate of a field: a shape and whether it is a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub shape: TypeShape,
    pub is_list: bool,
}

impl Candidate {
    /// Create a non-list candidate.
    pub fn new(shape: TypeShape) -> Self {
        Self {
            shape,
            is_list: false,
        }
    }

    /// Mark the candidate as a list.
    pub fn list(mut self) -> Self {
        self.is_list = true;
        self
    }
}

/// A field with pre-classified candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescription {
    pub name: SmolStr,
    pub is_required: bool,
    pub is_nullable: bool,
    pub candidates: Vec<Candidate>,
}

impl FieldDescription {
    /// Create an optional, non-nullable field.
    pub fn new(name: impl Into<SmolStr>, candidates: Vec<Candidate>) -> Self {
        Self {
            name: name.into(),
            is_required: false,
            is_nullable: false,
            candidates,
        }
    }

    /// Mark the field as required.
    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    /// Mark the field as nullable.
    pub fn nullable(mut self) -> Self {
        self.is_nullable = true;
        self
    }

    fn ingest(arg: &SchemaArg, owner: &str, enum_names: &HashSet<SmolStr>) -> Self {
        Self {
            name: arg.name.clone(),
            is_required: arg.is_required,
            is_nullable: arg.is_nullable,
            candidates: arg
                .input_types
                .iter()
                .map(|reference| Candidate {
                    shape: TypeShape::classify(reference, owner, enum_names),
                    is_list: reference.is_list,
                })
                .collect(),
        }
    }
}

/// Where an object description came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectOrigin {
    InputObject,
    FieldRef,
}

/// A named composite shape to be emitted as its own module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectDescription {
    pub name: SmolStr,
    pub origin: ObjectOrigin,
    pub fields: Vec<FieldDescription>,
}

/// An enum with its ordered values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDescription {
    pub name: SmolStr,
    pub values: Vec<SmolStr>,
}

/// A model with its operation mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelDescription {
    pub name: SmolStr,
    pub mapping: ModelMapping,
}

impl ModelDescription {
    /// Present operations in canonical order.
    pub fn operations(&self) -> impl Iterator<Item = (OperationKind, &str)> {
        self.mapping.operations()
    }
}

/// The ingested, read-only view of a description.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub enums: Vec<EnumDescription>,
    pub objects: Vec<ObjectDescription>,
    pub models: Vec<ModelDescription>,
}

impl Catalog {
    /// Ingest a DMMF document.
    ///
    /// Types are deduplicated by name, first occurrence wins, `prisma`
    /// namespace before `model`.
    pub fn ingest(doc: &Document) -> Self {
        let mut enums: IndexMap<SmolStr, EnumDescription> = IndexMap::new();
        for enum_type in doc.schema.enum_types.iter() {
            enums
                .entry(enum_type.name.clone())
                .or_insert_with(|| EnumDescription {
                    name: enum_type.name.clone(),
                    values: enum_type.values.clone(),
                });
        }
        for enum_def in &doc.datamodel.enums {
            enums
                .entry(enum_def.name.clone())
                .or_insert_with(|| EnumDescription {
                    name: enum_def.name.clone(),
                    values: enum_def.values.iter().map(|v| v.name.clone()).collect(),
                });
        }

        let enum_names: HashSet<SmolStr> = enums.keys().cloned().collect();

        let mut objects: IndexMap<SmolStr, ObjectDescription> = IndexMap::new();
        for input in doc.schema.input_object_types.iter() {
            objects.entry(input.name.clone()).or_insert_with(|| ObjectDescription {
                name: input.name.clone(),
                origin: ObjectOrigin::InputObject,
                fields: input
                    .fields
                    .iter()
                    .map(|arg| FieldDescription::ingest(arg, &input.name, &enum_names))
                    .collect(),
            });
        }
        for field_ref in doc.schema.field_ref_types.iter() {
            objects.entry(field_ref.name.clone()).or_insert_with(|| ObjectDescription {
                name: field_ref.name.clone(),
                origin: ObjectOrigin::FieldRef,
                fields: field_ref
                    .fields
                    .iter()
                    .map(|arg| FieldDescription::ingest(arg, &field_ref.name, &enum_names))
                    .collect(),
            });
        }

        let models = doc
            .datamodel
            .models
            .iter()
            .map(|model| ModelDescription {
                name: model.name.clone(),
                mapping: doc.mapping_for(&model.name).cloned().unwrap_or_else(|| ModelMapping {
                    model: model.name.clone(),
                    ..Default::default()
                }),
            })
            .collect::<Vec<_>>();

        debug!(
            enums = enums.len(),
            objects = objects.len(),
            models = models.len(),
            "ingested description"
        );

        Self {
            enums: enums.into_values().collect(),
            objects: objects.into_values().collect(),
            models,
        }
    }

    /// Names of every known enum.
    pub fn enum_names(&self) -> impl Iterator<Item = &SmolStr> {
        self.enums.iter().map(|e| &e.name)
    }

    /// Names of every known model.
    pub fn model_names(&self) -> impl Iterator<Item = &SmolStr> {
        self.models.iter().map(|m| &m.name)
    }

    /// Get an object description by name.
    pub fn get_object(&self, name: &str) -> Option<&ObjectDescription> {
        self.objects.iter().find(|o| o.name == name)
    }
}
