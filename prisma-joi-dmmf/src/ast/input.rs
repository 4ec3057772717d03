//! Input schema section of the DMMF.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Input types, enum types and field-ref types derived by Prisma.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InputSchema {
    /// Named composite input shapes (`UserWhereInput`, ...).
    pub input_object_types: Namespaced<InputObjectType>,
    /// Enum types (`SortOrder`, user enums, ...).
    pub enum_types: Namespaced<EnumType>,
    /// Field reference types (`IntFieldRefInput`, ...).
    pub field_ref_types: Namespaced<FieldRefType>,
}

/// A list of types split by owning namespace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Namespaced<T> {
    /// Types owned by Prisma.
    pub prisma: Vec<T>,
    /// Types derived from the user's models.
    pub model: Vec<T>,
}

impl<T> Default for Namespaced<T> {
    fn default() -> Self {
        Self {
            prisma: Vec::new(),
            model: Vec::new(),
        }
    }
}

impl<T> Namespaced<T> {
    /// Iterate both namespaces, `prisma` first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.prisma.iter().chain(self.model.iter())
    }

    /// Total number of types across namespaces.
    pub fn len(&self) -> usize {
        self.prisma.len() + self.model.len()
    }

    /// Check if both namespaces are empty.
    pub fn is_empty(&self) -> bool {
        self.prisma.is_empty() && self.model.is_empty()
    }
}

/// A named composite input shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputObjectType {
    /// Type name.
    pub name: SmolStr,
    /// Fields in declaration order.
    #[serde(default)]
    pub fields: Vec<SchemaArg>,
}

/// A field reference input type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRefType {
    /// Type name.
    pub name: SmolStr,
    /// Scalar types the reference accepts.
    #[serde(default)]
    pub allow_types: Vec<InputTypeRef>,
    /// Fields in declaration order.
    #[serde(default)]
    pub fields: Vec<SchemaArg>,
}

/// An enum type of the input schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumType {
    /// Enum name.
    pub name: SmolStr,
    /// Values in declaration order.
    #[serde(default)]
    pub values: Vec<SmolStr>,
}

/// A field of an input type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaArg {
    /// Field name.
    pub name: SmolStr,
    /// Whether the field must be present.
    #[serde(default)]
    pub is_required: bool,
    /// Whether the field accepts `null`.
    #[serde(default)]
    pub is_nullable: bool,
    /// Candidate types; more than one means a union.
    #[serde(default)]
    pub input_types: Vec<InputTypeRef>,
}

/// A candidate type reference of a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputTypeRef {
    /// Type name (scalar, enum or input object).
    #[serde(rename = "type")]
    pub type_name: SmolStr,
    /// Owning namespace; absent for scalars and ad hoc types.
    #[serde(default)]
    pub namespace: Option<Namespace>,
    /// Where the type is defined.
    #[serde(default)]
    pub location: TypeLocation,
    /// Whether the candidate is a list.
    #[serde(default)]
    pub is_list: bool,
}

impl InputTypeRef {
    /// Create a scalar reference.
    pub fn scalar(type_name: impl Into<SmolStr>) -> Self {
        Self {
            type_name: type_name.into(),
            namespace: None,
            location: TypeLocation::Scalar,
            is_list: false,
        }
    }

    /// Create a reference to a Prisma-owned input object type.
    pub fn object(type_name: impl Into<SmolStr>) -> Self {
        Self {
            type_name: type_name.into(),
            namespace: Some(Namespace::Prisma),
            location: TypeLocation::InputObjectTypes,
            is_list: false,
        }
    }

    /// Create a reference to a Prisma-owned enum type.
    pub fn enumeration(type_name: impl Into<SmolStr>) -> Self {
        Self {
            type_name: type_name.into(),
            namespace: Some(Namespace::Prisma),
            location: TypeLocation::EnumTypes,
            is_list: false,
        }
    }

    /// Mark the reference as a list.
    pub fn list(mut self) -> Self {
        self.is_list = true;
        self
    }

    /// Check if the type is owned by the described schema.
    pub fn is_schema_owned(&self) -> bool {
        self.namespace.is_some()
    }
}

/// Namespace owning a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    /// Generated by Prisma.
    Prisma,
    /// Derived from the user's models.
    Model,
}

/// Where a referenced type is defined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeLocation {
    /// Built-in scalar.
    #[default]
    Scalar,
    /// Input object type.
    InputObjectTypes,
    /// Output object type.
    OutputObjectTypes,
    /// Enum type.
    EnumTypes,
    /// Field reference type.
    FieldRefTypes,
}
