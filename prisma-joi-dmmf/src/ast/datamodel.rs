//! Datamodel section of the DMMF (models and user enums).

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// The datamodel: models and enums as declared by the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Datamodel {
    /// Declared models.
    pub models: Vec<Model>,
    /// Declared enums.
    pub enums: Vec<DatamodelEnum>,
}

/// A model declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Model name.
    pub name: SmolStr,
    /// Database table name, when mapped.
    #[serde(default)]
    pub db_name: Option<SmolStr>,
    /// Model fields in declaration order.
    #[serde(default)]
    pub fields: Vec<ModelField>,
}

/// The kind of a model field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    /// Scalar column.
    Scalar,
    /// Reference to an enum.
    Enum,
    /// Relation to another model.
    Object,
    /// Prisma `Unsupported(...)` column.
    Unsupported,
}

/// A field of a model declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelField {
    /// Field name.
    pub name: SmolStr,
    /// Field kind.
    pub kind: FieldKind,
    /// Type name (scalar, enum or model).
    #[serde(rename = "type")]
    pub type_name: SmolStr,
    /// Whether the field is a list.
    #[serde(default)]
    pub is_list: bool,
    /// Whether the field is required.
    #[serde(default)]
    pub is_required: bool,
    /// Whether the field is unique.
    #[serde(default)]
    pub is_unique: bool,
    /// Whether the field is the primary key.
    #[serde(default)]
    pub is_id: bool,
    /// Relation name for relation fields.
    #[serde(default)]
    pub relation_name: Option<SmolStr>,
}

/// A user-declared enum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatamodelEnum {
    /// Enum name.
    pub name: SmolStr,
    /// Enum values.
    #[serde(default)]
    pub values: Vec<DatamodelEnumValue>,
}

/// A value of a user-declared enum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatamodelEnumValue {
    /// Value name.
    pub name: SmolStr,
    /// Database name, when mapped.
    #[serde(default)]
    pub db_name: Option<SmolStr>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_field_deserialize() {
        let field: ModelField = serde_json::from_str(
            r#"{"name":"posts","kind":"object","type":"Post","isList":true,"isRequired":true,"relationName":"PostToUser"}"#,
        )
        .unwrap();

        assert_eq!(field.name, "posts");
        assert_eq!(field.kind, FieldKind::Object);
        assert!(field.is_list);
        assert!(!field.is_unique);
        assert_eq!(field.relation_name.as_deref(), Some("PostToUser"));
    }
}
