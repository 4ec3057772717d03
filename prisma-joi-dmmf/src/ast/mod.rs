//! Serde model of the Prisma DMMF and generator options.

mod datamodel;
mod input;
mod mapping;
mod options;

pub use datamodel::*;
pub use input::*;
pub use mapping::*;
pub use options::*;

use serde::{Deserialize, Serialize};

/// The DMMF document: datamodel, input schema and operation mappings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Document {
    /// User-declared models and enums.
    pub datamodel: Datamodel,
    /// Input, enum and field-ref types derived by Prisma.
    pub schema: InputSchema,
    /// Operation names per model.
    pub mappings: Mappings,
}

impl Document {
    /// Get a model by name.
    pub fn get_model(&self, name: &str) -> Option<&Model> {
        self.datamodel.models.iter().find(|m| m.name == name)
    }

    /// Get the operation mapping for a model.
    pub fn mapping_for(&self, model: &str) -> Option<&ModelMapping> {
        self.mappings.model_operations.iter().find(|m| m.model == model)
    }
}
