//! Generator options handed over by the Prisma host.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use super::Document;

/// The options document a Prisma generator receives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorOptions {
    /// This generator's block from the Prisma schema.
    pub generator: GeneratorConfig,
    /// All other generator blocks of the Prisma schema.
    pub other_generators: Vec<GeneratorConfig>,
    /// Path of the Prisma schema file.
    pub schema_path: Option<String>,
    /// The parsed data model description.
    pub dmmf: Document,
    /// Prisma version that produced the document.
    pub version: Option<String>,
}

/// A `generator` block of the Prisma schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorConfig {
    /// Block name.
    pub name: SmolStr,
    /// Provider (the generator executable or package).
    pub provider: EnvValue,
    /// Output directory.
    pub output: Option<EnvValue>,
    /// Raw string-keyed configuration.
    pub config: IndexMap<String, ConfigValue>,
}

impl GeneratorConfig {
    /// The provider name, if resolved.
    pub fn provider_name(&self) -> Option<&str> {
        self.provider.value.as_deref()
    }

    /// The resolved output directory, if any.
    pub fn output_path(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.value.as_deref())
    }
}

/// A value that may have been read from an environment variable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnvValue {
    /// Resolved value.
    pub value: Option<String>,
    /// Environment variable the value came from.
    pub from_env_var: Option<String>,
}

impl EnvValue {
    /// Create a literal value.
    pub fn literal(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            from_env_var: None,
        }
    }
}

/// A raw configuration value: the host only supplies strings and string lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// A single string.
    Single(String),
    /// A list of strings.
    List(Vec<String>),
}

impl ConfigValue {
    /// Get the single string value, if this is not a list.
    pub fn as_single(&self) -> Option<&str> {
        match self {
            Self::Single(value) => Some(value),
            Self::List(_) => None,
        }
    }

    /// Flatten into list items, splitting single values on commas.
    pub fn items(&self) -> Vec<String> {
        let raw: Vec<&str> = match self {
            Self::Single(value) => value.split(',').collect(),
            Self::List(values) => values.iter().flat_map(|v| v.split(',')).collect(),
        };
        raw.into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<String>> for ConfigValue {
    fn from(values: Vec<String>) -> Self {
        Self::List(values)
    }
}
