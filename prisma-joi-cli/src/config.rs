//! CLI configuration handling.

use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;

use prisma_joi_codegen::RawConfig;
use prisma_joi_dmmf::ConfigValue;

use crate::error::{CliError, CliResult};

/// Default config file name (lives in the working directory)
pub const CONFIG_FILE_NAME: &str = "prisma-joi.toml";

/// prisma-joi CLI configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Generator keys, with the same names as in the Prisma generator block
    pub generator: IndexMap<String, Setting>,
}

/// A value of the `[generator]` table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Setting {
    Flag(bool),
    Text(String),
    List(Vec<String>),
}

impl From<Setting> for ConfigValue {
    fn from(setting: Setting) -> Self {
        match setting {
            Setting::Flag(flag) => ConfigValue::Single(flag.to_string()),
            Setting::Text(text) => ConfigValue::Single(text),
            Setting::List(items) => ConfigValue::List(items),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load an explicit file, or `prisma-joi.toml` from `cwd` when present.
    pub fn discover(cwd: &Path, explicit: Option<&Path>) -> CliResult<Self> {
        match explicit {
            Some(path) if !path.exists() => Err(CliError::Config(format!(
                "Config file not found: {}",
                path.display()
            ))),
            Some(path) => Self::load(path),
            None => {
                let path = cwd.join(CONFIG_FILE_NAME);
                if path.exists() {
                    Self::load(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// The `[generator]` table as raw generator configuration.
    pub fn into_raw(self) -> RawConfig {
        self.generator
            .into_iter()
            .map(|(key, value)| (key, value.into()))
            .collect()
    }
}

/// Parse repeated `KEY=VALUE` overrides. Later keys win.
pub fn parse_overrides(pairs: &[String]) -> CliResult<RawConfig> {
    let mut raw = RawConfig::new();
    for pair in pairs {
        let Some((key, value)) = pair.split_once('=') else {
            return Err(CliError::Override(pair.clone()));
        };
        let key = key.trim();
        if key.is_empty() {
            return Err(CliError::Override(pair.clone()));
        }
        raw.insert(key.to_string(), ConfigValue::from(value.trim()));
    }
    Ok(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_parse_generator_table() {
        let config: Config = toml::from_str(
            r#"
            [generator]
            directoryStrategy = "by-model"
            generateIndex = false
            includeTypes = ["find", "filter"]
            "#,
        )
        .unwrap();

        let raw = config.into_raw();
        assert_eq!(raw["directoryStrategy"], ConfigValue::from("by-model"));
        assert_eq!(raw["generateIndex"], ConfigValue::from("false"));
        assert_eq!(
            raw["includeTypes"],
            ConfigValue::List(vec!["find".into(), "filter".into()])
        );
    }

    #[test]
    fn test_discover() {
        let dir = TempDir::new().unwrap();
        assert!(Config::discover(dir.path(), None).unwrap().generator.is_empty());

        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            Config::discover(dir.path(), Some(missing.as_path())),
            Err(CliError::Config(_))
        ));

        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[generator]\nbaseDirectory = \"validation\"\n",
        )
        .unwrap();
        let config = Config::discover(dir.path(), None).unwrap();
        assert_eq!(
            config.generator["baseDirectory"],
            Setting::Text("validation".into())
        );
    }

    #[test]
    fn test_parse_overrides() {
        let raw = parse_overrides(&[
            "directoryStrategy=flat".into(),
            "includeTypes=find,filter".into(),
            "directoryStrategy = grouped".into(),
        ])
        .unwrap();
        assert_eq!(raw.len(), 2);
        assert_eq!(raw["directoryStrategy"], ConfigValue::from("grouped"));
        assert_eq!(raw["includeTypes"].items(), vec!["find", "filter"]);

        assert!(matches!(
            parse_overrides(&["flat".into()]),
            Err(CliError::Override(_))
        ));
        assert!(matches!(
            parse_overrides(&["=flat".into()]),
            Err(CliError::Override(_))
        ));
    }
}
