//! Generator configuration.
//!
//! Prisma passes generator configuration as raw strings (or string lists).
//! [`ValidatedConfig::parse`] turns those into a typed configuration once,
//! up front, so the rest of the pipeline never re-reads raw values.
//!
//! ## Keys
//!
//! | key | values | default |
//! |-----|--------|---------|
//! | `output` | path | generator output |
//! | `filterStrategy` | `selective`, `whitelist`, `blacklist` | `selective` |
//! | `includeTypes` | kind list (whitelist) | |
//! | `excludeTypes` | kind list (blacklist) | |
//! | `<kind>` | boolean flag (selective) | `true` |
//! | `directoryStrategy` | `flat`, `grouped`, `by-model` | `grouped` |
//! | `baseDirectory` | directory name | `schemas` |
//! | `objectsDirectory` | directory name | `objects` |
//! | `enumsDirectory` | directory name | `enums` |
//! | `modelsDirectory` | directory name | `models` |
//! | `generateIndex` | boolean | `true` |
//! | `schemaFilePattern` | pattern | `{operation}.schema` |
//! | `objectFilePattern` | pattern | `{name}.schema` |
//! | `enumFilePattern` | pattern | `{name}.schema` |
//!
//! `enabledTypes` and `disabledTypes` are accepted as legacy spellings of
//! `includeTypes` and `excludeTypes`.

mod error;

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::LazyLock;

use indexmap::IndexMap;
use prisma_joi_dmmf::ConfigValue;
use regex_lite::Regex;
use tracing::{debug, warn};

use crate::artifact::ArtifactKind;

pub use error::{ConfigError, ConfigResult};

/// Raw configuration as handed over by the host.
pub type RawConfig = IndexMap<String, ConfigValue>;

static DIRECTORY_NAME: LazyLock<Result<Regex, regex_lite::Error>> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$"));

const PLACEHOLDERS: &[&str] = &["{operation}", "{name}", "{type}"];

const KNOWN_KEYS: &[&str] = &[
    "output",
    "filterStrategy",
    "includeTypes",
    "excludeTypes",
    "enabledTypes",
    "disabledTypes",
    "directoryStrategy",
    "baseDirectory",
    "objectsDirectory",
    "enumsDirectory",
    "modelsDirectory",
    "generateIndex",
    "schemaFilePattern",
    "objectFilePattern",
    "enumFilePattern",
];

/// How the enabled kind set is derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterStrategy {
    /// Per-kind boolean flags, everything enabled by default.
    #[default]
    Selective,
    /// Only the kinds in `includeTypes`.
    Whitelist,
    /// Every kind except those in `excludeTypes`.
    Blacklist,
}

impl FilterStrategy {
    fn parse(value: &str) -> ConfigResult<Self> {
        match value.trim().to_lowercase().as_str() {
            "selective" => Ok(Self::Selective),
            "whitelist" => Ok(Self::Whitelist),
            "blacklist" => Ok(Self::Blacklist),
            _ => Err(ConfigError::InvalidValue {
                field: "filterStrategy".into(),
                value: value.to_string(),
                expected: "selective, whitelist, blacklist".into(),
            }),
        }
    }

    /// The configuration spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Selective => "selective",
            Self::Whitelist => "whitelist",
            Self::Blacklist => "blacklist",
        }
    }
}

impl std::fmt::Display for FilterStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output directory layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DirectoryStrategy {
    /// Everything in the base directory.
    Flat,
    /// Schemas in the base directory, objects and enums in subdirectories.
    #[default]
    Grouped,
    /// One directory per model.
    ByModel,
}

impl DirectoryStrategy {
    fn parse(value: &str) -> ConfigResult<Self> {
        match value.trim().to_lowercase().as_str() {
            "flat" => Ok(Self::Flat),
            "grouped" => Ok(Self::Grouped),
            "by-model" | "by_model" | "bymodel" => Ok(Self::ByModel),
            _ => Err(ConfigError::InvalidValue {
                field: "directoryStrategy".into(),
                value: value.to_string(),
                expected: "flat, grouped, by-model".into(),
            }),
        }
    }

    /// The configuration spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Grouped => "grouped",
            Self::ByModel => "by-model",
        }
    }
}

impl std::fmt::Display for DirectoryStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Directory names used by the layouts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryNames {
    pub base: String,
    pub objects: String,
    pub enums: String,
    pub models: String,
}

impl Default for DirectoryNames {
    fn default() -> Self {
        Self {
            base: "schemas".into(),
            objects: "objects".into(),
            enums: "enums".into(),
            models: "models".into(),
        }
    }
}

/// File naming patterns, without extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingPatterns {
    pub schema: String,
    pub object: String,
    pub enumeration: String,
}

impl Default for NamingPatterns {
    fn default() -> Self {
        Self {
            schema: "{operation}.schema".into(),
            object: "{name}.schema".into(),
            enumeration: "{name}.schema".into(),
        }
    }
}

/// Typed, validated generator configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedConfig {
    /// Output directory from configuration, if any.
    pub output: Option<PathBuf>,
    pub filter_strategy: FilterStrategy,
    pub directory_strategy: DirectoryStrategy,
    pub directories: DirectoryNames,
    pub naming: NamingPatterns,
    pub generate_index: bool,
    enabled: BTreeSet<ArtifactKind>,
}

impl Default for ValidatedConfig {
    fn default() -> Self {
        Self {
            output: None,
            filter_strategy: FilterStrategy::default(),
            directory_strategy: DirectoryStrategy::default(),
            directories: DirectoryNames::default(),
            naming: NamingPatterns::default(),
            generate_index: true,
            enabled: ArtifactKind::ALL.into_iter().collect(),
        }
    }
}

impl ValidatedConfig {
    /// Validate raw configuration.
    pub fn parse(raw: &RawConfig) -> ConfigResult<Self> {
        let mut strategy = single(raw, "filterStrategy")?
            .map(FilterStrategy::parse)
            .transpose()?;

        let mut include = kind_list(raw, "includeTypes")?;
        let mut exclude = kind_list(raw, "excludeTypes")?;

        if include.is_none() {
            if let Some(legacy) = kind_list(raw, "enabledTypes")? {
                debug!("normalizing legacy `enabledTypes`");
                include = Some(legacy);
                strategy.get_or_insert(FilterStrategy::Whitelist);
            }
        }
        if exclude.is_none() {
            if let Some(legacy) = kind_list(raw, "disabledTypes")? {
                debug!("normalizing legacy `disabledTypes`");
                exclude = Some(legacy);
                strategy.get_or_insert(FilterStrategy::Blacklist);
            }
        }

        let strategy = strategy.unwrap_or_default();
        let flags = kind_flags(raw, strategy)?;

        let enabled: BTreeSet<ArtifactKind> = match strategy {
            FilterStrategy::Selective => {
                reject_list(strategy, "includeTypes", &include)?;
                reject_list(strategy, "excludeTypes", &exclude)?;
                ArtifactKind::ALL
                    .into_iter()
                    .filter(|kind| flags.get(kind).copied().unwrap_or(true))
                    .collect()
            }
            FilterStrategy::Whitelist => {
                reject_list(strategy, "excludeTypes", &exclude)?;
                require_list(strategy, "includeTypes", include)?
            }
            FilterStrategy::Blacklist => {
                reject_list(strategy, "includeTypes", &include)?;
                let excluded = require_list(strategy, "excludeTypes", exclude)?;
                ArtifactKind::ALL
                    .into_iter()
                    .filter(|kind| !excluded.contains(kind))
                    .collect()
            }
        };

        if enabled.is_empty() {
            return Err(ConfigError::EmptySelection);
        }

        let defaults = DirectoryNames::default();
        let directories = DirectoryNames {
            base: directory(raw, "baseDirectory", defaults.base)?,
            objects: directory(raw, "objectsDirectory", defaults.objects)?,
            enums: directory(raw, "enumsDirectory", defaults.enums)?,
            models: directory(raw, "modelsDirectory", defaults.models)?,
        };

        let defaults = NamingPatterns::default();
        let naming = NamingPatterns {
            schema: pattern(raw, "schemaFilePattern", defaults.schema)?,
            object: pattern(raw, "objectFilePattern", defaults.object)?,
            enumeration: pattern(raw, "enumFilePattern", defaults.enumeration)?,
        };

        let directory_strategy = single(raw, "directoryStrategy")?
            .map(DirectoryStrategy::parse)
            .transpose()?
            .unwrap_or_default();

        let generate_index = single(raw, "generateIndex")?
            .map(|v| parse_bool("generateIndex", v))
            .transpose()?
            .unwrap_or(true);

        let output = single(raw, "output")?
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        for key in raw.keys() {
            if !KNOWN_KEYS.contains(&key.as_str()) && ArtifactKind::from_name(key).is_none() {
                warn!(key = %key, "ignoring unknown configuration key");
            }
        }

        debug!(
            strategy = %strategy,
            layout = %directory_strategy,
            enabled = enabled.len(),
            "validated configuration"
        );

        Ok(Self {
            output,
            filter_strategy: strategy,
            directory_strategy,
            directories,
            naming,
            generate_index,
            enabled,
        })
    }

    /// Whether a kind is enabled.
    pub fn is_enabled(&self, kind: ArtifactKind) -> bool {
        self.enabled.contains(&kind)
    }

    /// Enabled kinds in canonical order.
    pub fn enabled_kinds(&self) -> impl Iterator<Item = ArtifactKind> + '_ {
        self.enabled.iter().copied()
    }

    /// Builder-style override of the directory strategy.
    pub fn with_directory_strategy(mut self, strategy: DirectoryStrategy) -> Self {
        self.directory_strategy = strategy;
        self
    }
}

/// Parse a boolean flag value.
pub fn parse_bool(field: &str, value: &str) -> ConfigResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidBoolean {
            field: field.to_string(),
            value: value.to_string(),
        }),
    }
}

fn single<'a>(raw: &'a RawConfig, field: &str) -> ConfigResult<Option<&'a str>> {
    match raw.get(field) {
        None => Ok(None),
        Some(value) => value
            .as_single()
            .map(Some)
            .ok_or_else(|| ConfigError::ExpectedSingle {
                field: field.to_string(),
            }),
    }
}

fn kind_list(raw: &RawConfig, field: &str) -> ConfigResult<Option<BTreeSet<ArtifactKind>>> {
    let Some(value) = raw.get(field) else {
        return Ok(None);
    };

    value
        .items()
        .into_iter()
        .map(|item| {
            ArtifactKind::from_name(&item).ok_or_else(|| ConfigError::InvalidKind {
                field: field.to_string(),
                value: item,
                valid: ArtifactKind::valid_names(),
            })
        })
        .collect::<ConfigResult<BTreeSet<_>>>()
        .map(Some)
}

fn kind_flags(
    raw: &RawConfig,
    strategy: FilterStrategy,
) -> ConfigResult<IndexMap<ArtifactKind, bool>> {
    let mut flags = IndexMap::new();
    for (key, value) in raw {
        if KNOWN_KEYS.contains(&key.as_str()) {
            continue;
        }
        let Some(kind) = ArtifactKind::from_name(key) else {
            continue;
        };
        if strategy != FilterStrategy::Selective {
            warn!(
                flag = %key,
                strategy = %strategy,
                "per-kind flag ignored outside selective filtering"
            );
            continue;
        }
        let value = value.as_single().ok_or_else(|| ConfigError::ExpectedSingle {
            field: key.clone(),
        })?;
        flags.insert(kind, parse_bool(key, value)?);
    }
    Ok(flags)
}

fn reject_list(
    strategy: FilterStrategy,
    field: &str,
    list: &Option<BTreeSet<ArtifactKind>>,
) -> ConfigResult<()> {
    match list {
        Some(_) => Err(ConfigError::ConflictingList {
            strategy: strategy.to_string(),
            field: field.to_string(),
        }),
        None => Ok(()),
    }
}

fn require_list(
    strategy: FilterStrategy,
    field: &str,
    list: Option<BTreeSet<ArtifactKind>>,
) -> ConfigResult<BTreeSet<ArtifactKind>> {
    match list {
        Some(kinds) if !kinds.is_empty() => Ok(kinds),
        _ => Err(ConfigError::MissingList {
            strategy: strategy.to_string(),
            field: field.to_string(),
        }),
    }
}

fn directory(raw: &RawConfig, field: &str, default: String) -> ConfigResult<String> {
    let Some(value) = single(raw, field)? else {
        return Ok(default);
    };
    let value = value.trim();
    let valid = DIRECTORY_NAME
        .as_ref()
        .is_ok_and(|re| re.is_match(value));
    if valid {
        Ok(value.to_string())
    } else {
        Err(ConfigError::InvalidDirectoryName {
            field: field.to_string(),
            value: value.to_string(),
        })
    }
}

fn pattern(raw: &RawConfig, field: &str, default: String) -> ConfigResult<String> {
    let Some(value) = single(raw, field)? else {
        return Ok(default);
    };
    let invalid = |reason: &str| ConfigError::InvalidPattern {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    };

    let value = value.trim();
    if !PLACEHOLDERS.iter().any(|p| value.contains(p)) {
        return Err(invalid("no placeholder"));
    }
    if value.contains('/') || value.contains('\\') {
        return Err(invalid("contains a path separator"));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn raw(pairs: &[(&str, &str)]) -> RawConfig {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), ConfigValue::from(*v)))
            .collect()
    }

    fn kinds(config: &ValidatedConfig) -> Vec<&'static str> {
        config.enabled_kinds().map(|k| k.name()).collect()
    }

    #[test]
    fn test_defaults() {
        let config = ValidatedConfig::parse(&RawConfig::new()).unwrap();
        assert_eq!(config, ValidatedConfig::default());
        assert_eq!(config.filter_strategy, FilterStrategy::Selective);
        assert_eq!(config.directory_strategy, DirectoryStrategy::Grouped);
        assert_eq!(config.enabled_kinds().count(), 12);
        assert!(config.generate_index);
        assert_eq!(config.directories.base, "schemas");
        assert_eq!(config.naming.schema, "{operation}.schema");
    }

    #[test]
    fn test_selective_flags() {
        let config = ValidatedConfig::parse(&raw(&[
            ("aggregate", "false"),
            ("groupBy", "NO"),
            ("find", " yes "),
        ]))
        .unwrap();
        assert!(!config.is_enabled(ArtifactKind::Aggregate));
        assert!(!config.is_enabled(ArtifactKind::GroupBy));
        assert!(config.is_enabled(ArtifactKind::Find));
        assert_eq!(config.enabled_kinds().count(), 10);
    }

    #[test]
    fn test_invalid_boolean() {
        let err = ValidatedConfig::parse(&raw(&[("create", "maybe")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidBoolean {
                field: "create".into(),
                value: "maybe".into()
            }
        );
    }

    #[test]
    fn test_whitelist() {
        let config = ValidatedConfig::parse(&raw(&[
            ("filterStrategy", "whitelist"),
            ("includeTypes", "enums, objects,find"),
        ]))
        .unwrap();
        assert_eq!(kinds(&config), vec!["find", "enums", "objects"]);
    }

    #[test]
    fn test_whitelist_requires_list() {
        let err = ValidatedConfig::parse(&raw(&[("filterStrategy", "whitelist")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingList { ref field, .. } if field == "includeTypes"));

        let err = ValidatedConfig::parse(&raw(&[
            ("filterStrategy", "whitelist"),
            ("includeTypes", " , "),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingList { .. }));
    }

    #[test]
    fn test_blacklist() {
        let config = ValidatedConfig::parse(&raw(&[
            ("filterStrategy", "blacklist"),
            ("excludeTypes", "aggregate,groupBy"),
        ]))
        .unwrap();
        assert!(!config.is_enabled(ArtifactKind::Aggregate));
        assert!(!config.is_enabled(ArtifactKind::GroupBy));
        assert_eq!(config.enabled_kinds().count(), 10);
    }

    #[test]
    fn test_blacklist_everything_is_empty_selection() {
        let all = ArtifactKind::valid_names();
        let err = ValidatedConfig::parse(&raw(&[
            ("filterStrategy", "blacklist"),
            ("excludeTypes", all.as_str()),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::EmptySelection);
    }

    #[test]
    fn test_selective_all_disabled_is_empty_selection() {
        let pairs: Vec<(&str, &str)> = ArtifactKind::ALL.iter().map(|k| (k.name(), "0")).collect();
        let err = ValidatedConfig::parse(&raw(&pairs)).unwrap_err();
        assert_eq!(err, ConfigError::EmptySelection);
    }

    #[test]
    fn test_conflicting_lists() {
        let err = ValidatedConfig::parse(&raw(&[("includeTypes", "find")])).unwrap_err();
        // No strategy given: selective is the default, which takes no lists.
        assert!(matches!(err, ConfigError::ConflictingList { ref field, .. } if field == "includeTypes"));

        let err = ValidatedConfig::parse(&raw(&[
            ("filterStrategy", "whitelist"),
            ("includeTypes", "find"),
            ("excludeTypes", "create"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::ConflictingList { ref field, .. } if field == "excludeTypes"));
    }

    #[test]
    fn test_invalid_kind() {
        let err = ValidatedConfig::parse(&raw(&[
            ("filterStrategy", "blacklist"),
            ("excludeTypes", "find,creates"),
        ]))
        .unwrap_err();
        match err {
            ConfigError::InvalidKind { value, valid, .. } => {
                assert_eq!(value, "creates");
                assert!(valid.contains("orderBy"));
            }
            other => panic!("Expected InvalidKind, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_strategy() {
        let err = ValidatedConfig::parse(&raw(&[("filterStrategy", "greylist")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "filterStrategy"));
    }

    #[test]
    fn test_legacy_enabled_types() {
        let config = ValidatedConfig::parse(&raw(&[("enabledTypes", "enums")])).unwrap();
        assert_eq!(config.filter_strategy, FilterStrategy::Whitelist);
        assert_eq!(kinds(&config), vec!["enums"]);
    }

    #[test]
    fn test_legacy_disabled_types() {
        let config = ValidatedConfig::parse(&raw(&[("disabledTypes", "delete")])).unwrap();
        assert_eq!(config.filter_strategy, FilterStrategy::Blacklist);
        assert!(!config.is_enabled(ArtifactKind::Delete));
    }

    #[test]
    fn test_canonical_list_wins_over_legacy() {
        let config = ValidatedConfig::parse(&raw(&[
            ("filterStrategy", "whitelist"),
            ("includeTypes", "find"),
            ("enabledTypes", "enums"),
        ]))
        .unwrap();
        assert_eq!(kinds(&config), vec!["find"]);
    }

    #[test]
    fn test_flags_ignored_under_whitelist() {
        let config = ValidatedConfig::parse(&raw(&[
            ("filterStrategy", "whitelist"),
            ("includeTypes", "find"),
            ("find", "false"),
        ]))
        .unwrap();
        assert!(config.is_enabled(ArtifactKind::Find));
    }

    #[test]
    fn test_list_values() {
        let mut config = RawConfig::new();
        config.insert("filterStrategy".into(), "whitelist".into());
        config.insert(
            "includeTypes".into(),
            ConfigValue::List(vec!["find".into(), "filter,enums".into()]),
        );
        let config = ValidatedConfig::parse(&config).unwrap();
        assert_eq!(kinds(&config), vec!["filter", "find", "enums"]);
    }

    #[test]
    fn test_expected_single() {
        let mut config = RawConfig::new();
        config.insert("directoryStrategy".into(), ConfigValue::List(vec!["flat".into()]));
        let err = ValidatedConfig::parse(&config).unwrap_err();
        assert!(matches!(err, ConfigError::ExpectedSingle { .. }));
    }

    #[test]
    fn test_directory_strategy_spellings() {
        for spelling in ["by-model", "BY_MODEL", "byModel"] {
            let config = ValidatedConfig::parse(&raw(&[("directoryStrategy", spelling)])).unwrap();
            assert_eq!(config.directory_strategy, DirectoryStrategy::ByModel);
        }
        let config = ValidatedConfig::parse(&raw(&[("directoryStrategy", "flat")])).unwrap();
        assert_eq!(config.directory_strategy, DirectoryStrategy::Flat);
        assert!(ValidatedConfig::parse(&raw(&[("directoryStrategy", "nested")])).is_err());
    }

    #[test]
    fn test_directory_names() {
        let config = ValidatedConfig::parse(&raw(&[
            ("baseDirectory", "validation"),
            ("objectsDirectory", "input_types"),
            ("modelsDirectory", "by-model"),
        ]))
        .unwrap();
        assert_eq!(config.directories.base, "validation");
        assert_eq!(config.directories.objects, "input_types");
        assert_eq!(config.directories.enums, "enums");
        assert_eq!(config.directories.models, "by-model");

        for bad in ["../escape", "a b", "nested/dir", ""] {
            let err = ValidatedConfig::parse(&raw(&[("enumsDirectory", bad)])).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidDirectoryName { .. }), "{bad}");
        }
    }

    #[test]
    fn test_naming_patterns() {
        let config =
            ValidatedConfig::parse(&raw(&[("schemaFilePattern", "{operation}-{type}")])).unwrap();
        assert_eq!(config.naming.schema, "{operation}-{type}");

        let err = ValidatedConfig::parse(&raw(&[("objectFilePattern", "static")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { .. }));

        let err = ValidatedConfig::parse(&raw(&[("enumFilePattern", "enums/{name}")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { .. }));
    }

    #[test]
    fn test_generate_index_and_output() {
        let config = ValidatedConfig::parse(&raw(&[
            ("generateIndex", "false"),
            ("output", " ./generated "),
        ]))
        .unwrap();
        assert!(!config.generate_index);
        assert_eq!(config.output, Some(PathBuf::from("./generated")));
    }

    #[test]
    fn test_parse_bool() {
        for v in ["true", "TRUE", "1", "yes", " Yes "] {
            assert!(parse_bool("f", v).unwrap());
        }
        for v in ["false", "0", "no", "No"] {
            assert!(!parse_bool("f", v).unwrap());
        }
        assert!(parse_bool("f", "on").is_err());
    }
}
