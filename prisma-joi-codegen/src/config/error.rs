//! Configuration errors.

// These warnings are false positives - the fields are used by derive macros
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

/// Result type for configuration parsing.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while validating generator configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum ConfigError {
    /// A value outside a closed set of choices.
    #[error("invalid value `{value}` for `{field}`")]
    #[diagnostic(
        code(prisma_joi::config::invalid_value),
        help("expected one of: {expected}")
    )]
    InvalidValue {
        field: String,
        value: String,
        expected: String,
    },

    /// An unknown artifact kind in a kind list.
    #[error("unknown artifact kind `{value}` in `{field}`")]
    #[diagnostic(
        code(prisma_joi::config::invalid_kind),
        help("valid kinds are: {valid}")
    )]
    InvalidKind {
        field: String,
        value: String,
        valid: String,
    },

    /// The strategy needs a list that was absent or empty.
    #[error("`{strategy}` filtering requires a non-empty `{field}` list")]
    #[diagnostic(
        code(prisma_joi::config::missing_list),
        help("set `{field}` to a comma-separated list of artifact kinds")
    )]
    MissingList { strategy: String, field: String },

    /// A list that does not belong to the active strategy.
    #[error("`{field}` cannot be used with `{strategy}` filtering")]
    #[diagnostic(
        code(prisma_joi::config::conflicting_list),
        help("remove `{field}` or change `filterStrategy`")
    )]
    ConflictingList { strategy: String, field: String },

    /// Every artifact kind ended up disabled.
    #[error("configuration disables every artifact kind")]
    #[diagnostic(
        code(prisma_joi::config::empty_selection),
        help("enable at least one kind, e.g. `enums`")
    )]
    EmptySelection,

    /// A directory name with characters outside `[a-zA-Z0-9_-]`.
    #[error("invalid directory name `{value}` for `{field}`")]
    #[diagnostic(
        code(prisma_joi::config::invalid_directory),
        help("directory names may only contain letters, digits, `_` and `-`")
    )]
    InvalidDirectoryName { field: String, value: String },

    /// A boolean that could not be parsed.
    #[error("invalid boolean `{value}` for `{field}`")]
    #[diagnostic(
        code(prisma_joi::config::invalid_boolean),
        help("use one of: true, false, 1, 0, yes, no")
    )]
    InvalidBoolean { field: String, value: String },

    /// A file naming pattern that cannot produce a valid file name.
    #[error("invalid file pattern `{value}` for `{field}`: {reason}")]
    #[diagnostic(
        code(prisma_joi::config::invalid_pattern),
        help("patterns may use {{operation}}, {{name}} and {{type}}, without path separators")
    )]
    InvalidPattern {
        field: String,
        value: String,
        reason: String,
    },

    /// A list was given where a single value is expected.
    #[error("`{field}` expects a single value, got a list")]
    #[diagnostic(code(prisma_joi::config::expected_single))]
    ExpectedSingle { field: String },
}
