//! CLI command implementations.

pub mod check_config;
pub mod generate;
pub mod version;

use std::path::Path;

use prisma_joi_codegen::RunOptions;

use crate::cli::ConfigArgs;
use crate::config::{Config, parse_overrides};
use crate::error::CliResult;

/// Config file defaults and `--set` overrides around the generator block.
pub(crate) fn layered_options(cwd: &Path, args: &ConfigArgs) -> CliResult<RunOptions> {
    let defaults = Config::discover(cwd, args.config.as_deref())?.into_raw();
    let overrides = parse_overrides(&args.set)?;
    Ok(RunOptions {
        defaults,
        overrides,
        output: None,
    })
}
