//! `prisma-joi check-config` command - Validate configuration only.

use prisma_joi_codegen::{ArtifactRegistry, ValidatedConfig, layered_config};
use prisma_joi_dmmf::{GeneratorOptions, load_options};

use crate::cli::CheckConfigArgs;
use crate::error::CliResult;
use crate::output::{self, kv, success};

/// Run the check-config command
pub async fn run(args: CheckConfigArgs) -> CliResult<()> {
    output::header("Check Configuration");

    let cwd = std::env::current_dir()?;
    let run = super::layered_options(&cwd, &args.config)?;

    let options = match &args.input {
        Some(path) => load_options(path)?,
        None => GeneratorOptions::default(),
    };

    let config = ValidatedConfig::parse(&layered_config(&options, &run))?;
    ArtifactRegistry::with_builtins().ensure_dependencies(&config)?;

    kv("Filter strategy", config.filter_strategy.as_str());
    kv("Directory strategy", config.directory_strategy.as_str());
    kv("Base directory", &config.directories.base);
    kv("Index files", if config.generate_index { "yes" } else { "no" });
    if let Some(out) = &config.output {
        kv("Output", &out.display().to_string());
    }

    output::newline();
    output::section("Enabled kinds");
    for kind in config.enabled_kinds() {
        output::list_item(kind.name());
    }

    output::newline();
    success("Configuration is valid");
    Ok(())
}
