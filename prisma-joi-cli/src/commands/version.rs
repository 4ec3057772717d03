//! `prisma-joi version` command - Display version information.

use prisma_joi_codegen::ArtifactKind;
use prisma_joi_dmmf::SUPPORTED_CLIENT_PROVIDERS;

use crate::error::CliResult;
use crate::output::{self, kv};

/// Package version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name
const NAME: &str = env!("CARGO_PKG_NAME");

/// Run the version command
pub async fn run() -> CliResult<()> {
    output::header("prisma-joi");

    kv("Version", VERSION);
    kv("Binary", NAME);

    #[cfg(debug_assertions)]
    let build_mode = "debug";
    #[cfg(not(debug_assertions))]
    let build_mode = "release";

    kv("Build", build_mode);
    kv("Client generators", &SUPPORTED_CLIENT_PROVIDERS.join(", "));
    kv("Artifact kinds", &ArtifactKind::valid_names());

    output::newline();
    output::section("Components");
    kv("prisma-joi-dmmf", env!("CARGO_PKG_VERSION"));
    kv("prisma-joi-codegen", env!("CARGO_PKG_VERSION"));

    output::newline();
    output::dim("https://github.com/pegasusheavy/prisma-joi");

    Ok(())
}
