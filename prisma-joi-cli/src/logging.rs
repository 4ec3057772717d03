//! Tracing subscriber setup.
//!
//! `RUST_LOG` wins when set. Otherwise the filter is `warn`, or `debug` for
//! the prisma-joi crates with `--verbose`. Logs go to stderr so generated
//! listings on stdout stay clean.

use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static INIT: Once = Once::new();

/// Filter directives for the given verbosity.
pub fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "warn,prisma_joi_dmmf=debug,prisma_joi_codegen=debug,prisma_joi_cli=debug"
    } else {
        "warn"
    }
}

/// Initialize logging once per process.
pub fn init(verbose: bool) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .init();

        tracing::debug!(verbose, "logging initialized");
    });
}
