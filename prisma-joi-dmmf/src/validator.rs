//! Upstream precondition checks on generator options.

use tracing::debug;

use crate::ast::{GeneratorConfig, GeneratorOptions};
use crate::error::{DmmfError, DmmfResult};

/// Client generator providers whose DMMF this generator understands.
pub const SUPPORTED_CLIENT_PROVIDERS: &[&str] = &["prisma-client-js", "prisma-client"];

/// Ensure the description was produced alongside a recognized client generator.
///
/// Returns the matching generator block.
pub fn ensure_client_generator(options: &GeneratorOptions) -> DmmfResult<&GeneratorConfig> {
    let found = options
        .other_generators
        .iter()
        .find(|g| g.provider_name().is_some_and(is_supported_provider));

    match found {
        Some(generator) => {
            debug!(name = %generator.name, "found client generator");
            Ok(generator)
        }
        None => Err(DmmfError::MissingClientGenerator {
            expected: SUPPORTED_CLIENT_PROVIDERS.join(" or "),
        }),
    }
}

/// Providers may be given as a package name or as a path to its binary.
fn is_supported_provider(provider: &str) -> bool {
    let name = provider
        .trim()
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or(provider);
    SUPPORTED_CLIENT_PROVIDERS.contains(&name)
}
