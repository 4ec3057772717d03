//! # prisma-joi
//!
//! Generate Joi validation schemas from a Prisma DMMF description.
//!
//! prisma-joi provides:
//! - Parsing of the generator options document Prisma hands to generators
//! - One TypeScript module per enum, input object and model operation
//! - Filter strategies to choose which artifact kinds are emitted
//! - Flat, grouped or per-model directory layouts with index files
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use prisma_joi::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let options = load_options("generator-options.json")?;
//!     let report = generate(&options, "src/generated").await?;
//!
//!     println!("{} schemas, {} objects, {} enums", report.schemas, report.objects, report.enums);
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// DMMF document model and ingestion.
pub mod dmmf {
    pub use prisma_joi_dmmf::*;
}

/// Configuration, mapping and emission of Joi modules.
pub mod codegen {
    pub use prisma_joi_codegen::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::codegen::{
        ArtifactKind, DirectoryStrategy, FilterStrategy, GenError, GenResult, GenerationReport,
        Generator, RunOptions, ValidatedConfig, generate,
    };
    pub use crate::dmmf::{GeneratorOptions, load_options, parse_options};
}

// Re-export key types at the crate root
pub use codegen::{GenError, GenerationReport, Generator, RunOptions, generate};
pub use dmmf::{DmmfError, GeneratorOptions};
