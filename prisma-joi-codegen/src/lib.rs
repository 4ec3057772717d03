//! # prisma-joi-codegen
//!
//! Joi validation-schema generation for Prisma DMMF descriptions.
//!
//! This crate provides:
//! - Typed generator configuration with filter and directory strategies
//! - Field-to-Joi expression mapping over closed type shapes
//! - Emitters for enum, input object and operation modules plus index files
//! - A dependency-ordered artifact registry driving one generation run
//!
//! ## Example
//!
//! ```rust,ignore
//! use prisma_joi_codegen::{Generator, RunOptions};
//! use prisma_joi_dmmf::load_options;
//!
//! let options = load_options("generator-options.json")?;
//! let report = Generator::new().run(&options, &RunOptions::default()).await?;
//! println!("wrote {} files", report.files.len());
//! ```

pub mod artifact;
pub mod config;
pub mod context;
pub mod emitter;
pub mod error;
pub mod format;
pub mod generators;
pub mod mapper;
pub mod paths;
pub mod pipeline;
pub mod registry;
pub mod session;
pub mod writer;

pub use artifact::{ArtifactKind, FileInfo, FileKind};
pub use config::{
    ConfigError, ConfigResult, DirectoryStrategy, FilterStrategy, RawConfig, ValidatedConfig,
};
pub use error::{GenError, GenResult};
pub use format::{PassThrough, SourceFormatter, TidyFormatter};
pub use mapper::{FieldExpr, ReferenceScope, TypeMapper};
pub use paths::PathResolver;
pub use pipeline::{GenerationReport, Generator, RunOptions, generate, layered_config};
pub use registry::{ArtifactGenerator, ArtifactMetadata, ArtifactRegistry};
pub use writer::{FileWriter, FsWriter, MemoryWriter};
