//! # prisma-joi-dmmf
//!
//! Prisma DMMF document model for the prisma-joi generator.
//!
//! This crate provides:
//! - Serde types for the `GeneratorOptions` document Prisma hands to generators
//! - Ingestion of input types into closed [`TypeShape`] variants
//! - The upstream client-generator precondition check
//!
//! ## Example
//!
//! ```rust,ignore
//! use prisma_joi_dmmf::{load_options, ensure_client_generator, Catalog};
//!
//! let options = load_options("generator-options.json")?;
//! ensure_client_generator(&options)?;
//!
//! let catalog = Catalog::ingest(&options.dmmf);
//! for object in &catalog.objects {
//!     println!("{} ({} fields)", object.name, object.fields.len());
//! }
//! ```

pub mod ast;
pub mod error;
pub mod parser;
pub mod shape;
pub mod validator;

pub use ast::*;
pub use error::{DmmfError, DmmfResult};
pub use parser::{load_options, parse_document, parse_options};
pub use shape::{
    Candidate, Catalog, EnumDescription, FieldDescription, ModelDescription, ObjectDescription,
    ObjectOrigin, ScalarKind, TypeShape,
};
pub use validator::{SUPPORTED_CLIENT_PROVIDERS, ensure_client_generator};
