//! prisma-joi CLI - Command-line interface for the prisma-joi generator.
//!
//! This crate provides the CLI tool that reads the generator options Prisma
//! emits and writes Joi validation schemas.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
