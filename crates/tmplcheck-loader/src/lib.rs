//! # tmplcheck-loader — Document Loading & Linting
//!
//! Turns configuration and template files into [`tmplcheck_core::Tree`]s.
//!
//! ## Loading (`load`)
//!
//! - [`FileType`] selects JSON or YAML, either explicitly or inferred from a
//!   `.json` / `.yaml` / `.yml` extension.
//! - [`load_document`] reads and parses a file; [`parse_document`] parses
//!   text that is already in memory.
//! - Key order is preserved for both formats so findings follow the order
//!   the document author wrote.
//!
//! ## Linting (`lint`)
//!
//! The [`Linter`] trait is the seam for format checks that run on the raw
//! file before parsing. [`ExternalLinter`] shells out to `yamllint` and
//! `jsonlint`.
//!
//! ## Crate Policy
//!
//! - Depends only on `tmplcheck-core` internally.
//! - Every failure is a structured error; nothing here decides exit codes.

pub mod lint;
pub mod load;

pub use lint::{ExternalLinter, LintError, Linter};
pub use load::{load_document, parse_document, FileType, LoadError};
