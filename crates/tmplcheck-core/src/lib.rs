//! # tmplcheck-core — Structural Validation Engine
//!
//! Compares a parsed configuration document against a template document that
//! fixes the expected keys, nesting, and value types. Every divergence is
//! reported as a [`Finding`]; the walk never stops at the first problem.
//!
//! ## Key Types
//!
//! - [`Tree`] — tagged union over `null`, `boolean`, `integer`, `float`,
//!   `text`, `sequence`, and ordered maps. Type comparison is tag comparison.
//! - [`Policy`] — the `strict` / `ignore_missing` flags.
//! - [`Finding`] and [`ValidationReport`] — ordered results of one run.
//! - [`validate()`] — the entry point.
//!
//! ```
//! use tmplcheck_core::{validate, Policy, Tree};
//! use serde_json::json;
//!
//! let template = Tree::from_json(json!({"port": 8080, "host": "x"}));
//! let config = Tree::from_json(json!({"port": "8080"}));
//!
//! let report = validate(&config, &template, Policy::default()).unwrap();
//! assert!(!report.is_valid());
//! assert_eq!(report.error_count(), 1);
//! assert_eq!(report.warning_count(), 1);
//! ```
//!
//! ## Crate Policy
//!
//! - No I/O and no logging. Rendering findings is the caller's job.
//! - Findings are data; only precondition violations are errors
//!   ([`ShapeError`]).
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod finding;
pub mod policy;
pub mod tree;
pub mod validate;

// Re-export primary types for ergonomic imports.
pub use error::ShapeError;
pub use finding::{Finding, FindingKind, KeyPath, Severity, ValidationReport};
pub use policy::Policy;
pub use tree::{Tree, TreeMap, TypeTag};
pub use validate::validate;
