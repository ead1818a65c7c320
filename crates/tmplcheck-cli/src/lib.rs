//! # tmplcheck-cli — Configuration Template Gate
//!
//! Provides the `tmplcheck` command-line interface: load a configuration
//! file and a template file, optionally lint the configuration first,
//! validate the configuration's structure against the template, print the
//! findings, and exit with a status CI pipelines can gate on.
//!
//! ```bash
//! tmplcheck config.yaml template.yaml
//! tmplcheck config.json template.json --strict --format json
//! tmplcheck app.conf app.template --file-type yaml --lint
//! ```
//!
//! ## Exit Status
//!
//! | Code | Meaning                                                     |
//! |------|-------------------------------------------------------------|
//! | 0    | configuration is valid (warnings allowed)                   |
//! | 1    | configuration is invalid (at least one error finding)       |
//! | 2    | the run failed: missing file, parse error, lint failure, ...|
//!
//! ## Crate Policy
//!
//! - Argument parsing and rendering live here; comparison logic lives in
//!   `tmplcheck-core`, loading and linting in `tmplcheck-loader`.
//! - Reports go to stdout; logs go to stderr.

pub mod check;
pub mod report;

/// Exit status for a valid configuration.
pub const EXIT_VALID: u8 = 0;

/// Exit status for a configuration with at least one error finding.
pub const EXIT_INVALID: u8 = 1;

/// Exit status for a run that could not produce a verdict.
pub const EXIT_FAILURE: u8 = 2;
