//! # Check Command
//!
//! Lint (optional), load, validate, render. `--file_type` and
//! `--ignore_missing` are accepted as aliases of the hyphenated flags.
//!
//! One file type is resolved for the whole run (explicit `--file-type`, else
//! the configuration file's extension) and used for both documents.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::builder::{PossibleValuesParser, TypedValueParser};
use clap::Args;

use tmplcheck_core::{validate, Policy};
use tmplcheck_loader::{load_document, FileType, Linter};

use crate::report::{render, OutputFormat};
use crate::{EXIT_INVALID, EXIT_VALID};

/// Arguments for a `tmplcheck` run.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the configuration file to validate.
    #[arg(value_name = "CONFIG_FILE")]
    pub config_file: PathBuf,

    /// Path to the template file to validate against.
    #[arg(value_name = "TEMPLATE_FILE")]
    pub template_file: PathBuf,

    /// File type of both documents (json or yaml). Inferred from the
    /// configuration file extension if omitted.
    #[arg(
        long,
        alias = "file_type",
        value_name = "TYPE",
        value_parser = file_type_parser()
    )]
    pub file_type: Option<FileType>,

    /// Run yamllint/jsonlint on the configuration file before validating.
    #[arg(long)]
    pub lint: bool,

    /// Every template key must be present in the configuration.
    #[arg(long)]
    pub strict: bool,

    /// Do not report configuration keys missing relative to the template.
    #[arg(long, alias = "ignore_missing")]
    pub ignore_missing: bool,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Fold findings beneath each top-level key into one summary finding.
    #[arg(long)]
    pub summary: bool,
}

/// `json` / `yaml`, listed as possible values in `--help`.
fn file_type_parser() -> impl TypedValueParser<Value = FileType> {
    PossibleValuesParser::new([FileType::Json.as_str(), FileType::Yaml.as_str()])
        .try_map(|name| name.parse::<FileType>())
}

impl CheckArgs {
    /// Validation policy selected by the flags.
    pub fn policy(&self) -> Policy {
        Policy {
            strict: self.strict,
            ignore_missing: self.ignore_missing,
        }
    }
}

/// Execute one check, writing the report to `out`.
///
/// Returns exit code: 0 if the configuration is valid, 1 if it has error
/// findings. Any failure before a verdict (type inference, lint, load,
/// root shape) is returned as an error and no report is written.
pub fn run_check(args: &CheckArgs, linter: &dyn Linter, out: &mut dyn Write) -> Result<u8> {
    let file_type = FileType::resolve(args.file_type, &args.config_file)
        .context("could not determine the configuration file type")?;

    tracing::debug!(
        config = %args.config_file.display(),
        template = %args.template_file.display(),
        %file_type,
        "resolved file type"
    );

    if args.lint {
        linter
            .lint(&args.config_file, file_type)
            .context("linting failed; aborting validation")?;
    }

    let config = load_document(&args.config_file, file_type)
        .context("failed to load configuration")?;
    let template = load_document(&args.template_file, file_type)
        .context("failed to load template")?;

    let policy = args.policy();
    tracing::debug!(
        strict = policy.strict,
        ignore_missing = policy.ignore_missing,
        "validating configuration"
    );

    let report = validate(&config, &template, policy).context("cannot validate configuration")?;
    let report = if args.summary {
        report.collapsed()
    } else {
        report
    };

    render(&report, args.format, out).context("failed to write report")?;

    if report.is_valid() {
        tracing::info!(warnings = report.warning_count(), "configuration is valid");
        Ok(EXIT_VALID)
    } else {
        tracing::info!(
            errors = report.error_count(),
            warnings = report.warning_count(),
            "configuration is invalid"
        );
        Ok(EXIT_INVALID)
    }
}
