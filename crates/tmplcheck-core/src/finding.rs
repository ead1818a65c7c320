//! # Findings and Reports
//!
//! A [`Finding`] is one structural divergence between a configuration and
//! its template, located by the full [`KeyPath`] from the document root.
//! A [`ValidationReport`] is the ordered sequence of findings produced by a
//! single run, plus the verdict derived from it.
//!
//! ## Ordering
//!
//! Findings appear in template-key order within each map. Nested maps are
//! walked depth-first before the parent moves on to its next key, and the
//! extra-key findings for a map follow all of that map's template keys.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use crate::tree::TypeTag;

/// Ordered key segments from the document root to a value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyPath(Vec<String>);

impl KeyPath {
    /// The empty path, addressing the document root.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Build a path from its segments.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Returns the key segments.
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Returns the number of segments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true for the root path.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the path extended by one key.
    pub fn child(&self, key: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(key.to_string());
        Self(segments)
    }

    pub(crate) fn push(&mut self, key: &str) {
        self.0.push(key.to_string());
    }

    pub(crate) fn pop(&mut self) {
        self.0.pop();
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("(root)");
        }
        f.write_str(&self.0.join("."))
    }
}

/// How serious a finding is. Only `Error` affects the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => f.write_str("warning"),
            Self::Error => f.write_str("error"),
        }
    }
}

/// Category of divergence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    /// A template key is absent from the configuration.
    MissingKey,
    /// A configuration key is not defined by the template.
    ExtraKey,
    /// The configuration value has a different shape than the template value.
    TypeMismatch,
    /// Summary of findings beneath a key, produced by
    /// [`ValidationReport::collapsed`].
    NestedInvalid,
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::MissingKey => "missing key",
            Self::ExtraKey => "extra key",
            Self::TypeMismatch => "type mismatch",
            Self::NestedInvalid => "nested invalid",
        };
        f.write_str(label)
    }
}

/// A single structural divergence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Location of the divergence.
    pub path: KeyPath,
    /// Category of divergence.
    pub kind: FindingKind,
    /// Error or warning.
    pub severity: Severity,
    /// Human-readable description.
    pub detail: String,
    /// Expected type tag, set on type mismatches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<TypeTag>,
    /// Actual type tag, set on type mismatches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<TypeTag>,
}

impl Finding {
    /// A template key absent from the configuration.
    pub fn missing_key(path: KeyPath, severity: Severity) -> Self {
        let detail = match severity {
            Severity::Error => "key is missing from the configuration (strict mode)",
            Severity::Warning => "key is missing from the configuration",
        };
        Self {
            path,
            kind: FindingKind::MissingKey,
            severity,
            detail: detail.to_string(),
            expected: None,
            actual: None,
        }
    }

    /// A configuration key the template does not define.
    pub fn extra_key(path: KeyPath) -> Self {
        Self {
            path,
            kind: FindingKind::ExtraKey,
            severity: Severity::Warning,
            detail: "key is not defined in the template".to_string(),
            expected: None,
            actual: None,
        }
    }

    /// A value whose type tag differs from the template's.
    pub fn type_mismatch(path: KeyPath, expected: TypeTag, actual: TypeTag) -> Self {
        let detail = if actual == TypeTag::Map {
            format!("expected scalar ({expected}), got {actual}")
        } else {
            format!("expected {expected}, got {actual}")
        };
        Self {
            path,
            kind: FindingKind::TypeMismatch,
            severity: Severity::Error,
            detail,
            expected: Some(expected),
            actual: Some(actual),
        }
    }

    /// Summary standing in for `errors + warnings` findings beneath `path`.
    pub fn nested_invalid(path: KeyPath, errors: usize, warnings: usize) -> Self {
        let severity = if errors > 0 {
            Severity::Error
        } else {
            Severity::Warning
        };
        Self {
            path,
            kind: FindingKind::NestedInvalid,
            severity,
            detail: format!("{errors} error(s), {warnings} warning(s) beneath this key"),
            expected: None,
            actual: None,
        }
    }

    /// Returns true if this finding makes the configuration invalid.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.path, self.kind, self.detail)
    }
}

/// Ordered findings of one validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    findings: Vec<Finding>,
}

impl ValidationReport {
    /// Wrap an ordered list of findings.
    pub fn new(findings: Vec<Finding>) -> Self {
        Self { findings }
    }

    /// Valid iff no finding has severity `Error`. Warnings never count.
    pub fn is_valid(&self) -> bool {
        !self.findings.iter().any(Finding::is_error)
    }

    /// Returns all findings in report order.
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Iterates the `Error` findings.
    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.severity == Severity::Error)
    }

    /// Iterates the `Warning` findings.
    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.severity == Severity::Warning)
    }

    /// Returns the number of `Error` findings.
    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    /// Returns the number of `Warning` findings.
    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// Returns the number of findings.
    pub fn len(&self) -> usize {
        self.findings.len()
    }

    /// Returns true if there are no findings at all.
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_findings(self) -> Vec<Finding> {
        self.findings
    }

    /// Summarise findings per top-level key.
    ///
    /// Root-level findings are kept unchanged. Every finding nested beneath a
    /// top-level key is folded into one [`FindingKind::NestedInvalid`] finding
    /// at that key, positioned where the first folded finding was and carrying
    /// the highest folded severity. The verdict never changes.
    pub fn collapsed(&self) -> Self {
        let mut findings: Vec<Finding> = Vec::with_capacity(self.findings.len());
        // top-level key -> (slot in `findings`, errors, warnings)
        let mut groups: HashMap<&str, (usize, usize, usize)> = HashMap::new();

        for finding in &self.findings {
            let head = match finding.path.segments() {
                [head, _, ..] => head,
                _ => {
                    findings.push(finding.clone());
                    continue;
                }
            };
            let group = groups.entry(head.as_str()).or_insert_with(|| {
                let path = KeyPath::from_segments([head.as_str()]);
                findings.push(Finding::nested_invalid(path, 0, 0));
                (findings.len() - 1, 0, 0)
            });
            match finding.severity {
                Severity::Error => group.1 += 1,
                Severity::Warning => group.2 += 1,
            }
        }

        for (slot, errors, warnings) in groups.into_values() {
            let path = findings[slot].path.clone();
            findings[slot] = Finding::nested_invalid(path, errors, warnings);
        }

        Self { findings }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, finding) in self.findings.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {}: {finding}", finding.severity)?;
        }
        Ok(())
    }
}

impl Serialize for ValidationReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct ReportView<'a> {
            valid: bool,
            errors: usize,
            warnings: usize,
            findings: &'a [Finding],
        }

        ReportView {
            valid: self.is_valid(),
            errors: self.error_count(),
            warnings: self.warning_count(),
            findings: &self.findings,
        }
        .serialize(serializer)
    }
}
