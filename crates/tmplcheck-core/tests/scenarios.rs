//! Integration tests: the reference scenarios for the structural validator.
//!
//! Each scenario pairs a template with a configuration and pins down the
//! exact findings, their order, and the resulting verdict.

use serde_json::json;
use tmplcheck_core::{validate, FindingKind, Policy, Severity, Tree, TypeTag};

fn tree(value: serde_json::Value) -> Tree {
    Tree::from_json(value)
}

#[test]
fn scenario_a_type_mismatch_and_missing_warning() {
    let template = tree(json!({"port": 8080, "host": "x"}));
    let config = tree(json!({"port": "8080"}));

    let report = validate(&config, &template, Policy::default()).unwrap();

    let findings = report.findings();
    assert_eq!(findings.len(), 2);

    assert_eq!(findings[0].path.to_string(), "port");
    assert_eq!(findings[0].kind, FindingKind::TypeMismatch);
    assert_eq!(findings[0].severity, Severity::Error);
    assert_eq!(findings[0].expected, Some(TypeTag::Integer));
    assert_eq!(findings[0].actual, Some(TypeTag::Text));
    assert_eq!(findings[0].detail, "expected integer, got text");

    assert_eq!(findings[1].path.to_string(), "host");
    assert_eq!(findings[1].kind, FindingKind::MissingKey);
    assert_eq!(findings[1].severity, Severity::Warning);

    assert!(!report.is_valid());
}

#[test]
fn scenario_b_strict_missing_key_is_error() {
    let template = tree(json!({"port": 8080, "host": "x"}));
    let config = tree(json!({"port": "8080"}));

    let report = validate(&config, &template, Policy::strict()).unwrap();

    let kinds: Vec<(String, FindingKind, Severity)> = report
        .findings()
        .iter()
        .map(|f| (f.path.to_string(), f.kind, f.severity))
        .collect();
    assert_eq!(
        kinds,
        vec![
            ("port".to_string(), FindingKind::TypeMismatch, Severity::Error),
            ("host".to_string(), FindingKind::MissingKey, Severity::Error),
        ]
    );
    assert_eq!(report.error_count(), 2);
    assert!(!report.is_valid());
}

#[test]
fn scenario_c_nested_extra_key_is_warning() {
    let template = tree(json!({"a": {"b": 1}}));
    let config = tree(json!({"a": {"b": 1, "c": 2}}));

    let report = validate(&config, &template, Policy::default()).unwrap();

    assert_eq!(report.len(), 1);
    let finding = &report.findings()[0];
    assert_eq!(finding.path.to_string(), "a.c");
    assert_eq!(finding.kind, FindingKind::ExtraKey);
    assert_eq!(finding.severity, Severity::Warning);
    assert!(report.is_valid());
}

#[test]
fn scenario_d_scalar_expected_nested_object_found() {
    let template = tree(json!({"a": 1}));
    let config = tree(json!({"a": {"x": 1}}));

    let report = validate(&config, &template, Policy::default()).unwrap();

    assert_eq!(report.len(), 1);
    let finding = &report.findings()[0];
    assert_eq!(finding.path.to_string(), "a");
    assert_eq!(finding.kind, FindingKind::TypeMismatch);
    assert_eq!(finding.severity, Severity::Error);
    assert_eq!(finding.detail, "expected scalar (integer), got nested object");
    assert!(!report.is_valid());
}

#[test]
fn scenario_c_with_strict_reports_nothing() {
    // The extra-key pass is switched off under strict mode.
    let template = tree(json!({"a": {"b": 1}}));
    let config = tree(json!({"a": {"b": 1, "c": 2}}));

    let report = validate(&config, &template, Policy::strict()).unwrap();
    assert!(report.is_empty());
}

#[test]
fn summary_view_of_nested_divergences() {
    let template = tree(json!({"server": {"port": 1, "tls": {"cert": "x"}}, "name": "x"}));
    let config = tree(json!({"server": {"port": "1", "tls": {"cert": 1, "key": "k"}}}));

    let report = validate(&config, &template, Policy::default()).unwrap();
    assert_eq!(report.len(), 4);

    let collapsed = report.collapsed();
    assert_eq!(collapsed.len(), 2);
    assert_eq!(collapsed.findings()[0].kind, FindingKind::NestedInvalid);
    assert_eq!(collapsed.findings()[0].path.to_string(), "server");
    assert_eq!(
        collapsed.findings()[0].detail,
        "2 error(s), 1 warning(s) beneath this key"
    );
    assert_eq!(collapsed.findings()[1].kind, FindingKind::MissingKey);
    assert!(!collapsed.is_valid());
}
