//! # Structural Validation
//!
//! Recursive comparison of a configuration tree against a template tree.
//!
//! For every template key, in template order:
//!
//! 1. an absent configuration key is classified by the [`Policy`];
//! 2. a template map requires a configuration map and is walked depth-first;
//! 3. any other template value requires a configuration value with the same
//!    [`TypeTag`]. Values themselves are never compared.
//!
//! After the template keys of a map are done, configuration keys unknown to
//! the template are reported as warnings unless the policy suppresses the
//! extra-key pass. Nested findings are attached flatly with their full path;
//! no wrapper finding is added at the parent level.
//!
//! The walk is a pure function of its inputs and visits each key once.

use crate::error::ShapeError;
use crate::finding::{Finding, KeyPath, ValidationReport};
use crate::policy::Policy;
use crate::tree::{Tree, TreeMap};

/// Validate `config` against `template` under `policy`.
///
/// # Errors
///
/// Returns [`ShapeError::ConfigurationRoot`] if the configuration root is not
/// a map, or [`ShapeError::TemplateRoot`] if the template root is not a map.
/// Structural mismatches are reported in the returned
/// [`ValidationReport`], never as errors.
pub fn validate(
    config: &Tree,
    template: &Tree,
    policy: Policy,
) -> Result<ValidationReport, ShapeError> {
    let config = config.as_map().ok_or(ShapeError::ConfigurationRoot {
        found: config.type_tag(),
    })?;
    let template = template.as_map().ok_or(ShapeError::TemplateRoot {
        found: template.type_tag(),
    })?;

    let mut findings = Vec::new();
    let mut path = KeyPath::root();
    walk(config, template, policy, &mut path, &mut findings);
    Ok(ValidationReport::new(findings))
}

/// Compare one map level, appending findings to `out`.
///
/// `path` addresses `config`/`template` on entry and is restored on return.
fn walk(
    config: &TreeMap,
    template: &TreeMap,
    policy: Policy,
    path: &mut KeyPath,
    out: &mut Vec<Finding>,
) {
    for (key, template_value) in template {
        let Some(config_value) = config.get(key) else {
            if let Some(severity) = policy.missing_key_severity() {
                out.push(Finding::missing_key(path.child(key), severity));
            }
            continue;
        };

        match (template_value, config_value) {
            (Tree::Map(template_map), Tree::Map(config_map)) => {
                path.push(key);
                walk(config_map, template_map, policy, path, out);
                path.pop();
            }
            _ => {
                let expected = template_value.type_tag();
                let actual = config_value.type_tag();
                if expected != actual {
                    out.push(Finding::type_mismatch(path.child(key), expected, actual));
                }
            }
        }
    }

    if policy.reports_extra_keys() {
        for key in config.keys() {
            if !template.contains_key(key) {
                out.push(Finding::extra_key(path.child(key)));
            }
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::finding::{FindingKind, Severity};
    use proptest::prelude::*;

    /// Arbitrary scalar or sequence leaf.
    fn leaf() -> impl Strategy<Value = Tree> {
        prop_oneof![
            Just(Tree::Null),
            any::<bool>().prop_map(Tree::Bool),
            any::<i64>().prop_map(|n| Tree::Integer(i128::from(n))),
            (-1.0e6f64..1.0e6).prop_map(Tree::Float),
            "[a-z]{0,8}".prop_map(Tree::Text),
            prop::collection::vec(any::<bool>().prop_map(Tree::Bool), 0..3)
                .prop_map(Tree::Sequence),
        ]
    }

    /// Arbitrary document whose root is a map.
    fn document() -> impl Strategy<Value = Tree> {
        let value = leaf().prop_recursive(4, 48, 6, |inner| {
            prop::collection::vec(("[a-e]", inner), 0..6)
                .prop_map(|entries| Tree::Map(entries.into_iter().collect()))
        });
        prop::collection::vec(("[a-e]", value), 0..6)
            .prop_map(|entries| Tree::Map(entries.into_iter().collect()))
    }

    fn policy() -> impl Strategy<Value = Policy> {
        (any::<bool>(), any::<bool>()).prop_map(|(strict, ignore_missing)| Policy {
            strict,
            ignore_missing,
        })
    }

    /// Replace every scalar with a different value of the same type.
    fn perturb(tree: &Tree) -> Tree {
        match tree {
            Tree::Null => Tree::Null,
            Tree::Bool(b) => Tree::Bool(!b),
            Tree::Integer(n) => Tree::Integer(n.wrapping_add(1)),
            Tree::Float(x) => Tree::Float(x + 1.5),
            Tree::Text(s) => Tree::Text(format!("{s}-changed")),
            Tree::Sequence(items) => Tree::Sequence(items.iter().rev().cloned().collect()),
            Tree::Map(map) => Tree::Map(map.iter().map(|(k, v)| (k.clone(), perturb(v))).collect()),
        }
    }

    fn missing_counts(report: &ValidationReport) -> (usize, usize) {
        let missing = report
            .findings()
            .iter()
            .filter(|f| f.kind == FindingKind::MissingKey);
        missing.fold((0, 0), |(e, w), f| match f.severity {
            Severity::Error => (e + 1, w),
            Severity::Warning => (e, w + 1),
        })
    }

    proptest! {
        /// Same inputs always produce the same findings in the same order.
        #[test]
        fn validation_is_deterministic(
            config in document(),
            template in document(),
            policy in policy(),
        ) {
            let a = validate(&config, &template, policy).unwrap();
            let b = validate(&config, &template, policy).unwrap();
            prop_assert_eq!(a, b);
        }

        /// A document always validates against itself.
        #[test]
        fn identical_documents_have_no_errors(doc in document(), policy in policy()) {
            let report = validate(&doc, &doc, policy).unwrap();
            prop_assert_eq!(report.error_count(), 0);
        }

        /// Only type tags are compared, never values.
        #[test]
        fn same_shape_different_values_validates(doc in document(), policy in policy()) {
            let report = validate(&perturb(&doc), &doc, policy).unwrap();
            prop_assert!(report
                .findings()
                .iter()
                .all(|f| f.kind != FindingKind::TypeMismatch));
        }

        /// `ignore_missing` alone never yields a missing-key finding.
        #[test]
        fn ignore_missing_suppresses_missing_keys(config in document(), template in document()) {
            let report = validate(&config, &template, Policy::ignore_missing()).unwrap();
            prop_assert!(report
                .findings()
                .iter()
                .all(|f| f.kind != FindingKind::MissingKey));
        }

        /// Turning on `strict` never lowers the error count and never raises
        /// the missing-key warning count.
        #[test]
        fn strict_is_monotonic(
            config in document(),
            template in document(),
            ignore_missing in any::<bool>(),
        ) {
            let relaxed = Policy { strict: false, ignore_missing };
            let strict = Policy { strict: true, ignore_missing };
            let relaxed_report = validate(&config, &template, relaxed).unwrap();
            let strict_report = validate(&config, &template, strict).unwrap();

            prop_assert!(strict_report.error_count() >= relaxed_report.error_count());
            prop_assert!(missing_counts(&strict_report).1 <= missing_counts(&relaxed_report).1);
        }

        /// Collapsing a report never changes the verdict.
        #[test]
        fn collapsed_preserves_verdict(
            config in document(),
            template in document(),
            policy in policy(),
        ) {
            let report = validate(&config, &template, policy).unwrap();
            prop_assert_eq!(report.collapsed().is_valid(), report.is_valid());
        }
    }
}
