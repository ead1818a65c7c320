//! # Validation Policy
//!
//! Two independent flags decide how divergences are classified:
//!
//! | `strict` | `ignore_missing` | missing key     | extra key |
//! |----------|------------------|-----------------|-----------|
//! | no       | no               | Warning         | Warning   |
//! | yes      | no               | Error           | —         |
//! | no       | yes              | —               | —         |
//! | yes      | yes              | Error           | —         |
//!
//! `strict` wins over `ignore_missing` for missing keys, and extra-key
//! reporting is switched off as soon as either flag is set.

use serde::{Deserialize, Serialize};

use crate::finding::Severity;

/// Flags governing missing-key and extra-key handling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Policy {
    /// Every template key must be present in the configuration.
    pub strict: bool,
    /// Keys absent from the configuration are not reported.
    pub ignore_missing: bool,
}

impl Policy {
    /// Policy with `strict` set.
    pub const fn strict() -> Self {
        Self {
            strict: true,
            ignore_missing: false,
        }
    }

    /// Policy with `ignore_missing` set.
    pub const fn ignore_missing() -> Self {
        Self {
            strict: false,
            ignore_missing: true,
        }
    }

    /// Severity of a template key that is absent from the configuration,
    /// or `None` when it is not reported at all.
    pub fn missing_key_severity(&self) -> Option<Severity> {
        if self.strict {
            Some(Severity::Error)
        } else if self.ignore_missing {
            None
        } else {
            Some(Severity::Warning)
        }
    }

    /// Whether configuration keys unknown to the template are reported.
    pub fn reports_extra_keys(&self) -> bool {
        !self.strict && !self.ignore_missing
    }
}
