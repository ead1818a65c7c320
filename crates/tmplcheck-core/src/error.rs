//! # Error Types
//!
//! Mismatches between a configuration and its template are never errors;
//! they are [`Finding`](crate::Finding)s. The only failure the engine can
//! raise is a precondition violation on the shape of the document roots.

use thiserror::Error;

use crate::tree::TypeTag;

/// A document root was not a map, so no comparison was attempted.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeError {
    /// The configuration document root is not an object/mapping.
    #[error("configuration root must be an object/mapping, found {found}")]
    ConfigurationRoot {
        /// Type tag of the configuration root.
        found: TypeTag,
    },

    /// The template document root is not an object/mapping.
    #[error("template root must be an object/mapping, found {found}")]
    TemplateRoot {
        /// Type tag of the template root.
        found: TypeTag,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_error_names_the_offending_root() {
        let err = ShapeError::ConfigurationRoot {
            found: TypeTag::Sequence,
        };
        assert_eq!(
            err.to_string(),
            "configuration root must be an object/mapping, found sequence"
        );

        let err = ShapeError::TemplateRoot {
            found: TypeTag::Null,
        };
        assert!(err.to_string().starts_with("template root"));
    }
}
