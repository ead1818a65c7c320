//! # Document Loading
//!
//! Reads JSON or YAML documents from disk into [`Tree`]s.
//!
//! ## File Type Resolution
//!
//! An explicit [`FileType`] always wins. Otherwise the type is inferred from
//! the file extension: `.json` for JSON, `.yaml` or `.yml` for YAML. Any
//! other extension is a [`LoadError::TypeInference`].
//!
//! ## YAML Conversion
//!
//! YAML is richer than the tree model. Merge keys (`<<: *anchor`) are
//! expanded first. Tags are dropped (the inner value is kept), numeric and
//! boolean map keys are stringified, and a `null` key becomes the text
//! `"null"`. Sequence or mapping keys are rejected, as are keys that collide
//! once stringified (`1` and `"1"` in the same mapping).

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;
use tmplcheck_core::{Tree, TreeMap};

/// Error while resolving, reading, or parsing a document.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The document file does not exist.
    #[error("file not found: {path}")]
    NotFound {
        /// Path that was requested.
        path: String,
    },

    /// The document file exists but could not be read.
    #[error("cannot read {path}: {source}")]
    Read {
        /// Path that was requested.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The document text is not valid JSON/YAML, or uses YAML constructs
    /// the tree model cannot hold.
    #[error("loader could not parse {path}: {reason}")]
    Parse {
        /// Path (or label) of the document.
        path: String,
        /// Parser message.
        reason: String,
    },

    /// No file type was given and the extension is not recognised.
    #[error("could not infer file type of {path}; specify --file-type (json or yaml)")]
    TypeInference {
        /// Path whose extension was inspected.
        path: String,
    },

    /// A file type name other than `json` or `yaml`.
    #[error("invalid file type '{value}'; must be 'json' or 'yaml'")]
    UnknownFileType {
        /// The rejected name.
        value: String,
    },
}

/// Serialized document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    Json,
    Yaml,
}

impl FileType {
    /// Infer the file type from the extension of `path`.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::TypeInference` for anything other than `.json`,
    /// `.yaml`, or `.yml`.
    pub fn infer(path: &Path) -> Result<Self, LoadError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            _ => Err(LoadError::TypeInference {
                path: path.display().to_string(),
            }),
        }
    }

    /// Use `explicit` if given, otherwise infer from `path`.
    pub fn resolve(explicit: Option<Self>, path: &Path) -> Result<Self, LoadError> {
        match explicit {
            Some(file_type) => Ok(file_type),
            None => Self::infer(path),
        }
    }

    /// Lowercase name (`json` / `yaml`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileType {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Self::Json),
            "yaml" => Ok(Self::Yaml),
            other => Err(LoadError::UnknownFileType {
                value: other.to_string(),
            }),
        }
    }
}

/// Read and parse the document at `path`.
///
/// # Errors
///
/// Returns `LoadError::NotFound` if the file does not exist,
/// `LoadError::Read` for other IO failures, and `LoadError::Parse` if the
/// contents are not a valid document of `file_type`.
pub fn load_document(path: &Path, file_type: FileType) -> Result<Tree, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            LoadError::NotFound {
                path: path.display().to_string(),
            }
        } else {
            LoadError::Read {
                path: path.display().to_string(),
                source: e,
            }
        }
    })?;

    let tree = parse_document(&content, file_type, &path.display().to_string())?;
    tracing::debug!(path = %path.display(), %file_type, "loaded document");
    Ok(tree)
}

/// Parse document text already in memory. `origin` labels parse errors.
///
/// # Errors
///
/// Returns `LoadError::Parse` if `text` is not a valid document of
/// `file_type`.
pub fn parse_document(text: &str, file_type: FileType, origin: &str) -> Result<Tree, LoadError> {
    let parse_error = |reason: String| LoadError::Parse {
        path: origin.to_string(),
        reason,
    };

    match file_type {
        FileType::Json => {
            let value: serde_json::Value =
                serde_json::from_str(text).map_err(|e| parse_error(format!("invalid JSON: {e}")))?;
            Ok(Tree::from_json(value))
        }
        FileType::Yaml => {
            let mut value: serde_yaml::Value =
                serde_yaml::from_str(text).map_err(|e| parse_error(format!("invalid YAML: {e}")))?;
            value
                .apply_merge()
                .map_err(|e| parse_error(format!("invalid YAML merge: {e}")))?;
            yaml_to_tree(value).map_err(parse_error)
        }
    }
}

/// Convert a `serde_yaml::Value` into a [`Tree`], keeping mapping order.
fn yaml_to_tree(yaml: serde_yaml::Value) -> Result<Tree, String> {
    use serde_yaml::Value;

    match yaml {
        Value::Null => Ok(Tree::Null),
        Value::Bool(b) => Ok(Tree::Bool(b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Tree::Integer(i128::from(i)))
            } else if let Some(u) = n.as_u64() {
                Ok(Tree::Integer(i128::from(u)))
            } else if let Some(f) = n.as_f64() {
                Ok(Tree::Float(f))
            } else {
                Err(format!("unsupported YAML number: {n:?}"))
            }
        }
        Value::String(s) => Ok(Tree::Text(s)),
        Value::Sequence(seq) => seq
            .into_iter()
            .map(yaml_to_tree)
            .collect::<Result<Vec<_>, _>>()
            .map(Tree::Sequence),
        Value::Mapping(map) => {
            let mut tree_map = TreeMap::with_capacity(map.len());
            for (k, v) in map {
                let key = match k {
                    Value::String(s) => s,
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    Value::Null => "null".to_string(),
                    other => return Err(format!("unsupported YAML map key type: {other:?}")),
                };
                let value = yaml_to_tree(v)?;
                if tree_map.contains_key(&key) {
                    return Err(format!("duplicate key after stringification: {key}"));
                }
                tree_map.insert(key, value);
            }
            Ok(Tree::Map(tree_map))
        }
        // Tags carry no shape information.
        Value::Tagged(tagged) => yaml_to_tree(tagged.value),
    }
}
