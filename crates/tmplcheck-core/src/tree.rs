//! # Document Trees
//!
//! In-memory form of a parsed configuration or template document.
//!
//! A [`Tree`] is either a scalar, a sequence, or an ordered map. Sequences
//! are compared as opaque values: their elements are kept but never walked
//! during validation. Maps preserve insertion order so that findings come out
//! in the order the document author wrote the keys.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ordered mapping from text key to subtree.
pub type TreeMap = IndexMap<String, Tree>;

/// A parsed document value.
#[derive(Debug, Clone, PartialEq)]
pub enum Tree {
    /// Explicit null (`null` in JSON, `~` or empty in YAML).
    Null,
    /// Boolean scalar.
    Bool(bool),
    /// Integer scalar. Wide enough for both `i64` and `u64` sources.
    Integer(i128),
    /// Floating-point scalar.
    Float(f64),
    /// Text scalar.
    Text(String),
    /// Sequence of values, compared by type only.
    Sequence(Vec<Tree>),
    /// Nested object/mapping.
    Map(TreeMap),
}

/// Runtime type identity of a [`Tree`] value.
///
/// Two values have the same shape for validation purposes iff their tags
/// are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeTag {
    Null,
    #[serde(rename = "boolean")]
    Bool,
    Integer,
    Float,
    Text,
    Sequence,
    Map,
}

impl TypeTag {
    /// Human-readable name used in finding details.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Text => "text",
            Self::Sequence => "sequence",
            Self::Map => "nested object",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Tree {
    /// Convert a `serde_json::Value` into a tree.
    ///
    /// Numbers representable as `i64` or `u64` become [`Tree::Integer`];
    /// every other number becomes [`Tree::Float`]. Object key order is kept
    /// as parsed (the workspace builds `serde_json` with `preserve_order`).
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Integer(i128::from(i))
                } else if let Some(u) = n.as_u64() {
                    Self::Integer(i128::from(u))
                } else {
                    Self::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => Self::Text(s),
            Value::Array(items) => Self::Sequence(items.into_iter().map(Self::from_json).collect()),
            Value::Object(map) => Self::Map(
                map.into_iter()
                    .map(|(k, v)| (k, Self::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Returns the runtime type tag of this value.
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Self::Null => TypeTag::Null,
            Self::Bool(_) => TypeTag::Bool,
            Self::Integer(_) => TypeTag::Integer,
            Self::Float(_) => TypeTag::Float,
            Self::Text(_) => TypeTag::Text,
            Self::Sequence(_) => TypeTag::Sequence,
            Self::Map(_) => TypeTag::Map,
        }
    }

    /// Returns the map if this value is one.
    pub fn as_map(&self) -> Option<&TreeMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Returns true if this value is a map.
    pub fn is_map(&self) -> bool {
        matches!(self, Self::Map(_))
    }

    /// Look up a direct child by key. Always `None` for non-map values.
    pub fn get(&self, key: &str) -> Option<&Tree> {
        self.as_map().and_then(|map| map.get(key))
    }
}

impl From<Value> for Tree {
    fn from(value: Value) -> Self {
        Self::from_json(value)
    }
}

impl From<TreeMap> for Tree {
    fn from(map: TreeMap) -> Self {
        Self::Map(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_type_tags() {
        assert_eq!(Tree::from_json(json!(null)).type_tag(), TypeTag::Null);
        assert_eq!(Tree::from_json(json!(true)).type_tag(), TypeTag::Bool);
        assert_eq!(Tree::from_json(json!(8080)).type_tag(), TypeTag::Integer);
        assert_eq!(Tree::from_json(json!(0.5)).type_tag(), TypeTag::Float);
        assert_eq!(Tree::from_json(json!("x")).type_tag(), TypeTag::Text);
        assert_eq!(Tree::from_json(json!([1, 2])).type_tag(), TypeTag::Sequence);
        assert_eq!(Tree::from_json(json!({})).type_tag(), TypeTag::Map);
    }

    #[test]
    fn test_integral_float_stays_float() {
        // 8080.0 and 8080 are different shapes.
        assert_eq!(Tree::from_json(json!(8080.0)).type_tag(), TypeTag::Float);
    }

    #[test]
    fn test_large_unsigned_is_integer() {
        let tree = Tree::from_json(json!(u64::MAX));
        assert_eq!(tree, Tree::Integer(i128::from(u64::MAX)));
    }

    #[test]
    fn test_object_key_order_preserved() {
        let tree: Tree = serde_json::from_str::<Value>(r#"{"zeta": 1, "alpha": 2, "mid": 3}"#)
            .unwrap()
            .into();
        let keys: Vec<&str> = tree.as_map().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_get_child() {
        let tree = Tree::from_json(json!({"a": {"b": "c"}}));
        assert_eq!(
            tree.get("a").and_then(|a| a.get("b")),
            Some(&Tree::Text("c".to_string()))
        );
        assert!(tree.get("missing").is_none());
        assert!(Tree::Integer(1).get("a").is_none());
    }

    #[test]
    fn test_type_tag_display_and_serde() {
        assert_eq!(TypeTag::Map.to_string(), "nested object");
        assert_eq!(TypeTag::Bool.to_string(), "boolean");
        assert_eq!(serde_json::to_value(TypeTag::Bool).unwrap(), json!("boolean"));
        assert_eq!(serde_json::to_value(TypeTag::Map).unwrap(), json!("map"));
    }
}
