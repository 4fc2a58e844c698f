//! Dotted-path access into JSON value trees.

use serde_json::{Map, Value};

/// A segment in a dotted value path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// An object key segment.
    Key(String),
    /// An array index segment (e.g., the `0` in `items.0`).
    Index(usize),
}

/// A parsed dotted path into a value tree.
///
/// Path syntax:
/// - `user.name` - nested object keys
/// - `tags.0` - numeric segments index arrays (and fall back to object keys)
///
/// Lookups are total: an unresolvable path yields `None`, never a panic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValuePath {
    /// The original path string.
    raw: String,
    /// Parsed segments, empty segments stripped.
    segments: Vec<PathSegment>,
}

impl ValuePath {
    /// Parses a dotted path string.
    ///
    /// # Example
    ///
    /// ```
    /// use formbind_core::path::ValuePath;
    /// use serde_json::json;
    ///
    /// let path = ValuePath::parse("user.address.city");
    /// let tree = json!({"user": {"address": {"city": "Oslo"}}});
    /// assert_eq!(path.resolve(&tree), Some(&json!("Oslo")));
    /// ```
    pub fn parse(path: &str) -> Self {
        let segments = path
            .split('.')
            .filter(|s| !s.is_empty())
            .map(|s| match s.parse::<usize>() {
                Ok(index) => PathSegment::Index(index),
                Err(_) => PathSegment::Key(s.to_string()),
            })
            .collect();

        Self {
            raw: path.to_string(),
            segments,
        }
    }

    /// Returns the original path string.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns whether the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Resolves this path against a value tree.
    ///
    /// Returns `None` when any segment is missing or the tree shape does not
    /// match the path.
    pub fn resolve<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        let mut current = root;
        for segment in &self.segments {
            current = match (segment, current) {
                (PathSegment::Key(key), Value::Object(map)) => map.get(key)?,
                (PathSegment::Index(index), Value::Array(items)) => items.get(*index)?,
                // An object keyed by a numeric string is still addressable.
                (PathSegment::Index(index), Value::Object(map)) => map.get(&index.to_string())?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Writes `value` at this path, creating intermediate containers.
    ///
    /// Key segments create objects, index segments create (and extend) arrays.
    /// Scalars along the way are replaced by the container the path requires.
    pub fn assign(&self, root: &mut Value, value: Value) {
        assign_segments(root, &self.segments, value);
    }
}

fn assign_segments(current: &mut Value, segments: &[PathSegment], value: Value) {
    let Some((segment, rest)) = segments.split_first() else {
        *current = value;
        return;
    };

    match segment {
        PathSegment::Key(key) => {
            if !matches!(current, Value::Object(_)) {
                *current = Value::Object(Map::new());
            }
            if let Value::Object(map) = current {
                let slot = map.entry(key.clone()).or_insert(Value::Null);
                assign_segments(slot, rest, value);
            }
        }
        PathSegment::Index(index) => {
            if !matches!(current, Value::Array(_)) {
                *current = Value::Array(Vec::new());
            }
            if let Value::Array(items) = current {
                if items.len() <= *index {
                    items.resize(*index + 1, Value::Null);
                }
                assign_segments(&mut items[*index], rest, value);
            }
        }
    }
}

/// Resolves a dotted path against a value tree.
pub fn resolve<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    ValuePath::parse(path).resolve(root)
}

/// Writes `value` at a dotted path, creating intermediate containers.
pub fn assign(root: &mut Value, path: &str, value: Value) {
    ValuePath::parse(path).assign(root, value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_nested_key() {
        let tree = json!({"a": {"b": {"c": 1}}});
        assert_eq!(resolve(&tree, "a.b.c"), Some(&json!(1)));
    }

    #[test]
    fn test_resolve_missing_path() {
        let tree = json!({"a": {"b": 1}});
        assert_eq!(resolve(&tree, "a.x"), None);
        assert_eq!(resolve(&tree, "a.b.c"), None);
    }

    #[test]
    fn test_resolve_array_index() {
        let tree = json!({"items": [{"id": 1}, {"id": 2}]});
        assert_eq!(resolve(&tree, "items.1.id"), Some(&json!(2)));
        assert_eq!(resolve(&tree, "items.5"), None);
    }

    #[test]
    fn test_resolve_numeric_object_key() {
        let tree = json!({"0": "zero"});
        assert_eq!(resolve(&tree, "0"), Some(&json!("zero")));
    }

    #[test]
    fn test_resolve_through_scalar() {
        let tree = json!({"a": 1});
        assert_eq!(resolve(&tree, "a.b"), None);
    }

    #[test]
    fn test_assign_creates_intermediates() {
        let mut tree = json!({});
        assign(&mut tree, "user.address.city", json!("Oslo"));
        assert_eq!(tree, json!({"user": {"address": {"city": "Oslo"}}}));
    }

    #[test]
    fn test_assign_overwrites() {
        let mut tree = json!({"name": "old"});
        assign(&mut tree, "name", json!("new"));
        assert_eq!(tree, json!({"name": "new"}));
    }

    #[test]
    fn test_assign_array_index_extends() {
        let mut tree = json!({});
        assign(&mut tree, "tags.2", json!("c"));
        assert_eq!(tree, json!({"tags": [null, null, "c"]}));
    }

    #[test]
    fn test_assign_replaces_scalar_with_container() {
        let mut tree = json!({"a": 1});
        assign(&mut tree, "a.b", json!(2));
        assert_eq!(tree, json!({"a": {"b": 2}}));
    }

    #[test]
    fn test_empty_segments_stripped() {
        let path = ValuePath::parse("a..b");
        let tree = json!({"a": {"b": 1}});
        assert_eq!(path.resolve(&tree), Some(&json!(1)));
    }
}
