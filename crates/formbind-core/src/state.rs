//! Shared form state and the write-side collaborator contract.
//!
//! Form state is owned by the rendering surface; binders read it through a
//! fresh snapshot argument on every call and write only through [`UpdateForm`].

use serde_json::{Map, Value};

use crate::path;

/// Write-side collaborator for form state.
///
/// Two calling conventions exist across widget families and carry identical
/// semantics: a later write for the same attribute always wins and structured
/// values are replaced wholesale, never merged.
pub trait UpdateForm {
    /// Writes a single attribute.
    fn set_value(&mut self, attribute: &str, value: Value);

    /// Applies a patch object keyed by attribute path.
    fn apply_patch(&mut self, patch: Map<String, Value>) {
        for (attribute, value) in patch {
            self.set_value(&attribute, value);
        }
    }
}

/// A form-state container backed by a JSON object tree.
///
/// Attribute paths are dotted ([`crate::path`]). The canonical "absent"
/// representation for a field is `Value::Null`; [`FormState::is_absent`]
/// treats a missing path and an explicit `Null` alike.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    root: Value,
}

impl FormState {
    /// Creates an empty form state.
    pub fn new() -> Self {
        Self {
            root: Value::Object(Map::new()),
        }
    }

    /// Creates a form state from an existing value tree.
    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    /// Reads the raw value at an attribute path, `Null` included.
    pub fn get(&self, attribute: &str) -> Option<&Value> {
        path::resolve(&self.root, attribute)
    }

    /// Reads the value at an attribute path, treating `Null` as absent.
    pub fn value_of(&self, attribute: &str) -> Option<&Value> {
        self.get(attribute).filter(|v| !v.is_null())
    }

    /// Returns whether the attribute is absent (missing path or `Null`).
    pub fn is_absent(&self, attribute: &str) -> bool {
        self.value_of(attribute).is_none()
    }

    /// Writes a value at an attribute path.
    pub fn set(&mut self, attribute: &str, value: Value) {
        path::assign(&mut self.root, attribute, value);
    }

    /// Returns the underlying value tree.
    pub fn as_value(&self) -> &Value {
        &self.root
    }

    /// Consumes the state, returning the underlying value tree.
    pub fn into_value(self) -> Value {
        self.root
    }
}

impl UpdateForm for FormState {
    fn set_value(&mut self, attribute: &str, value: Value) {
        self.set(attribute, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_and_get() {
        let mut form = FormState::new();
        form.set("user.name", json!("Ada"));
        assert_eq!(form.get("user.name"), Some(&json!("Ada")));
    }

    #[test]
    fn test_null_is_absent() {
        let mut form = FormState::new();
        form.set("tags", Value::Null);
        assert!(form.is_absent("tags"));
        assert!(form.is_absent("never.set"));
        assert_eq!(form.value_of("tags"), None);
        assert_eq!(form.get("tags"), Some(&Value::Null));
    }

    #[test]
    fn test_last_write_wins() {
        let mut form = FormState::new();
        form.set_value("color", json!("red"));
        form.set_value("color", json!("blue"));
        assert_eq!(form.get("color"), Some(&json!("blue")));
    }

    #[test]
    fn test_patch_replaces_structured_values() {
        let mut form = FormState::from_value(json!({"address": {"city": "Oslo", "zip": "0150"}}));
        let mut patch = Map::new();
        patch.insert("address".to_string(), json!({"city": "Bergen"}));
        form.apply_patch(patch);
        // Wholesale replacement, no merging.
        assert_eq!(form.get("address"), Some(&json!({"city": "Bergen"})));
    }
}
