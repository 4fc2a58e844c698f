//! Option normalization: raw options to canonical key/value/label triples.
//!
//! Raw options come in heterogeneous shapes (primitives or structured
//! records). Normalization reduces every shape to a [`CanonicalOption`] via an
//! optional [`OptionConfig`] of dotted-path selectors.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::path;

/// Dotted-path selectors deriving canonical fields from structured options.
///
/// Each selector is independently optional; an unconfigured field falls back
/// to the identity rule (the raw option itself).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionConfig {
    /// Selector for the canonical key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Selector for the stored value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Selector for the display label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl OptionConfig {
    /// Creates an empty option config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the key selector.
    #[must_use]
    pub fn key(mut self, selector: impl Into<String>) -> Self {
        self.key = Some(selector.into());
        self
    }

    /// Sets the value selector.
    #[must_use]
    pub fn value(mut self, selector: impl Into<String>) -> Self {
        self.value = Some(selector.into());
        self
    }

    /// Sets the label selector.
    #[must_use]
    pub fn label(mut self, selector: impl Into<String>) -> Self {
        self.label = Some(selector.into());
        self
    }

    /// Returns whether no selector is configured.
    pub fn is_empty(&self) -> bool {
        self.key.is_none() && self.value.is_none() && self.label.is_none()
    }
}

/// A raw option reduced to its canonical triple.
///
/// Each field is `None` when its configured selector did not resolve on the
/// raw option; callers render unresolvable fields as an empty string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanonicalOption {
    /// Stable identity for rendering, unset in the element-wise array branch.
    pub key: Option<Value>,
    /// The representation committed to form state.
    pub value: Option<Value>,
    /// The representation shown to the user.
    pub label: Option<Value>,
}

impl CanonicalOption {
    fn identity(raw: &Value) -> Self {
        Self {
            key: Some(raw.clone()),
            value: Some(raw.clone()),
            label: Some(raw.clone()),
        }
    }

    /// Renders the label as user-facing text, empty when unresolvable.
    pub fn label_text(&self) -> String {
        self.label.as_ref().map(display_text).unwrap_or_default()
    }

    /// Returns the stored value, mapping unresolvable to `Null`.
    pub fn value_or_null(&self) -> Value {
        self.value.clone().unwrap_or(Value::Null)
    }
}

/// Renders a value as display text.
///
/// Strings render bare (no quotes), `Null` renders empty, everything else
/// renders as its JSON form.
pub fn display_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Normalizes a raw option into its canonical triple.
///
/// Pure in `(raw, config, multiple)`:
/// - No config (or an empty one): identity mapping for all three fields.
/// - `multiple` and an array payload: the per-item rule applies element-wise
///   to `value` and `label` (the widget change event sometimes delivers the
///   whole selection array); `key` is left unset.
/// - Otherwise per field: structured records resolve the selector path
///   (unresolved paths propagate as `None`), primitives pass through as-is.
///
/// # Example
///
/// ```
/// use formbind_core::options::{normalize, OptionConfig};
/// use serde_json::json;
///
/// let config = OptionConfig::new().value("id").label("name");
/// let opt = normalize(&json!({"id": 2, "name": "B"}), Some(&config), false);
/// assert_eq!(opt.value, Some(json!(2)));
/// assert_eq!(opt.label_text(), "B");
/// ```
pub fn normalize(raw: &Value, config: Option<&OptionConfig>, multiple: bool) -> CanonicalOption {
    let Some(config) = config.filter(|c| !c.is_empty()) else {
        return CanonicalOption::identity(raw);
    };

    if multiple {
        if let Value::Array(items) = raw {
            return CanonicalOption {
                key: None,
                value: Some(Value::Array(
                    items
                        .iter()
                        .map(|item| resolve_element(item, config.value.as_deref()))
                        .collect(),
                )),
                label: Some(Value::Array(
                    items
                        .iter()
                        .map(|item| resolve_element(item, config.label.as_deref()))
                        .collect(),
                )),
            };
        }
    }

    CanonicalOption {
        key: resolve_field(raw, config.key.as_deref()),
        value: resolve_field(raw, config.value.as_deref()),
        label: resolve_field(raw, config.label.as_deref()),
    }
}

/// Single-option field rule: identity without a selector, path lookup on
/// structured records, pass-through for primitives.
fn resolve_field(raw: &Value, selector: Option<&str>) -> Option<Value> {
    match selector {
        None => Some(raw.clone()),
        Some(selector) if is_structured(raw) => path::resolve(raw, selector).cloned(),
        Some(_) => Some(raw.clone()),
    }
}

/// Element-wise variant of the field rule; unresolved paths become `Null`
/// since array elements carry no separate "unresolvable" slot.
fn resolve_element(item: &Value, selector: Option<&str>) -> Value {
    resolve_field(item, selector).unwrap_or(Value::Null)
}

fn is_structured(value: &Value) -> bool {
    value.is_object() || value.is_array()
}

/// Derives the option list a field presents.
///
/// Returns the input order unchanged unless `randomize` is set, in which case
/// a Fisher-Yates pass produces a fresh permutation: same elements, same
/// length, order unstable across calls.
pub fn derive_option_list(options: &[Value], randomize: bool) -> Vec<Value> {
    let mut list = options.to_vec();
    if randomize && list.len() > 1 {
        use rand::RngExt;
        let mut rng = rand::rng();
        for i in (1..list.len()).rev() {
            list.swap(i, rng.random_range(0..=i));
        }
    }
    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_identity_without_config() {
        let raw = json!("red");
        let opt = normalize(&raw, None, false);
        assert_eq!(opt.key, Some(json!("red")));
        assert_eq!(opt.value, Some(json!("red")));
        assert_eq!(opt.label, Some(json!("red")));
    }

    #[test]
    fn test_normalize_identity_with_empty_config() {
        let config = OptionConfig::new();
        let raw = json!(42);
        let opt = normalize(&raw, Some(&config), false);
        assert_eq!(opt.value, Some(json!(42)));
    }

    #[test]
    fn test_normalize_selectors_on_structured_option() {
        let config = OptionConfig::new().key("id").value("id").label("name");
        let raw = json!({"id": 1, "name": "A"});
        let opt = normalize(&raw, Some(&config), false);
        assert_eq!(opt.key, Some(json!(1)));
        assert_eq!(opt.value, Some(json!(1)));
        assert_eq!(opt.label, Some(json!("A")));
    }

    #[test]
    fn test_normalize_partial_config_defaults_to_identity() {
        let config = OptionConfig::new().value("id");
        let raw = json!({"id": 7});
        let opt = normalize(&raw, Some(&config), false);
        assert_eq!(opt.value, Some(json!(7)));
        // label unconfigured: whole raw option.
        assert_eq!(opt.label, Some(raw));
    }

    #[test]
    fn test_normalize_unresolved_path_propagates() {
        let config = OptionConfig::new().value("id");
        let raw = json!({"name": "no id here"});
        let opt = normalize(&raw, Some(&config), false);
        assert_eq!(opt.value, None);
        assert_eq!(opt.value_or_null(), Value::Null);
    }

    #[test]
    fn test_normalize_primitive_skips_path_lookup() {
        let config = OptionConfig::new().value("id").label("name");
        let opt = normalize(&json!(3), Some(&config), false);
        assert_eq!(opt.value, Some(json!(3)));
        assert_eq!(opt.label, Some(json!(3)));
    }

    #[test]
    fn test_normalize_nested_selector() {
        let config = OptionConfig::new().label("meta.title");
        let raw = json!({"meta": {"title": "Deep"}});
        let opt = normalize(&raw, Some(&config), false);
        assert_eq!(opt.label_text(), "Deep");
    }

    #[test]
    fn test_normalize_multiple_array_elementwise() {
        let config = OptionConfig::new().value("id").label("name");
        let raw = json!([{"id": 1, "name": "A"}, {"id": 2, "name": "B"}, 3]);
        let opt = normalize(&raw, Some(&config), true);
        assert_eq!(opt.key, None);
        assert_eq!(opt.value, Some(json!([1, 2, 3])));
        assert_eq!(opt.label, Some(json!(["A", "B", 3])));
    }

    #[test]
    fn test_normalize_multiple_non_array_uses_single_rule() {
        let config = OptionConfig::new().value("id");
        let opt = normalize(&json!({"id": 9}), Some(&config), true);
        assert_eq!(opt.value, Some(json!(9)));
    }

    #[test]
    fn test_label_text_rendering() {
        let opt = CanonicalOption {
            key: None,
            value: None,
            label: Some(json!(12)),
        };
        assert_eq!(opt.label_text(), "12");

        let unresolved = CanonicalOption::default();
        assert_eq!(unresolved.label_text(), "");
    }

    #[test]
    fn test_derive_option_list_stable_without_randomize() {
        let options = vec![json!("a"), json!("b"), json!("c")];
        assert_eq!(derive_option_list(&options, false), options);
    }

    #[test]
    fn test_derive_option_list_is_permutation() {
        let options: Vec<Value> = (0..50).map(|i| json!(i)).collect();
        let shuffled = derive_option_list(&options, true);
        assert_eq!(shuffled.len(), options.len());
        for option in &options {
            assert_eq!(
                shuffled.iter().filter(|o| *o == option).count(),
                1,
                "element duplicated or dropped: {option}"
            );
        }
    }

    #[test]
    fn test_derive_option_list_degenerate_inputs() {
        assert!(derive_option_list(&[], true).is_empty());
        assert_eq!(derive_option_list(&[json!(1)], true), vec![json!(1)]);
    }
}
