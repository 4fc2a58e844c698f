//! Declarative field configuration.

use formbind_core::{derive_option_list, normalize, CanonicalOption, ConfigError, OptionConfig};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Declarative descriptor for one form field.
///
/// Immutable per render pass; binders take it by value at construction.
/// Serializes with camelCase keys so JSON field definitions load directly.
///
/// # Example
///
/// ```
/// use formbind_fields::FieldConfig;
/// use formbind_core::OptionConfig;
/// use serde_json::json;
///
/// let config = FieldConfig::new("subscription.plan")
///     .label("Plan")
///     .options(vec![json!({"id": "basic", "name": "Basic"})])
///     .option_config(OptionConfig::new().value("id").label("name"));
/// assert_eq!(config.attribute, "subscription.plan");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldConfig {
    /// Dotted path to the field's value in form state; must be non-empty.
    pub attribute: String,
    /// Display label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Ordered raw options (primitives or structured records).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<Value>,
    /// Selectors deriving canonical fields from structured options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_config: Option<OptionConfig>,
    /// Present the options in shuffled order.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub randomize_options: bool,
    /// Stored value is an array rather than a scalar.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub multiple: bool,
    /// Passthrough configuration, merged last by the rendering surface.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub props: Map<String, Value>,
}

impl FieldConfig {
    /// Creates a field config for an attribute path.
    pub fn new(attribute: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            ..Self::default()
        }
    }

    /// Sets the display label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the raw option list.
    #[must_use]
    pub fn options(mut self, options: Vec<Value>) -> Self {
        self.options = options;
        self
    }

    /// Sets the option selectors.
    #[must_use]
    pub fn option_config(mut self, config: OptionConfig) -> Self {
        self.option_config = Some(config);
        self
    }

    /// Presents options in shuffled order.
    #[must_use]
    pub fn randomize_options(mut self) -> Self {
        self.randomize_options = true;
        self
    }

    /// Marks the stored value as multi-valued.
    #[must_use]
    pub fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }

    /// Sets a passthrough prop.
    #[must_use]
    pub fn prop(mut self, key: impl Into<String>, value: Value) -> Self {
        self.props.insert(key.into(), value);
        self
    }

    /// Rejects configs without an attribute path; binders call this at
    /// construction so misconfiguration never reaches render time.
    pub fn ensure_attribute(&self) -> Result<(), ConfigError> {
        if self.attribute.trim().is_empty() {
            return Err(ConfigError::EmptyAttribute);
        }
        Ok(())
    }

    /// Derives the presented option order (shuffled when configured).
    pub fn derive_options(&self) -> Vec<Value> {
        derive_option_list(&self.options, self.randomize_options)
    }

    /// Normalizes a raw option under this field's selectors.
    pub fn normalize_option(&self, raw: &Value) -> CanonicalOption {
        normalize(raw, self.option_config.as_ref(), self.multiple)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder() {
        let config = FieldConfig::new("color")
            .label("Color")
            .options(vec![json!("red"), json!("blue")])
            .multiple()
            .prop("size", json!("small"));

        assert_eq!(config.attribute, "color");
        assert_eq!(config.label.as_deref(), Some("Color"));
        assert!(config.multiple);
        assert_eq!(config.props.get("size"), Some(&json!("small")));
    }

    #[test]
    fn test_ensure_attribute_rejects_empty() {
        assert!(FieldConfig::new("").ensure_attribute().is_err());
        assert!(FieldConfig::new("  ").ensure_attribute().is_err());
        assert!(FieldConfig::new("ok").ensure_attribute().is_ok());
    }

    #[test]
    fn test_deserializes_camel_case() {
        let config: FieldConfig = serde_json::from_value(json!({
            "attribute": "role",
            "options": [{"id": 1, "name": "Admin"}],
            "optionConfig": {"value": "id", "label": "name"},
            "randomizeOptions": true,
        }))
        .unwrap();

        assert!(config.randomize_options);
        let option_config = config.option_config.as_ref().unwrap();
        assert_eq!(option_config.value.as_deref(), Some("id"));
    }

    #[test]
    fn test_derive_options_preserves_order_by_default() {
        let config = FieldConfig::new("x").options(vec![json!(1), json!(2), json!(3)]);
        assert_eq!(config.derive_options(), vec![json!(1), json!(2), json!(3)]);
    }
}
