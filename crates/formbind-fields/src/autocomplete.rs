//! Autocomplete field binder.

use formbind_core::{
    display_label, is_selected, normalize, resolve_stored_value, CanonicalOption, ConfigError,
    FieldValidator, FormState, SelectionEvent, UpdateDispatcher, UpdateForm,
};
use serde_json::Value;

use crate::config::FieldConfig;

/// Binds an autocomplete widget to form state.
///
/// The underlying widget delivers its change payload sometimes as the full
/// option record and sometimes as the already-stored value; both shapes flow
/// through [`SelectionEvent`] classification, so label lookup and selection
/// checks work in either direction.
pub struct AutocompleteBinder {
    config: FieldConfig,
    options: Vec<Value>,
    dispatcher: UpdateDispatcher,
    validator: Box<dyn FieldValidator>,
    errors: Vec<String>,
}

impl AutocompleteBinder {
    /// Creates a binder; fails when the config has no attribute.
    ///
    /// The presented option order is derived once here (and again on
    /// [`AutocompleteBinder::set_options`]), so a randomized field reshuffles
    /// per options-list change, not per render.
    pub fn new(config: FieldConfig, validator: Box<dyn FieldValidator>) -> Result<Self, ConfigError> {
        config.ensure_attribute()?;
        let options = config.derive_options();
        let dispatcher = UpdateDispatcher::new(&config.attribute);
        Ok(Self {
            config,
            options,
            dispatcher,
            validator,
            errors: Vec::new(),
        })
    }

    /// Returns the field configuration.
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Returns the presented option sequence.
    pub fn options(&self) -> &[Value] {
        &self.options
    }

    /// Returns the canonical form of every presented option.
    pub fn canonical_options(&self) -> Vec<CanonicalOption> {
        self.options
            .iter()
            .map(|o| normalize(o, self.config.option_config.as_ref(), false))
            .collect()
    }

    /// Replaces the option list, re-deriving presentation order.
    pub fn set_options(&mut self, options: Vec<Value>) {
        self.config.options = options;
        self.options = self.config.derive_options();
    }

    /// Returns the current error list.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Resolves the display label for a widget payload of either shape.
    pub fn option_label(&self, payload: &Value) -> String {
        let event = SelectionEvent::classify(payload.clone(), self.config.option_config.as_ref());
        display_label(&event, &self.options, self.config.option_config.as_ref())
    }

    /// Returns whether `candidate` (either shape) selects `option`.
    pub fn is_option_selected(&self, option: &Value, candidate: &Value) -> bool {
        is_selected(option, candidate, self.config.option_config.as_ref())
    }

    /// Returns the widget-facing current value: the stored value, or the
    /// empty selection for the field's arity.
    pub fn selected_value(&self, form: &FormState) -> Value {
        form.value_of(&self.config.attribute).cloned().unwrap_or_else(|| {
            if self.config.multiple {
                Value::Array(Vec::new())
            } else {
                Value::Null
            }
        })
    }

    /// Handles a selection change: reduces the payload to stored form and
    /// commits it (patch convention).
    pub fn on_change(&mut self, payload: Value, sink: &mut dyn UpdateForm) {
        let stored = resolve_stored_value(&payload, self.config.option_config.as_ref(), self.config.multiple);
        self.dispatcher.commit_patch(stored, sink);
    }

    /// Handles loss of focus: validates the current stored value.
    pub fn on_blur(&mut self, form: &FormState) -> &[String] {
        self.errors = self.dispatcher.validate_current(form, self.validator.as_ref());
        &self.errors
    }

    /// Validates the current stored value on demand.
    pub fn validate_now(&mut self, form: &FormState) -> &[String] {
        self.errors = self.dispatcher.validate_current(form, self.validator.as_ref());
        &self.errors
    }
}

impl std::fmt::Debug for AutocompleteBinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutocompleteBinder")
            .field("attribute", &self.config.attribute)
            .field("options", &self.options.len())
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formbind_core::{NoValidation, OptionConfig};
    use serde_json::json;

    fn id_name_binder(multiple: bool) -> AutocompleteBinder {
        let mut config = FieldConfig::new("choice")
            .options(vec![json!({"id": 1, "name": "A"}), json!({"id": 2, "name": "B"})])
            .option_config(OptionConfig::new().value("id").label("name"));
        if multiple {
            config = config.multiple();
        }
        AutocompleteBinder::new(config, Box::new(NoValidation)).unwrap()
    }

    #[test]
    fn test_select_commits_stored_value() {
        let mut binder = id_name_binder(false);
        let mut form = FormState::new();
        binder.on_change(json!({"id": 2, "name": "B"}), &mut form);
        assert_eq!(form.get("choice"), Some(&json!(2)));
    }

    #[test]
    fn test_label_from_either_representation() {
        let binder = id_name_binder(false);
        // Full option record.
        assert_eq!(binder.option_label(&json!({"id": 2, "name": "B"})), "B");
        // Already-stored value, reverse-resolved through the option set.
        assert_eq!(binder.option_label(&json!(2)), "B");
        // Unknown stored value falls back to its own string form.
        assert_eq!(binder.option_label(&json!(9)), "9");
    }

    #[test]
    fn test_selected_value_defaults_by_arity() {
        let single = id_name_binder(false);
        let multi = id_name_binder(true);
        let form = FormState::new();
        assert_eq!(single.selected_value(&form), Value::Null);
        assert_eq!(multi.selected_value(&form), json!([]));
    }

    #[test]
    fn test_multiple_change_event_array() {
        let mut binder = id_name_binder(true);
        let mut form = FormState::new();
        // The widget hands back the full selection array of raw options.
        binder.on_change(json!([{"id": 1, "name": "A"}, {"id": 2, "name": "B"}]), &mut form);
        assert_eq!(form.get("choice"), Some(&json!([1, 2])));
    }

    #[test]
    fn test_clear_commits_absent() {
        let mut binder = id_name_binder(false);
        let mut form = FormState::from_value(json!({"choice": 1}));
        binder.on_change(Value::Null, &mut form);
        assert!(form.is_absent("choice"));
    }

    #[test]
    fn test_is_option_selected_both_shapes() {
        let binder = id_name_binder(false);
        let option = json!({"id": 1, "name": "A"});
        assert!(binder.is_option_selected(&option, &json!(1)));
        assert!(binder.is_option_selected(&option, &json!({"id": 1, "name": "A"})));
        assert!(!binder.is_option_selected(&option, &json!(2)));
    }

    #[test]
    fn test_blur_validates_fresh_state() {
        let validator = |value: Option<&Value>| -> Vec<String> {
            if value.is_some() {
                Vec::new()
            } else {
                vec!["pick one".to_string()]
            }
        };
        let config = FieldConfig::new("choice");
        let mut binder = AutocompleteBinder::new(config, Box::new(validator)).unwrap();

        let mut form = FormState::new();
        assert_eq!(binder.on_blur(&form).len(), 1);

        form.set("choice", json!(1));
        assert!(binder.on_blur(&form).is_empty());
    }
}
