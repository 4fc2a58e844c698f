//! Chip group field binder with toggle semantics.

use formbind_core::{
    normalize, resolve_stored_value, CanonicalOption, ConfigError, FieldValidator, FormState,
    UpdateDispatcher, UpdateForm,
};
use serde_json::Value;

use crate::config::FieldConfig;

/// Binds a clickable chip group to form state.
///
/// Single-value groups toggle: clicking the selected chip clears the field
/// back to absent, clicking another replaces the value. Multi-value groups
/// add and remove by resolved-value equality; removing the last element
/// collapses the stored array to the absent sentinel so form state stays
/// canonical.
pub struct ChipGroupBinder {
    config: FieldConfig,
    options: Vec<Value>,
    dispatcher: UpdateDispatcher,
    validator: Box<dyn FieldValidator>,
    errors: Vec<String>,
}

impl ChipGroupBinder {
    /// Creates a binder; fails when the config has no attribute.
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

    /// Returns the canonical form of every presented chip.
    pub fn canonical_options(&self) -> Vec<CanonicalOption> {
        self.options
            .iter()
            .map(|o| normalize(o, self.config.option_config.as_ref(), false))
            .collect()
    }

    /// Returns the current error list.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Returns whether a chip's resolved value is currently selected.
    pub fn is_selected(&self, option: &Value, form: &FormState) -> bool {
        let resolved = self.resolve(option);
        match form.value_of(&self.config.attribute) {
            None => false,
            Some(Value::Array(items)) if self.config.multiple => items.contains(&resolved),
            Some(current) if !self.config.multiple => *current == resolved,
            Some(_) => false,
        }
    }

    /// Handles a chip click, toggling its resolved value in form state.
    pub fn toggle(&mut self, option: &Value, form: &FormState, sink: &mut dyn UpdateForm) {
        let resolved = self.resolve(option);
        let next = if self.config.multiple {
            self.toggle_multi(resolved, form)
        } else {
            self.toggle_single(resolved, form)
        };
        self.dispatcher.commit(next, sink);
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

    fn resolve(&self, option: &Value) -> Value {
        resolve_stored_value(option, self.config.option_config.as_ref(), false)
    }

    /// Multi-value toggle: remove when present (collapsing an emptied array
    /// to `Null`), append when absent. A non-array stored value counts as an
    /// empty selection.
    fn toggle_multi(&self, resolved: Value, form: &FormState) -> Value {
        let mut items = match form.value_of(&self.config.attribute) {
            Some(Value::Array(items)) => items.clone(),
            _ => Vec::new(),
        };

        if let Some(index) = items.iter().position(|item| *item == resolved) {
            items.remove(index);
            if items.is_empty() {
                return Value::Null;
            }
        } else {
            items.push(resolved);
        }
        Value::Array(items)
    }

    /// Single-value toggle: re-clicking the selected chip clears the field.
    fn toggle_single(&self, resolved: Value, form: &FormState) -> Value {
        match form.value_of(&self.config.attribute) {
            Some(current) if *current == resolved => Value::Null,
            _ => resolved,
        }
    }
}

impl std::fmt::Debug for ChipGroupBinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChipGroupBinder")
            .field("attribute", &self.config.attribute)
            .field("options", &self.options.len())
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}
