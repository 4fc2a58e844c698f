//! Radio group field binder.

use formbind_core::{
    normalize, resolve_stored_value, CanonicalOption, ConfigError, FieldValidator, FormState,
    UpdateDispatcher, UpdateForm,
};
use serde_json::Value;

use crate::config::FieldConfig;

/// Binds a radio group to form state.
///
/// Exactly one option is selectable; checking a radio commits its resolved
/// value, unchecking events are ignored (the replacement check carries the
/// change). Checked state compares by deep structural equality so two
/// structurally identical option records select the same radio.
pub struct RadioGroupBinder {
    config: FieldConfig,
    options: Vec<Value>,
    dispatcher: UpdateDispatcher,
    validator: Box<dyn FieldValidator>,
    errors: Vec<String>,
}

impl RadioGroupBinder {
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

    /// Returns the canonical form of every presented option.
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

    /// Returns whether an option's resolved value is the stored value.
    pub fn is_checked(&self, option: &Value, form: &FormState) -> bool {
        let resolved = resolve_stored_value(option, self.config.option_config.as_ref(), false);
        form.value_of(&self.config.attribute) == Some(&resolved)
    }

    /// Handles a radio change: commits the resolved value when checked.
    pub fn on_change(&mut self, option: &Value, checked: bool, sink: &mut dyn UpdateForm) {
        if !checked {
            return;
        }
        let resolved = resolve_stored_value(option, self.config.option_config.as_ref(), false);
        self.dispatcher.commit(resolved, sink);
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

impl std::fmt::Debug for RadioGroupBinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RadioGroupBinder")
            .field("attribute", &self.config.attribute)
            .field("options", &self.options.len())
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}
