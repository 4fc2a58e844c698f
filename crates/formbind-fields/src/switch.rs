//! Binary switch field binder.

use formbind_core::{ConfigError, FieldValidator, FormState, UpdateDispatcher, UpdateForm};
use serde_json::{json, Value};

use crate::config::FieldConfig;

/// Binds a two-state switch to form state.
///
/// The option set is exactly `[off, on]` (defaulting to `[false, true]`);
/// checked means the stored value equals the on value by exact scalar
/// equality. Toggling commits the corresponding option value directly.
pub struct SwitchBinder {
    config: FieldConfig,
    off: Value,
    on: Value,
    dispatcher: UpdateDispatcher,
    validator: Box<dyn FieldValidator>,
    errors: Vec<String>,
}

impl SwitchBinder {
    /// Creates a binder; fails when the config has no attribute or the
    /// option set is not exactly two values.
    pub fn new(config: FieldConfig, validator: Box<dyn FieldValidator>) -> Result<Self, ConfigError> {
        config.ensure_attribute()?;
        let (off, on) = match config.options.as_slice() {
            [] => (json!(false), json!(true)),
            [off, on] => (off.clone(), on.clone()),
            other => return Err(ConfigError::SwitchOptionCount(other.len())),
        };
        let dispatcher = UpdateDispatcher::new(&config.attribute);
        Ok(Self {
            config,
            off,
            on,
            dispatcher,
            validator,
            errors: Vec::new(),
        })
    }

    /// Returns the field configuration.
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Returns the `[off, on]` pair.
    pub fn option_pair(&self) -> (&Value, &Value) {
        (&self.off, &self.on)
    }

    /// Returns the current error list.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Returns whether the stored value equals the on value.
    pub fn is_checked(&self, form: &FormState) -> bool {
        form.value_of(&self.config.attribute) == Some(&self.on)
    }

    /// Handles a toggle: commits the on value when switched on, the off
    /// value otherwise.
    pub fn on_toggle(&mut self, checked: bool, sink: &mut dyn UpdateForm) {
        let value = if checked {
            self.on.clone()
        } else {
            self.off.clone()
        };
        self.dispatcher.commit(value, sink);
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

impl std::fmt::Debug for SwitchBinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwitchBinder")
            .field("attribute", &self.config.attribute)
            .field("off", &self.off)
            .field("on", &self.on)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formbind_core::NoValidation;

    fn boolean_binder() -> SwitchBinder {
        SwitchBinder::new(FieldConfig::new("active"), Box::new(NoValidation)).unwrap()
    }

    #[test]
    fn test_default_options_are_booleans() {
        let mut binder = boolean_binder();
        let mut form = FormState::new();

        binder.on_toggle(true, &mut form);
        assert_eq!(form.get("active"), Some(&json!(true)));
        assert!(binder.is_checked(&form));

        binder.on_toggle(false, &mut form);
        assert_eq!(form.get("active"), Some(&json!(false)));
        assert!(!binder.is_checked(&form));
    }

    #[test]
    fn test_custom_scalar_options() {
        let config = FieldConfig::new("answer").options(vec![json!("no"), json!("yes")]);
        let mut binder = SwitchBinder::new(config, Box::new(NoValidation)).unwrap();
        let mut form = FormState::new();

        binder.on_toggle(true, &mut form);
        assert_eq!(form.get("answer"), Some(&json!("yes")));

        binder.on_toggle(false, &mut form);
        assert_eq!(form.get("answer"), Some(&json!("no")));
    }

    #[test]
    fn test_unchecked_until_stored_equals_on_value() {
        let binder = boolean_binder();
        assert!(!binder.is_checked(&FormState::new()));

        let off = FormState::from_value(json!({"active": false}));
        assert!(!binder.is_checked(&off));
    }

    #[test]
    fn test_wrong_option_count_is_config_error() {
        let config = FieldConfig::new("x").options(vec![json!(1)]);
        let result = SwitchBinder::new(config, Box::new(NoValidation));
        assert!(matches!(result, Err(ConfigError::SwitchOptionCount(1))));

        let config = FieldConfig::new("x").options(vec![json!(1), json!(2), json!(3)]);
        let result = SwitchBinder::new(config, Box::new(NoValidation));
        assert!(matches!(result, Err(ConfigError::SwitchOptionCount(3))));
    }
}
