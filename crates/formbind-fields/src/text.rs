//! Free-text field binder with debounced commits.

use std::time::Instant;

use formbind_core::{
    coerce_number, display_text, ConfigError, FieldValidator, FormState, UpdateDispatcher,
    UpdateForm,
};
use serde_json::Value;

use crate::config::FieldConfig;

/// Binds a free-text (or numeric) input to form state.
///
/// Keystrokes coalesce through a per-field debounce; blur flushes any pending
/// write and validates against fresh state; Enter validates without
/// committing. Numeric fields coerce text at commit time (empty text becomes
/// the absent sentinel, a failed parse suppresses the commit).
pub struct TextFieldBinder {
    config: FieldConfig,
    dispatcher: UpdateDispatcher,
    validator: Box<dyn FieldValidator>,
    numeric: bool,
    errors: Vec<String>,
}

impl TextFieldBinder {
    /// Creates a binder; fails when the config has no attribute.
    ///
    /// Numeric coercion is derived from `props.type == "number"`, matching
    /// the declarative config shape.
    pub fn new(config: FieldConfig, validator: Box<dyn FieldValidator>) -> Result<Self, ConfigError> {
        config.ensure_attribute()?;
        let numeric = config.props.get("type").and_then(Value::as_str) == Some("number");
        let dispatcher = UpdateDispatcher::new(&config.attribute);
        Ok(Self {
            config,
            dispatcher,
            validator,
            numeric,
            errors: Vec::new(),
        })
    }

    /// Forces numeric coercion regardless of props.
    #[must_use]
    pub fn numeric(mut self) -> Self {
        self.numeric = true;
        self
    }

    /// Returns the field configuration.
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Returns whether the field has input focus.
    pub fn focused(&self) -> bool {
        self.dispatcher.focused()
    }

    /// Returns the current error list (from the last validation trigger).
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Renders the stored value as input text, empty when absent.
    pub fn display_value(&self, form: &FormState) -> String {
        form.value_of(&self.config.attribute)
            .map(display_text)
            .unwrap_or_default()
    }

    /// Marks the field focused; debounced writes are only accepted while
    /// focused.
    pub fn on_focus(&mut self) {
        self.dispatcher.focus();
    }

    /// Handles a keystroke, scheduling a debounced commit of the new text.
    pub fn on_input(&mut self, text: &str, now: Instant) {
        self.dispatcher.schedule(Value::String(text.to_string()), now);
    }

    /// Drives the debounce: commits the pending text once its quiet window
    /// has elapsed.
    pub fn poll(&mut self, now: Instant, sink: &mut dyn UpdateForm) {
        if let Some(raw) = self.dispatcher.poll(now) {
            self.commit_text(raw, sink);
        }
    }

    /// Handles loss of focus: flushes any pending debounced write, then
    /// validates against the value read fresh from form state.
    pub fn on_blur(&mut self, form: &mut FormState) -> &[String] {
        if let Some(raw) = self.dispatcher.leave_focus() {
            self.commit_text(raw, form);
        }
        self.errors = self.dispatcher.validate_current(form, self.validator.as_ref());
        &self.errors
    }

    /// Handles the commit key (Enter): validates the current stored value
    /// without committing anything.
    pub fn on_enter(&mut self, form: &FormState) -> &[String] {
        self.errors = self.dispatcher.validate_current(form, self.validator.as_ref());
        &self.errors
    }

    /// Validates the current stored value on demand.
    pub fn validate_now(&mut self, form: &FormState) -> &[String] {
        self.errors = self.dispatcher.validate_current(form, self.validator.as_ref());
        &self.errors
    }

    /// Cancels any pending debounced write; called when the field unmounts.
    pub fn detach(&mut self) {
        self.dispatcher.detach();
    }

    /// Commits raw text, applying numeric coercion when configured. A failed
    /// coercion suppresses the write and leaves state unchanged.
    fn commit_text(&self, raw: Value, sink: &mut dyn UpdateForm) {
        let value = if self.numeric {
            match raw.as_str().map(coerce_number) {
                Some(Some(coerced)) => coerced,
                _ => return,
            }
        } else {
            raw
        };
        self.dispatcher.commit_patch(value, sink);
    }
}

impl std::fmt::Debug for TextFieldBinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextFieldBinder")
            .field("attribute", &self.config.attribute)
            .field("numeric", &self.numeric)
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}
