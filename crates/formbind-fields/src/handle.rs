//! Per-field handles and the form coordinator.
//!
//! Every binder doubles as a [`FieldHandle`], created alongside the binder
//! rather than attached after the fact, so a parent coordinator can
//! force-validate and tear down all fields without knowing their widget
//! kinds.

use std::time::Instant;

use formbind_core::{FormState, UpdateForm, ValidationErrors};

use crate::autocomplete::AutocompleteBinder;
use crate::chip_group::ChipGroupBinder;
use crate::picker::PickerBinder;
use crate::radio_group::RadioGroupBinder;
use crate::switch::SwitchBinder;
use crate::text::TextFieldBinder;

/// Uniform imperative surface over a field binder.
pub trait FieldHandle {
    /// The attribute path the field binds.
    fn attribute(&self) -> &str;

    /// The error list from the last validation trigger.
    fn errors(&self) -> &[String];

    /// Validates the current stored value and returns the resulting errors.
    fn validate_now(&mut self, form: &FormState) -> &[String];

    /// Blurs the field: commits anything pending, then validates.
    fn blur(&mut self, form: &mut FormState) -> &[String];

    /// Drives any pending delayed work (debounce deadlines).
    fn poll(&mut self, _now: Instant, _sink: &mut dyn UpdateForm) {}

    /// Releases the field; pending delayed writes are cancelled.
    fn detach(&mut self) {}
}

impl FieldHandle for TextFieldBinder {
    fn attribute(&self) -> &str {
        &self.config().attribute
    }

    fn errors(&self) -> &[String] {
        Self::errors(self)
    }

    fn validate_now(&mut self, form: &FormState) -> &[String] {
        Self::validate_now(self, form)
    }

    fn blur(&mut self, form: &mut FormState) -> &[String] {
        self.on_blur(form)
    }

    fn poll(&mut self, now: Instant, sink: &mut dyn UpdateForm) {
        Self::poll(self, now, sink);
    }

    fn detach(&mut self) {
        Self::detach(self);
    }
}

macro_rules! impl_simple_handle {
    ($binder:ty) => {
        impl FieldHandle for $binder {
            fn attribute(&self) -> &str {
                &self.config().attribute
            }

            fn errors(&self) -> &[String] {
                Self::errors(self)
            }

            fn validate_now(&mut self, form: &FormState) -> &[String] {
                Self::validate_now(self, form)
            }

            fn blur(&mut self, form: &mut FormState) -> &[String] {
                self.on_blur(form)
            }
        }
    };
}

impl_simple_handle!(AutocompleteBinder);
impl_simple_handle!(ChipGroupBinder);
impl_simple_handle!(RadioGroupBinder);
impl_simple_handle!(SwitchBinder);
impl_simple_handle!(PickerBinder);

/// Owns the handles of every field on a rendering surface.
///
/// The coordinator is how a submit flow force-validates all fields at once
/// and how teardown cancels whatever is still pending.
#[derive(Default)]
pub struct FormCoordinator {
    handles: Vec<Box<dyn FieldHandle>>,
}

impl FormCoordinator {
    /// Creates an empty coordinator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes ownership of a field handle.
    pub fn register(&mut self, handle: Box<dyn FieldHandle>) {
        self.handles.push(handle);
    }

    /// Returns the number of registered fields.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Returns whether no fields are registered.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Validates every field against the current form state, aggregating
    /// errors by attribute.
    pub fn validate_all(&mut self, form: &FormState) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for handle in &mut self.handles {
            let attribute = handle.attribute().to_string();
            for message in handle.validate_now(form) {
                errors.add(&attribute, message.clone());
            }
        }
        errors
    }

    /// Blurs every field, committing pending work before validation.
    pub fn blur_all(&mut self, form: &mut FormState) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for handle in &mut self.handles {
            let attribute = handle.attribute().to_string();
            for message in handle.blur(form) {
                errors.add(&attribute, message.clone());
            }
        }
        errors
    }

    /// Drives pending debounce deadlines across all fields.
    pub fn poll_all(&mut self, now: Instant, form: &mut FormState) {
        for handle in &mut self.handles {
            handle.poll(now, form);
        }
    }

    /// Detaches every field, cancelling pending delayed writes.
    pub fn detach_all(&mut self) {
        for handle in &mut self.handles {
            handle.detach();
        }
    }
}

impl std::fmt::Debug for FormCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormCoordinator")
            .field("fields", &self.handles.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FieldConfig;
    use formbind_core::{FieldValidator, RequiredValidator};
    use serde_json::json;

    fn required() -> Box<dyn FieldValidator> {
        Box::new(RequiredValidator::new())
    }

    #[test]
    fn test_validate_all_aggregates_by_attribute() {
        let mut coordinator = FormCoordinator::new();
        coordinator.register(Box::new(
            TextFieldBinder::new(FieldConfig::new("user.name"), required()).unwrap(),
        ));
        coordinator.register(Box::new(
            SwitchBinder::new(FieldConfig::new("active"), required()).unwrap(),
        ));

        let mut form = FormState::new();
        let errors = coordinator.validate_all(&form);
        assert_eq!(errors.len(), 2);
        assert!(errors.get("user.name").is_some());
        assert!(errors.get("active").is_some());

        form.set("user.name", json!("Ada"));
        form.set("active", json!(true));
        assert!(coordinator.validate_all(&form).is_empty());
    }

    #[test]
    fn test_blur_all_flushes_pending_text() {
        let mut coordinator = FormCoordinator::new();
        let mut text = TextFieldBinder::new(FieldConfig::new("notes"), required()).unwrap();
        text.on_focus();
        text.on_input("typed", Instant::now());
        coordinator.register(Box::new(text));

        let mut form = FormState::new();
        let errors = coordinator.blur_all(&mut form);
        assert!(errors.is_empty());
        assert_eq!(form.get("notes"), Some(&json!("typed")));
    }

    #[test]
    fn test_detach_all_cancels_pending() {
        let mut coordinator = FormCoordinator::new();
        let mut text = TextFieldBinder::new(FieldConfig::new("notes"), required()).unwrap();
        let now = Instant::now();
        text.on_focus();
        text.on_input("doomed", now);
        coordinator.register(Box::new(text));

        coordinator.detach_all();
        let mut form = FormState::new();
        coordinator.poll_all(now + std::time::Duration::from_secs(1), &mut form);
        assert!(form.is_absent("notes"));
    }
}
