//! Validation collaborator contract.
//!
//! The validation-rule engine lives outside this crate; binders only need a
//! synchronous function from the current stored value to zero or more
//! human-readable messages. Failures are data, never control flow: a field
//! always renders regardless of validation outcome.

use serde_json::Value;

/// Validates a field's current stored value.
///
/// `None` means the field is absent. Implementations must be side-effect-free
/// on form state.
pub trait FieldValidator: Send + Sync {
    /// Returns zero or more error messages for `value`.
    fn validate(&self, value: Option<&Value>) -> Vec<String>;
}

impl<F> FieldValidator for F
where
    F: Fn(Option<&Value>) -> Vec<String> + Send + Sync,
{
    fn validate(&self, value: Option<&Value>) -> Vec<String> {
        self(value)
    }
}

/// Validator that accepts every value.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoValidation;

impl FieldValidator for NoValidation {
    fn validate(&self, _value: Option<&Value>) -> Vec<String> {
        Vec::new()
    }
}

/// Validator that rejects absent values.
#[derive(Debug, Clone)]
pub struct RequiredValidator {
    message: String,
}

impl RequiredValidator {
    /// Creates a validator with the default message.
    pub fn new() -> Self {
        Self {
            message: "This field is required.".to_string(),
        }
    }

    /// Creates a validator with a custom message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for RequiredValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldValidator for RequiredValidator {
    fn validate(&self, value: Option<&Value>) -> Vec<String> {
        let present = match value {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.trim().is_empty(),
            Some(Value::Array(items)) => !items.is_empty(),
            Some(_) => true,
        };
        if present {
            Vec::new()
        } else {
            vec![self.message.clone()]
        }
    }
}
