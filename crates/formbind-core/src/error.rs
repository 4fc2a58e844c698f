//! Error types for field binding.

use std::collections::HashMap;
use thiserror::Error;

/// Field-configuration errors, raised at binder construction rather than at
/// render time.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The field has no attribute path.
    #[error("field attribute must be a non-empty dotted path")]
    EmptyAttribute,

    /// A switch field was configured with other than two options.
    #[error("switch fields require exactly two options, got {0}")]
    SwitchOptionCount(usize),
}

/// Collection of validation errors by attribute path.
#[derive(Debug, Clone, Default)]
pub struct ValidationErrors {
    /// Errors keyed by attribute.
    pub errors: HashMap<String, Vec<String>>,
}

impl ValidationErrors {
    /// Creates a new empty `ValidationErrors`.
    pub fn new() -> Self {
        Self {
            errors: HashMap::new(),
        }
    }

    /// Adds an error for an attribute.
    pub fn add(&mut self, attribute: &str, message: impl Into<String>) {
        self.errors
            .entry(attribute.to_string())
            .or_default()
            .push(message.into());
    }

    /// Returns whether there are any errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of attributes with errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns errors for a specific attribute.
    pub fn get(&self, attribute: &str) -> Option<&Vec<String>> {
        self.errors.get(attribute)
    }

    /// Returns all errors as a flat list.
    pub fn all_errors(&self) -> Vec<(&str, &str)> {
        self.errors
            .iter()
            .flat_map(|(attribute, messages)| {
                messages
                    .iter()
                    .map(move |msg| (attribute.as_str(), msg.as_str()))
            })
            .collect()
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (attribute, messages) in &self.errors {
            for message in messages {
                writeln!(f, "{attribute}: {message}")?;
            }
        }
        Ok(())
    }
}

/// Result type alias for binder construction.
pub type Result<T> = std::result::Result<T, ConfigError>;
