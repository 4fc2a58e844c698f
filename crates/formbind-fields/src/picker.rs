//! Date and time picker binders.
//!
//! Stored values are formatted strings so form state stays serializable; each
//! kind pins the stored format. Malformed input is a soft failure: the commit
//! is suppressed and logged, never surfaced as a validation error.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use formbind_core::{ConfigError, FieldValidator, FormState, UpdateDispatcher, UpdateForm};
use serde_json::Value;
use tracing::warn;

use crate::config::FieldConfig;

/// The temporal kind a picker field stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerKind {
    /// Calendar date, stored as `YYYY-MM-DD`.
    Date,
    /// Wall-clock time, stored as `HH:MM:SS`.
    Time,
    /// Combined date and time, stored as `YYYY-MM-DD HH:MM:SS`.
    DateTime,
}

impl PickerKind {
    /// Returns the stored string format for this kind.
    pub fn stored_format(self) -> &'static str {
        match self {
            Self::Date => "%Y-%m-%d",
            Self::Time => "%H:%M:%S",
            Self::DateTime => "%Y-%m-%d %H:%M:%S",
        }
    }
}

/// A change payload from a picker widget.
#[derive(Debug, Clone, PartialEq)]
pub enum PickerInput {
    /// A date picked from the calendar surface.
    Date(NaiveDate),
    /// A time picked from the clock surface.
    Time(NaiveTime),
    /// A combined value picked from the surface.
    DateTime(NaiveDateTime),
    /// Raw text typed into the keyboard input.
    Text(String),
    /// The field was cleared.
    Cleared,
}

/// Binds a date/time picker to form state.
pub struct PickerBinder {
    config: FieldConfig,
    kind: PickerKind,
    dispatcher: UpdateDispatcher,
    validator: Box<dyn FieldValidator>,
    errors: Vec<String>,
}

impl PickerBinder {
    /// Creates a binder; fails when the config has no attribute.
    pub fn new(
        config: FieldConfig,
        kind: PickerKind,
        validator: Box<dyn FieldValidator>,
    ) -> Result<Self, ConfigError> {
        config.ensure_attribute()?;
        let dispatcher = UpdateDispatcher::new(&config.attribute);
        Ok(Self {
            config,
            kind,
            dispatcher,
            validator,
            errors: Vec::new(),
        })
    }

    /// Returns the field configuration.
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Returns the temporal kind.
    pub fn kind(&self) -> PickerKind {
        self.kind
    }

    /// Returns the current error list.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Renders the stored string, empty when absent.
    pub fn display_value(&self, form: &FormState) -> String {
        form.value_of(&self.config.attribute)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }

    /// Parses the stored string back to a date-time for the picker surface.
    ///
    /// Date-only kinds parse at midnight, time-only kinds onto an epoch date,
    /// so the surface always receives a complete value to position itself.
    pub fn current(&self, form: &FormState) -> Option<NaiveDateTime> {
        let stored = form.value_of(&self.config.attribute)?.as_str()?;
        match self.kind {
            PickerKind::Date => NaiveDate::parse_from_str(stored, self.kind.stored_format())
                .ok()
                .map(|d| d.and_time(NaiveTime::MIN)),
            PickerKind::Time => NaiveTime::parse_from_str(stored, self.kind.stored_format())
                .ok()
                .map(|t| NaiveDateTime::new(NaiveDate::default(), t)),
            PickerKind::DateTime => {
                NaiveDateTime::parse_from_str(stored, self.kind.stored_format()).ok()
            }
        }
    }

    /// Handles a picker change: formats the input to the stored string and
    /// commits it (patch convention). A kind mismatch or malformed text
    /// suppresses the commit and leaves state unchanged.
    pub fn on_change(&mut self, input: &PickerInput, sink: &mut dyn UpdateForm) {
        let Some(stored) = self.format_input(input) else {
            return;
        };
        self.dispatcher.commit_patch(stored, sink);
    }

    /// Handles loss of focus: validates the current stored value.
    pub fn on_blur(&mut self, form: &FormState) -> &[String] {
        self.errors = self.dispatcher.validate_current(form, self.validator.as_ref());
        &self.errors
    }

    /// Handles the commit key (Enter): validates the current stored value.
    pub fn on_enter(&mut self, form: &FormState) -> &[String] {
        self.errors = self.dispatcher.validate_current(form, self.validator.as_ref());
        &self.errors
    }

    /// Validates the current stored value on demand.
    pub fn validate_now(&mut self, form: &FormState) -> &[String] {
        self.errors = self.dispatcher.validate_current(form, self.validator.as_ref());
        &self.errors
    }

    fn format_input(&self, input: &PickerInput) -> Option<Value> {
        let format = self.kind.stored_format();
        match (self.kind, input) {
            (_, PickerInput::Cleared) => Some(Value::Null),
            (PickerKind::Date, PickerInput::Date(d)) => {
                Some(Value::String(d.format(format).to_string()))
            }
            (PickerKind::Time, PickerInput::Time(t)) => {
                Some(Value::String(t.format(format).to_string()))
            }
            (PickerKind::DateTime, PickerInput::DateTime(dt)) => {
                Some(Value::String(dt.format(format).to_string()))
            }
            // Date/time kinds accept a combined value by truncation.
            (PickerKind::Date, PickerInput::DateTime(dt)) => {
                Some(Value::String(dt.date().format(format).to_string()))
            }
            (PickerKind::Time, PickerInput::DateTime(dt)) => {
                Some(Value::String(dt.time().format(format).to_string()))
            }
            (_, PickerInput::Text(text)) => self.parse_text(text),
            (kind, other) => {
                warn!(attribute = %self.config.attribute, ?kind, input = ?other, "picker input kind mismatch, commit suppressed");
                None
            }
        }
    }

    fn parse_text(&self, text: &str) -> Option<Value> {
        if text.trim().is_empty() {
            return Some(Value::Null);
        }
        let format = self.kind.stored_format();
        let parsed = match self.kind {
            PickerKind::Date => NaiveDate::parse_from_str(text, format)
                .map(|d| d.format(format).to_string()),
            PickerKind::Time => NaiveTime::parse_from_str(text, format)
                .map(|t| t.format(format).to_string()),
            PickerKind::DateTime => NaiveDateTime::parse_from_str(text, format)
                .map(|dt| dt.format(format).to_string()),
        };
        match parsed {
            Ok(stored) => Some(Value::String(stored)),
            Err(err) => {
                warn!(attribute = %self.config.attribute, input = %text, %err, "malformed picker text, commit suppressed");
                None
            }
        }
    }
}

impl std::fmt::Debug for PickerBinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PickerBinder")
            .field("attribute", &self.config.attribute)
            .field("kind", &self.kind)
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}
