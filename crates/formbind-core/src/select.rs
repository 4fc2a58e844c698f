//! Selection events and the adapter between widget and stored representations.
//!
//! An underlying selection widget delivers its change payload in one of two
//! shapes: the full raw option (e.g., when the selection box opens) or the
//! already-reduced stored value (e.g., on reselection from state). The
//! [`SelectionEvent`] union makes that duality explicit instead of relying on
//! runtime type inspection at every use site.

use serde_json::Value;

use crate::options::{display_text, normalize, OptionConfig};

/// A selection payload, classified by representation.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEvent {
    /// The widget delivered the full raw option (or array of raw options).
    RawOption(Value),
    /// The widget delivered a value already reduced to stored form.
    StoredValue(Value),
}

impl SelectionEvent {
    /// Classifies a widget change payload.
    ///
    /// Without a `value` selector the raw and stored representations
    /// coincide, so every payload classifies as [`SelectionEvent::RawOption`].
    /// With one, structured payloads are raw options and primitives are
    /// stored values; arrays (multi-value mode) classify by their first
    /// element.
    pub fn classify(payload: Value, config: Option<&OptionConfig>) -> Self {
        let has_value_selector = config.is_some_and(|c| c.value.is_some());
        if !has_value_selector {
            return Self::RawOption(payload);
        }

        let structured = match &payload {
            Value::Array(items) => items.first().is_none_or(Value::is_object),
            other => other.is_object(),
        };

        if structured {
            Self::RawOption(payload)
        } else {
            Self::StoredValue(payload)
        }
    }

    /// Returns the carried payload.
    pub fn payload(&self) -> &Value {
        match self {
            Self::RawOption(value) | Self::StoredValue(value) => value,
        }
    }

    /// Consumes the event, returning the carried payload.
    pub fn into_payload(self) -> Value {
        match self {
            Self::RawOption(value) | Self::StoredValue(value) => value,
        }
    }
}

/// Resolves the display label for a selection event.
///
/// Raw options normalize directly. Stored values reverse-resolve through the
/// option list ([`resolve_display_value`]).
pub fn display_label(event: &SelectionEvent, options: &[Value], config: Option<&OptionConfig>) -> String {
    match event {
        SelectionEvent::RawOption(raw) => normalize(raw, config, false).label_text(),
        SelectionEvent::StoredValue(stored) => resolve_display_value(stored, options, config),
    }
}

/// Reverse-resolves a stored value to a display label.
///
/// Scans the option list for the option whose normalized value deep-equals
/// the stored value; when none matches, falls back to the stored value's own
/// string form so the field still renders (e.g., on initial load with options
/// not yet populated).
pub fn resolve_display_value(stored: &Value, options: &[Value], config: Option<&OptionConfig>) -> String {
    options
        .iter()
        .find(|option| normalize(option, config, false).value.as_ref() == Some(stored))
        .map_or_else(
            || display_text(stored),
            |option| normalize(option, config, false).label_text(),
        )
}

/// Returns whether `candidate` selects `option`.
///
/// Structured candidates compare by normalized value; primitive candidates
/// compare against the normalized value directly. Both comparisons are deep
/// structural equality, never identity: two structurally identical option
/// records are the same option.
pub fn is_selected(option: &Value, candidate: &Value, config: Option<&OptionConfig>) -> bool {
    let option_value = normalize(option, config, false).value;
    if candidate.is_object() || candidate.is_array() {
        option_value == normalize(candidate, config, false).value
    } else {
        option_value.as_ref() == Some(candidate)
    }
}

/// Reduces a selected option to the value committed to form state.
///
/// Always the normalized `value` (element-wise under `multiple`), never the
/// raw option record, keeping form state serializable and decoupled from the
/// option shape. Unresolvable maps to `Null`.
pub fn resolve_stored_value(selected: &Value, config: Option<&OptionConfig>, multiple: bool) -> Value {
    normalize(selected, config, multiple).value_or_null()
}
