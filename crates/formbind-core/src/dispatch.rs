//! Update dispatch: immediate and debounced commits, validation triggers.
//!
//! All operations run on a single-threaded UI event loop. The only delayed
//! behavior is the debounce on free-text commits, modeled as a cancellable
//! deadline the event loop polls; nothing here blocks or spawns.

use std::time::{Duration, Instant};

use serde_json::Value;
use tracing::{debug, warn};

use crate::state::{FormState, UpdateForm};
use crate::validate::FieldValidator;

/// Quiet period for debounced free-text commits.
pub const DEBOUNCE_QUIET: Duration = Duration::from_millis(200);

/// A cancellable delayed commit owned by a single field instance.
///
/// Each new schedule replaces any pending one, restarting the quiet window;
/// only the most recent schedule ever fires. Timers are per field, so
/// concurrent fields never interfere.
#[derive(Debug, Clone)]
pub struct DebounceTimer {
    quiet: Duration,
    pending: Option<(Instant, Value)>,
}

impl DebounceTimer {
    /// Creates a timer with the given quiet period.
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    /// Schedules `value` to fire after the quiet period, replacing any
    /// pending schedule.
    pub fn schedule(&mut self, value: Value, now: Instant) {
        self.pending = Some((now + self.quiet, value));
    }

    /// Discards any pending schedule.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Takes the pending value if its deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> Option<Value> {
        match &self.pending {
            Some((deadline, _)) if now >= *deadline => self.pending.take().map(|(_, v)| v),
            _ => None,
        }
    }

    /// Takes the pending value immediately, deadline or not.
    pub fn flush(&mut self) -> Option<Value> {
        self.pending.take().map(|(_, v)| v)
    }

    /// Returns whether a schedule is pending.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Default for DebounceTimer {
    fn default() -> Self {
        Self::new(DEBOUNCE_QUIET)
    }
}

/// Per-field dispatcher applying state changes and validation triggers.
///
/// Owns the field's debounce timer and focus flag explicitly; committing and
/// validating are independent operations. A commit never validates and a
/// validate call never mutates state.
#[derive(Debug, Default)]
pub struct UpdateDispatcher {
    attribute: String,
    debounce: DebounceTimer,
    focused: bool,
}

impl UpdateDispatcher {
    /// Creates a dispatcher for an attribute path.
    pub fn new(attribute: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            debounce: DebounceTimer::default(),
            focused: false,
        }
    }

    /// Overrides the debounce quiet period.
    #[must_use]
    pub fn with_quiet_period(mut self, quiet: Duration) -> Self {
        self.debounce = DebounceTimer::new(quiet);
        self
    }

    /// Returns the attribute path this dispatcher writes.
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Returns whether the field currently has input focus.
    pub fn focused(&self) -> bool {
        self.focused
    }

    /// Marks the field focused.
    pub fn focus(&mut self) {
        self.focused = true;
    }

    /// Writes a value synchronously through the collaborator.
    pub fn commit(&self, value: Value, sink: &mut dyn UpdateForm) {
        sink.set_value(&self.attribute, value);
    }

    /// Writes a value synchronously via the patch-object convention.
    pub fn commit_patch(&self, value: Value, sink: &mut dyn UpdateForm) {
        let mut patch = serde_json::Map::new();
        patch.insert(self.attribute.clone(), value);
        sink.apply_patch(patch);
    }

    /// Schedules a debounced write, restarting the quiet window.
    ///
    /// Suppressed entirely while the field is unfocused: externally driven
    /// re-renders must not produce stray writes. Returns whether the schedule
    /// was accepted.
    pub fn schedule(&mut self, value: Value, now: Instant) -> bool {
        if !self.focused {
            debug!(attribute = %self.attribute, "debounced write suppressed while unfocused");
            return false;
        }
        self.debounce.schedule(value, now);
        true
    }

    /// Takes a due debounced value for the caller to commit.
    pub fn poll(&mut self, now: Instant) -> Option<Value> {
        self.debounce.take_due(now)
    }

    /// Clears focus and takes any pending debounced value so the caller can
    /// commit it before validating against fresh state.
    pub fn leave_focus(&mut self) -> Option<Value> {
        self.focused = false;
        let pending = self.debounce.flush();
        if pending.is_some() {
            debug!(attribute = %self.attribute, "flushing pending debounced write on blur");
        }
        pending
    }

    /// Cancels any pending debounced write; called when the field unmounts.
    pub fn detach(&mut self) {
        if self.debounce.is_pending() {
            debug!(attribute = %self.attribute, "cancelling pending debounced write on detach");
        }
        self.debounce.cancel();
        self.focused = false;
    }

    /// Runs the validator against the value read fresh from form state.
    pub fn validate_current(&self, form: &FormState, validator: &dyn FieldValidator) -> Vec<String> {
        validator.validate(form.value_of(&self.attribute))
    }
}

/// Coerces raw text into a numeric stored value at commit time.
///
/// Empty text coerces to the absent sentinel (`Null`), never zero or NaN.
/// Returns `None` when the text does not parse; the caller suppresses the
/// commit and leaves state unchanged (a soft failure, not a validation
/// error).
pub fn coerce_number(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(Value::Null);
    }
    if let Ok(n) = trimmed.parse::<i64>() {
        return Some(Value::from(n));
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => Some(Value::from(n)),
        _ => {
            warn!(input = %text, "numeric coercion failed, commit suppressed");
            None
        }
    }
}
