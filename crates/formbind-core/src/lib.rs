//! # formbind-core
//!
//! Option normalization, value binding and update dispatch for declarative
//! form fields.
//!
//! This crate provides:
//! - Canonical `{key, value, label}` normalization of heterogeneous options
//! - Dotted-path access into JSON-tree form state
//! - The adapter between widget selection events and stored values
//! - Immediate and debounced state writes with blur/Enter validation triggers
//!
//! ## Quick Start
//!
//! ```rust
//! use formbind_core::{
//!     normalize, resolve_display_value, resolve_stored_value,
//!     FormState, OptionConfig, UpdateForm,
//! };
//! use serde_json::json;
//!
//! let options = vec![json!({"id": 1, "name": "A"}), json!({"id": 2, "name": "B"})];
//! let config = OptionConfig::new().value("id").label("name");
//!
//! // Selecting the second option commits its resolved value, not the record.
//! let stored = resolve_stored_value(&options[1], Some(&config), false);
//! assert_eq!(stored, json!(2));
//!
//! let mut form = FormState::new();
//! form.set_value("choice", stored);
//!
//! // Reloading with only the stored value still recovers the label.
//! let label = resolve_display_value(form.get("choice").unwrap(), &options, Some(&config));
//! assert_eq!(label, "B");
//!
//! // Normalization is the identity for primitive option sets.
//! let opt = normalize(&json!("red"), None, false);
//! assert_eq!(opt.value, Some(json!("red")));
//! ```
//!
//! ## Dispatch
//!
//! ```rust
//! use formbind_core::{FormState, UpdateDispatcher};
//! use serde_json::json;
//! use std::time::{Duration, Instant};
//!
//! let mut dispatcher = UpdateDispatcher::new("notes");
//! let mut form = FormState::new();
//! let now = Instant::now();
//!
//! // Rapid keystrokes coalesce into a single debounced write.
//! dispatcher.focus();
//! dispatcher.schedule(json!("h"), now);
//! dispatcher.schedule(json!("hi"), now + Duration::from_millis(50));
//!
//! if let Some(value) = dispatcher.poll(now + Duration::from_millis(300)) {
//!     dispatcher.commit(value, &mut form);
//! }
//! assert_eq!(form.get("notes"), Some(&json!("hi")));
//! ```

pub mod dispatch;
pub mod error;
pub mod options;
pub mod path;
pub mod select;
pub mod state;
pub mod validate;

pub use dispatch::{coerce_number, DebounceTimer, UpdateDispatcher, DEBOUNCE_QUIET};
pub use error::{ConfigError, Result, ValidationErrors};
pub use options::{derive_option_list, display_text, normalize, CanonicalOption, OptionConfig};
pub use select::{
    display_label, is_selected, resolve_display_value, resolve_stored_value, SelectionEvent,
};
pub use state::{FormState, UpdateForm};
pub use validate::{FieldValidator, NoValidation, RequiredValidator};
