//! # formbind-fields
//!
//! Field binders tying declarative [`FieldConfig`]s to shared form state.
//!
//! This crate provides:
//! - One binder per widget family: text, autocomplete, chip group, radio
//!   group, switch, and date/time pickers
//! - A uniform [`FieldHandle`] surface over every binder
//! - A [`FormCoordinator`] for whole-form validation and teardown
//!
//! Binders never own form state. A rendering surface hands them a fresh
//! [`formbind_core::FormState`] snapshot per call and receives writes through
//! the [`formbind_core::UpdateForm`] collaborator.
//!
//! ## Quick Start
//!
//! ```rust
//! use formbind_core::{FormState, NoValidation, OptionConfig};
//! use formbind_fields::{AutocompleteBinder, FieldConfig};
//! use serde_json::json;
//!
//! let config = FieldConfig::new("subscription.plan")
//!     .options(vec![
//!         json!({"id": "basic", "name": "Basic"}),
//!         json!({"id": "pro", "name": "Pro"}),
//!     ])
//!     .option_config(OptionConfig::new().value("id").label("name"));
//!
//! let mut binder = AutocompleteBinder::new(config, Box::new(NoValidation)).unwrap();
//! let mut form = FormState::new();
//!
//! // Selecting an option commits its resolved value, not the record.
//! binder.on_change(json!({"id": "pro", "name": "Pro"}), &mut form);
//! assert_eq!(form.get("subscription.plan"), Some(&json!("pro")));
//!
//! // On reload, the stored value alone still resolves its label.
//! assert_eq!(binder.option_label(&json!("pro")), "Pro");
//! ```

mod autocomplete;
mod chip_group;
mod config;
mod handle;
mod picker;
mod radio_group;
mod switch;
mod text;

pub use autocomplete::AutocompleteBinder;
pub use chip_group::ChipGroupBinder;
pub use config::FieldConfig;
pub use handle::{FieldHandle, FormCoordinator};
pub use picker::{PickerBinder, PickerInput, PickerKind};
pub use radio_group::RadioGroupBinder;
pub use switch::SwitchBinder;
pub use text::TextFieldBinder;
