//! Domain records owned by the stores.
//!
//! # Responsibility
//! - Define events, settings and the helpers that interpret their fields.
//!
//! # Invariants
//! - Field names serialize in camelCase to match the persisted slices.

pub mod date;
pub mod event;
pub mod settings;
pub mod validation;
