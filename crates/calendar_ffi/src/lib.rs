//! Flutter-facing bindings over `calendar_core`.

pub mod api;
