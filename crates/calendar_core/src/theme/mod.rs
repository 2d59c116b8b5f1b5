//! Dynamic theming: palettes, the derived Paper theme and colour helpers.
//!
//! # Responsibility
//! - Hold the MD3 baseline palettes and the Paper theme shape.
//! - Derive the active theme from mode, platform and dynamic-colour inputs.
//!
//! # Invariants
//! - The active palette is never set directly; it is always the output of
//!   `derive::derive_theme`.

pub mod color;
pub mod derive;
pub mod palette;
pub mod paper;

pub use derive::{derive_theme, should_use_dark_mode, DerivedTheme, PaletteSource, ThemeInputs};
pub use palette::MonetPalette;
pub use paper::{create_paper_theme, CalendarTheme, PaperTheme};
