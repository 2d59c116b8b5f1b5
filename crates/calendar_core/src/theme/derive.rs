//! Pure theme derivation.
//!
//! `derive_theme` is the only place the active palette is chosen; stores call
//! it after every input change instead of patching the previous result.

use crate::model::settings::ThemeMode;
use crate::platform::ColorScheme;
use crate::theme::palette::MonetPalette;
use crate::theme::paper::{create_paper_theme, PaperTheme};

/// Everything the derived theme depends on.
#[derive(Debug, Clone, Copy)]
pub struct ThemeInputs<'a> {
    pub theme_mode: ThemeMode,
    pub dynamic_colors_enabled: bool,
    pub dynamic_colors_available: bool,
    pub monet_palette: Option<&'a MonetPalette>,
    pub system_scheme: Option<ColorScheme>,
}

/// Which palette ended up active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteSource {
    Monet,
    BuiltinDark,
    BuiltinLight,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedTheme {
    pub paper_theme: PaperTheme,
    pub is_dark: bool,
    pub palette_source: PaletteSource,
}

/// Dark when forced, or when following a system that reports dark.
pub fn should_use_dark_mode(mode: ThemeMode, system_scheme: Option<ColorScheme>) -> bool {
    match mode {
        ThemeMode::Dark => true,
        ThemeMode::Light => false,
        ThemeMode::System => system_scheme == Some(ColorScheme::Dark),
    }
}

/// Picks the palette and builds the Paper theme.
///
/// Priority: monet palette (enabled, available and present), then the
/// built-in dark palette when dark, then the built-in light palette.
pub fn derive_theme(inputs: &ThemeInputs<'_>) -> DerivedTheme {
    let is_dark = should_use_dark_mode(inputs.theme_mode, inputs.system_scheme);

    let monet = inputs
        .monet_palette
        .filter(|_| inputs.dynamic_colors_enabled && inputs.dynamic_colors_available);

    let (paper_theme, palette_source) = match monet {
        Some(palette) => (create_paper_theme(palette, is_dark), PaletteSource::Monet),
        None if is_dark => (
            create_paper_theme(&MonetPalette::default_dark(), true),
            PaletteSource::BuiltinDark,
        ),
        None => (
            create_paper_theme(&MonetPalette::default_light(), false),
            PaletteSource::BuiltinLight,
        ),
    };

    DerivedTheme {
        paper_theme,
        is_dark,
        palette_source,
    }
}
