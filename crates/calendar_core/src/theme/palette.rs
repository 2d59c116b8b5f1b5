//! Material Design 3 colour palettes.
//!
//! A `MonetPalette` is the token set a platform derives from the wallpaper
//! (Material You). The built-in light/dark palettes are the MD3 baseline and
//! are used whenever no dynamic palette applies.

use serde::{Deserialize, Serialize};

/// The 29 MD3 colour roles, as `#RRGGBB` strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonetPalette {
    pub primary: String,
    pub on_primary: String,
    pub primary_container: String,
    pub on_primary_container: String,

    pub secondary: String,
    pub on_secondary: String,
    pub secondary_container: String,
    pub on_secondary_container: String,

    pub tertiary: String,
    pub on_tertiary: String,
    pub tertiary_container: String,
    pub on_tertiary_container: String,

    pub error: String,
    pub on_error: String,
    pub error_container: String,
    pub on_error_container: String,

    pub background: String,
    pub on_background: String,
    pub surface: String,
    pub on_surface: String,
    pub surface_variant: String,
    pub on_surface_variant: String,

    pub outline: String,
    pub outline_variant: String,
    pub shadow: String,
    pub scrim: String,
    pub inverse_surface: String,
    pub inverse_on_surface: String,
    pub inverse_primary: String,
}

macro_rules! palette {
    ($($role:ident: $value:literal),* $(,)?) => {
        MonetPalette { $($role: $value.to_string()),* }
    };
}

impl MonetPalette {
    /// MD3 baseline light palette.
    pub fn default_light() -> Self {
        palette! {
            primary: "#6750A4",
            on_primary: "#FFFFFF",
            primary_container: "#EADDFF",
            on_primary_container: "#21005D",
            secondary: "#625B71",
            on_secondary: "#FFFFFF",
            secondary_container: "#E8DEF8",
            on_secondary_container: "#1D192B",
            tertiary: "#7D5260",
            on_tertiary: "#FFFFFF",
            tertiary_container: "#FFD8E4",
            on_tertiary_container: "#31111D",
            error: "#BA1A1A",
            on_error: "#FFFFFF",
            error_container: "#FFDAD6",
            on_error_container: "#410002",
            background: "#FFFBFE",
            on_background: "#1C1B1F",
            surface: "#FFFBFE",
            on_surface: "#1C1B1F",
            surface_variant: "#E7E0EC",
            on_surface_variant: "#49454F",
            outline: "#79747E",
            outline_variant: "#CAC4D0",
            shadow: "#000000",
            scrim: "#000000",
            inverse_surface: "#313033",
            inverse_on_surface: "#F4EFF4",
            inverse_primary: "#D0BCFF",
        }
    }

    /// MD3 baseline dark palette.
    pub fn default_dark() -> Self {
        palette! {
            primary: "#D0BCFF",
            on_primary: "#381E72",
            primary_container: "#4F378B",
            on_primary_container: "#EADDFF",
            secondary: "#CCC2DC",
            on_secondary: "#332D41",
            secondary_container: "#4A4458",
            on_secondary_container: "#E8DEF8",
            tertiary: "#EFB8C8",
            on_tertiary: "#492532",
            tertiary_container: "#633B48",
            on_tertiary_container: "#FFD8E4",
            error: "#FFB4AB",
            on_error: "#690005",
            error_container: "#93000A",
            on_error_container: "#FFDAD6",
            background: "#1C1B1F",
            on_background: "#E6E1E5",
            surface: "#1C1B1F",
            on_surface: "#E6E1E5",
            surface_variant: "#49454F",
            on_surface_variant: "#CAC4D0",
            outline: "#938F99",
            outline_variant: "#49454F",
            shadow: "#000000",
            scrim: "#000000",
            inverse_surface: "#E6E1E5",
            inverse_on_surface: "#313033",
            inverse_primary: "#6750A4",
        }
    }

    /// Built-in palette for the given brightness.
    pub fn builtin(is_dark: bool) -> Self {
        if is_dark {
            Self::default_dark()
        } else {
            Self::default_light()
        }
    }
}
