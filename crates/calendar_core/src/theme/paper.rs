//! Paper (MD3) theme object consumed by the UI layer.
//!
//! # Invariants
//! - Every palette role is copied verbatim into `PaperColors`.
//! - Roles a palette does not carry (disabled states, backdrop, elevation)
//!   come from the MD3 light/dark base template.

use crate::theme::palette::MonetPalette;
use serde::{Deserialize, Serialize};

const MD3_VERSION: u8 = 3;
const MD3_ROUNDNESS: u8 = 4;

/// Surface tints for the six MD3 elevation levels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Elevation {
    pub level0: String,
    pub level1: String,
    pub level2: String,
    pub level3: String,
    pub level4: String,
    pub level5: String,
}

/// Full semantic colour set of a Paper theme.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperColors {
    #[serde(flatten)]
    pub palette: MonetPalette,
    pub surface_disabled: String,
    pub on_surface_disabled: String,
    pub backdrop: String,
    pub elevation: Elevation,
}

/// Theme object handed to the UI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperTheme {
    pub dark: bool,
    pub version: u8,
    pub roundness: u8,
    pub colors: PaperColors,
}

struct BaseTemplate {
    surface_disabled: &'static str,
    on_surface_disabled: &'static str,
    backdrop: &'static str,
    elevation: [&'static str; 6],
}

const MD3_LIGHT_BASE: BaseTemplate = BaseTemplate {
    surface_disabled: "rgba(28, 27, 31, 0.12)",
    on_surface_disabled: "rgba(28, 27, 31, 0.38)",
    backdrop: "rgba(50, 47, 55, 0.4)",
    elevation: [
        "transparent",
        "rgb(247, 243, 249)",
        "rgb(243, 237, 246)",
        "rgb(238, 232, 244)",
        "rgb(236, 230, 243)",
        "rgb(233, 227, 241)",
    ],
};

const MD3_DARK_BASE: BaseTemplate = BaseTemplate {
    surface_disabled: "rgba(230, 225, 229, 0.12)",
    on_surface_disabled: "rgba(230, 225, 229, 0.38)",
    backdrop: "rgba(50, 47, 55, 0.4)",
    elevation: [
        "transparent",
        "rgb(37, 35, 42)",
        "rgb(44, 40, 49)",
        "rgb(49, 44, 56)",
        "rgb(51, 46, 58)",
        "rgb(52, 49, 63)",
    ],
};

/// Overlays `palette` onto the light or dark MD3 base template.
pub fn create_paper_theme(palette: &MonetPalette, is_dark: bool) -> PaperTheme {
    let base = if is_dark { &MD3_DARK_BASE } else { &MD3_LIGHT_BASE };
    let [level0, level1, level2, level3, level4, level5] = base.elevation.map(str::to_string);

    PaperTheme {
        dark: is_dark,
        version: MD3_VERSION,
        roundness: MD3_ROUNDNESS,
        colors: PaperColors {
            palette: palette.clone(),
            surface_disabled: base.surface_disabled.to_string(),
            on_surface_disabled: base.on_surface_disabled.to_string(),
            backdrop: base.backdrop.to_string(),
            elevation: Elevation {
                level0,
                level1,
                level2,
                level3,
                level4,
                level5,
            },
        },
    }
}

impl Default for PaperTheme {
    fn default() -> Self {
        create_paper_theme(&MonetPalette::default_light(), false)
    }
}

/// Month-grid widget colours and typography derived from a Paper theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarTheme {
    pub background_color: String,
    pub calendar_background: String,
    pub text_section_title_color: String,
    pub selected_day_background_color: String,
    pub selected_day_text_color: String,
    pub today_text_color: String,
    pub day_text_color: String,
    pub text_disabled_color: String,
    pub dot_color: String,
    pub selected_dot_color: String,
    pub arrow_color: String,
    pub disabled_arrow_color: String,
    pub month_text_color: String,
    pub indicator_color: String,
    pub text_day_font_weight: &'static str,
    pub text_month_font_weight: &'static str,
    pub text_day_header_font_weight: &'static str,
    pub text_day_font_size: u8,
    pub text_month_font_size: u8,
    pub text_day_header_font_size: u8,
}

impl CalendarTheme {
    pub fn from_paper(theme: &PaperTheme) -> Self {
        let colors = &theme.colors.palette;
        Self {
            background_color: colors.background.clone(),
            calendar_background: colors.background.clone(),
            text_section_title_color: colors.on_surface_variant.clone(),
            selected_day_background_color: colors.primary.clone(),
            selected_day_text_color: colors.on_primary.clone(),
            today_text_color: colors.primary.clone(),
            day_text_color: colors.on_surface.clone(),
            text_disabled_color: colors.on_surface_variant.clone(),
            dot_color: colors.secondary.clone(),
            selected_dot_color: colors.on_primary.clone(),
            arrow_color: colors.primary.clone(),
            disabled_arrow_color: colors.on_surface_variant.clone(),
            month_text_color: colors.on_surface.clone(),
            indicator_color: colors.primary.clone(),
            text_day_font_weight: "300",
            text_month_font_weight: "bold",
            text_day_header_font_weight: "500",
            text_day_font_size: 16,
            text_month_font_size: 18,
            text_day_header_font_size: 13,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{create_paper_theme, CalendarTheme};
    use crate::theme::palette::MonetPalette;

    #[test]
    fn palette_roles_override_base_and_extras_follow_brightness() {
        let mut palette = MonetPalette::default_light();
        palette.primary = "#112233".to_string();

        let dark = create_paper_theme(&palette, true);
        assert!(dark.dark);
        assert_eq!(dark.colors.palette.primary, "#112233");
        assert_eq!(dark.colors.elevation.level1, "rgb(37, 35, 42)");

        let light = create_paper_theme(&palette, false);
        assert_eq!(light.colors.surface_disabled, "rgba(28, 27, 31, 0.12)");
    }

    #[test]
    fn colors_serialize_flat_with_camel_case_roles() {
        let theme = create_paper_theme(&MonetPalette::default_dark(), true);
        let json = serde_json::to_value(&theme).unwrap();
        assert_eq!(json["colors"]["onPrimaryContainer"], "#EADDFF");
        assert_eq!(json["colors"]["elevation"]["level0"], "transparent");
        assert_eq!(json["version"], 3);
    }

    #[test]
    fn calendar_theme_maps_primary_roles() {
        let theme = create_paper_theme(&MonetPalette::default_light(), false);
        let calendar = CalendarTheme::from_paper(&theme);
        assert_eq!(calendar.selected_day_background_color, "#6750A4");
        assert_eq!(calendar.dot_color, "#625B71");
    }
}
