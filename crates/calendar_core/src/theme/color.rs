//! Hex colour helpers for event chips.

/// Parses `#RRGGBB` (leading `#` optional) into channels.
pub fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// CSS `rgba(...)` string; unparseable input renders as transparent black.
pub fn hex_to_rgba(hex: &str, alpha: f32) -> String {
    let (r, g, b) = parse_hex(hex).unwrap_or((0, 0, 0));
    format!("rgba({r}, {g}, {b}, {alpha})")
}

/// Black or white, whichever reads better on `background`.
pub fn contrast_color(background: &str) -> &'static str {
    let (r, g, b) = parse_hex(background).unwrap_or((0, 0, 0));
    let luminance =
        (0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b)) / 255.0;
    if luminance > 0.5 {
        "#000000"
    } else {
        "#FFFFFF"
    }
}
