use palette::{Hsl, IntoColor, Lighten, Srgb};

// ---------------------------------------------------------------------------
// CSS colour resolution
// ---------------------------------------------------------------------------

/// Parse a CSS colour name (`"navy"`) or hex literal (`"#000080"`, `"#008"`).
pub fn parse_color(spec: &str) -> Option<Srgb<u8>> {
    let spec = spec.trim();
    if spec.starts_with('#') {
        return spec.parse::<Srgb<u8>>().ok();
    }
    palette::named::from_str(&spec.to_ascii_lowercase())
}

/// `rgba(...)` fill for scatter markers.
pub fn css_rgba(color: Srgb<u8>, alpha: f32) -> String {
    format!(
        "rgba({}, {}, {}, {})",
        color.red,
        color.green,
        color.blue,
        alpha.clamp(0.0, 1.0)
    )
}

/// A lighter tint of `color`, used for the selected span of the range slider.
pub fn tint(color: Srgb<u8>, amount: f32) -> Srgb<u8> {
    let hsl: Hsl = color.into_format::<f32>().into_color();
    let rgb: Srgb = hsl.lighten(amount).into_color();
    rgb.into_format()
}

/// `#rrggbb` form of a colour.
pub fn css_hex(color: Srgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}
