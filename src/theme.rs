use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Accent colours
// ---------------------------------------------------------------------------

/// Convert an HSL triple (hue in degrees) to an egui colour.
pub fn hsl(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let rgb: Srgb = Hsl::new(hue, saturation, lightness).into_color();
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0).round() as u8,
    )
}

/// Colours used on top of the stock egui visuals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    /// Buttons and highlights (indigo).
    pub accent: Color32,
    /// Sale price cells (emerald).
    pub positive: Color32,
    /// Error text and the clear button (red).
    pub danger: Color32,
    /// Secondary text.
    pub muted: Color32,
}

impl Theme {
    /// Lighter tones on dark backgrounds, deeper ones on light.
    pub fn for_mode(dark_mode: bool) -> Self {
        let lightness = if dark_mode { 0.65 } else { 0.42 };
        Theme {
            accent: hsl(239.0, 0.84, lightness),
            positive: hsl(160.0, 0.84, lightness - 0.05),
            danger: hsl(0.0, 0.72, lightness + 0.05),
            muted: hsl(215.0, 0.16, if dark_mode { 0.65 } else { 0.47 }),
        }
    }
}
