use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::AqiBand;

// ---------------------------------------------------------------------------
// AQI band colours
// ---------------------------------------------------------------------------

/// Colour used for a severity band (EPA AQI scale).
pub fn band_color(band: AqiBand) -> Color32 {
    match band {
        AqiBand::Good => Color32::from_rgb(0, 228, 0),
        AqiBand::Moderate => Color32::from_rgb(255, 255, 0),
        AqiBand::UnhealthySensitive => Color32::from_rgb(255, 126, 0),
        AqiBand::Unhealthy => Color32::from_rgb(255, 0, 0),
        AqiBand::VeryUnhealthy => Color32::from_rgb(143, 63, 151),
        AqiBand::Hazardous => Color32::from_rgb(126, 0, 35),
    }
}

pub fn aqi_color(aqi: u16) -> Color32 {
    band_color(AqiBand::classify(aqi))
}

/// Outline for tiles above the high-AQI threshold.
pub const HIGH_AQI_OUTLINE: Color32 = Color32::from_rgb(220, 38, 38);

/// Fill for the selected tile.
pub const SELECTED_FILL: Color32 = Color32::from_rgb(37, 99, 235);

// ---------------------------------------------------------------------------
// Tints
// ---------------------------------------------------------------------------

/// Same hue as `color`, with lightness pushed to `lightness` (0–1).
/// Used for tile and card backgrounds so dark text stays readable.
pub fn tint(color: Color32, lightness: f32) -> Color32 {
    let rgb = Srgb::new(
        color.r() as f32 / 255.0,
        color.g() as f32 / 255.0,
        color.b() as f32 / 255.0,
    );
    let mut hsl: Hsl = rgb.into_color();
    hsl.lightness = lightness.clamp(0.0, 1.0);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0).round() as u8,
    )
}

/// Legend entries (band label → colour) for the UI.
pub fn legend_entries() -> Vec<(&'static str, Color32)> {
    AqiBand::THRESHOLDS
        .iter()
        .map(|(_, band)| *band)
        .chain(std::iter::once(AqiBand::Hazardous))
        .map(|band| (band.label(), band_color(band)))
        .collect()
}
