use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::classify::Classification;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

fn hsl_to_color32(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let rgb: Srgb = Hsl::new(hue, saturation, lightness).into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = 200.0 + (i as f32 / n as f32) * 360.0;
            hsl_to_color32(hue % 360.0, 0.65, 0.55)
        })
        .collect()
}

/// Marker colour for a classified point.
pub fn classification_color(label: Classification) -> Color32 {
    match label {
        Classification::Strong => hsl_to_color32(130.0, 0.55, 0.45),
        Classification::Neutral => hsl_to_color32(45.0, 0.10, 0.60),
        Classification::Weak => hsl_to_color32(5.0, 0.70, 0.55),
    }
}

// ---------------------------------------------------------------------------
// Series name → Color32
// ---------------------------------------------------------------------------

/// Assigns each series of a chart a distinct colour.
#[derive(Debug, Clone)]
pub struct SeriesColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl SeriesColors {
    pub fn new<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let names: Vec<&str> = names.into_iter().collect();
        let mapping = names
            .iter()
            .zip(generate_palette(names.len()))
            .map(|(n, c)| (n.to_string(), c))
            .collect();

        SeriesColors {
            mapping,
            default_color: Color32::LIGHT_BLUE,
        }
    }

    pub fn color_for(&self, name: &str) -> Color32 {
        self.mapping
            .get(name)
            .copied()
            .unwrap_or(self.default_color)
    }
}
