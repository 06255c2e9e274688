use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: distance label → Color32
// ---------------------------------------------------------------------------

/// Stable colours for the selected distances, so a distance keeps its
/// colour when switching between charts.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
}

impl ColorMap {
    pub fn new(distances: &[String]) -> Self {
        let palette = generate_palette(distances.len());
        let mapping = distances.iter().cloned().zip(palette).collect();
        ColorMap { mapping }
    }

    pub fn color_for(&self, distance: &str) -> Color32 {
        self.mapping
            .get(distance)
            .copied()
            .unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colours_are_distinct() {
        let palette = generate_palette(3);
        assert_eq!(palette.len(), 3);
        assert_ne!(palette[0], palette[1]);
        assert_ne!(palette[1], palette[2]);
    }

    #[test]
    fn unknown_distance_is_gray() {
        let map = ColorMap::new(&["50km".to_string()]);
        assert_ne!(map.color_for("50km"), Color32::GRAY);
        assert_eq!(map.color_for("10km"), Color32::GRAY);
    }
}
