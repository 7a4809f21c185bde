use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

/// Fill colour for histogram bars.
pub const SKY_BLUE: Color32 = Color32::from_rgb(135, 206, 235);

/// Outline / density curve colour drawn over histograms.
pub const DENSITY_LINE: Color32 = Color32::from_rgb(70, 130, 180);

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` soft, visually distinct colours using evenly spaced hues.
pub fn pastel_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.80);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0).round() as u8,
                (rgb.green * 255.0).round() as u8,
                (rgb.blue * 255.0).round() as u8,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size_and_distinct_colours() {
        assert!(pastel_palette(0).is_empty());
        let p = pastel_palette(6);
        assert_eq!(p.len(), 6);
        for (i, a) in p.iter().enumerate() {
            for b in &p[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn palette_is_light() {
        for c in pastel_palette(12) {
            let [r, g, b, _] = c.to_array();
            assert!(r as u16 + g as u16 + b as u16 > 450, "{c:?}");
        }
    }
}
