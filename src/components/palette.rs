//! Fixed color palette strip plus the custom-color picker button.

use egui::{Color32, Sense, Stroke, Vec2};

/// The fixed, ordered palette. Clicking a swatch sets the foreground color.
pub const SWATCHES: [(&str, Color32); 14] = [
    ("Black", Color32::BLACK),
    ("Brown", Color32::from_rgb(165, 42, 42)),
    ("Red", Color32::from_rgb(255, 0, 0)),
    ("Orange", Color32::from_rgb(255, 165, 0)),
    ("Pink", Color32::from_rgb(255, 192, 203)),
    ("Yellow", Color32::from_rgb(255, 255, 0)),
    ("Light Green", Color32::from_rgb(144, 238, 144)),
    ("Dark Green", Color32::from_rgb(0, 100, 0)),
    ("Dark Blue", Color32::from_rgb(0, 0, 139)),
    ("Dark Cyan", Color32::from_rgb(0, 139, 139)),
    ("Sky Blue", Color32::from_rgb(135, 206, 235)),
    ("Light Grey", Color32::from_rgb(211, 211, 211)),
    ("Grey", Color32::from_rgb(128, 128, 128)),
    ("White", Color32::WHITE),
];

const SWATCH_SIZE: Vec2 = Vec2::new(26.0, 26.0);

pub struct PalettePanel {
    /// Backing value for the custom-color button; doubles as the "custom"
    /// indicator swatch (it shows the last confirmed pick).
    custom_color: Color32,
}

impl Default for PalettePanel {
    fn default() -> Self {
        Self {
            custom_color: Color32::WHITE,
        }
    }
}

impl PalettePanel {
    /// Render the swatch column. Returns the picked color, if any, for the
    /// controller to dispatch; the panel never mutates application state.
    pub fn show(&mut self, ui: &mut egui::Ui, current: Color32) -> Option<Color32> {
        let mut picked = None;

        for (name, color) in SWATCHES {
            let (rect, resp) = ui.allocate_exact_size(SWATCH_SIZE, Sense::click());
            if ui.is_rect_visible(rect) {
                let p = ui.painter();
                p.rect_filled(rect, 3.0, color);
                let border = if current == color {
                    Stroke::new(2.0, ui.visuals().selection.stroke.color)
                } else {
                    Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color)
                };
                p.rect_stroke(rect, 3.0, border);
            }
            let resp = resp.on_hover_text(name);
            if resp.clicked() {
                picked = Some(color);
            }
        }

        ui.add_space(6.0);

        // Custom color: egui's picker popup. The button commits on every
        // change while the popup is open, which matches "confirmed pick wins,
        // closing without touching anything changes nothing".
        let before = self.custom_color;
        let resp = ui
            .color_edit_button_srgba(&mut self.custom_color)
            .on_hover_text("Custom color");
        if resp.changed() && self.custom_color != before {
            // Stroke colors are always opaque.
            self.custom_color = Color32::from_rgb(
                self.custom_color.r(),
                self.custom_color.g(),
                self.custom_color.b(),
            );
            picked = Some(self.custom_color);
        }

        picked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_order_matches_the_board_layout() {
        assert_eq!(SWATCHES.len(), 14);
        assert_eq!(SWATCHES[0].1, Color32::BLACK);
        assert_eq!(SWATCHES[13].1, Color32::WHITE);
    }

    #[test]
    fn swatches_are_unique() {
        for (i, (_, a)) in SWATCHES.iter().enumerate() {
            for (_, b) in SWATCHES.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
