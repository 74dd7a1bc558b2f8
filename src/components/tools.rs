//! Pencil/eraser tool state and the two-state mode toggle.

use egui::Color32;

/// Fixed eraser thickness, applied on every switch into eraser mode.
pub const ERASER_THICKNESS: f32 = 5.0;

/// Default pencil thickness at startup.
pub const DEFAULT_THICKNESS: f32 = 3.0;

/// Slider range for the thickness control.
pub const THICKNESS_RANGE: std::ops::RangeInclusive<f32> = 0.0..=100.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Pencil,
    Eraser,
}

impl Tool {
    pub fn label(&self) -> &'static str {
        match self {
            Tool::Pencil => "Pencil",
            Tool::Eraser => "Eraser",
        }
    }
}

/// Pencil settings saved when entering eraser mode, restored on the way back.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Reserved {
    color: Color32,
    thickness: f32,
}

pub struct ToolState {
    pub tool: Tool,
    /// Current foreground (stroke) color.
    pub color: Color32,
    /// Current stroke thickness in pixels.
    pub thickness: f32,
    reserved: Option<Reserved>,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            tool: Tool::Pencil,
            color: Color32::BLACK,
            thickness: DEFAULT_THICKNESS,
            reserved: None,
        }
    }
}

impl ToolState {
    /// Switch between pencil and eraser.
    ///
    /// Pencil -> eraser: the current color and thickness go into the reserve
    /// slot, the stroke color becomes `background` (erasing is painting in the
    /// background color) and the thickness is forced to [`ERASER_THICKNESS`].
    /// Eraser -> pencil: the reserved values come back. Returns the new tool.
    pub fn toggle(&mut self, background: Color32) -> Tool {
        match self.tool {
            Tool::Pencil => {
                self.reserved = Some(Reserved {
                    color: self.color,
                    thickness: self.thickness,
                });
                self.color = background;
                self.thickness = ERASER_THICKNESS;
                self.tool = Tool::Eraser;
            }
            Tool::Eraser => {
                if let Some(reserved) = self.reserved.take() {
                    self.color = reserved.color;
                    self.thickness = reserved.thickness;
                }
                self.tool = Tool::Pencil;
            }
        }
        self.tool
    }

    /// Set the foreground color directly, in either mode. Picking a color
    /// while erasing turns the eraser into a pencil stroke in that color
    /// until the next toggle, which still restores the pre-eraser settings
    /// from the reserve slot.
    pub fn set_color(&mut self, color: Color32) {
        self.color = color;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_round_trip_restores_color_and_thickness() {
        let mut state = ToolState {
            color: Color32::RED,
            thickness: 12.5,
            ..Default::default()
        };

        assert_eq!(state.toggle(Color32::WHITE), Tool::Eraser);
        assert_eq!(state.color, Color32::WHITE);
        assert_eq!(state.thickness, ERASER_THICKNESS);

        assert_eq!(state.toggle(Color32::WHITE), Tool::Pencil);
        assert_eq!(state.color, Color32::RED);
        assert_eq!(state.thickness, 12.5);
    }

    #[test]
    fn eraser_follows_current_background() {
        let mut state = ToolState::default();
        state.toggle(Color32::YELLOW);
        assert_eq!(state.color, Color32::YELLOW);
    }

    #[test]
    fn set_color_applies_directly_in_eraser_mode() {
        let mut state = ToolState {
            color: Color32::RED,
            ..Default::default()
        };
        state.toggle(Color32::WHITE);
        state.set_color(Color32::BLUE);
        // The pick is the foreground immediately, no mode switch needed.
        assert_eq!(state.color, Color32::BLUE);
        // Toggling back still restores the pre-eraser settings.
        state.toggle(Color32::WHITE);
        assert_eq!(state.color, Color32::RED);
    }
}
