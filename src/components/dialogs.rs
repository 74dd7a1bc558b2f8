//! Modal dialogs. Only one exists in this application: the yes/no
//! confirmation shown before a destructive canvas clear.

use egui::{Align2, RichText, Vec2};

/// Outcome of showing a dialog for one frame.
pub enum DialogResult {
    /// Dialog is still open, nothing decided this frame.
    Open,
    /// User confirmed the action.
    Yes,
    /// User declined; nothing is touched.
    No,
}

/// Confirmation before clearing a canvas that has unsaved drawing on it.
pub struct ConfirmClearDialog;

impl ConfirmClearDialog {
    pub fn show(&mut self, ctx: &egui::Context) -> DialogResult {
        let mut result = DialogResult::Open;

        egui::Window::new("Clear canvas?")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(
                    "The drawing canvas will be cleared. Consider saving it first \
                     — there is no undo.",
                );
                ui.add_space(4.0);
                ui.label(RichText::new("Clear the canvas?").strong());
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Yes, clear").clicked() {
                        result = DialogResult::Yes;
                    }
                    if ui.button("No").clicked() {
                        result = DialogResult::No;
                    }
                });
            });

        result
    }
}
