//! Application controller. All state lives here; panels only *produce*
//! [`Action`] values and [`WhiteboardApp::apply`] is the single place where
//! state is mutated, so every transition is testable without a display.

use eframe::egui;
use egui::{Color32, Sense, Stroke, Vec2};

use crate::board::Board;
use crate::components::dialogs::{ConfirmClearDialog, DialogResult};
use crate::components::notifications::{NotificationKind, Notifications};
use crate::components::palette::PalettePanel;
use crate::components::tools::{THICKNESS_RANGE, Tool, ToolState};
use crate::io::{self, FileHandler, SaveFormat};
use crate::postscript;
use crate::APP_TITLE;

/// Logical drawing-canvas size. The window is sized around it.
pub const BOARD_WIDTH: u32 = 940;
pub const BOARD_HEIGHT: u32 = 480;

/// Everything the UI can ask the controller to do. One entry per widget/event
/// pair; panels return these instead of reaching into state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Action {
    SetColor(Color32),
    SetThickness(f32),
    ToggleTool,
    Fill,
    ClearRequested,
    ClearConfirmed,
    ClearDeclined,
    SavePostscript,
    SaveImage,
    Snapshot,
    ToggleAbout,
}

pub struct WhiteboardApp {
    board: Board,
    tools: ToolState,
    palette: PalettePanel,
    notifications: Notifications,
    file_handler: FileHandler,
    /// Pending destructive-clear confirmation; at most one dialog is open.
    confirm_clear: Option<ConfirmClearDialog>,
    show_about: bool,
}

impl Default for WhiteboardApp {
    fn default() -> Self {
        Self {
            board: Board::new(BOARD_WIDTH, BOARD_HEIGHT),
            tools: ToolState::default(),
            palette: PalettePanel::default(),
            notifications: Notifications::default(),
            file_handler: FileHandler,
            confirm_clear: None,
            show_about: false,
        }
    }
}

impl WhiteboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        crate::log_info!("{} board: {}x{}", APP_TITLE, BOARD_WIDTH, BOARD_HEIGHT);
        Self::default()
    }

    // ========================================================================
    // ACTION DISPATCH — the only mutation path
    // ========================================================================

    pub fn apply(&mut self, action: Action) {
        // The clear confirmation is application-modal: while it is open,
        // only its own resolution gets through. The tool and control panels
        // keep rendering but their actions are dropped.
        if self.confirm_clear.is_some()
            && !matches!(action, Action::ClearConfirmed | Action::ClearDeclined)
        {
            return;
        }
        match action {
            Action::SetColor(color) => self.tools.set_color(color),
            Action::SetThickness(thickness) => self.tools.thickness = thickness,
            Action::ToggleTool => {
                let tool = self.tools.toggle(self.board.background());
                self.notifications.push(
                    NotificationKind::Switch,
                    format!("Drawing canvas is switched to '{} Mode'.", tool.label()),
                );
            }
            Action::Fill => {
                self.board.fill(self.tools.color);
                self.notifications.push(
                    NotificationKind::Info,
                    "Drawing canvas is filled with the selected color.",
                );
            }
            Action::ClearRequested => {
                // Nothing drawn yet: nothing to confirm, nothing to do.
                if self.board.is_dirty() {
                    self.confirm_clear = Some(ConfirmClearDialog);
                }
            }
            Action::ClearConfirmed => {
                self.confirm_clear = None;
                self.board.clear();
                self.notifications
                    .push(NotificationKind::Done, "Drawing canvas is cleared.");
            }
            Action::ClearDeclined => {
                self.confirm_clear = None;
            }
            Action::SavePostscript => self.save_postscript(),
            Action::SaveImage => self.save_image(),
            Action::Snapshot => self.take_snapshot(),
            Action::ToggleAbout => self.show_about = !self.show_about,
        }
    }

    fn save_postscript(&mut self) {
        // Dialog cancellation is a normal outcome: abort silently.
        let Some(path) = self.file_handler.pick_postscript_path() else {
            return;
        };
        match postscript::write(&self.board, &path) {
            Ok(()) => {
                crate::log_info!("saved PostScript to {}", path.display());
                self.notifications.push(
                    NotificationKind::Done,
                    format!("Canvas saved to {}.", path.display()),
                );
            }
            Err(e) => {
                crate::log_err!("PostScript save to {} failed: {}", path.display(), e);
                self.notifications.push(
                    NotificationKind::Error,
                    format!("Could not save PostScript file: {}.", e),
                );
            }
        }
    }

    fn save_image(&mut self) {
        let Some(path) = self.file_handler.pick_image_path() else {
            return;
        };
        match io::save_image(self.board.snapshot(), &path) {
            Ok(format) => {
                crate::log_info!(
                    "saved {} image to {}",
                    format.extension(),
                    path.display()
                );
                self.notifications.push(
                    NotificationKind::Done,
                    format!("Canvas saved to {}.", path.display()),
                );
            }
            Err(e) => {
                crate::log_err!("image save to {} failed: {}", path.display(), e);
                self.notifications
                    .push(NotificationKind::Error, format!("Could not save image: {}.", e));
            }
        }
    }

    fn take_snapshot(&mut self) {
        let path = io::snapshot_path(APP_TITLE);
        match io::encode_and_write(self.board.snapshot(), &path, SaveFormat::Png) {
            Ok(()) => {
                crate::log_info!("snapshot written to {}", path.display());
                self.notifications.push(
                    NotificationKind::Done,
                    format!("{}'s snapshot is saved to {}.", APP_TITLE, path.display()),
                );
            }
            Err(e) => {
                crate::log_err!("snapshot to {} failed: {}", path.display(), e);
                self.notifications.push(
                    NotificationKind::Error,
                    format!("Could not save snapshot: {}.", e),
                );
            }
        }
    }

    // ========================================================================
    // UI — panels produce actions, the canvas drives the board directly
    // ========================================================================

    fn tool_panel(&mut self, ui: &mut egui::Ui, actions: &mut Vec<Action>) {
        ui.add_space(8.0);
        if let Some(color) = self.palette.show(ui, self.tools.color) {
            actions.push(Action::SetColor(color));
        }

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(4.0);

        let toggle_label = match self.tools.tool {
            Tool::Pencil => "Eraser",
            Tool::Eraser => "Pencil",
        };
        if ui
            .button(toggle_label)
            .on_hover_text("Toggle pencil / eraser")
            .clicked()
        {
            actions.push(Action::ToggleTool);
        }
        if ui
            .button("Fill")
            .on_hover_text("Fill the canvas background with the current color")
            .clicked()
        {
            actions.push(Action::Fill);
        }
        if ui
            .button("Clear")
            .on_hover_text("Clear the whole canvas")
            .clicked()
        {
            actions.push(Action::ClearRequested);
        }
    }

    fn control_panel(&mut self, ui: &mut egui::Ui, actions: &mut Vec<Action>) {
        ui.horizontal(|ui| {
            // Foreground / background indicators.
            color_indicator(ui, self.tools.color, "Foreground color");
            color_indicator(ui, self.board.background(), "Background color");
            ui.add_space(8.0);

            let mut thickness = self.tools.thickness;
            let slider = ui.add(
                egui::Slider::new(&mut thickness, THICKNESS_RANGE)
                    .text("Thickness")
                    .fixed_decimals(0),
            );
            if slider.changed() {
                actions.push(Action::SetThickness(thickness));
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("About").clicked() {
                    actions.push(Action::ToggleAbout);
                }
                ui.separator();
                if ui
                    .button("Save As")
                    .on_hover_text("Save the canvas as a PNG/JPG/BMP image")
                    .clicked()
                {
                    actions.push(Action::SaveImage);
                }
                if ui
                    .button("Save")
                    .on_hover_text("Save the canvas to a PostScript file")
                    .clicked()
                {
                    actions.push(Action::SavePostscript);
                }
                if ui
                    .button("Snapshot")
                    .on_hover_text("Save a snapshot PNG to your Pictures folder")
                    .clicked()
                {
                    actions.push(Action::Snapshot);
                }
            });
        });
    }

    fn canvas(&mut self, ui: &mut egui::Ui) {
        let size = Vec2::new(BOARD_WIDTH as f32, BOARD_HEIGHT as f32);
        let (response, painter) = ui.allocate_painter(size, Sense::click_and_drag());
        let origin = response.rect.min;

        painter.rect_filled(response.rect, 0.0, self.board.background());
        for seg in self.board.segments() {
            painter.line_segment(
                [origin + seg.from.to_vec2(), origin + seg.to.to_vec2()],
                Stroke::new(seg.width.max(0.5), seg.color),
            );
        }
        painter.rect_stroke(
            response.rect,
            0.0,
            ui.visuals().widgets.noninteractive.bg_stroke,
        );

        // Input gating: no drawing while the clear confirmation is up.
        if self.confirm_clear.is_some() {
            return;
        }

        let local = |pos: egui::Pos2| (pos - origin).to_pos2();
        if response.drag_started() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.board.press(local(pos));
            }
        } else if response.dragged() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.board
                    .stroke_to(local(pos), self.tools.color, self.tools.thickness);
            }
        }
        if response.secondary_clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.board
                    .connect_to(local(pos), self.tools.color, self.tools.thickness);
            }
        }
    }

    fn about_window(&mut self, ctx: &egui::Context) {
        let mut open = self.show_about;
        egui::Window::new(format!("About {}", APP_TITLE))
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.heading(APP_TITLE);
                ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                ui.label("A single-window whiteboard for quick freehand sketches.");
            });
        self.show_about = open;
    }
}

fn color_indicator(ui: &mut egui::Ui, color: Color32, hover: &str) {
    let (rect, resp) = ui.allocate_exact_size(Vec2::splat(16.0), Sense::hover());
    if ui.is_rect_visible(rect) {
        let p = ui.painter();
        p.rect_filled(rect, 3.0, color);
        p.rect_stroke(
            rect,
            3.0,
            Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color),
        );
    }
    resp.on_hover_text(hover);
}

impl eframe::App for WhiteboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut actions = Vec::new();

        egui::SidePanel::left("tool_panel")
            .resizable(false)
            .exact_width(56.0)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| self.tool_panel(ui, &mut actions));
            });

        egui::TopBottomPanel::bottom("control_panel")
            .exact_height(40.0)
            .show(ctx, |ui| self.control_panel(ui, &mut actions));

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.centered_and_justified(|ui| self.canvas(ui));
        });

        // Pending clear confirmation resolves to exactly one action.
        if let Some(dialog) = &mut self.confirm_clear {
            match dialog.show(ctx) {
                DialogResult::Open => {}
                DialogResult::Yes => actions.push(Action::ClearConfirmed),
                DialogResult::No => actions.push(Action::ClearDeclined),
            }
        }

        if self.show_about {
            self.about_window(ctx);
        }

        for action in actions {
            self.apply(action);
        }

        self.notifications.show(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn app_with_one_stroke() -> WhiteboardApp {
        let mut app = WhiteboardApp::default();
        app.board.press(pos2(10.0, 10.0));
        app.board.stroke_to(pos2(50.0, 50.0), Color32::BLACK, 3.0);
        app
    }

    #[test]
    fn clear_on_a_clean_canvas_is_a_silent_no_op() {
        let mut app = WhiteboardApp::default();
        app.apply(Action::ClearRequested);
        assert!(app.confirm_clear.is_none());
        assert!(app.notifications.is_empty());
        assert!(!app.board.is_dirty());
    }

    #[test]
    fn clear_with_drawing_waits_for_confirmation() {
        let mut app = app_with_one_stroke();
        app.apply(Action::ClearRequested);
        assert!(app.confirm_clear.is_some());
        // Still nothing cleared until the dialog resolves.
        assert_eq!(app.board.segments().len(), 1);
    }

    #[test]
    fn declining_the_clear_leaves_everything_intact() {
        let mut app = app_with_one_stroke();
        app.apply(Action::ClearRequested);
        app.apply(Action::ClearDeclined);
        assert!(app.confirm_clear.is_none());
        assert_eq!(app.board.segments().len(), 1);
        assert!(app.board.is_dirty());
    }

    #[test]
    fn confirming_the_clear_resets_the_board() {
        let mut app = app_with_one_stroke();
        app.apply(Action::Fill);
        app.apply(Action::ClearRequested);
        app.apply(Action::ClearConfirmed);
        assert!(app.board.segments().is_empty());
        assert!(!app.board.is_dirty());
        assert_eq!(app.board.background(), crate::board::DEFAULT_BACKGROUND);
    }

    #[test]
    fn panels_are_inert_while_the_clear_confirmation_is_open() {
        let mut app = app_with_one_stroke();
        app.apply(Action::ClearRequested);
        // Fill, a second clear request, and tool changes all bounce off.
        app.apply(Action::Fill);
        app.apply(Action::ToggleTool);
        app.apply(Action::SetColor(Color32::RED));
        assert_eq!(app.board.background(), crate::board::DEFAULT_BACKGROUND);
        assert_eq!(app.tools.tool, Tool::Pencil);
        assert_ne!(app.tools.color, Color32::RED);
        // The dialog itself still resolves.
        app.apply(Action::ClearConfirmed);
        assert!(app.board.segments().is_empty());
    }

    #[test]
    fn fill_uses_the_foreground_color_and_marks_dirty() {
        let mut app = WhiteboardApp::default();
        app.apply(Action::SetColor(Color32::RED));
        app.apply(Action::Fill);
        assert_eq!(app.board.background(), Color32::RED);
        assert!(app.board.is_dirty());
        assert!(app.board.segments().is_empty());
    }

    #[test]
    fn toggle_announces_the_mode_switch() {
        let mut app = WhiteboardApp::default();
        app.apply(Action::ToggleTool);
        assert_eq!(app.tools.tool, Tool::Eraser);
        assert!(!app.notifications.is_empty());
    }

    #[test]
    fn eraser_round_trip_through_actions() {
        let mut app = WhiteboardApp::default();
        app.apply(Action::SetColor(Color32::BLUE));
        app.apply(Action::SetThickness(20.0));
        app.apply(Action::ToggleTool);
        app.apply(Action::ToggleTool);
        assert_eq!(app.tools.color, Color32::BLUE);
        assert_eq!(app.tools.thickness, 20.0);
    }
}
