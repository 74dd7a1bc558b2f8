// GUI-subsystem binary: no console window is ever allocated on Windows.
#![windows_subsystem = "windows"]

use eframe::egui;
use whiteflat::app::{BOARD_HEIGHT, BOARD_WIDTH, WhiteboardApp};
use whiteflat::{APP_TITLE, logger};

fn main() -> Result<(), eframe::Error> {
    // Initialize session log (overwrites previous session log)
    logger::init();

    // Window sized around the fixed drawing canvas plus the tool and control
    // panels, and locked to that as the minimum.
    let window_size = [BOARD_WIDTH as f32 + 110.0, BOARD_HEIGHT as f32 + 90.0];
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(window_size)
            .with_min_inner_size(window_size)
            .with_title(APP_TITLE),
        ..Default::default()
    };

    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(|cc| Box::new(WhiteboardApp::new(cc))),
    )
}
