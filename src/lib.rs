//! WhiteFLAT — a single-window whiteboard: freehand pencil/eraser drawing on
//! a canvas with a color palette, thickness slider, PostScript and image
//! export, and snapshots to the user's Pictures folder.

pub mod app;
pub mod board;
pub mod components;
pub mod io;
pub mod logger;
pub mod postscript;

/// Window title; also embedded in snapshot filenames.
pub const APP_TITLE: &str = "WhiteFLAT";
