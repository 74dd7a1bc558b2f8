//! Minimal color PostScript export of the segment list — the vector-side
//! counterpart of the raster mirror. Rendering is a pure string producer so
//! the output can be checked without touching the filesystem.

use std::io::Write;
use std::path::Path;

use egui::Color32;

use crate::board::Board;

/// Render the board as an EPS document.
///
/// PostScript's origin is bottom-left with y growing upwards, so every y
/// coordinate is flipped against the board height. Round caps (`1 setlinecap`)
/// match the on-screen stroke style.
pub fn render(board: &Board) -> String {
    let (width, height) = board.size();
    let mut ps = String::new();

    ps.push_str("%!PS-Adobe-3.0 EPSF-3.0\n");
    ps.push_str(&format!("%%BoundingBox: 0 0 {} {}\n", width, height));
    ps.push_str("%%EndComments\n");
    ps.push_str("1 setlinecap\n1 setlinejoin\n");

    // Background rectangle first so strokes paint over it.
    ps.push_str(&format!("{}\n", rgb(board.background())));
    ps.push_str(&format!(
        "newpath 0 0 moveto {w} 0 lineto {w} {h} lineto 0 {h} lineto closepath fill\n",
        w = width,
        h = height
    ));

    for seg in board.segments() {
        ps.push_str(&format!(
            "{} {:.2} setlinewidth newpath {:.2} {:.2} moveto {:.2} {:.2} lineto stroke\n",
            rgb(seg.color),
            seg.width.max(0.5),
            seg.from.x,
            height as f32 - seg.from.y,
            seg.to.x,
            height as f32 - seg.to.y,
        ));
    }

    ps.push_str("showpage\n%%EOF\n");
    ps
}

/// Render and write the document to `path`.
pub fn write(board: &Board, path: &Path) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(render(board).as_bytes())
}

fn rgb(color: Color32) -> String {
    format!(
        "{:.3} {:.3} {:.3} setrgbcolor",
        color.r() as f32 / 255.0,
        color.g() as f32 / 255.0,
        color.b() as f32 / 255.0
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn document_structure_is_well_formed() {
        let board = Board::new(200, 100);
        let ps = render(&board);
        assert!(ps.starts_with("%!PS-Adobe-3.0 EPSF-3.0\n"));
        assert!(ps.contains("%%BoundingBox: 0 0 200 100"));
        assert!(ps.ends_with("showpage\n%%EOF\n"));
    }

    #[test]
    fn one_stroke_group_per_segment_with_flipped_y() {
        let mut board = Board::new(200, 100);
        board.press(pos2(10.0, 20.0));
        board.stroke_to(pos2(50.0, 40.0), Color32::RED, 4.0);
        let ps = render(&board);

        assert_eq!(ps.matches(" lineto stroke").count(), 1);
        assert!(ps.contains("1.000 0.000 0.000 setrgbcolor 4.00 setlinewidth"));
        // y = 20 flips to 80, y = 40 flips to 60.
        assert!(ps.contains("10.00 80.00 moveto 50.00 60.00 lineto stroke"));
    }

    #[test]
    fn background_fill_uses_the_board_background() {
        let mut board = Board::new(100, 100);
        board.fill(Color32::BLACK);
        let ps = render(&board);
        assert!(ps.contains("0.000 0.000 0.000 setrgbcolor\nnewpath 0 0 moveto"));
    }
}
